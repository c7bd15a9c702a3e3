//! 活动存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::{EventActiveModel, EventParticipations, Events};
use crate::entity::{event_participations, events, to_micros};
use crate::errors::{DRLSystemError, Result};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    actors::entities::{ActorRef, Student},
    events::{
        entities::{Event, EventScope, NewEvent, ParticipationStatus},
        requests::EventListQuery,
    },
    scores::entities::ApprovalStatus,
};
use crate::utils::sql::contains_pattern;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    pub async fn count_events_with_code_prefix_impl(&self, prefix: &str) -> Result<u64> {
        Events::find()
            .filter(events::Column::EventCode.starts_with(prefix))
            .count(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("统计活动失败: {e}")))
    }

    pub async fn create_event_impl(&self, event: NewEvent, now: DateTime<Utc>) -> Result<Event> {
        let now = to_micros(now);
        let (approved_by_kind, approved_by_id) = ActorRef::into_columns(event.approval.approved_by);
        let (created_by_kind, created_by_id) = ActorRef::into_columns(Some(event.created_by));

        let model = EventActiveModel {
            event_code: Set(event.event_code),
            event_name: Set(event.event_name),
            description: Set(event.description),
            criteria_id: Set(event.criteria_id),
            score: Set(event.score),
            event_date: Set(to_micros(event.event_date)),
            end_date: Set(event.end_date.map(to_micros)),
            semester_id: Set(event.semester_id),
            organizer_type: Set(event.organizer_type.to_string()),
            scope: Set(event.scope.to_string()),
            target_class_id: Set(event.target_class_id),
            target_faculty_id: Set(event.target_faculty_id),
            max_participants: Set(event.max_participants),
            location: Set(event.location),
            approval_status: Set(event.approval.status.to_string()),
            approved_by_kind: Set(approved_by_kind),
            approved_by_id: Set(approved_by_id),
            approved_at: Set(event.approval.approved_at.map(to_micros)),
            rejection_reason: Set(None),
            created_by_kind: Set(created_by_kind),
            created_by_id: Set(created_by_id),
            is_active: Set(true),
            attendance_password: Set(event.attendance_password),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("创建活动失败: {e}")))?;

        Ok(result.into_event())
    }

    pub async fn get_event_by_id_impl(&self, id: i64) -> Result<Option<Event>> {
        let result = Events::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.map(|m| m.into_event()))
    }

    /// 分页列出活动
    pub async fn list_events_impl(&self, query: EventListQuery) -> Result<PaginatedResponse<Event>> {
        let (page, size) = query.pagination.normalized();

        let mut select = Events::find();

        if let Some(semester_id) = query.semester_id {
            select = select.filter(events::Column::SemesterId.eq(semester_id));
        }
        if let Some(status) = query.approval_status {
            select = select.filter(events::Column::ApprovalStatus.eq(status.to_string()));
        }
        if let Some(scope) = query.scope {
            select = select.filter(events::Column::Scope.eq(scope.to_string()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(events::Column::EventName.like(contains_pattern(search.trim())));
        }

        select = select.order_by_desc(events::Column::EventDate);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询活动总数失败: {e}")))?;

        let items = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询活动列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: items.into_iter().map(|m| m.into_event()).collect(),
            pagination: PaginationInfo::new(page, size, total),
        })
    }

    /// 学生可见的活动：全校、本院、本班，最新的在前
    pub async fn list_available_events_impl(
        &self,
        student: &Student,
        semester_id: Option<i64>,
    ) -> Result<Vec<Event>> {
        let scope = Condition::any()
            .add(events::Column::Scope.eq(EventScope::University.to_string()))
            .add(
                Condition::all()
                    .add(events::Column::Scope.eq(EventScope::Faculty.to_string()))
                    .add(events::Column::TargetFacultyId.eq(student.faculty_id)),
            )
            .add(
                Condition::all()
                    .add(events::Column::Scope.eq(EventScope::Class.to_string()))
                    .add(events::Column::TargetClassId.eq(student.class_id)),
            );

        let mut select = Events::find()
            .filter(events::Column::IsActive.eq(true))
            .filter(events::Column::ApprovalStatus.eq(ApprovalStatus::Approved.to_string()))
            .filter(scope);

        if let Some(semester_id) = semester_id {
            select = select.filter(events::Column::SemesterId.eq(semester_id));
        }

        let result = select
            .order_by_desc(events::Column::EventDate)
            .all(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询可报名活动失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_event()).collect())
    }

    /// 整行保存活动（编码与创建信息不变）
    pub async fn update_event_impl(&self, event: Event, now: DateTime<Utc>) -> Result<Event> {
        let (approved_by_kind, approved_by_id) = ActorRef::into_columns(event.approved_by);

        let model = EventActiveModel {
            id: Set(event.id),
            event_name: Set(event.event_name),
            description: Set(event.description),
            criteria_id: Set(event.criteria_id),
            score: Set(event.score),
            event_date: Set(to_micros(event.event_date)),
            end_date: Set(event.end_date.map(to_micros)),
            semester_id: Set(event.semester_id),
            organizer_type: Set(event.organizer_type.to_string()),
            scope: Set(event.scope.to_string()),
            target_class_id: Set(event.target_class_id),
            target_faculty_id: Set(event.target_faculty_id),
            max_participants: Set(event.max_participants),
            location: Set(event.location),
            approval_status: Set(event.approval_status.to_string()),
            approved_by_kind: Set(approved_by_kind),
            approved_by_id: Set(approved_by_id),
            approved_at: Set(event.approved_at.map(to_micros)),
            rejection_reason: Set(event.rejection_reason),
            is_active: Set(event.is_active),
            updated_at: Set(to_micros(now)),
            ..Default::default()
        };

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("更新活动失败: {e}")))?;

        Ok(result.into_event())
    }

    /// 删除活动及其参与记录
    pub async fn delete_event_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("开启事务失败: {e}")))?;

        EventParticipations::delete_many()
            .filter(event_participations::Column::EventId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("删除活动参与记录失败: {e}")))?;

        let result = Events::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("删除活动失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 停用活动并作废其全部参与记录，返回更新后的活动和作废条数
    pub async fn cancel_event_impl(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<Option<(Event, u64)>> {
        let now = to_micros(now);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = Events::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询活动失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.is_active = Set(false);
        model.updated_at = Set(now);
        let event = model
            .update(&txn)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("取消活动失败: {e}")))?;

        let result = EventParticipations::update_many()
            .col_expr(
                event_participations::Column::Status,
                Expr::value(ParticipationStatus::Cancelled.to_string()),
            )
            .col_expr(event_participations::Column::UpdatedAt, Expr::value(now))
            .filter(event_participations::Column::EventId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("作废活动参与记录失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some((event.into_event(), result.rows_affected)))
    }

    /// 全部已审批的有效活动，按活动日期倒序
    pub async fn list_open_events_impl(&self) -> Result<Vec<Event>> {
        let result = Events::find()
            .filter(events::Column::IsActive.eq(true))
            .filter(events::Column::ApprovalStatus.eq(ApprovalStatus::Approved.to_string()))
            .order_by_desc(events::Column::EventDate)
            .all(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_event()).collect())
    }

    pub async fn list_events_between_impl(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Event>> {
        let result = Events::find()
            .filter(events::Column::IsActive.eq(true))
            .filter(events::Column::ApprovalStatus.eq(ApprovalStatus::Approved.to_string()))
            .filter(events::Column::EventDate.gte(to_micros(from)))
            .filter(events::Column::EventDate.lt(to_micros(to)))
            .order_by_asc(events::Column::EventDate)
            .all(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询活动失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_event()).collect())
    }
}
