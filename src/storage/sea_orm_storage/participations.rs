//! 活动参与存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::{EventParticipationActiveModel, EventParticipations, Events, Students};
use crate::engine::participation::occupies_seat;
use crate::entity::{event_participations, events, to_micros};
use crate::errors::{DRLSystemError, Result};
use crate::models::events::entities::{
    AttendanceMark, EventParticipant, EventParticipation, EventParticipationDetail,
    ParticipationStatus,
};
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn get_participation_impl(
        &self,
        event_id: i64,
        student_id: i64,
    ) -> Result<Option<EventParticipation>> {
        let result = EventParticipations::find()
            .filter(event_participations::Column::EventId.eq(event_id))
            .filter(event_participations::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询参与记录失败: {e}")))?;

        Ok(result.map(|m| m.into_participation()))
    }

    /// 占用名额的参与记录数（已报名与已出席）
    pub async fn count_occupied_seats_impl(&self, event_id: i64) -> Result<u64> {
        EventParticipations::find()
            .filter(event_participations::Column::EventId.eq(event_id))
            .filter(
                event_participations::Column::Status.is_in(
                    ParticipationStatus::ALL
                        .iter()
                        .filter(|status| occupies_seat(**status))
                        .map(|status| status.to_string()),
                ),
            )
            .count(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("统计报名人数失败: {e}")))
    }

    pub async fn count_attended_participations_impl(&self) -> Result<u64> {
        EventParticipations::find()
            .filter(
                event_participations::Column::Status.eq(ParticipationStatus::Attended.to_string()),
            )
            .count(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("统计出勤人次失败: {e}")))
    }

    pub async fn create_participation_impl(
        &self,
        event_id: i64,
        student_id: i64,
        now: DateTime<Utc>,
    ) -> Result<EventParticipation> {
        let now = to_micros(now);

        let model = EventParticipationActiveModel {
            event_id: Set(event_id),
            student_id: Set(student_id),
            status: Set(ParticipationStatus::Registered.to_string()),
            registered_at: Set(now),
            attended_at: Set(None),
            score_received: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("报名活动失败: {e}")))?;

        Ok(result.into_participation())
    }

    pub async fn delete_participation_impl(&self, id: i64) -> Result<bool> {
        let result = EventParticipations::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("取消报名失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 写入考勤结果，出席时同时记录签到时间
    pub async fn mark_participation_impl(
        &self,
        id: i64,
        mark: AttendanceMark,
    ) -> Result<Option<EventParticipation>> {
        let existing = EventParticipations::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询参与记录失败: {e}")))?;

        if existing.is_none() {
            return Ok(None);
        }

        let at = to_micros(mark.at);
        let mut model = EventParticipationActiveModel {
            id: Set(id),
            status: Set(mark.status.to_string()),
            updated_at: Set(at),
            ..Default::default()
        };

        if mark.status == ParticipationStatus::Attended {
            model.attended_at = Set(Some(at));
        }
        if let Some(score) = mark.score_received {
            model.score_received = Set(Some(score));
        }

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("登记考勤失败: {e}")))?;

        Ok(Some(result.into_participation()))
    }

    pub async fn list_event_participants_impl(&self, event_id: i64) -> Result<Vec<EventParticipant>> {
        let rows = EventParticipations::find()
            .filter(event_participations::Column::EventId.eq(event_id))
            .order_by_asc(event_participations::Column::RegisteredAt)
            .find_also_related(Students)
            .all(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询活动参与者失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(participation, student)| {
                student.map(|s| EventParticipant {
                    participation: participation.into_participation(),
                    student: s.into_student(),
                })
            })
            .collect())
    }

    pub async fn list_student_participations_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<EventParticipationDetail>> {
        self.find_participation_details(&[student_id], None).await
    }

    pub async fn list_scoring_participations_impl(
        &self,
        student_id: i64,
    ) -> Result<Vec<EventParticipationDetail>> {
        self.list_scoring_participations_for_students_impl(&[student_id])
            .await
    }

    /// 一次查询多名学生计分用的参与记录
    pub async fn list_scoring_participations_for_students_impl(
        &self,
        student_ids: &[i64],
    ) -> Result<Vec<EventParticipationDetail>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.find_participation_details(
            student_ids,
            Some(&[ParticipationStatus::Registered, ParticipationStatus::Attended]),
        )
        .await
    }

    async fn find_participation_details(
        &self,
        student_ids: &[i64],
        statuses: Option<&[ParticipationStatus]>,
    ) -> Result<Vec<EventParticipationDetail>> {
        let mut select = EventParticipations::find()
            .filter(event_participations::Column::StudentId.is_in(student_ids.iter().copied()));

        if let Some(statuses) = statuses {
            select = select.filter(
                event_participations::Column::Status
                    .is_in(statuses.iter().map(|s| s.to_string())),
            );
        }

        let rows = select
            .find_also_related(Events)
            .order_by_desc(events::Column::EventDate)
            .all(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询参与记录失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(participation, event)| {
                event.map(|e| EventParticipationDetail {
                    participation: participation.into_participation(),
                    event: e.into_event(),
                })
            })
            .collect())
    }
}
