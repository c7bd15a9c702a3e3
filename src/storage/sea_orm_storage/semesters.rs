//! 学期存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::{SemesterActiveModel, Semesters};
use crate::entity::{semesters, to_micros};
use crate::errors::{DRLSystemError, Result};
use crate::models::semesters::{
    entities::Semester,
    requests::{CreateSemesterRequest, UpdateSemesterRequest},
};
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 按学年、学期倒序
    pub async fn list_semesters_impl(&self) -> Result<Vec<Semester>> {
        let result = Semesters::find()
            .order_by_desc(semesters::Column::AcademicYear)
            .order_by_desc(semesters::Column::SemesterNumber)
            .all(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询学期列表失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_semester()).collect())
    }

    pub async fn get_semester_by_id_impl(&self, id: i64) -> Result<Option<Semester>> {
        let result = Semesters::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询学期失败: {e}")))?;

        Ok(result.map(|m| m.into_semester()))
    }

    pub async fn find_current_semester_impl(&self, now: DateTime<Utc>) -> Result<Option<Semester>> {
        let now = to_micros(now);
        let result = Semesters::find()
            .filter(semesters::Column::IsActive.eq(true))
            .filter(semesters::Column::StartDate.lte(now))
            .filter(semesters::Column::EndDate.gte(now))
            .order_by_desc(semesters::Column::StartDate)
            .one(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询当前学期失败: {e}")))?;

        Ok(result.map(|m| m.into_semester()))
    }

    pub async fn find_semester_impl(
        &self,
        semester_number: i32,
        academic_year: &str,
    ) -> Result<Option<Semester>> {
        let result = Semesters::find()
            .filter(semesters::Column::SemesterNumber.eq(semester_number))
            .filter(semesters::Column::AcademicYear.eq(academic_year))
            .one(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询学期失败: {e}")))?;

        Ok(result.map(|m| m.into_semester()))
    }

    pub async fn create_semester_impl(
        &self,
        req: CreateSemesterRequest,
        grading_deadline: Option<DateTime<Utc>>,
    ) -> Result<Semester> {
        let now = to_micros(chrono::Utc::now());

        let model = SemesterActiveModel {
            semester_number: Set(req.semester_number),
            academic_year: Set(req.academic_year),
            start_date: Set(to_micros(req.start_date)),
            end_date: Set(to_micros(req.end_date)),
            grading_start_date: Set(req.grading_start_date.map(to_micros)),
            grading_deadline: Set(grading_deadline.map(to_micros)),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("创建学期失败: {e}")))?;

        Ok(result.into_semester())
    }

    /// `grading_deadline` 为 Some 时覆盖原截止日期
    pub async fn update_semester_impl(
        &self,
        id: i64,
        update: UpdateSemesterRequest,
        grading_deadline: Option<DateTime<Utc>>,
    ) -> Result<Option<Semester>> {
        if self.get_semester_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = SemesterActiveModel {
            id: Set(id),
            updated_at: Set(to_micros(chrono::Utc::now())),
            ..Default::default()
        };

        if let Some(start_date) = update.start_date {
            model.start_date = Set(to_micros(start_date));
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(to_micros(end_date));
        }
        if let Some(grading_start) = update.grading_start_date {
            model.grading_start_date = Set(Some(to_micros(grading_start)));
        }
        if let Some(deadline) = grading_deadline {
            model.grading_deadline = Set(Some(to_micros(deadline)));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("更新学期失败: {e}")))?;

        self.get_semester_by_id_impl(id).await
    }
}
