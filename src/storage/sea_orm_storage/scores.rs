//! 自评分数存储操作

use super::SeaOrmStorage;
use crate::entity::prelude::{ManualScoreActiveModel, ManualScoreModel, ManualScores};
use crate::entity::{manual_scores, to_micros};
use crate::errors::{DRLSystemError, Result};
use crate::models::actors::entities::ActorRef;
use crate::models::scores::entities::{
    ApprovalStatus, Evidence, ManualScore, ManualScoreKey, ScoreReview,
};
use crate::models::semesters::entities::Semester;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    pub async fn list_manual_scores_impl(
        &self,
        student_id: i64,
        semester: &Semester,
    ) -> Result<Vec<ManualScore>> {
        self.list_manual_scores_for_students_impl(&[student_id], semester)
            .await
    }

    /// 一次查询多名学生的自评分数
    pub async fn list_manual_scores_for_students_impl(
        &self,
        student_ids: &[i64],
        semester: &Semester,
    ) -> Result<Vec<ManualScore>> {
        if student_ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = ManualScores::find()
            .filter(manual_scores::Column::StudentId.is_in(student_ids.iter().copied()))
            .filter(manual_scores::Column::SemesterNumber.eq(semester.semester_number))
            .filter(manual_scores::Column::AcademicYear.eq(semester.academic_year.as_str()))
            .order_by_asc(manual_scores::Column::StudentId)
            .order_by_asc(manual_scores::Column::CriteriaId)
            .all(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询自评分数失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_manual_score()).collect())
    }

    async fn find_manual_score_model(&self, key: &ManualScoreKey) -> Result<Option<ManualScoreModel>> {
        ManualScores::find()
            .filter(manual_scores::Column::StudentId.eq(key.student_id))
            .filter(manual_scores::Column::CriteriaId.eq(key.criteria_id))
            .filter(manual_scores::Column::SemesterNumber.eq(key.semester_number))
            .filter(manual_scores::Column::AcademicYear.eq(key.academic_year.as_str()))
            .one(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询自评分数失败: {e}")))
    }

    /// 学生提交自评：存在则覆盖并重置为待审批，审批分数保留
    pub async fn upsert_self_score_impl(
        &self,
        key: ManualScoreKey,
        self_score: f64,
        evidence: Vec<Evidence>,
        now: DateTime<Utc>,
    ) -> Result<ManualScore> {
        let now = to_micros(now);
        let evidence = serde_json::to_string(&evidence)?;

        let result = match self.find_manual_score_model(&key).await? {
            Some(existing) => {
                let mut model = existing.into_active_model();
                model.self_score = Set(self_score);
                model.evidence = Set(evidence);
                model.approval_status = Set(ApprovalStatus::Pending.to_string());
                model.rejection_reason = Set(None);
                model.updated_at = Set(now);
                model.update(&self.db).await
            }
            None => {
                ManualScoreActiveModel {
                    student_id: Set(key.student_id),
                    criteria_id: Set(key.criteria_id),
                    semester_number: Set(key.semester_number),
                    academic_year: Set(key.academic_year),
                    self_score: Set(self_score),
                    evidence: Set(evidence),
                    approval_status: Set(ApprovalStatus::Pending.to_string()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
            }
        }
        .map_err(|e| DRLSystemError::database_operation(format!("保存自评分数失败: {e}")))?;

        Ok(result.into_manual_score())
    }

    /// 团支书审核：批准时不存在则以自评 0 分新建，驳回要求记录已存在
    pub async fn review_manual_score_impl(
        &self,
        key: ManualScoreKey,
        review: ScoreReview,
        reviewer: ActorRef,
        now: DateTime<Utc>,
    ) -> Result<ManualScore> {
        let now = to_micros(now);
        let (reviewer_kind, reviewer_id) = ActorRef::into_columns(Some(reviewer));
        let existing = self.find_manual_score_model(&key).await?;

        let result = match (existing, review) {
            (
                Some(existing),
                ScoreReview::Approve {
                    approved_score,
                    note,
                },
            ) => {
                let mut model = existing.into_active_model();
                model.approval_status = Set(ApprovalStatus::Approved.to_string());
                model.approved_score = Set(Some(approved_score));
                model.rejection_reason = Set(None);
                if let Some(note) = note {
                    model.description = Set(Some(note));
                }
                model.approved_by_kind = Set(reviewer_kind);
                model.approved_by_id = Set(reviewer_id);
                model.approved_at = Set(Some(now));
                model.updated_at = Set(now);
                model.update(&self.db).await
            }
            (
                None,
                ScoreReview::Approve {
                    approved_score,
                    note,
                },
            ) => {
                ManualScoreActiveModel {
                    student_id: Set(key.student_id),
                    criteria_id: Set(key.criteria_id),
                    semester_number: Set(key.semester_number),
                    academic_year: Set(key.academic_year),
                    self_score: Set(0.0),
                    evidence: Set("[]".to_string()),
                    approval_status: Set(ApprovalStatus::Approved.to_string()),
                    approved_score: Set(Some(approved_score)),
                    approved_by_kind: Set(reviewer_kind),
                    approved_by_id: Set(reviewer_id),
                    approved_at: Set(Some(now)),
                    description: Set(note),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&self.db)
                .await
            }
            (Some(existing), ScoreReview::Reject { reason }) => {
                let mut model = existing.into_active_model();
                model.approval_status = Set(ApprovalStatus::Rejected.to_string());
                model.rejection_reason = Set(Some(reason));
                model.approved_by_kind = Set(reviewer_kind);
                model.approved_by_id = Set(reviewer_id);
                model.approved_at = Set(Some(now));
                model.updated_at = Set(now);
                model.update(&self.db).await
            }
            (None, ScoreReview::Reject { .. }) => {
                return Err(DRLSystemError::not_found("自评记录不存在"));
            }
        }
        .map_err(|e| DRLSystemError::database_operation(format!("审核自评分数失败: {e}")))?;

        Ok(result.into_manual_score())
    }
}
