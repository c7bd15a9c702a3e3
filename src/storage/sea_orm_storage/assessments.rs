//! 学生测评存储操作
//!
//! 审批类操作在事务内重新统计完成度，统计不满足时不写入任何数据。

use super::SeaOrmStorage;
use crate::engine::workflow::{
    check_class_approval, check_class_finalize, check_faculty_finalization,
};
use crate::entity::prelude::{Classes, StudentAssessmentActiveModel, StudentAssessments, Students};
use crate::entity::{classes, student_assessments, students, to_micros};
use crate::errors::{DRLSystemError, Result};
use crate::models::actors::entities::ActorRef;
use crate::models::assessments::entities::{
    ApprovalOutcome, AssessmentStatus, Classification, FinalizeOutcome, ReviewCounts,
    StudentAssessment,
};
use crate::models::semesters::entities::Semester;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
    sea_query::{Expr, JoinType},
};

/// 班级中在读学生的 id
async fn active_student_ids<C: ConnectionTrait>(conn: &C, class_ids: &[i64]) -> Result<Vec<i64>> {
    Students::find()
        .select_only()
        .column(students::Column::Id)
        .filter(students::Column::ClassId.is_in(class_ids.iter().copied()))
        .filter(students::Column::IsActive.eq(true))
        .into_tuple::<i64>()
        .all(conn)
        .await
        .map_err(|e| DRLSystemError::database_operation(format!("查询班级学生失败: {e}")))
}

async fn count_in_statuses<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
    semester: &Semester,
    statuses: &[AssessmentStatus],
) -> Result<u64> {
    StudentAssessments::find()
        .join(JoinType::InnerJoin, student_assessments::Relation::Student.def())
        .filter(students::Column::ClassId.eq(class_id))
        .filter(students::Column::IsActive.eq(true))
        .filter(student_assessments::Column::SemesterNumber.eq(semester.semester_number))
        .filter(student_assessments::Column::AcademicYear.eq(semester.academic_year.as_str()))
        .filter(student_assessments::Column::Status.is_in(statuses.iter().map(|s| s.to_string())))
        .count(conn)
        .await
        .map_err(|e| DRLSystemError::database_operation(format!("统计测评进度失败: {e}")))
}

async fn review_counts_on<C: ConnectionTrait>(
    conn: &C,
    class_id: i64,
    semester: &Semester,
) -> Result<ReviewCounts> {
    let students = Students::find()
        .filter(students::Column::ClassId.eq(class_id))
        .filter(students::Column::IsActive.eq(true))
        .count(conn)
        .await
        .map_err(|e| DRLSystemError::database_operation(format!("统计班级人数失败: {e}")))?;

    let class_reviewed = count_in_statuses(
        conn,
        class_id,
        semester,
        AssessmentStatus::class_reviewed_or_later(),
    )
    .await?;
    let faculty_reviewed = count_in_statuses(
        conn,
        class_id,
        semester,
        AssessmentStatus::faculty_reviewed_or_later(),
    )
    .await?;

    Ok(ReviewCounts {
        students,
        class_reviewed,
        faculty_reviewed,
    })
}

async fn find_assessment_model<C: ConnectionTrait>(
    conn: &C,
    student_id: i64,
    semester: &Semester,
) -> Result<Option<student_assessments::Model>> {
    StudentAssessments::find()
        .filter(student_assessments::Column::StudentId.eq(student_id))
        .filter(student_assessments::Column::SemesterNumber.eq(semester.semester_number))
        .filter(student_assessments::Column::AcademicYear.eq(semester.academic_year.as_str()))
        .one(conn)
        .await
        .map_err(|e| DRLSystemError::database_operation(format!("查询测评失败: {e}")))
}

impl SeaOrmStorage {
    pub async fn get_assessment_impl(
        &self,
        student_id: i64,
        semester: &Semester,
    ) -> Result<Option<StudentAssessment>> {
        Ok(find_assessment_model(&self.db, student_id, semester)
            .await?
            .map(|m| m.into_assessment()))
    }

    pub async fn list_class_assessments_impl(
        &self,
        class_id: i64,
        semester: &Semester,
    ) -> Result<Vec<StudentAssessment>> {
        let result = StudentAssessments::find()
            .join(JoinType::InnerJoin, student_assessments::Relation::Student.def())
            .filter(students::Column::ClassId.eq(class_id))
            .filter(student_assessments::Column::SemesterNumber.eq(semester.semester_number))
            .filter(student_assessments::Column::AcademicYear.eq(semester.academic_year.as_str()))
            .order_by_asc(students::Column::StudentCode)
            .all(&self.db)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询班级测评失败: {e}")))?;

        Ok(result.into_iter().map(|m| m.into_assessment()).collect())
    }

    pub async fn class_review_counts_impl(
        &self,
        class_id: i64,
        semester: &Semester,
    ) -> Result<ReviewCounts> {
        review_counts_on(&self.db, class_id, semester).await
    }

    /// 团支书确认学生总分
    pub async fn finalize_student_impl(
        &self,
        student_id: i64,
        semester: &Semester,
        total_score: f64,
        reviewer: ActorRef,
        now: DateTime<Utc>,
    ) -> Result<FinalizeOutcome> {
        let now = to_micros(now);
        let (reviewer_kind, reviewer_id) = ActorRef::into_columns(Some(reviewer));

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let saved = match find_assessment_model(&txn, student_id, semester).await? {
            Some(existing) => {
                let current = existing.clone().into_assessment().status;
                if check_class_finalize(Some(current)).is_err() {
                    return Ok(FinalizeOutcome::Locked(current));
                }

                let mut model = existing.into_active_model();
                model.status = Set(AssessmentStatus::ClassReviewed.to_string());
                model.total_score = Set(total_score);
                model.class_reviewed_by_kind = Set(reviewer_kind);
                model.class_reviewed_by_id = Set(reviewer_id);
                model.class_reviewed_at = Set(Some(now));
                model.updated_at = Set(now);
                model.update(&txn).await
            }
            None => {
                StudentAssessmentActiveModel {
                    student_id: Set(student_id),
                    semester_number: Set(semester.semester_number),
                    academic_year: Set(semester.academic_year.clone()),
                    status: Set(AssessmentStatus::ClassReviewed.to_string()),
                    total_score: Set(total_score),
                    classification: Set(None),
                    class_reviewed_by_kind: Set(reviewer_kind),
                    class_reviewed_by_id: Set(reviewer_id),
                    class_reviewed_at: Set(Some(now)),
                    faculty_reviewed_by_kind: Set(None),
                    faculty_reviewed_by_id: Set(None),
                    faculty_reviewed_at: Set(None),
                    finalized_at: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .insert(&txn)
                .await
            }
        }
        .map_err(|e| DRLSystemError::database_operation(format!("保存测评失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(FinalizeOutcome::Saved(saved.into_assessment()))
    }

    /// 学院审批班级
    pub async fn approve_class_impl(
        &self,
        class_id: i64,
        semester: &Semester,
        reviewer: ActorRef,
        now: DateTime<Utc>,
    ) -> Result<ApprovalOutcome> {
        let (reviewer_kind, reviewer_id) = ActorRef::into_columns(Some(reviewer));

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let counts = review_counts_on(&txn, class_id, semester).await?;
        if check_class_approval(counts).is_err() {
            return Ok(ApprovalOutcome::Incomplete {
                students: counts.students,
                reviewed: counts.class_reviewed,
            });
        }

        let student_ids = active_student_ids(&txn, &[class_id]).await?;
        let result = StudentAssessments::update_many()
            .col_expr(
                student_assessments::Column::Status,
                Expr::value(AssessmentStatus::FacultyReviewed.to_string()),
            )
            .col_expr(student_assessments::Column::FacultyReviewedByKind, Expr::value(reviewer_kind))
            .col_expr(student_assessments::Column::FacultyReviewedById, Expr::value(reviewer_id))
            .col_expr(student_assessments::Column::FacultyReviewedAt, Expr::value(to_micros(now)))
            .col_expr(student_assessments::Column::UpdatedAt, Expr::value(to_micros(now)))
            .filter(student_assessments::Column::StudentId.is_in(student_ids))
            .filter(student_assessments::Column::SemesterNumber.eq(semester.semester_number))
            .filter(student_assessments::Column::AcademicYear.eq(semester.academic_year.as_str()))
            .filter(student_assessments::Column::Status.eq(AssessmentStatus::ClassReviewed.to_string()))
            .exec(&txn)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("审批班级失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(ApprovalOutcome::Approved {
            updated: result.rows_affected,
        })
    }

    /// 学校确认学院，写入最终等级
    pub async fn finalize_faculty_impl(
        &self,
        faculty_id: i64,
        semester: &Semester,
        now: DateTime<Utc>,
    ) -> Result<ApprovalOutcome> {
        let now = to_micros(now);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("开启事务失败: {e}")))?;

        let class_ids: Vec<i64> = Classes::find()
            .select_only()
            .column(classes::Column::Id)
            .filter(classes::Column::FacultyId.eq(faculty_id))
            .into_tuple::<i64>()
            .all(&txn)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询学院班级失败: {e}")))?;

        let mut per_class = Vec::with_capacity(class_ids.len());
        for class_id in &class_ids {
            per_class.push(review_counts_on(&txn, *class_id, semester).await?);
        }

        if check_faculty_finalization(&per_class).is_err() {
            return Ok(ApprovalOutcome::Incomplete {
                students: per_class.iter().map(|c| c.students).sum(),
                reviewed: per_class.iter().map(|c| c.faculty_reviewed).sum(),
            });
        }

        let student_ids = active_student_ids(&txn, &class_ids).await?;
        let pending = StudentAssessments::find()
            .filter(student_assessments::Column::StudentId.is_in(student_ids))
            .filter(student_assessments::Column::SemesterNumber.eq(semester.semester_number))
            .filter(student_assessments::Column::AcademicYear.eq(semester.academic_year.as_str()))
            .filter(
                student_assessments::Column::Status.eq(AssessmentStatus::FacultyReviewed.to_string()),
            )
            .all(&txn)
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("查询学院测评失败: {e}")))?;

        let mut updated = 0;
        for row in pending {
            let classification = Classification::from_score(row.total_score);
            let mut model = row.into_active_model();
            model.status = Set(AssessmentStatus::Finalized.to_string());
            model.classification = Set(Some(classification.to_string()));
            model.finalized_at = Set(Some(now));
            model.updated_at = Set(now);
            model
                .update(&txn)
                .await
                .map_err(|e| DRLSystemError::database_operation(format!("确认测评失败: {e}")))?;
            updated += 1;
        }

        txn.commit()
            .await
            .map_err(|e| DRLSystemError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(ApprovalOutcome::Approved { updated })
    }
}
