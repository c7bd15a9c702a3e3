use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::actors::entities::ActorRef;
use crate::models::common::enums::define_string_enum;

define_string_enum! {
    /// 测评流程状态，只能向前推进
    pub enum AssessmentStatus: "测评状态" => "../frontend/src/types/generated/assessment.ts" {
        Draft => "draft",
        Submitted => "submitted",
        ClassReviewed => "class_reviewed",
        FacultyReviewed => "faculty_reviewed",
        Finalized => "finalized",
    }
}

impl AssessmentStatus {
    /// 流程中的先后次序
    pub fn rank(&self) -> u8 {
        match self {
            AssessmentStatus::Draft => 0,
            AssessmentStatus::Submitted => 1,
            AssessmentStatus::ClassReviewed => 2,
            AssessmentStatus::FacultyReviewed => 3,
            AssessmentStatus::Finalized => 4,
        }
    }

    pub fn is_at_least(&self, other: AssessmentStatus) -> bool {
        self.rank() >= other.rank()
    }

    /// 计入“已完成班级评审”的状态
    pub fn class_reviewed_or_later() -> &'static [AssessmentStatus] {
        &[
            AssessmentStatus::ClassReviewed,
            AssessmentStatus::FacultyReviewed,
            AssessmentStatus::Finalized,
        ]
    }

    /// 计入“已完成学院评审”的状态
    pub fn faculty_reviewed_or_later() -> &'static [AssessmentStatus] {
        &[AssessmentStatus::FacultyReviewed, AssessmentStatus::Finalized]
    }
}

define_string_enum! {
    /// 综合评定等级
    pub enum Classification: "评定等级" => "../frontend/src/types/generated/assessment.ts" {
        Excellent => "excellent",
        Good => "good",
        Average => "average",
        BelowAverage => "below_average",
        Poor => "poor",
    }
}

impl Classification {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Classification::Excellent
        } else if score >= 80.0 {
            Classification::Good
        } else if score >= 65.0 {
            Classification::Average
        } else if score >= 50.0 {
            Classification::BelowAverage
        } else {
            Classification::Poor
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct StudentAssessment {
    pub id: i64,
    pub student_id: i64,
    pub semester_number: i32,
    pub academic_year: String,
    pub status: AssessmentStatus,
    pub total_score: f64,
    pub classification: Option<Classification>,
    pub class_reviewed_by: Option<ActorRef>,
    pub class_reviewed_at: Option<DateTime<Utc>>,
    pub faculty_reviewed_by: Option<ActorRef>,
    pub faculty_reviewed_at: Option<DateTime<Utc>>,
    pub finalized_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 学院审批的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// 已推进的测评数量
    Approved { updated: u64 },
    /// 仍有学生未完成上一级评审，未做任何修改
    Incomplete { students: u64, reviewed: u64 },
}

/// 团支书确认总分的结果
#[derive(Debug, Clone)]
pub enum FinalizeOutcome {
    Saved(StudentAssessment),
    /// 测评已进入学院审核或更后的阶段，未做修改
    Locked(AssessmentStatus),
}

/// 一个班级在某学期的评审计数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewCounts {
    pub students: u64,
    // 状态不低于 class_reviewed 的测评数
    pub class_reviewed: u64,
    // 状态不低于 faculty_reviewed 的测评数
    pub faculty_reviewed: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_thresholds() {
        assert_eq!(Classification::from_score(95.0), Classification::Excellent);
        assert_eq!(Classification::from_score(90.0), Classification::Excellent);
        assert_eq!(Classification::from_score(89.9), Classification::Good);
        assert_eq!(Classification::from_score(65.0), Classification::Average);
        assert_eq!(Classification::from_score(50.0), Classification::BelowAverage);
        assert_eq!(Classification::from_score(49.5), Classification::Poor);
    }

    #[test]
    fn test_status_order() {
        assert!(AssessmentStatus::Finalized.is_at_least(AssessmentStatus::ClassReviewed));
        assert!(!AssessmentStatus::Submitted.is_at_least(AssessmentStatus::ClassReviewed));
        assert!(AssessmentStatus::ClassReviewed.is_at_least(AssessmentStatus::ClassReviewed));
    }
}
