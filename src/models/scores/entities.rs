use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::actors::entities::ActorRef;
use crate::models::common::enums::define_string_enum;
use crate::models::semesters::entities::Semester;

define_string_enum! {
    /// 审批状态（自评分数与活动共用）
    pub enum ApprovalStatus: "审批状态" => "../frontend/src/types/generated/score.ts" {
        Pending => "pending",
        Approved => "approved",
        Rejected => "rejected",
    }
}

/// 佐证材料
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct Evidence {
    pub url: String,
    pub file_name: String,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// 学生自评分数
///
/// 以 (学生, 标准, 学期序号, 学年) 唯一定位。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct ManualScore {
    pub id: i64,
    pub student_id: i64,
    pub criteria_id: i64,
    pub semester_number: i32,
    pub academic_year: String,
    pub self_score: f64,
    pub evidence: Vec<Evidence>,
    pub approval_status: ApprovalStatus,
    pub approved_score: Option<f64>,
    pub approved_by: Option<ActorRef>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 自评分数的定位键
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManualScoreKey {
    pub student_id: i64,
    pub criteria_id: i64,
    pub semester_number: i32,
    pub academic_year: String,
}

impl ManualScoreKey {
    pub fn new(student_id: i64, criteria_id: i64, semester: &Semester) -> Self {
        Self {
            student_id,
            criteria_id,
            semester_number: semester.semester_number,
            academic_year: semester.academic_year.clone(),
        }
    }
}

/// 团支书审核动作
#[derive(Debug, Clone)]
pub enum ScoreReview {
    Approve {
        approved_score: f64,
        note: Option<String>,
    },
    Reject {
        reason: String,
    },
}
