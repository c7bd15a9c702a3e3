use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{AssessmentStatus, StudentAssessment};
use crate::models::actors::entities::{Class, Faculty, Student};
use crate::models::criteria::entities::{CriteriaUnit, ScoringType};
use crate::models::scores::entities::{ApprovalStatus, Evidence};
use crate::models::semesters::entities::Semester;

/// 评分表中的单条标准
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct CriteriaScoreRow {
    pub criteria_id: i64,
    pub criteria_code: String,
    pub content: String,
    pub scoring_type: ScoringType,
    // 单次加分，作为展示上限
    pub max_score: f64,
    pub unit: CriteriaUnit,
    pub self_score: f64,
    pub achieved_score: f64,
    pub evidence: Vec<Evidence>,
    pub note: String,
    pub is_locked: bool,
    pub require_evidence: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_status: Option<ApprovalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_score: Option<f64>,
}

/// 评分表中的大类
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct CategoryScoreRow {
    pub category_id: i64,
    pub category_code: String,
    pub category_name: String,
    pub max_score: f64,
    pub criteria: Vec<CriteriaScoreRow>,
    // 封顶后的大类得分
    pub total_score: f64,
}

/// 学生评分表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ScoreSheet {
    pub semester: Semester,
    pub score_sheet: Vec<CategoryScoreRow>,
    pub grand_total: f64,
    pub is_grading_period: bool,
}

/// 团支书视角的评分表
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct SecretaryScoreSheetResponse {
    pub student: Student,
    #[serde(flatten)]
    pub sheet: ScoreSheet,
    pub is_review_period: bool,
    pub assessment: Option<StudentAssessment>,
}

/// 班级中单个学生的测评进度
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct StudentProgress {
    pub student: Student,
    // 测评状态，未开始时为 not_started
    pub status: String,
    pub total_score: f64,
    pub total_self_score: f64,
}

pub const NOT_STARTED: &str = "not_started";

impl StudentProgress {
    pub fn status_of(status: Option<AssessmentStatus>) -> String {
        status
            .map(|s| s.to_string())
            .unwrap_or_else(|| NOT_STARTED.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ClassStatusResponse {
    pub class: Class,
    pub semester: Semester,
    pub items: Vec<StudentProgress>,
    pub completion: ClassCompletion,
}

/// 班级完成度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ClassCompletion {
    pub class_id: i64,
    pub class_code: String,
    pub class_name: String,
    pub student_count: u64,
    pub finalized_count: u64,
    pub percentage: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct FacultyStatusResponse {
    pub faculty: Faculty,
    pub semester: Semester,
    pub classes: Vec<ClassCompletion>,
}

/// 学院完成度
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct FacultyCompletion {
    pub faculty_id: i64,
    pub faculty_code: String,
    pub faculty_name: String,
    pub student_count: u64,
    pub class_reviewed_count: u64,
    pub faculty_reviewed_count: u64,
    pub percentage: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct SchoolStatusResponse {
    pub semester: Semester,
    pub faculties: Vec<FacultyCompletion>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct BulkTransitionResponse {
    pub updated_count: u64,
}
