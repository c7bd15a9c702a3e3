use serde::Deserialize;
use ts_rs::TS;

use super::entities::Evidence;

/// 学生提交自评分数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct SubmitSelfScoreRequest {
    pub semester_id: i64,
    pub criteria_id: i64,
    pub self_score: f64,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

/// 团支书更新（批准）学生分数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct UpdateStudentScoreRequest {
    pub student_id: i64,
    pub criteria_id: i64,
    pub approved_score: f64,
    pub note: Option<String>,
}

/// 团支书驳回学生自评
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/score.ts")]
pub struct RejectStudentScoreRequest {
    pub student_id: i64,
    pub criteria_id: i64,
    pub reason: String,
}
