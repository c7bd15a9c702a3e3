use serde::Deserialize;
use ts_rs::TS;

/// 团支书确认学生总分
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct FinalizeStudentRequest {
    pub student_id: i64,
    pub semester_id: i64,
    pub total_score: f64,
}

/// 学院审批班级
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct ApproveClassRequest {
    pub class_id: i64,
    pub semester_id: i64,
}

/// 提醒班级团支书
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct RemindClassRequest {
    pub class_id: i64,
    pub message: Option<String>,
}

/// 学校最终确认学院
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assessment.ts")]
pub struct FinalizeFacultyRequest {
    pub faculty_id: i64,
    pub semester_id: i64,
}
