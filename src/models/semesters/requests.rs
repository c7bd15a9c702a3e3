use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/semester.ts")]
pub struct CreateSemesterRequest {
    pub semester_number: i32,
    pub academic_year: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub grading_start_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/semester.ts")]
pub struct UpdateSemesterRequest {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub grading_start_date: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

/// 通用学期查询参数，缺省时使用当前学期
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/semester.ts")]
pub struct SemesterQuery {
    pub semester_id: Option<i64>,
}
