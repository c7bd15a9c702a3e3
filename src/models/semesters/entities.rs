use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/semester.ts")]
pub struct Semester {
    pub id: i64,
    // 学期序号：1、2、3（夏季）
    pub semester_number: i32,
    // 学年，格式 YYYY-YYYY
    pub academic_year: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    // 自评开始时间，自评窗口以此为起点
    pub grading_start_date: Option<DateTime<Utc>>,
    // 评分截止时间（自评开始 + 14 天）
    pub grading_deadline: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Semester {
    /// 学期是否覆盖给定时刻（闭区间）
    pub fn covers(&self, at: DateTime<Utc>) -> bool {
        self.start_date <= at && at <= self.end_date
    }
}
