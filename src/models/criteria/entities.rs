use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::common::enums::define_string_enum;

define_string_enum! {
    /// 评分方式
    pub enum ScoringType: "评分方式" => "../frontend/src/types/generated/criteria.ts" {
        Manual => "manual",
        Auto => "auto",
    }
}

define_string_enum! {
    /// 计分单位（仅用于展示）
    pub enum CriteriaUnit: "计分单位" => "../frontend/src/types/generated/criteria.ts" {
        PerSemester => "per_semester",
        PerYear => "per_year",
        PerTime => "per_time",
    }
}

/// 评分大类
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/criteria.ts")]
pub struct Category {
    pub id: i64,
    // 大类编码，格式 DM + 2 位数字
    pub category_code: String,
    pub category_name: String,
    pub description: Option<String>,
    // 大类得分上限
    pub max_score: f64,
    pub order: i32,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 评分标准
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/criteria.ts")]
pub struct Criteria {
    pub id: i64,
    pub category_id: i64,
    // 标准编码，格式 TC + 大类序号 + 3 位数字
    pub criteria_code: String,
    pub content: String,
    pub scoring_type: ScoringType,
    pub unit: CriteriaUnit,
    // 每次加分
    pub plus_score: f64,
    // 每次扣分（<= 0）
    pub minus_score: f64,
    pub max_times: Option<i32>,
    pub require_evidence: bool,
    pub order: i32,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 生成大类编码
pub fn category_code_for(existing_count: u64) -> String {
    format!("DM{:02}", existing_count + 1)
}

/// 生成标准编码
pub fn criteria_code_for(category_order: i32, existing_in_category: u64) -> String {
    format!("TC{}{:03}", category_order, existing_in_category + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_codes() {
        assert_eq!(category_code_for(0), "DM01");
        assert_eq!(category_code_for(11), "DM12");
        assert_eq!(criteria_code_for(2, 0), "TC2001");
        assert_eq!(criteria_code_for(3, 14), "TC3015");
    }
}
