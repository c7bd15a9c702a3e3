use serde::Deserialize;
use ts_rs::TS;

use super::entities::{CriteriaUnit, ScoringType};

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/criteria.ts")]
pub struct CreateCategoryRequest {
    pub category_name: String,
    pub description: Option<String>,
    pub max_score: f64,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/criteria.ts")]
pub struct UpdateCategoryRequest {
    pub category_name: Option<String>,
    pub description: Option<String>,
    pub max_score: Option<f64>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/criteria.ts")]
pub struct CreateCriteriaRequest {
    pub category_id: i64,
    pub content: String,
    pub scoring_type: ScoringType,
    #[serde(default = "default_unit")]
    pub unit: CriteriaUnit,
    #[serde(default)]
    pub plus_score: f64,
    #[serde(default)]
    pub minus_score: f64,
    pub max_times: Option<i32>,
    #[serde(default)]
    pub require_evidence: bool,
    #[serde(default)]
    pub order: i32,
}

fn default_unit() -> CriteriaUnit {
    CriteriaUnit::PerSemester
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/criteria.ts")]
pub struct UpdateCriteriaRequest {
    pub content: Option<String>,
    pub scoring_type: Option<ScoringType>,
    pub unit: Option<CriteriaUnit>,
    pub plus_score: Option<f64>,
    pub minus_score: Option<f64>,
    pub max_times: Option<i32>,
    pub require_evidence: Option<bool>,
    pub order: Option<i32>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/criteria.ts")]
pub struct CriteriaListQuery {
    pub category_id: Option<i64>,
}
