use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{Category, Criteria};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/criteria.ts")]
pub struct CategoryListResponse {
    pub items: Vec<Category>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/criteria.ts")]
pub struct CriteriaListResponse {
    pub items: Vec<Criteria>,
}
