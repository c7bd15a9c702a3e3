use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::Semester;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/semester.ts")]
pub struct SemesterListResponse {
    pub items: Vec<Semester>,
}
