use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

use super::entities::{EventScope, OrganizerType, ParticipationStatus};
use crate::models::PaginationQuery;
use crate::models::scores::entities::ApprovalStatus;

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct CreateEventRequest {
    pub event_name: String,
    pub description: Option<String>,
    pub criteria_id: i64,
    pub score: f64,
    pub event_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub semester_id: i64,
    pub organizer_type: OrganizerType,
    pub target_class_id: Option<i64>,
    pub target_faculty_id: Option<i64>,
    pub max_participants: Option<i32>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct UpdateEventRequest {
    pub event_name: Option<String>,
    pub description: Option<String>,
    pub criteria_id: Option<i64>,
    pub score: Option<f64>,
    pub event_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub organizer_type: Option<OrganizerType>,
    pub target_class_id: Option<i64>,
    pub target_faculty_id: Option<i64>,
    pub max_participants: Option<i32>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct RejectEventRequest {
    pub reason: String,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct CancelEventRequest {
    pub reason: Option<String>,
}

/// 学生自助签到
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct CheckInRequest {
    pub password: String,
}

/// 组织者登记考勤
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct MarkAttendanceRequest {
    pub student_id: i64,
    pub status: ParticipationStatus,
    pub score_received: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventListQuery {
    // 由路由层单独解析后填入
    #[serde(skip)]
    #[ts(skip)]
    pub pagination: PaginationQuery,
    pub semester_id: Option<i64>,
    pub approval_status: Option<ApprovalStatus>,
    pub scope: Option<EventScope>,
    pub search: Option<String>,
}
