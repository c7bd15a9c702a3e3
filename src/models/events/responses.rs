use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::entities::{Event, EventParticipant, EventParticipationDetail};

/// 活动创建者可见的签到口令
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventWithPasswordResponse {
    pub event: Event,
    pub attendance_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventParticipantsResponse {
    pub count: usize,
    pub items: Vec<EventParticipant>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct MyEventsResponse {
    pub items: Vec<EventParticipationDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct AvailableEventsResponse {
    pub count: usize,
    pub items: Vec<Event>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct CategoryShare {
    pub name: String,
    pub value: u64,
    pub percentage: i64,
}

/// 首页统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct DashboardStatsResponse {
    // 已审批的有效活动
    pub total_events: u64,
    pub total_students: u64,
    pub ongoing_events: u64,
    // 已出勤的参与次数
    pub total_participations: u64,
    pub recent_events: Vec<Event>,
    pub category_stats: Vec<CategoryShare>,
    pub weekly_events: Vec<Event>,
}
