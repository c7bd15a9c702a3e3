use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::actors::entities::{ActorRef, Student};
use crate::models::common::enums::define_string_enum;
use crate::models::scores::entities::ApprovalStatus;

define_string_enum! {
    /// 主办方类型
    pub enum OrganizerType: "主办方类型" => "../frontend/src/types/generated/event.ts" {
        School => "school",
        Faculty => "faculty",
        Class => "class",
    }
}

define_string_enum! {
    /// 活动范围
    pub enum EventScope: "活动范围" => "../frontend/src/types/generated/event.ts" {
        University => "university",
        Faculty => "faculty",
        Class => "class",
    }
}

define_string_enum! {
    /// 参与状态
    pub enum ParticipationStatus: "参与状态" => "../frontend/src/types/generated/event.ts" {
        Registered => "registered",
        Attended => "attended",
        Absent => "absent",
        Cancelled => "cancelled",
    }
}

impl From<OrganizerType> for EventScope {
    fn from(organizer: OrganizerType) -> Self {
        match organizer {
            OrganizerType::School => EventScope::University,
            OrganizerType::Faculty => EventScope::Faculty,
            OrganizerType::Class => EventScope::Class,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct Event {
    pub id: i64,
    // 活动编码，格式 SK + 年份 + 4 位数字
    pub event_code: String,
    pub event_name: String,
    pub description: Option<String>,
    // 计入的评分标准
    pub criteria_id: i64,
    // 每位参与者默认获得的分数
    pub score: f64,
    pub event_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub semester_id: i64,
    pub organizer_type: OrganizerType,
    pub scope: EventScope,
    pub target_class_id: Option<i64>,
    pub target_faculty_id: Option<i64>,
    pub max_participants: Option<i32>,
    pub location: Option<String>,
    pub approval_status: ApprovalStatus,
    pub approved_by: Option<ActorRef>,
    pub approved_at: Option<DateTime<Utc>>,
    pub rejection_reason: Option<String>,
    pub created_by: Option<ActorRef>,
    pub is_active: bool,
    // 签到口令，不对外输出
    #[serde(skip_serializing, default)]
    #[ts(skip)]
    pub attendance_password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// 活动实际结束时间：有结束日期取结束日期，否则取活动日期
    pub fn effective_end(&self) -> DateTime<Utc> {
        self.end_date.unwrap_or(self.event_date)
    }

    /// 是否已审批通过且仍有效
    pub fn is_open(&self) -> bool {
        self.is_active && self.approval_status == ApprovalStatus::Approved
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventParticipation {
    pub id: i64,
    pub event_id: i64,
    pub student_id: i64,
    pub status: ParticipationStatus,
    pub registered_at: DateTime<Utc>,
    pub attended_at: Option<DateTime<Utc>>,
    // 实际获得分数，为空或 0 时使用活动分数
    pub score_received: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 参与记录及其活动
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventParticipationDetail {
    pub participation: EventParticipation,
    pub event: Event,
}

/// 活动参与者（含学生信息）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/event.ts")]
pub struct EventParticipant {
    pub participation: EventParticipation,
    pub student: Student,
}

/// 新建活动时由服务层确定的审批信息
#[derive(Debug, Clone)]
pub struct EventApproval {
    pub status: ApprovalStatus,
    pub approved_by: Option<ActorRef>,
    pub approved_at: Option<DateTime<Utc>>,
}

/// 待写入的新活动，编码、口令与审批信息已由服务层确定
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub event_code: String,
    pub event_name: String,
    pub description: Option<String>,
    pub criteria_id: i64,
    pub score: f64,
    pub event_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub semester_id: i64,
    pub organizer_type: OrganizerType,
    pub scope: EventScope,
    pub target_class_id: Option<i64>,
    pub target_faculty_id: Option<i64>,
    pub max_participants: Option<i32>,
    pub location: Option<String>,
    pub approval: EventApproval,
    pub created_by: ActorRef,
    pub attendance_password: String,
}

/// 考勤标记
#[derive(Debug, Clone)]
pub struct AttendanceMark {
    pub status: ParticipationStatus,
    pub score_received: Option<f64>,
    pub at: DateTime<Utc>,
}

/// 生成活动编码
pub fn event_code_for(year: i32, existing_in_year: u64) -> String {
    format!("SK{}{:04}", year, existing_in_year + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_code_generation() {
        assert_eq!(event_code_for(2024, 0), "SK20240001");
        assert_eq!(event_code_for(2025, 41), "SK20250042");
    }

    #[test]
    fn test_scope_follows_organizer() {
        assert_eq!(EventScope::from(OrganizerType::School), EventScope::University);
        assert_eq!(EventScope::from(OrganizerType::Class), EventScope::Class);
    }
}
