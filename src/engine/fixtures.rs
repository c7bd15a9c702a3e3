//! 引擎单元测试共用的构造数据

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::models::actors::entities::ActorRef;
use crate::models::criteria::entities::{Category, Criteria, CriteriaUnit, ScoringType};
use crate::models::events::entities::{
    Event, EventParticipation, EventParticipationDetail, EventScope, OrganizerType,
    ParticipationStatus,
};
use crate::models::scores::entities::{ApprovalStatus, ManualScore};
use crate::models::semesters::entities::Semester;

pub fn march(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap()
}

fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

/// 2023-2024 第二学期：1 月 15 日至 6 月 30 日
pub fn semester(grading_start: Option<DateTime<Utc>>) -> Semester {
    Semester {
        id: 1,
        semester_number: 2,
        academic_year: "2023-2024".into(),
        start_date: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        end_date: Utc.with_ymd_and_hms(2024, 6, 30, 23, 59, 59).unwrap(),
        grading_start_date: grading_start,
        grading_deadline: grading_start.map(|s| s + Duration::days(14)),
        is_active: true,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn category(id: i64, order: i32, max_score: f64) -> Category {
    Category {
        id,
        category_code: format!("DM{id:02}"),
        category_name: format!("Category {id}"),
        description: None,
        max_score,
        order,
        is_active: true,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn criteria(id: i64, category_id: i64, order: i32, scoring_type: ScoringType) -> Criteria {
    Criteria {
        id,
        category_id,
        criteria_code: format!("TC{category_id}{id:03}"),
        content: format!("Criteria {id}"),
        scoring_type,
        unit: CriteriaUnit::PerSemester,
        plus_score: 5.0,
        minus_score: 0.0,
        max_times: None,
        require_evidence: false,
        order,
        is_active: true,
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn manual_score(criteria_id: i64, self_score: f64, status: ApprovalStatus) -> ManualScore {
    ManualScore {
        id: criteria_id * 100,
        student_id: 1,
        criteria_id,
        semester_number: 2,
        academic_year: "2023-2024".into(),
        self_score,
        evidence: Vec::new(),
        approval_status: status,
        approved_score: None,
        approved_by: None,
        approved_at: None,
        rejection_reason: None,
        description: None,
        created_at: march(5),
        updated_at: march(5),
    }
}

pub fn event(id: i64, criteria_id: i64, score: f64, event_date: DateTime<Utc>) -> Event {
    Event {
        id,
        event_code: format!("SK2024{id:04}"),
        event_name: format!("Event {id}"),
        description: None,
        criteria_id,
        score,
        event_date,
        end_date: None,
        semester_id: 1,
        organizer_type: OrganizerType::School,
        scope: EventScope::University,
        target_class_id: None,
        target_faculty_id: None,
        max_participants: None,
        location: None,
        approval_status: ApprovalStatus::Approved,
        approved_by: Some(ActorRef::admin(1)),
        approved_at: Some(epoch()),
        rejection_reason: None,
        created_by: Some(ActorRef::admin(1)),
        is_active: true,
        attendance_password: "123456".into(),
        created_at: epoch(),
        updated_at: epoch(),
    }
}

pub fn participation(event: Event, status: ParticipationStatus) -> EventParticipationDetail {
    EventParticipationDetail {
        participation: EventParticipation {
            id: event.id * 10,
            event_id: event.id,
            student_id: 1,
            status,
            registered_at: epoch(),
            attended_at: None,
            score_received: None,
            created_at: epoch(),
            updated_at: epoch(),
        },
        event,
    }
}
