//! 活动创建、审批、报名与考勤规则

use chrono::{DateTime, Utc};

use super::Violation;
use crate::models::actors::entities::{Principal, Role, Student};
use crate::models::events::entities::{
    Event, EventApproval, EventParticipation, EventScope, OrganizerType, ParticipationStatus,
};
use crate::models::scores::entities::ApprovalStatus;

/// 活动面向的范围及目标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventTargets {
    pub scope: EventScope,
    pub target_class_id: Option<i64>,
    pub target_faculty_id: Option<i64>,
}

impl EventTargets {
    /// 由主办方类型推导范围，清除新范围不使用的目标
    pub fn derive(
        organizer: OrganizerType,
        target_class_id: Option<i64>,
        target_faculty_id: Option<i64>,
    ) -> Self {
        let scope = EventScope::from(organizer);
        match scope {
            EventScope::University => Self {
                scope,
                target_class_id: None,
                target_faculty_id: None,
            },
            EventScope::Faculty => Self {
                scope,
                target_class_id: None,
                target_faculty_id,
            },
            EventScope::Class => Self {
                scope,
                target_class_id,
                target_faculty_id,
            },
        }
    }
}

/// 新建活动的范围与审批信息
#[derive(Debug, Clone)]
pub struct CreationPlan {
    pub targets: EventTargets,
    pub approval: EventApproval,
}

/// 按创建者身份决定能否创建以及是否自动通过
///
/// 学校管理员创建的活动直接通过；学院管理员不能创建全校活动，只能面向本院；
/// 团支书只能为本班创建班级活动。
pub fn plan_creation(
    principal: &Principal,
    organizer: OrganizerType,
    target_class_id: Option<i64>,
    target_faculty_id: Option<i64>,
    now: DateTime<Utc>,
) -> Result<CreationPlan, Violation> {
    let pending = EventApproval {
        status: ApprovalStatus::Pending,
        approved_by: None,
        approved_at: None,
    };

    match principal.role {
        Role::Student => Err(Violation::EventCreateForbidden("只有团支书可以创建活动")),
        Role::Secretary => {
            if organizer != OrganizerType::Class {
                return Err(Violation::EventCreateForbidden("团支书只能创建班级活动"));
            }
            if target_class_id.is_some() && target_class_id != principal.class_id {
                return Err(Violation::EventCreateForbidden("团支书只能为本班创建活动"));
            }
            Ok(CreationPlan {
                targets: EventTargets::derive(organizer, principal.class_id, principal.faculty_id),
                approval: pending,
            })
        }
        Role::DepartmentAdmin => {
            if organizer == OrganizerType::School {
                return Err(Violation::EventCreateForbidden("学院管理员不能创建全校活动"));
            }
            if target_faculty_id.is_some() && target_faculty_id != principal.faculty_id {
                return Err(Violation::EventCreateForbidden("学院管理员只能为本院创建活动"));
            }
            Ok(CreationPlan {
                targets: EventTargets::derive(
                    organizer,
                    target_class_id,
                    target_faculty_id.or(principal.faculty_id),
                ),
                approval: pending,
            })
        }
        Role::UniversityAdmin => Ok(CreationPlan {
            targets: EventTargets::derive(organizer, target_class_id, target_faculty_id),
            approval: EventApproval {
                status: ApprovalStatus::Approved,
                approved_by: Some(principal.actor),
                approved_at: Some(now),
            },
        }),
    }
}

/// 审批或驳回：不能重复进入同一状态
pub fn check_review(event: &Event, decision: ApprovalStatus) -> Result<(), Violation> {
    if event.approval_status == decision {
        Err(Violation::EventAlreadyReviewed)
    } else {
        Ok(())
    }
}

/// 创建者或管理员才能修改、取消活动以及登记考勤
pub fn ensure_event_owner(principal: &Principal, event: &Event) -> Result<(), Violation> {
    if principal.role.is_admin() || event.created_by == Some(principal.actor) {
        Ok(())
    } else {
        Err(Violation::NotEventOwner)
    }
}

/// 学生是否在活动范围内
pub fn is_in_scope(event: &Event, student: &Student) -> bool {
    match event.scope {
        EventScope::University => true,
        EventScope::Faculty => event.target_faculty_id == Some(student.faculty_id),
        EventScope::Class => event.target_class_id == Some(student.class_id),
    }
}

/// 计入名额的参与状态
pub fn occupies_seat(status: ParticipationStatus) -> bool {
    matches!(
        status,
        ParticipationStatus::Registered | ParticipationStatus::Attended
    )
}

pub fn check_registration(
    event: &Event,
    student: &Student,
    existing: Option<&EventParticipation>,
    occupied_seats: u64,
    now: DateTime<Utc>,
) -> Result<(), Violation> {
    if !event.is_open() {
        return Err(Violation::EventNotOpen);
    }
    if event.event_date < now {
        return Err(Violation::EventAlreadyStarted);
    }
    if !is_in_scope(event, student) {
        return Err(Violation::EventScopeMismatch);
    }
    if existing.is_some() {
        return Err(Violation::EventAlreadyRegistered);
    }
    match event.max_participants {
        Some(max) if occupied_seats >= u64::try_from(max).unwrap_or(0) => Err(Violation::EventFull),
        _ => Ok(()),
    }
}

pub fn check_unregistration(
    event: &Event,
    existing: Option<&EventParticipation>,
    now: DateTime<Utc>,
) -> Result<(), Violation> {
    if event.event_date <= now {
        return Err(Violation::EventAlreadyStarted);
    }
    match existing {
        Some(p) if p.status == ParticipationStatus::Registered => Ok(()),
        _ => Err(Violation::EventNotRegistered),
    }
}

/// 学生凭口令签到
pub fn check_self_check_in(
    event: &Event,
    existing: Option<&EventParticipation>,
    password: &str,
    now: DateTime<Utc>,
) -> Result<(), Violation> {
    if !event.is_open() {
        return Err(Violation::EventNotOpen);
    }
    if now < event.event_date {
        return Err(Violation::AttendanceNotOpen);
    }
    match existing {
        Some(p) if p.status == ParticipationStatus::Registered => {}
        _ => return Err(Violation::EventNotRegistered),
    }
    if event.attendance_password != password.trim() {
        return Err(Violation::AttendancePasswordInvalid);
    }
    Ok(())
}

/// 组织者登记考勤
pub fn check_attendance_mark(
    event: &Event,
    status: ParticipationStatus,
    score_received: Option<f64>,
    now: DateTime<Utc>,
) -> Result<(), Violation> {
    if !event.is_open() {
        return Err(Violation::EventNotOpen);
    }
    if now < event.event_date {
        return Err(Violation::AttendanceNotOpen);
    }
    if !matches!(
        status,
        ParticipationStatus::Attended | ParticipationStatus::Absent
    ) {
        return Err(Violation::InvalidAttendanceStatus);
    }
    match score_received {
        Some(score) if !score.is_finite() || score < 0.0 => Err(Violation::NegativeScore),
        _ => Ok(()),
    }
}

/// 已审批、有效且尚未举行的活动不能删除
pub fn check_deletion(event: &Event, now: DateTime<Utc>) -> Result<(), Violation> {
    let upcoming = event.event_date >= now;
    if event.approval_status == ApprovalStatus::Approved && event.is_active && upcoming {
        Err(Violation::EventDeleteForbidden)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::engine::fixtures::{event, march};
    use crate::models::actors::entities::{ActorRef, Admin, AdminLevel};

    fn student(class_id: i64, faculty_id: i64, is_secretary: bool) -> Student {
        Student {
            id: 42,
            student_code: "SV042".into(),
            first_name: "Lan".into(),
            last_name: "Pham".into(),
            email: "lan@example.edu".into(),
            class_id,
            faculty_id,
            is_secretary,
            is_active: true,
        }
    }

    fn admin(level: AdminLevel, faculty_id: Option<i64>) -> Principal {
        Principal::from_admin(&Admin {
            id: 9,
            admin_code: "AD09".into(),
            first_name: "Minh".into(),
            last_name: "Le".into(),
            email: "minh@example.edu".into(),
            level,
            faculty_id,
            is_active: true,
        })
    }

    fn registration(status: ParticipationStatus) -> EventParticipation {
        EventParticipation {
            id: 1,
            event_id: 1,
            student_id: 42,
            status,
            registered_at: march(1),
            attended_at: None,
            score_received: None,
            created_at: march(1),
            updated_at: march(1),
        }
    }

    #[test]
    fn test_creation_rules_by_role() {
        let now = march(1);
        let plain = Principal::from_student(&student(3, 2, false));
        assert!(matches!(
            plan_creation(&plain, OrganizerType::Class, None, None, now),
            Err(Violation::EventCreateForbidden(_))
        ));

        let secretary = Principal::from_student(&student(3, 2, true));
        assert!(plan_creation(&secretary, OrganizerType::Faculty, None, None, now).is_err());
        assert!(plan_creation(&secretary, OrganizerType::Class, Some(4), None, now).is_err());
        let plan = plan_creation(&secretary, OrganizerType::Class, None, None, now).unwrap();
        assert_eq!(plan.targets.target_class_id, Some(3));
        assert_eq!(plan.targets.target_faculty_id, Some(2));
        assert_eq!(plan.approval.status, ApprovalStatus::Pending);

        let dept = admin(AdminLevel::Department, Some(2));
        assert!(plan_creation(&dept, OrganizerType::School, None, None, now).is_err());
        assert!(plan_creation(&dept, OrganizerType::Faculty, None, Some(5), now).is_err());
        let plan = plan_creation(&dept, OrganizerType::Faculty, None, None, now).unwrap();
        assert_eq!(plan.targets.scope, EventScope::Faculty);
        assert_eq!(plan.targets.target_faculty_id, Some(2));
        assert_eq!(plan.approval.status, ApprovalStatus::Pending);

        let uni = admin(AdminLevel::University, None);
        let plan = plan_creation(&uni, OrganizerType::School, Some(3), Some(2), now).unwrap();
        assert_eq!(plan.targets.scope, EventScope::University);
        assert_eq!(plan.targets.target_class_id, None);
        assert_eq!(plan.approval.status, ApprovalStatus::Approved);
        assert_eq!(plan.approval.approved_by, Some(ActorRef::admin(9)));
        assert_eq!(plan.approval.approved_at, Some(now));
    }

    #[test]
    fn test_targets_cleared_on_scope_change() {
        let t = EventTargets::derive(OrganizerType::Faculty, Some(3), Some(2));
        assert_eq!(t.target_class_id, None);
        assert_eq!(t.target_faculty_id, Some(2));
        let t = EventTargets::derive(OrganizerType::Class, Some(3), Some(2));
        assert_eq!(t.target_class_id, Some(3));
    }

    #[test]
    fn test_review_is_not_repeated() {
        let mut e = event(1, 1, 5.0, march(10));
        assert_eq!(
            check_review(&e, ApprovalStatus::Approved),
            Err(Violation::EventAlreadyReviewed)
        );
        assert!(check_review(&e, ApprovalStatus::Rejected).is_ok());
        e.approval_status = ApprovalStatus::Rejected;
        assert!(check_review(&e, ApprovalStatus::Approved).is_ok());
        assert!(check_review(&e, ApprovalStatus::Rejected).is_err());
    }

    #[test]
    fn test_registration_rules() {
        let now = march(5);
        let s = student(3, 2, false);
        let open = event(1, 1, 5.0, march(10));

        assert!(check_registration(&open, &s, None, 0, now).is_ok());
        assert_eq!(
            check_registration(&open, &s, Some(&registration(ParticipationStatus::Registered)), 0, now),
            Err(Violation::EventAlreadyRegistered)
        );

        // 活动开始时刻仍可报名，之后不行
        let started = event(2, 1, 5.0, now);
        assert!(check_registration(&started, &s, None, 0, now).is_ok());
        assert_eq!(
            check_registration(&started, &s, None, 0, now + Duration::microseconds(1)),
            Err(Violation::EventAlreadyStarted)
        );

        let mut pending = open.clone();
        pending.approval_status = ApprovalStatus::Pending;
        assert_eq!(
            check_registration(&pending, &s, None, 0, now),
            Err(Violation::EventNotOpen)
        );

        let mut other_class = open.clone();
        other_class.scope = EventScope::Class;
        other_class.target_class_id = Some(99);
        assert_eq!(
            check_registration(&other_class, &s, None, 0, now),
            Err(Violation::EventScopeMismatch)
        );

        let mut full = open.clone();
        full.max_participants = Some(2);
        assert!(check_registration(&full, &s, None, 1, now).is_ok());
        assert_eq!(
            check_registration(&full, &s, None, 2, now),
            Err(Violation::EventFull)
        );
    }

    #[test]
    fn test_unregistration_rules() {
        let e = event(1, 1, 5.0, march(10));
        let registered = registration(ParticipationStatus::Registered);
        assert!(check_unregistration(&e, Some(&registered), march(5)).is_ok());
        assert_eq!(
            check_unregistration(&e, Some(&registered), march(10)),
            Err(Violation::EventAlreadyStarted)
        );
        assert_eq!(
            check_unregistration(&e, None, march(5)),
            Err(Violation::EventNotRegistered)
        );
        assert_eq!(
            check_unregistration(
                &e,
                Some(&registration(ParticipationStatus::Cancelled)),
                march(5)
            ),
            Err(Violation::EventNotRegistered)
        );
    }

    #[test]
    fn test_self_check_in() {
        let e = event(1, 1, 5.0, march(10));
        let registered = registration(ParticipationStatus::Registered);
        assert_eq!(
            check_self_check_in(&e, Some(&registered), "123456", march(9)),
            Err(Violation::AttendanceNotOpen)
        );
        assert_eq!(
            check_self_check_in(&e, Some(&registered), "000000", march(10)),
            Err(Violation::AttendancePasswordInvalid)
        );
        assert!(check_self_check_in(&e, Some(&registered), " 123456 ", march(10)).is_ok());
        assert_eq!(
            check_self_check_in(&e, None, "123456", march(10)),
            Err(Violation::EventNotRegistered)
        );
    }

    #[test]
    fn test_attendance_mark() {
        let e = event(1, 1, 5.0, march(10));
        assert!(check_attendance_mark(&e, ParticipationStatus::Attended, Some(8.0), march(10)).is_ok());
        assert_eq!(
            check_attendance_mark(&e, ParticipationStatus::Attended, None, march(9)),
            Err(Violation::AttendanceNotOpen)
        );
        assert_eq!(
            check_attendance_mark(&e, ParticipationStatus::Cancelled, None, march(10)),
            Err(Violation::InvalidAttendanceStatus)
        );

        // 活动取消后不能再登记出勤
        let mut cancelled = e.clone();
        cancelled.is_active = false;
        assert_eq!(
            check_attendance_mark(&cancelled, ParticipationStatus::Attended, None, march(10)),
            Err(Violation::EventNotOpen)
        );
    }

    #[test]
    fn test_deletion_guard() {
        let e = event(1, 1, 5.0, march(10));
        assert_eq!(check_deletion(&e, march(5)), Err(Violation::EventDeleteForbidden));
        assert_eq!(check_deletion(&e, march(10)), Err(Violation::EventDeleteForbidden));
        assert!(check_deletion(&e, march(11)).is_ok());

        let mut cancelled = e.clone();
        cancelled.is_active = false;
        assert!(check_deletion(&cancelled, march(5)).is_ok());
    }

    #[test]
    fn test_event_owner() {
        let e = event(1, 1, 5.0, march(10));
        let secretary = Principal::from_student(&student(3, 2, true));
        assert_eq!(ensure_event_owner(&secretary, &e), Err(Violation::NotEventOwner));
        assert!(ensure_event_owner(&admin(AdminLevel::Department, Some(2)), &e).is_ok());

        let mut own = e.clone();
        own.created_by = Some(ActorRef::student(42));
        assert!(ensure_event_owner(&secretary, &own).is_ok());
    }
}
