//! 分数来源解析
//!
//! 自评类标准从学生自评记录取分，自动类标准从活动参与记录累计。

use chrono::{DateTime, Utc};

use crate::models::events::entities::{
    Event, EventParticipation, EventParticipationDetail, ParticipationStatus,
};
use crate::models::scores::entities::{ApprovalStatus, Evidence, ManualScore};
use crate::models::semesters::entities::Semester;

const REJECTED_NOTE_PREFIX: &str = "Bị từ chối";

/// 评分表视角
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetView {
    /// 学生本人：只有审批通过的分数计入
    Student,
    /// 团支书：审批分数缺省时回退到自评分数
    Secretary,
}

/// 自评类标准的解析结果
#[derive(Debug, Clone, PartialEq)]
pub struct ManualResolution {
    pub self_score: f64,
    pub achieved_score: f64,
    pub evidence: Vec<Evidence>,
    pub note: String,
    pub approval_status: Option<ApprovalStatus>,
    pub approved_score: Option<f64>,
}

pub fn resolve_manual(score: Option<&ManualScore>, view: SheetView) -> ManualResolution {
    let Some(score) = score else {
        return match view {
            SheetView::Student => ManualResolution {
                self_score: 0.0,
                achieved_score: 0.0,
                evidence: Vec::new(),
                note: String::new(),
                approval_status: None,
                approved_score: None,
            },
            SheetView::Secretary => ManualResolution {
                self_score: 0.0,
                achieved_score: 0.0,
                evidence: Vec::new(),
                note: String::new(),
                approval_status: Some(ApprovalStatus::Pending),
                approved_score: Some(0.0),
            },
        };
    };

    match view {
        SheetView::Student => {
            let achieved_score = match score.approval_status {
                ApprovalStatus::Approved => score.approved_score.unwrap_or(score.self_score),
                ApprovalStatus::Pending | ApprovalStatus::Rejected => 0.0,
            };
            let note = match score.approval_status {
                ApprovalStatus::Rejected => format!(
                    "{REJECTED_NOTE_PREFIX}: {}",
                    score.rejection_reason.as_deref().unwrap_or_default()
                ),
                status => status.to_string(),
            };
            ManualResolution {
                self_score: score.self_score,
                achieved_score,
                evidence: score.evidence.clone(),
                note,
                approval_status: None,
                approved_score: None,
            }
        }
        SheetView::Secretary => {
            let approved = score.approved_score.unwrap_or(score.self_score);
            ManualResolution {
                self_score: score.self_score,
                achieved_score: approved,
                evidence: score.evidence.clone(),
                note: score.description.clone().unwrap_or_default(),
                approval_status: Some(score.approval_status),
                approved_score: Some(approved),
            }
        }
    }
}

/// 参与记录是否计分
///
/// 已签到总是计分；仅报名的在活动结束时间严格早于 `now` 后计分；缺席和取消不计分。
pub fn participation_is_eligible(
    participation: &EventParticipation,
    event: &Event,
    now: DateTime<Utc>,
) -> bool {
    match participation.status {
        ParticipationStatus::Attended => true,
        ParticipationStatus::Registered => event.effective_end() < now,
        ParticipationStatus::Absent | ParticipationStatus::Cancelled => false,
    }
}

/// 单条参与记录的得分：实际得分非零时取实际得分，否则取活动分数
pub fn participation_contribution(participation: &EventParticipation, event: &Event) -> f64 {
    match participation.score_received {
        Some(received) if received != 0.0 => received,
        _ => event.score,
    }
}

/// 自动类标准在指定学期内的累计得分
pub fn resolve_auto(
    criteria_id: i64,
    semester: &Semester,
    participations: &[EventParticipationDetail],
    now: DateTime<Utc>,
) -> f64 {
    participations
        .iter()
        .filter(|d| d.event.criteria_id == criteria_id)
        .filter(|d| semester.covers(d.event.event_date))
        .filter(|d| participation_is_eligible(&d.participation, &d.event, now))
        .map(|d| participation_contribution(&d.participation, &d.event))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{event, manual_score, march, participation, semester};
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_student_view_counts_only_approved() {
        let pending = manual_score(1, 5.0, ApprovalStatus::Pending);
        let resolved = resolve_manual(Some(&pending), SheetView::Student);
        assert_eq!(resolved.self_score, 5.0);
        assert_eq!(resolved.achieved_score, 0.0);
        assert_eq!(resolved.note, "pending");

        let mut approved = manual_score(1, 5.0, ApprovalStatus::Approved);
        approved.approved_score = Some(4.0);
        let resolved = resolve_manual(Some(&approved), SheetView::Student);
        assert_eq!(resolved.achieved_score, 4.0);
        assert_eq!(resolved.note, "approved");
    }

    #[test]
    fn test_student_view_approved_without_score_falls_back() {
        let approved = manual_score(1, 6.0, ApprovalStatus::Approved);
        let resolved = resolve_manual(Some(&approved), SheetView::Student);
        assert_eq!(resolved.achieved_score, 6.0);
    }

    #[test]
    fn test_student_view_rejected_note() {
        let mut rejected = manual_score(1, 5.0, ApprovalStatus::Rejected);
        rejected.rejection_reason = Some("Thiếu minh chứng".into());
        let resolved = resolve_manual(Some(&rejected), SheetView::Student);
        assert_eq!(resolved.achieved_score, 0.0);
        assert_eq!(resolved.note, "Bị từ chối: Thiếu minh chứng");

        rejected.rejection_reason = None;
        let resolved = resolve_manual(Some(&rejected), SheetView::Student);
        assert_eq!(resolved.note, "Bị từ chối: ");
    }

    #[test]
    fn test_secretary_view_defaults_to_self_score() {
        let mut pending = manual_score(1, 5.0, ApprovalStatus::Pending);
        pending.description = Some("đã xem".into());
        let resolved = resolve_manual(Some(&pending), SheetView::Secretary);
        assert_eq!(resolved.achieved_score, 5.0);
        assert_eq!(resolved.approved_score, Some(5.0));
        assert_eq!(resolved.approval_status, Some(ApprovalStatus::Pending));
        assert_eq!(resolved.note, "đã xem");

        let mut rejected = manual_score(1, 5.0, ApprovalStatus::Rejected);
        rejected.approved_score = Some(2.0);
        let resolved = resolve_manual(Some(&rejected), SheetView::Secretary);
        assert_eq!(resolved.achieved_score, 2.0);
    }

    #[test]
    fn test_missing_score_resolves_to_zero() {
        let student = resolve_manual(None, SheetView::Student);
        assert_eq!(student.achieved_score, 0.0);
        assert_eq!(student.note, "");
        let secretary = resolve_manual(None, SheetView::Secretary);
        assert_eq!(secretary.approval_status, Some(ApprovalStatus::Pending));
        assert_eq!(secretary.approved_score, Some(0.0));
    }

    #[test]
    fn test_registered_needs_strictly_past_end() {
        let mut ev = event(1, 10, 5.0, march(1));
        let end = march(2);
        ev.end_date = Some(end);
        let detail = participation(ev, ParticipationStatus::Registered);

        assert!(!participation_is_eligible(&detail.participation, &detail.event, end));
        assert!(participation_is_eligible(
            &detail.participation,
            &detail.event,
            end + Duration::microseconds(1)
        ));
    }

    #[test]
    fn test_registered_without_end_date_uses_event_date() {
        let detail = participation(event(1, 10, 5.0, march(3)), ParticipationStatus::Registered);
        assert!(!participation_is_eligible(&detail.participation, &detail.event, march(2)));
        assert!(participation_is_eligible(&detail.participation, &detail.event, march(4)));
    }

    #[test]
    fn test_absent_and_cancelled_never_count() {
        for status in [ParticipationStatus::Absent, ParticipationStatus::Cancelled] {
            let detail = participation(event(1, 10, 5.0, march(1)), status);
            assert!(!participation_is_eligible(&detail.participation, &detail.event, march(20)));
        }
    }

    #[test]
    fn test_contribution_prefers_nonzero_received_score() {
        let mut detail = participation(event(1, 10, 5.0, march(1)), ParticipationStatus::Attended);
        assert_eq!(participation_contribution(&detail.participation, &detail.event), 5.0);
        detail.participation.score_received = Some(0.0);
        assert_eq!(participation_contribution(&detail.participation, &detail.event), 5.0);
        detail.participation.score_received = Some(8.0);
        assert_eq!(participation_contribution(&detail.participation, &detail.event), 8.0);
    }

    #[test]
    fn test_auto_sum_filters_criteria_and_semester() {
        let semester = semester(Some(march(1)));
        let now = march(20);
        let outside = Utc.with_ymd_and_hms(2023, 12, 20, 0, 0, 0).unwrap();
        let participations = vec![
            participation(event(1, 10, 10.0, march(2)), ParticipationStatus::Attended),
            participation(event(2, 10, 5.0, march(3)), ParticipationStatus::Registered),
            participation(event(3, 11, 7.0, march(3)), ParticipationStatus::Attended),
            participation(event(4, 10, 9.0, outside), ParticipationStatus::Attended),
        ];

        assert_eq!(resolve_auto(10, &semester, &participations, now), 15.0);
        assert_eq!(resolve_auto(11, &semester, &participations, now), 7.0);
        assert_eq!(resolve_auto(12, &semester, &participations, now), 0.0);
    }
}
