//! 测评流程状态机
//!
//! `draft → submitted → class_reviewed → faculty_reviewed → finalized`，只能向前推进。

use chrono::{DateTime, Utc};

use super::Violation;
use super::time_window::GradingPolicy;
use crate::models::actors::entities::{Class, Principal};
use crate::models::assessments::entities::{AssessmentStatus, ReviewCounts};
use crate::models::criteria::entities::{Criteria, ScoringType};
use crate::models::semesters::entities::Semester;

// 确认总分与计算总分之间可接受的浮点误差
const TOTAL_TOLERANCE: f64 = 1e-6;

/// 学生提交自评前的检查
pub fn check_self_submission(
    policy: &GradingPolicy,
    semester: &Semester,
    criteria: &Criteria,
    self_score: f64,
    now: DateTime<Utc>,
) -> Result<(), Violation> {
    if !policy.is_within_grading_period(Some(semester), now) {
        return Err(Violation::GradingPeriodClosed);
    }
    if criteria.scoring_type == ScoringType::Auto {
        return Err(Violation::AutoScoredCriteria);
    }
    if !self_score.is_finite() || self_score < 0.0 {
        return Err(Violation::NegativeScore);
    }
    Ok(())
}

/// 团支书审核分数的检查，不受时间限制
pub fn check_score_review(criteria: &Criteria, approved_score: Option<f64>) -> Result<(), Violation> {
    if criteria.scoring_type == ScoringType::Auto {
        return Err(Violation::AutoScoredCriteria);
    }
    match approved_score {
        Some(score) if !score.is_finite() || score < 0.0 => Err(Violation::NegativeScore),
        _ => Ok(()),
    }
}

/// 团支书确认学生总分：已进入学院审核的测评不能回退
pub fn check_class_finalize(current: Option<AssessmentStatus>) -> Result<(), Violation> {
    match current {
        Some(status) if status.is_at_least(AssessmentStatus::FacultyReviewed) => {
            Err(Violation::AssessmentLocked)
        }
        _ => Ok(()),
    }
}

/// 确认总分是否与团支书视角计算出的总分不一致
pub fn total_mismatch(supplied: f64, computed: f64) -> bool {
    (supplied - computed).abs() > TOTAL_TOLERANCE
}

/// 学院审批班级：所有学生都已完成班级评审，空班级视为完成
pub fn check_class_approval(counts: ReviewCounts) -> Result<(), Violation> {
    if counts.class_reviewed == counts.students {
        Ok(())
    } else {
        Err(Violation::ClassIncomplete {
            students: counts.students,
            reviewed: counts.class_reviewed,
        })
    }
}

/// 学校确认学院：学院内所有学生都已完成学院评审
pub fn check_faculty_finalization(classes: &[ReviewCounts]) -> Result<(), Violation> {
    let students: u64 = classes.iter().map(|c| c.students).sum();
    let reviewed: u64 = classes.iter().map(|c| c.faculty_reviewed).sum();
    if students == reviewed {
        Ok(())
    } else {
        Err(Violation::FacultyIncomplete { students, reviewed })
    }
}

pub fn ensure_class_access(principal: &Principal, class: &Class) -> Result<(), Violation> {
    if principal.can_manage_class(class) {
        Ok(())
    } else {
        Err(Violation::ClassPermissionDenied)
    }
}

pub fn ensure_faculty_access(principal: &Principal, faculty_id: i64) -> Result<(), Violation> {
    if principal.can_manage_faculty(faculty_id) {
        Ok(())
    } else {
        Err(Violation::FacultyPermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::engine::fixtures::{criteria, march, semester};

    fn counts(students: u64, class_reviewed: u64, faculty_reviewed: u64) -> ReviewCounts {
        ReviewCounts {
            students,
            class_reviewed,
            faculty_reviewed,
        }
    }

    #[test]
    fn test_submission_window_boundaries() {
        let policy = GradingPolicy::default();
        let sem = semester(Some(march(1)));
        let manual = criteria(1, 1, 1, ScoringType::Manual);
        let tick = Duration::microseconds(1);

        assert!(check_self_submission(&policy, &sem, &manual, 5.0, march(1)).is_ok());
        assert!(check_self_submission(&policy, &sem, &manual, 5.0, march(8)).is_ok());
        assert_eq!(
            check_self_submission(&policy, &sem, &manual, 5.0, march(1) - tick),
            Err(Violation::GradingPeriodClosed)
        );
        assert_eq!(
            check_self_submission(&policy, &sem, &manual, 5.0, march(8) + tick),
            Err(Violation::GradingPeriodClosed)
        );
    }

    #[test]
    fn test_submission_rejects_auto_and_negative() {
        let policy = GradingPolicy::default();
        let sem = semester(Some(march(1)));
        let auto = criteria(2, 1, 2, ScoringType::Auto);
        let manual = criteria(1, 1, 1, ScoringType::Manual);

        assert_eq!(
            check_self_submission(&policy, &sem, &auto, 5.0, march(3)),
            Err(Violation::AutoScoredCriteria)
        );
        assert_eq!(
            check_self_submission(&policy, &sem, &manual, -1.0, march(3)),
            Err(Violation::NegativeScore)
        );
        assert_eq!(
            check_self_submission(&policy, &semester(None), &manual, 5.0, march(3)),
            Err(Violation::GradingPeriodClosed)
        );
    }

    #[test]
    fn test_review_is_time_unconstrained() {
        let manual = criteria(1, 1, 1, ScoringType::Manual);
        assert!(check_score_review(&manual, Some(4.0)).is_ok());
        assert!(check_score_review(&manual, None).is_ok());
        assert_eq!(
            check_score_review(&criteria(2, 1, 2, ScoringType::Auto), Some(4.0)),
            Err(Violation::AutoScoredCriteria)
        );
    }

    #[test]
    fn test_class_finalize_never_regresses() {
        assert!(check_class_finalize(None).is_ok());
        assert!(check_class_finalize(Some(AssessmentStatus::Draft)).is_ok());
        assert!(check_class_finalize(Some(AssessmentStatus::ClassReviewed)).is_ok());
        assert_eq!(
            check_class_finalize(Some(AssessmentStatus::FacultyReviewed)),
            Err(Violation::AssessmentLocked)
        );
        assert_eq!(
            check_class_finalize(Some(AssessmentStatus::Finalized)),
            Err(Violation::AssessmentLocked)
        );
    }

    #[test]
    fn test_class_approval_gate() {
        assert!(check_class_approval(counts(0, 0, 0)).is_ok());
        assert!(check_class_approval(counts(10, 10, 3)).is_ok());
        assert_eq!(
            check_class_approval(counts(10, 9, 0)),
            Err(Violation::ClassIncomplete {
                students: 10,
                reviewed: 9
            })
        );
    }

    #[test]
    fn test_faculty_finalization_sums_classes() {
        assert!(check_faculty_finalization(&[]).is_ok());
        assert!(check_faculty_finalization(&[counts(3, 3, 3), counts(0, 0, 0)]).is_ok());
        assert_eq!(
            check_faculty_finalization(&[counts(3, 3, 3), counts(4, 4, 2)]),
            Err(Violation::FacultyIncomplete {
                students: 7,
                reviewed: 5
            })
        );
    }

    #[test]
    fn test_total_mismatch() {
        assert!(!total_mismatch(82.5, 82.5));
        assert!(total_mismatch(82.5, 80.0));
    }
}
