//! 评分时间窗口

use chrono::{DateTime, Duration, Utc};

use crate::config::GradingConfig;
use crate::models::semesters::entities::Semester;

/// 评分窗口策略
///
/// 学生自评窗口为 `[grading_start, grading_start + student_window]`，两端闭区间；
/// 团支书审核窗口延续到评分截止日期，仅作为提示，不限制写入。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradingPolicy {
    student_window: Duration,
    deadline_offset: Duration,
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self::from_config(&GradingConfig::default())
    }
}

impl GradingPolicy {
    pub fn new(student_window_days: i64, deadline_offset_days: i64) -> Self {
        Self {
            student_window: Duration::days(student_window_days),
            deadline_offset: Duration::days(deadline_offset_days),
        }
    }

    pub fn from_config(config: &GradingConfig) -> Self {
        Self::new(config.student_window_days, config.deadline_offset_days)
    }

    /// 学生自评窗口，学期或自评开始时间缺失时为 None
    pub fn student_window(&self, semester: Option<&Semester>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let start = semester?.grading_start_date?;
        Some((start, start + self.student_window))
    }

    pub fn is_within_grading_period(&self, semester: Option<&Semester>, now: DateTime<Utc>) -> bool {
        match self.student_window(semester) {
            Some((start, end)) => start <= now && now <= end,
            None => false,
        }
    }

    /// 由自评开始时间推导评分截止时间
    pub fn grading_deadline(&self, grading_start: DateTime<Utc>) -> DateTime<Utc> {
        grading_start + self.deadline_offset
    }

    pub fn is_within_review_period(&self, semester: Option<&Semester>, now: DateTime<Utc>) -> bool {
        let Some(semester) = semester else {
            return false;
        };
        let Some(start) = semester.grading_start_date else {
            return false;
        };
        let deadline = semester
            .grading_deadline
            .unwrap_or_else(|| self.grading_deadline(start));
        start <= now && now <= deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{march, semester};

    #[test]
    fn test_window_is_inclusive_at_both_ends() {
        let policy = GradingPolicy::default();
        let semester = semester(Some(march(1)));

        assert!(policy.is_within_grading_period(Some(&semester), march(1)));
        assert!(policy.is_within_grading_period(Some(&semester), march(8)));
        assert!(policy.is_within_grading_period(Some(&semester), march(5)));
    }

    #[test]
    fn test_window_rejects_one_microsecond_outside() {
        let policy = GradingPolicy::default();
        let semester = semester(Some(march(1)));
        let tick = Duration::microseconds(1);

        assert!(!policy.is_within_grading_period(Some(&semester), march(1) - tick));
        assert!(!policy.is_within_grading_period(Some(&semester), march(8) + tick));
    }

    #[test]
    fn test_missing_semester_or_start_is_closed() {
        let policy = GradingPolicy::default();
        assert!(!policy.is_within_grading_period(None, march(2)));

        let semester = semester(None);
        assert!(!policy.is_within_grading_period(Some(&semester), march(2)));
        assert!(!policy.is_within_review_period(Some(&semester), march(2)));
    }

    #[test]
    fn test_review_period_extends_to_deadline() {
        let policy = GradingPolicy::default();
        let semester = semester(Some(march(1)));

        assert!(!policy.is_within_grading_period(Some(&semester), march(10)));
        assert!(policy.is_within_review_period(Some(&semester), march(10)));
        assert!(policy.is_within_review_period(Some(&semester), march(15)));
        assert!(!policy.is_within_review_period(Some(&semester), march(16)));
    }

    #[test]
    fn test_configured_window_length() {
        let policy = GradingPolicy::new(3, 10);
        let semester = semester(Some(march(1)));
        assert!(policy.is_within_grading_period(Some(&semester), march(4)));
        assert!(!policy.is_within_grading_period(Some(&semester), march(5)));
        assert_eq!(policy.grading_deadline(march(1)), march(11));
    }
}
