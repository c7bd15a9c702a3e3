//! 首页活动统计

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveTime, TimeZone, Utc};

use super::completion::percentage;
use super::structure::CriteriaStructure;
use crate::models::events::entities::Event;
use crate::models::events::responses::{CategoryShare, DashboardStatsResponse};

const RECENT_EVENT_LIMIT: usize = 5;

/// 本周周一 00:00 至下周一 00:00（UTC）
pub fn week_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let monday = now.date_naive() - Duration::days(i64::from(now.weekday().num_days_from_monday()));
    let start = Utc.from_utc_datetime(&monday.and_time(NaiveTime::MIN));
    (start, start + Duration::days(7))
}

/// 已开始且结束日期未过；没有结束日期的活动不算进行中
pub fn is_ongoing(event: &Event, now: DateTime<Utc>) -> bool {
    event.event_date <= now && event.end_date.is_some_and(|end| end >= now)
}

/// 按评分大类统计活动数；标准不在有效结构中的活动不计入
pub fn category_shares(events: &[Event], structure: &CriteriaStructure) -> Vec<CategoryShare> {
    let mut counts: BTreeMap<(i32, String), u64> = BTreeMap::new();
    for event in events {
        if let Some((category, _)) = structure.find_criteria(event.criteria_id) {
            *counts
                .entry((category.order, category.category_name.clone()))
                .or_default() += 1;
        }
    }

    let total: u64 = counts.values().sum();
    counts
        .into_iter()
        .map(|((_, name), value)| CategoryShare {
            name,
            value,
            percentage: percentage(value, total),
        })
        .collect()
}

/// `events` 为全部已审批的有效活动，按活动日期倒序
pub fn build_dashboard(
    events: Vec<Event>,
    total_students: u64,
    total_participations: u64,
    structure: &CriteriaStructure,
    now: DateTime<Utc>,
) -> DashboardStatsResponse {
    let (week_start, week_end) = week_window(now);

    let mut weekly_events: Vec<Event> = events
        .iter()
        .filter(|e| e.event_date >= week_start && e.event_date < week_end)
        .cloned()
        .collect();
    weekly_events.sort_by_key(|e| e.event_date);

    DashboardStatsResponse {
        total_events: events.len() as u64,
        total_students,
        ongoing_events: events.iter().filter(|e| is_ongoing(e, now)).count() as u64,
        total_participations,
        category_stats: category_shares(&events, structure),
        recent_events: events.iter().take(RECENT_EVENT_LIMIT).cloned().collect(),
        weekly_events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{category, criteria, event, march};
    use crate::models::criteria::entities::ScoringType;

    #[test]
    fn test_week_window_starts_on_monday() {
        // 2024-03-10 是周日
        let sunday = Utc.with_ymd_and_hms(2024, 3, 10, 22, 0, 0).unwrap();
        assert_eq!(week_window(sunday), (march(4), march(11)));

        let monday = Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap();
        assert_eq!(week_window(monday), (march(11), march(18)));
    }

    #[test]
    fn test_ongoing_requires_end_date() {
        let mut e = event(1, 1, 5.0, march(5));
        assert!(!is_ongoing(&e, march(6)));

        e.end_date = Some(march(7));
        assert!(is_ongoing(&e, march(6)));
        assert!(is_ongoing(&e, march(7)));
        assert!(!is_ongoing(&e, march(8)));
        assert!(!is_ongoing(&e, march(4)));
    }

    #[test]
    fn test_category_shares() {
        let structure = CriteriaStructure::build(
            vec![category(1, 1, 20.0), category(2, 2, 25.0)],
            vec![
                criteria(11, 1, 1, ScoringType::Auto),
                criteria(21, 2, 1, ScoringType::Auto),
            ],
        );
        let events = vec![
            event(1, 11, 5.0, march(1)),
            event(2, 21, 5.0, march(2)),
            event(3, 21, 5.0, march(3)),
            // 标准已停用
            event(4, 99, 5.0, march(4)),
        ];

        let shares = category_shares(&events, &structure);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].name, "Category 1");
        assert_eq!((shares[0].value, shares[0].percentage), (1, 33));
        assert_eq!((shares[1].value, shares[1].percentage), (2, 67));
    }

    #[test]
    fn test_build_dashboard() {
        let structure = CriteriaStructure::build(
            vec![category(1, 1, 20.0)],
            vec![criteria(11, 1, 1, ScoringType::Auto)],
        );
        let mut running = event(3, 11, 5.0, march(9));
        running.end_date = Some(march(12));
        let events: Vec<Event> = vec![
            event(8, 11, 5.0, march(20)),
            event(7, 11, 5.0, march(18)),
            event(6, 11, 5.0, march(15)),
            event(5, 11, 5.0, march(13)),
            event(4, 11, 5.0, march(11)),
            running,
            event(2, 11, 5.0, march(1)),
        ];

        let now = Utc.with_ymd_and_hms(2024, 3, 11, 12, 0, 0).unwrap();
        let stats = build_dashboard(events, 120, 40, &structure, now);
        assert_eq!(stats.total_events, 7);
        assert_eq!(stats.total_students, 120);
        assert_eq!(stats.total_participations, 40);
        assert_eq!(stats.ongoing_events, 1);
        assert_eq!(stats.recent_events.len(), 5);
        assert_eq!(stats.recent_events[0].id, 8);

        let weekly: Vec<i64> = stats.weekly_events.iter().map(|e| e.id).collect();
        assert_eq!(weekly, vec![4, 5, 6]);
        assert_eq!(stats.category_stats[0].percentage, 100);
    }
}
