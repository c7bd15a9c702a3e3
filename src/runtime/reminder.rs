//! 活动前一天的参加提醒
//!
//! 后台任务按 `reminder.check_interval_secs` 定期检查，每天到达 `reminder.hour`（UTC）后
//! 向次日举行的已审批活动的报名学生发送一次提醒。

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::events::entities::ParticipationStatus;
use crate::notify::{Notifier, templates};
use crate::storage::Storage;

/// 次日 [00:00, 24:00) 的时间范围
pub fn tomorrow_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let tomorrow = now.date_naive() + Duration::days(1);
    let start = Utc.from_utc_datetime(&tomorrow.and_time(NaiveTime::MIN));
    (start, start + Duration::days(1))
}

/// 当前小时为提醒时刻且当天尚未发送
pub fn is_due(now: DateTime<Utc>, hour: u32, last_sent: Option<NaiveDate>) -> bool {
    now.hour() == hour && last_sent != Some(now.date_naive())
}

/// 发送次日活动提醒，返回成功发送的活动数
pub async fn send_tomorrow_reminders(
    storage: &dyn Storage,
    notifier: &dyn Notifier,
    now: DateTime<Utc>,
) -> Result<usize> {
    let (from, to) = tomorrow_window(now);
    let events = storage.list_events_between(from, to).await?;
    let mut sent = 0;

    for event in &events {
        let recipients: Vec<String> = storage
            .list_event_participants(event.id)
            .await?
            .into_iter()
            .filter(|p| p.participation.status == ParticipationStatus::Registered)
            .map(|p| p.student.email)
            .collect();

        if recipients.is_empty() {
            continue;
        }

        let count = recipients.len();
        match notifier.send(templates::event_tomorrow(recipients, event)).await {
            Ok(()) => {
                sent += 1;
                debug!(event_id = event.id, recipients = count, "已发送活动提醒");
            }
            Err(e) => warn!(event_id = event.id, "发送活动提醒失败: {}", e),
        }
    }

    Ok(sent)
}

pub fn spawn_reminder_job(
    storage: Arc<dyn Storage>,
    notifier: Arc<dyn Notifier>,
) -> Option<JoinHandle<()>> {
    let config = &AppConfig::get().reminder;
    if !config.enabled {
        info!("Event reminder job disabled");
        return None;
    }

    let hour = config.hour;
    let period = std::time::Duration::from_secs(config.check_interval_secs.max(1));

    Some(tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        let mut last_sent: Option<NaiveDate> = None;

        loop {
            interval.tick().await;
            let now = Utc::now();
            if !is_due(now, hour, last_sent) {
                continue;
            }

            match send_tomorrow_reminders(storage.as_ref(), notifier.as_ref(), now).await {
                Ok(sent) => {
                    info!("Event reminders sent for {} event(s)", sent);
                    last_sent = Some(now.date_naive());
                }
                Err(e) => warn!("Event reminder run failed: {}", e),
            }
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tomorrow_window() {
        let now = Utc.with_ymd_and_hms(2024, 3, 31, 8, 15, 0).unwrap();
        let (from, to) = tomorrow_window(now);
        assert_eq!(from, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap());
        assert_eq!(to, Utc.with_ymd_and_hms(2024, 4, 2, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_due_once_per_day() {
        let at_eight = Utc.with_ymd_and_hms(2024, 3, 5, 8, 30, 0).unwrap();
        assert!(is_due(at_eight, 8, None));
        assert!(!is_due(at_eight, 9, None));
        assert!(!is_due(at_eight, 8, Some(at_eight.date_naive())));

        let next_day = Utc.with_ymd_and_hms(2024, 3, 6, 8, 0, 0).unwrap();
        assert!(is_due(next_day, 8, Some(at_eight.date_naive())));
    }
}
