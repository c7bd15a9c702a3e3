//! 通知内容模板

use chrono::{DateTime, Utc};

use super::Message;
use crate::models::actors::entities::Student;
use crate::models::events::entities::Event;

fn format_date(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d").to_string()
}

fn location_or_default(event: &Event) -> &str {
    event
        .location
        .as_deref()
        .filter(|l| !l.trim().is_empty())
        .unwrap_or("待定")
}

/// 提醒团支书完成班级评分
pub fn class_reminder(secretary: &Student, extra: Option<&str>) -> Message {
    let mut html = format!(
        "<p>{} 同学你好，</p><p>请尽快完成本班的综合测评评分工作。</p>",
        secretary.first_name
    );
    if let Some(extra) = extra.filter(|e| !e.trim().is_empty()) {
        html.push_str(&format!("<p>{}</p>", extra.trim()));
    }
    Message::new(vec![secretary.email.clone()], "综合测评评分提醒", html)
}

/// 活动取消通知
pub fn event_cancelled(recipients: Vec<String>, event: &Event, reason: Option<&str>) -> Message {
    let reason = reason
        .filter(|r| !r.trim().is_empty())
        .unwrap_or("主办方调整了活动安排");
    let html = format!(
        "<h2>活动取消通知</h2>\
         <p>活动：{}</p><p>原定时间：{}</p><p>地点：{}</p>\
         <p>取消原因：{}</p>",
        event.event_name,
        format_date(event.event_date),
        location_or_default(event),
        reason
    );
    Message::new(recipients, format!("【重要】活动取消：{}", event.event_name), html)
}

/// 活动前一天的参加提醒
pub fn event_tomorrow(recipients: Vec<String>, event: &Event) -> Message {
    let html = format!(
        "<h2>活动参加提醒</h2>\
         <p>你报名的活动 <strong>{}</strong> 将于明天举行。</p>\
         <p>时间：{}</p><p>地点：{}</p><p>请准时到场并签到。</p>",
        event.event_name,
        format_date(event.event_date),
        location_or_default(event)
    );
    Message::new(recipients, format!("活动提醒：{} 明天举行", event.event_name), html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::fixtures::{event, march};

    #[test]
    fn test_cancel_message_defaults() {
        let e = event(3, 1, 5.0, march(10));
        let message = event_cancelled(vec!["a@example.edu".into()], &e, Some("  "));
        assert!(message.subject.contains("Event 3"));
        assert!(message.html.contains("主办方调整了活动安排"));
        assert!(message.html.contains("2024-03-10"));
        assert!(message.html.contains("待定"));
    }

    #[test]
    fn test_tomorrow_message_uses_location() {
        let mut e = event(4, 1, 5.0, march(11));
        e.location = Some("礼堂".into());
        let message = event_tomorrow(vec!["b@example.edu".into()], &e);
        assert!(message.html.contains("礼堂"));
        assert_eq!(message.recipients.len(), 1);
    }
}
