//! 通知发送
//!
//! 邮件投递由外部服务完成，这里只定义发送接口和消息内容。

pub mod templates;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::errors::Result;

/// 待发送的通知
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub recipients: Vec<String>,
    pub subject: String,
    pub html: String,
}

impl Message {
    /// 去掉空白地址
    pub fn new(recipients: Vec<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            recipients: recipients
                .into_iter()
                .map(|r| r.trim().to_string())
                .filter(|r| !r.is_empty())
                .collect(),
            subject: subject.into(),
            html: html.into(),
        }
    }
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, message: Message) -> Result<()>;
}

/// 将通知写入日志
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, message: Message) -> Result<()> {
        if message.recipients.is_empty() {
            info!("通知无收件人，已跳过: {}", message.subject);
            return Ok(());
        }
        info!(
            recipients = message.recipients.len(),
            subject = %message.subject,
            "发送通知"
        );
        tracing::debug!("通知内容: {}", message.html);
        Ok(())
    }
}

pub fn create_notifier() -> Arc<dyn Notifier> {
    Arc::new(LogNotifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_recipients_dropped() {
        let message = Message::new(
            vec!["a@example.edu".into(), "  ".into(), String::new()],
            "主题",
            "<p>内容</p>",
        );
        assert_eq!(message.recipients, vec!["a@example.edu".to_string()]);
    }

    #[tokio::test]
    async fn test_log_notifier_accepts_empty() {
        let notifier = LogNotifier;
        let result = notifier.send(Message::new(vec![], "主题", "")).await;
        assert!(result.is_ok());
    }
}
