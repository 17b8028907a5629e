//! Notification delivery.
//!
//! `MessageSender` is the raw send capability of a messaging channel.
//! `Notifier` binds a sender to the single destination chat and never lets a
//! delivery failure escape: the poll loop keeps running whatever the channel does.

use std::future::Future;

use hwbot_common::error::AppError;

pub mod telegram;

pub use telegram::TelegramSender;

/// Outbound message channel.
pub trait MessageSender {
    /// Deliver `text` to `chat_id`. Failures are reported as `AppError::NotificationSend`.
    fn send(&self, chat_id: &str, text: &str) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Sends messages to one fixed chat, logging and swallowing delivery failures.
pub struct Notifier<S> {
    sender: S,
    chat_id: String,
}

impl<S: MessageSender> Notifier<S> {
    pub fn new(sender: S, chat_id: impl Into<String>) -> Self {
        Self {
            sender,
            chat_id: chat_id.into(),
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub async fn notify(&self, message: &str) {
        match self.sender.send(&self.chat_id, message).await {
            Ok(()) => {
                tracing::info!(chat_id = %self.chat_id, "Message sent to chat");
            }
            Err(e) => {
                tracing::error!(chat_id = %self.chat_id, error = %e, "Failed to send message to chat");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    struct RecordingSender {
        sent: Mutex<Vec<(String, String)>>,
        fail: bool,
    }

    impl MessageSender for RecordingSender {
        async fn send(&self, chat_id: &str, text: &str) -> Result<(), AppError> {
            self.sent
                .lock()
                .unwrap()
                .push((chat_id.to_string(), text.to_string()));
            if self.fail {
                return Err(AppError::NotificationSend("channel down".into()));
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_notify_targets_configured_chat() {
        let notifier = Notifier::new(RecordingSender::default(), "42");
        notifier.notify("hello").await;

        let sent = notifier.sender.sent.lock().unwrap();
        assert_eq!(sent.as_slice(), &[("42".to_string(), "hello".to_string())]);
    }

    #[tokio::test]
    async fn test_notify_swallows_send_failure() {
        let sender = RecordingSender {
            fail: true,
            ..Default::default()
        };
        let notifier = Notifier::new(sender, "42");

        // Must return normally even though the channel rejected the message.
        notifier.notify("hello").await;
        notifier.notify("again").await;

        assert_eq!(notifier.sender.sent.lock().unwrap().len(), 2);
    }
}
