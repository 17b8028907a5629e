use std::time::Duration;

use serde_json::Value;

use hwbot_common::config::AppConfig;
use hwbot_common::error::{AppError, ShapeViolation};
use hwbot_notifier::{MessageSender, Notifier, TelegramSender};

use crate::client::{HomeworkApi, PracticumClient};
use crate::formatter::format_status_change;
use crate::validator::extract_submissions;

/// Prefix of every diagnostic sent to the chat.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Dedup state kept for the lifetime of the process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollState {
    pub last_seen_status: Option<String>,
    pub last_seen_error: Option<String>,
    pub since_timestamp: i64,
}

/// Result of a single poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The latest submission changed status and the chat was told.
    Notified,
    /// The latest submission still has the last notified status.
    Unchanged,
    /// The cycle failed; `notified` is false when the same diagnostic was already sent.
    Failed { notified: bool },
}

/// Polls the status API on a fixed cadence and relays status changes to the chat.
pub struct StatusPoller<A, S> {
    api: A,
    notifier: Notifier<S>,
    retry_interval: Duration,
    state: PollState,
}

impl StatusPoller<PracticumClient, TelegramSender> {
    /// Wire the production HTTP clients from configuration.
    pub fn from_config(
        config: &AppConfig,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Self, AppError> {
        let api = PracticumClient::new(
            config.practicum_endpoint.clone(),
            config.practicum_token.clone(),
            config.request_timeout(),
        )?;
        let sender = TelegramSender::new(
            config.telegram_api_url.clone(),
            config.telegram_token.clone(),
            config.request_timeout(),
        )?;

        Ok(Self::new(
            api,
            Notifier::new(sender, config.telegram_chat_id.clone()),
            config.retry_interval(),
            config.initial_since(now),
        ))
    }
}

impl<A: HomeworkApi, S: MessageSender> StatusPoller<A, S> {
    pub fn new(
        api: A,
        notifier: Notifier<S>,
        retry_interval: Duration,
        since_timestamp: i64,
    ) -> Self {
        Self {
            api,
            notifier,
            retry_interval,
            state: PollState {
                since_timestamp,
                ..PollState::default()
            },
        }
    }

    pub fn state(&self) -> &PollState {
        &self.state
    }

    /// Start the polling loop. Runs until the task is cancelled.
    ///
    /// Every cycle, successful or not, is followed by the same fixed sleep.
    pub async fn run(&mut self) {
        tracing::info!(
            since = self.state.since_timestamp,
            retry_interval_secs = self.retry_interval.as_secs(),
            chat_id = %self.notifier.chat_id(),
            "Status poller started"
        );

        loop {
            let outcome = self.poll_once().await;
            tracing::debug!(?outcome, "Poll cycle finished");
            tokio::time::sleep(self.retry_interval).await;
        }
    }

    /// Run one fetch → validate → compare → notify cycle without sleeping.
    pub async fn poll_once(&mut self) -> CycleOutcome {
        let payload = match self.api.fetch(self.state.since_timestamp).await {
            Ok(payload) => payload,
            Err(e) => return self.report_failure(e).await,
        };

        match self.process(&payload).await {
            Ok(outcome) => outcome,
            Err(e) => self.report_failure(e).await,
        }
    }

    async fn process(&mut self, payload: &Value) -> Result<CycleOutcome, AppError> {
        let submissions = extract_submissions(payload)?;
        let latest = submissions
            .first()
            .ok_or(AppError::Shape(ShapeViolation::NoSubmissions))?;
        let status = status_of(latest)?;

        if self.state.last_seen_status.as_deref() == Some(status.as_str()) {
            tracing::debug!(%status, "No status update");
            return Ok(CycleOutcome::Unchanged);
        }

        self.state.last_seen_status = Some(status);
        let message = format_status_change(latest)?;
        self.notifier.notify(&message).await;
        Ok(CycleOutcome::Notified)
    }

    async fn report_failure(&mut self, error: AppError) -> CycleOutcome {
        match &error {
            AppError::Transport(_) | AppError::HttpStatus(_) | AppError::Decode(_) => {
                tracing::error!(error = %error, "Failed to fetch homework statuses");
            }
            AppError::Shape(_) | AppError::UnknownField(_) | AppError::UnknownStatus(_) => {
                tracing::error!(error = %error, "Status API response rejected");
            }
            // Not produced by a cycle; reported the same way so nothing is lost.
            AppError::MissingCredential(_) | AppError::Config(_) | AppError::NotificationSend(_) => {
                tracing::error!(error = %error, "Unexpected failure in poll cycle");
            }
        }

        let message = diagnostic(&error);
        if self.state.last_seen_error.as_deref() == Some(message.as_str()) {
            tracing::debug!("Same failure already reported to chat");
            return CycleOutcome::Failed { notified: false };
        }

        self.notifier.notify(&message).await;
        self.state.last_seen_error = Some(message);
        CycleOutcome::Failed { notified: true }
    }
}

/// Chat text reported for a failed cycle.
pub fn diagnostic(error: &AppError) -> String {
    format!("{FAILURE_PREFIX}: {error}")
}

fn status_of(record: &Value) -> Result<String, AppError> {
    match record.get("status") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Ok(other.to_string()),
        None => Err(AppError::UnknownField("status")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_diagnostic_text() {
        assert_eq!(
            diagnostic(&AppError::HttpStatus(500)),
            "Сбой в работе программы: Status API returned HTTP 500"
        );
    }

    #[test]
    fn test_status_of() {
        assert_eq!(status_of(&json!({"status": "approved"})).unwrap(), "approved");
        assert_eq!(status_of(&json!({"status": 1})).unwrap(), "1");
        assert!(matches!(
            status_of(&json!({"homework_name": "hw1"})),
            Err(AppError::UnknownField("status"))
        ));
    }
}
