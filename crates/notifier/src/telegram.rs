use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use hwbot_common::error::AppError;

use crate::MessageSender;

/// Telegram Bot API `sendMessage` client.
#[derive(Clone)]
pub struct TelegramSender {
    client: Client,
    api_url: String,
    token: String,
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct BotApiReply {
    ok: bool,
    description: Option<String>,
}

impl TelegramSender {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build Telegram client: {e}")))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            token: token.into(),
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_url.trim_end_matches('/'),
            self.token,
            method
        )
    }
}

impl MessageSender for TelegramSender {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), AppError> {
        // The bot token is part of the URL, so it is stripped from every error.
        let response = self
            .client
            .post(self.method_url("sendMessage"))
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .map_err(|e| AppError::NotificationSend(e.without_url().to_string()))?;

        let status = response.status();
        let reply = response.json::<BotApiReply>().await.ok();

        match reply {
            Some(BotApiReply { ok: true, .. }) if status.is_success() => Ok(()),
            Some(BotApiReply { description, .. }) => Err(AppError::NotificationSend(format!(
                "Telegram API returned HTTP {}: {}",
                status.as_u16(),
                description.unwrap_or_else(|| "no description".to_string())
            ))),
            None => Err(AppError::NotificationSend(format!(
                "Telegram API returned HTTP {} with an unreadable body",
                status.as_u16()
            ))),
        }
    }
}
