//! Client for the Telegram Bot API used as the notification sink.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::config::Config;
use crate::error::TransportError;
use crate::runner::NotificationSink;

#[derive(Debug, Serialize)]
struct SendMessageBody<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: &'a str,
}

pub struct TelegramClient {
    http: Client,
    base_url: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.telegram_api_base.clone(),
            bot_token: config.telegram_bot_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
        }
    }
}

#[async_trait]
impl NotificationSink for TelegramClient {
    async fn send(&self, text: &str) -> Result<(), TransportError> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.bot_token);
        // Error targets must not carry the bot token.
        let target = format!("{}/bot<token>/sendMessage", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(&SendMessageBody {
                chat_id: &self.chat_id,
                text,
                parse_mode: "HTML",
            })
            .send()
            .await
            .map_err(|source| TransportError::Request {
                url: target.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                url: target,
                status,
            });
        }

        Ok(())
    }
}
