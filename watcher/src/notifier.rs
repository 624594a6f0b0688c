//! Delivery of notification text to Telegram.
//!
//! Delivery is best effort: a broken notification channel must never stop
//! the watcher, so [`Notifier::notify`] reports what happened instead of
//! returning an error.

use async_trait::async_trait;
use reqwest::Client;
use shared::{SendMessageRequest, SendMessageResponse};

use crate::config::WatchConfig;
use crate::error::ConfigError;

/// Result of one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Delivered,
    /// The service answered `ok: false`
    Rejected(String),
    /// Transport failure or an unreadable reply
    Failed(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send already formatted MarkdownV2 text.
    async fn notify(&self, text: &str) -> Delivery;
}

pub struct TelegramNotifier {
    client: Client,
    send_url: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &WatchConfig) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(ConfigError::Client)?;

        Ok(Self {
            client,
            send_url: format!(
                "{}/bot{}/sendMessage",
                config.telegram_api_url.trim_end_matches('/'),
                config.telegram_bot_token
            ),
            chat_id: config.telegram_chat_id.clone(),
        })
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    async fn send(&self, text: &str) -> Result<SendMessageResponse, reqwest::Error> {
        let body = SendMessageRequest::markdown(&self.chat_id, text);
        self.client
            .post(&self.send_url)
            .json(&body)
            .send()
            .await?
            .json::<SendMessageResponse>()
            .await
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, text: &str) -> Delivery {
        match self.send(text).await {
            Ok(response) if response.ok => {
                tracing::info!("Telegram message sent to chat {}", self.chat_id);
                Delivery::Delivered
            }
            Ok(response) => {
                let description = response
                    .description
                    .unwrap_or_else(|| "no description".to_string());
                tracing::error!("Telegram rejected message: {}", description);
                Delivery::Rejected(description)
            }
            // Error text can echo the request URL, which embeds the bot token
            Err(e) => {
                let e = e.without_url();
                tracing::error!("Failed to reach Telegram API: {}", e);
                Delivery::Failed(e.to_string())
            }
        }
    }
}
