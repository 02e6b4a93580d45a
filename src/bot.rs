use std::time::Duration;

use reqwest::Client;
use tracing::{error, info, warn};

use crate::{
    error::AppError,
    models::telegram::{
        GetUpdates, InlineKeyboardButton, InlineKeyboardMarkup, Message, SendMessage,
        UpdatesResponse,
    },
};

const POLL_TIMEOUT_SECS: u64 = 50;
const POLL_RETRY_DELAY: Duration = Duration::from_secs(5);
const START_BUTTON_LABEL: &str = "Start Chat 💬";

/// Long-polling Telegram bot. Registers exactly one behavior: `/start` gets a
/// welcome message with a button linking to the web chat.
#[derive(Clone)]
pub struct BotClient {
    http_client: Client,
    api_base: String,
    webapp_url: String,
}

impl BotClient {
    #[must_use]
    pub fn new(http_client: Client, api_url: &str, token: &str, webapp_url: String) -> Self {
        Self {
            http_client,
            api_base: format!("{api_url}/bot{token}"),
            webapp_url,
        }
    }

    /// Polls for updates until the task is cancelled. A failed poll or a
    /// failed reply is logged and the loop keeps going; nothing short of
    /// cancellation stops it.
    pub async fn run_polling(&self) {
        info!("Telegram bot is polling");
        let mut offset = 0;

        loop {
            let updates = match self.get_updates(offset).await {
                Ok(updates) => updates,
                Err(e) => {
                    warn!("Polling for updates failed: {e}");
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                    continue;
                }
            };

            for update in updates.result {
                offset = offset.max(update.update_id + 1);
                let Some(message) = update.message else {
                    continue;
                };
                if let Err(e) = self.handle_message(&message).await {
                    error!("Failed to handle update {}: {e}", update.update_id);
                }
            }
        }
    }

    async fn get_updates(&self, offset: i64) -> Result<UpdatesResponse, AppError> {
        let request = GetUpdates {
            offset,
            timeout: POLL_TIMEOUT_SECS,
            allowed_updates: vec!["message".to_string()],
        };

        let response = self
            .http_client
            .post(format!("{}/getUpdates", self.api_base))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(status, body));
        }

        Ok(response.json().await?)
    }

    /// Replies to `/start` commands; every other message is ignored.
    pub async fn handle_message(&self, message: &Message) -> Result<(), AppError> {
        let Some(text) = message.text.as_deref() else {
            return Ok(());
        };
        if !is_start_command(text) {
            return Ok(());
        }

        let first_name = message
            .from
            .as_ref()
            .and_then(|user| user.first_name.as_deref());
        info!("Handling /start command in chat {}", message.chat.id);
        self.send_welcome(message.chat.id, first_name).await
    }

    async fn send_welcome(&self, chat_id: i64, first_name: Option<&str>) -> Result<(), AppError> {
        let request = SendMessage {
            chat_id,
            text: compose_welcome(first_name),
            reply_markup: Some(InlineKeyboardMarkup {
                inline_keyboard: vec![vec![InlineKeyboardButton {
                    text: START_BUTTON_LABEL.to_string(),
                    url: self.webapp_url.clone(),
                }]],
            }),
        };

        let response = self
            .http_client
            .post(format!("{}/sendMessage", self.api_base))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(status, body));
        }

        Ok(())
    }
}

#[must_use]
pub fn is_start_command(text: &str) -> bool {
    text == "/start" || text.starts_with("/start@") || text.starts_with("/start ")
}

#[must_use]
pub fn compose_welcome(first_name: Option<&str>) -> String {
    let greeting = match first_name {
        Some(name) => format!("Hello, {name}! 👋"),
        None => "Hello! 👋".to_string(),
    };
    format!(
        "{greeting}\n\nI am your AI Assistant powered by Groq.\nClick the button below to start a fast, intelligent conversation on our secure web interface."
    )
}
