use std::env;

use anyhow::{Context, Result, ensure};

const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "llama3-8b-8192";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
const DEFAULT_WEBAPP_URL: &str = "http://localhost:8080/";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub model: String,
    pub port: u16,
    pub webapp_url: String,
    pub telegram_api_url: String,
}

impl Config {
    /// Resolves the full configuration from the environment. Secrets have no
    /// fallback values; a missing or empty credential aborts startup before
    /// either service is spawned.
    pub fn from_env() -> Result<Self> {
        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {raw:?}"))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            bot_token: required("BOT_TOKEN")?,
            groq_api_key: required("GROQ_API_KEY")?,
            groq_base_url: optional("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL),
            model: optional("GROQ_MODEL_NAME", DEFAULT_MODEL),
            port,
            webapp_url: optional("WEBAPP_URL", DEFAULT_WEBAPP_URL),
            telegram_api_url: optional("TELEGRAM_API_URL", DEFAULT_TELEGRAM_API_URL),
        })
    }
}

fn required(name: &str) -> Result<String> {
    let value =
        env::var(name).with_context(|| format!("{name} environment variable is required"))?;
    ensure!(!value.trim().is_empty(), "{name} must not be empty");
    Ok(value)
}

fn optional(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}
