//! Dual-runtime supervisor: the web server runs as a background task, the bot
//! polling loop runs on the foreground task. The foreground owns interrupt
//! handling; when it stops, `start` returns and the process exits, dropping
//! the server task with the runtime. The background task can never keep the
//! process alive on its own.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{bot::BotClient, completion::CompletionClient, config::Config, http, state::AppState};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub async fn start(config: Config) -> Result<()> {
    let http_client = Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?;

    let completion = CompletionClient::new(
        http_client.clone(),
        config.groq_base_url.clone(),
        config.groq_api_key.clone(),
        config.model.clone(),
    );
    let state = AppState { completion };

    // Bind before spawning anything so a bad port fails the whole process,
    // not just one service.
    let listen_addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("failed to bind {listen_addr}"))?;
    info!("Web server running on {listen_addr}");

    let app = http::router(state);
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Web server stopped: {e}");
        }
    });

    let bot = BotClient::new(
        http_client,
        &config.telegram_api_url,
        &config.bot_token,
        config.webapp_url.clone(),
    );

    tokio::select! {
        () = bot.run_polling() => {}
        result = tokio::signal::ctrl_c() => {
            result.context("failed to listen for shutdown signal")?;
            info!("Shutdown signal received, exiting");
        }
    }

    Ok(())
}
