use std::time::Duration;

use chatbridge::bot::BotClient;
use reqwest::Client;
use serde_json::{Value, json};
use tokio::time::Instant;

use crate::helpers::{TelegramBackend, mock_telegram_backend};

const WEBAPP_URL: &str = "https://chat.example.com/";

fn update_batch() -> Value {
    json!([
        {
            // textless update, must be skipped without a reply
            "update_id": 7,
            "message": {
                "chat": { "id": 42, "type": "private" },
                "date": 1_735_689_600
            }
        },
        {
            "update_id": 8,
            "message": {
                "chat": { "id": 42, "type": "private" },
                "from": { "id": 1, "is_bot": false, "first_name": "Ana" },
                "date": 1_735_689_601,
                "text": "/start"
            }
        }
    ])
}

fn spawn_poller(backend: &TelegramBackend) -> tokio::task::JoinHandle<()> {
    let bot = BotClient::new(
        Client::new(),
        &backend.base_url,
        "123456:TESTTOKEN",
        WEBAPP_URL.to_string(),
    );
    tokio::spawn(async move { bot.run_polling().await })
}

async fn wait_until(deadline: Duration, mut done: impl FnMut() -> bool) {
    let deadline = Instant::now() + deadline;
    while !done() {
        assert!(
            Instant::now() < deadline,
            "condition not reached before deadline"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn polling_replies_to_start_and_advances_the_offset() {
    let backend = mock_telegram_backend(update_batch(), false).await;
    let poller = spawn_poller(&backend);

    let polls = backend.polls.clone();
    wait_until(Duration::from_secs(5), move || {
        polls.lock().expect("Recorder mutex should not be poisoned").len() >= 2
    })
    .await;
    poller.abort();

    let polls = backend
        .polls
        .lock()
        .expect("Recorder mutex should not be poisoned");
    assert_eq!(polls[0]["offset"], 0);
    assert_eq!(
        polls[1]["offset"], 9,
        "next poll should ask past the last seen update"
    );

    let sent = backend
        .sent
        .lock()
        .expect("Recorder mutex should not be poisoned");
    assert_eq!(sent.len(), 1, "only the /start update gets a reply");
    assert_eq!(sent[0]["chat_id"], 42);
    let text = sent[0]["text"].as_str().unwrap_or_default();
    assert!(text.contains("Ana"));
}

#[tokio::test]
async fn polling_survives_a_failed_poll() {
    // first getUpdates returns 500; the loop must retry and then handle the
    // batch normally (retry delay is a few seconds, so is this test)
    let backend = mock_telegram_backend(update_batch(), true).await;
    let poller = spawn_poller(&backend);

    let sent = backend.sent.clone();
    wait_until(Duration::from_secs(15), move || {
        !sent
            .lock()
            .expect("Recorder mutex should not be poisoned")
            .is_empty()
    })
    .await;
    poller.abort();

    let polls = backend
        .polls
        .lock()
        .expect("Recorder mutex should not be poisoned");
    assert!(polls.len() >= 2, "loop should poll again after the failure");

    let sent = backend
        .sent
        .lock()
        .expect("Recorder mutex should not be poisoned");
    assert_eq!(sent.len(), 1);
}
