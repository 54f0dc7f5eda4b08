mod common;

use std::convert::Infallible;
use std::sync::Mutex;

use common::*;
use icebreaker::config::Credentials;
use icebreaker::frontend::{self, BLANK_TEXT, ChatReplies, PROCESSING_TEXT, TOO_SHORT_TEXT};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Sent(String),
    Notified(String),
    Retracted(usize),
}

/// In-memory chat that records every outbound action in order.
#[derive(Default)]
struct RecordingChat {
    events: Mutex<Vec<Event>>,
}

impl RecordingChat {
    fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    fn last_sent(&self) -> String {
        self.events()
            .into_iter()
            .rev()
            .find_map(|e| match e {
                Event::Sent(text) => Some(text),
                _ => None,
            })
            .expect("a reply should have been sent")
    }
}

impl ChatReplies for RecordingChat {
    type Notice = usize;
    type Error = Infallible;

    async fn send(&self, text: String) -> Result<(), Infallible> {
        self.events.lock().unwrap().push(Event::Sent(text));
        Ok(())
    }

    async fn notify(&self, text: &str) -> Result<usize, Infallible> {
        let mut events = self.events.lock().unwrap();
        events.push(Event::Notified(text.to_owned()));
        Ok(events.len() - 1)
    }

    async fn retract(&self, notice: usize) {
        self.events.lock().unwrap().push(Event::Retracted(notice));
    }
}

async fn mount_openai(server: &MockServer, reply: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(openai_reply(reply)))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fifteen_char_input_never_reaches_generator() {
    let server = MockServer::start().await;
    mount_openai(&server, "unused", 0).await;

    let chat = RecordingChat::default();
    frontend::respond(&generator(&server, all_keys()), &chat, "fifteen chars!!")
        .await
        .unwrap();

    assert_eq!(chat.events(), vec![Event::Sent(TOO_SHORT_TEXT.to_owned())]);
}

#[tokio::test]
async fn twenty_five_char_input_calls_generator_once() {
    let server = MockServer::start().await;
    mount_openai(
        &server,
        "Love that you're automating cold sales, how's the reply rate?",
        1,
    )
    .await;

    let chat = RecordingChat::default();
    frontend::respond(&generator(&server, all_keys()), &chat, "Founder, logistics, AI!!!")
        .await
        .unwrap();

    let events = chat.events();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], Event::Notified(PROCESSING_TEXT.to_owned()));
    assert_eq!(events[1], Event::Retracted(0));
    let reply = chat.last_sent();
    assert!(reply.starts_with("✅ Personalized message variants (1):"));
    assert!(reply.contains("📨 Variant 1 (61 characters):"));
}

#[tokio::test]
async fn blank_input_gets_blank_reply_without_generation() {
    let server = MockServer::start().await;
    mount_openai(&server, "unused", 0).await;

    let chat = RecordingChat::default();
    frontend::respond(&generator(&server, all_keys()), &chat, &" ".repeat(40))
        .await
        .unwrap();

    assert_eq!(chat.events(), vec![Event::Sent(BLANK_TEXT.to_owned())]);
}

#[tokio::test]
async fn generator_failure_becomes_failure_reply() {
    let server = MockServer::start().await;
    mount_openai(&server, "unused", 0).await;

    let chat = RecordingChat::default();
    frontend::respond(&generator(&server, Credentials::default()), &chat, BIO)
        .await
        .unwrap();

    assert!(matches!(chat.events()[1], Event::Retracted(0)));
    let reply = chat.last_sent();
    assert!(reply.starts_with("❌ Something went wrong:"));
    assert!(reply.contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn chat_front_end_uses_openai() {
    let server = MockServer::start().await;
    mount_openai(
        &server,
        "First opener about appraisal work\nSecond opener about logistics\nThird opener about AI agents",
        1,
    )
    .await;

    let chat = RecordingChat::default();
    frontend::respond(&generator(&server, all_keys()), &chat, BIO)
        .await
        .unwrap();

    let reply = chat.last_sent();
    assert!(reply.contains("Variant 3"));
    assert!(reply.contains("Third opener about AI agents"));
}
