#![allow(dead_code)]

use icebreaker::MessageGenerator;
use icebreaker::config::{Credentials, Settings};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const OPENAI_KEY: &str = "sk-test-openai";
pub const ANTHROPIC_KEY: &str = "sk-ant-test";

pub const BIO: &str = "Akhat, founder of an LLP in Kazakhstan. Appraisal, consulting, logistics. \
Rolling out AI agents for cold sales on LinkedIn.";

/// Settings with both providers pointed at the mock server.
pub fn settings_for(server: &MockServer) -> Settings {
    let mut settings = Settings::default();
    settings.openai.base_url = server.uri();
    settings.anthropic.base_url = server.uri();
    settings
}

pub fn generator(server: &MockServer, credentials: Credentials) -> MessageGenerator {
    MessageGenerator::new(credentials, settings_for(server)).expect("client should build")
}

pub fn all_keys() -> Credentials {
    Credentials::new(Some(OPENAI_KEY.to_owned()), Some(ANTHROPIC_KEY.to_owned()))
}

pub fn openai_reply(text: &str) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": text },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 120, "completion_tokens": 80, "total_tokens": 200 }
    })
}

pub fn anthropic_reply(text: &str) -> Value {
    json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "model": "claude-3-5-sonnet-20241022",
        "content": [{ "type": "text", "text": text }],
        "stop_reason": "end_turn",
        "usage": { "input_tokens": 120, "output_tokens": 80 }
    })
}
