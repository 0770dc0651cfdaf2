//! Concierge chat companion
//!
//! A decorative sidekick: forwards operator messages to a remote
//! chat-completion endpoint and keeps the growing conversation transcript
//! for the life of the process. Shares no state with the booking core.

pub mod client;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::ChatClient;

use crate::utils::AppError;

/// One transcript entry in chat-completion wire format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Conversation state, seeded with the persona prompt. Held in server state
/// as an explicitly scoped session rather than a module-level global.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(system_prompt: &str) -> Self {
        Self {
            messages: vec![ChatMessage::system(system_prompt)],
        }
    }

    /// Transcript including the persona seed
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }
}

/// Chat companion configuration; mirrors the upstream chat-completion
/// request knobs.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub top_p: f64,
    pub frequency_penalty: f64,
    pub presence_penalty: f64,
    pub request_timeout_secs: u64,
    pub system_prompt: String,
}

impl ChatConfig {
    /// Load from environment with the companion's tuned defaults
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("CHAT_API_URL")
                .unwrap_or_else(|_| "https://api.deepseek.com/v1/chat/completions".into()),
            api_key: std::env::var("CHAT_API_KEY").unwrap_or_default(),
            model: std::env::var("CHAT_MODEL").unwrap_or_else(|_| "deepseek-chat".into()),
            temperature: env_parse("CHAT_TEMPERATURE", 0.5),
            max_tokens: env_parse("CHAT_MAX_TOKENS", 800),
            top_p: env_parse("CHAT_TOP_P", 0.8),
            frequency_penalty: env_parse("CHAT_FREQUENCY_PENALTY", 0.2),
            presence_penalty: env_parse("CHAT_PRESENCE_PENALTY", 0.1),
            request_timeout_secs: env_parse("CHAT_TIMEOUT_SECS", 15),
            system_prompt: std::env::var("CHAT_SYSTEM_PROMPT").unwrap_or_else(|_| {
                "You are the hotel manager dropping by the front desk for a chat \
                 with the receptionist on duty."
                    .into()
            }),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Chat companion errors
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Chat request timed out")]
    Timeout,

    #[error("Chat endpoint error: {0}")]
    Upstream(String),

    #[error("Malformed chat response: {0}")]
    MalformedResponse(String),

    #[error("Chat companion is not configured (missing API key)")]
    NotConfigured,
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::NotConfigured => AppError::business_rule(err.to_string()),
            _ => AppError::internal(err.to_string()),
        }
    }
}
