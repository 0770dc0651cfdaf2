//! Chat-completion HTTP client

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::{ChatConfig, ChatError, ChatMessage, ChatSession};

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// HTTP client for the remote chat-completion endpoint
pub struct ChatClient {
    client: Client,
    config: ChatConfig,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ChatError::Upstream(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Send one operator message: appends it to the transcript, posts the
    /// whole conversation upstream and appends the assistant's reply before
    /// returning it. On failure the user turn stays in the transcript, like
    /// an unanswered message.
    pub async fn send(
        &self,
        session: &mut ChatSession,
        prompt: &str,
    ) -> Result<String, ChatError> {
        if self.config.api_key.is_empty() {
            return Err(ChatError::NotConfigured);
        }

        session.push_user(prompt);
        let payload = build_payload(&self.config, session.messages());

        let response = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ChatError::Timeout
                } else {
                    ChatError::Upstream(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Upstream(format!("HTTP {status}: {body}")));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::MalformedResponse(e.to_string()))?;
        let reply = completion
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .ok_or_else(|| ChatError::MalformedResponse("no choices in response".into()))?;

        session.push_assistant(reply.clone());
        Ok(reply)
    }
}

fn build_payload(config: &ChatConfig, messages: &[ChatMessage]) -> serde_json::Value {
    json!({
        "model": config.model,
        "messages": messages,
        "temperature": config.temperature,
        "max_tokens": config.max_tokens,
        "top_p": config.top_p,
        "frequency_penalty": config.frequency_penalty,
        "presence_penalty": config.presence_penalty,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ChatConfig {
        ChatConfig {
            api_url: "http://localhost/v1/chat/completions".to_string(),
            api_key: "test-key".to_string(),
            model: "deepseek-chat".to_string(),
            temperature: 0.5,
            max_tokens: 800,
            top_p: 0.8,
            frequency_penalty: 0.2,
            presence_penalty: 0.1,
            request_timeout_secs: 15,
            system_prompt: "You are the hotel manager.".to_string(),
        }
    }

    #[test]
    fn payload_carries_all_request_knobs() {
        let config = test_config();
        let session = ChatSession::new(&config.system_prompt);
        let payload = build_payload(&config, session.messages());

        assert_eq!(payload["model"], "deepseek-chat");
        assert_eq!(payload["temperature"], 0.5);
        assert_eq!(payload["max_tokens"], 800);
        assert_eq!(payload["top_p"], 0.8);
        assert_eq!(payload["frequency_penalty"], 0.2);
        assert_eq!(payload["presence_penalty"], 0.1);
        assert_eq!(payload["messages"][0]["role"], "system");
    }

    #[test]
    fn transcript_grows_with_each_turn() {
        let mut session = ChatSession::new("persona");
        session.push_user("hello");
        session.push_assistant("hi there");
        session.push_user("how busy is tonight?");

        let roles: Vec<&str> = session.messages().iter().map(|m| m.role.as_str()).collect();
        assert_eq!(roles, vec!["system", "user", "assistant", "user"]);
    }

    #[test]
    fn completion_response_parses_expected_shape() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":" Back to work! "}}]}"#;
        let parsed: CompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content.trim(), "Back to work!");
    }
}
