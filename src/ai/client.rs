//! Client for the upstream chat-completion API
//!
//! Speaks the OpenAI-compatible `/chat/completions` surface exposed by Groq.
//! The client requests a JSON-object reply and parses it, nothing more;
//! structural validation of the parsed document is the caller's job.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::ai::AiError;
use crate::config::AiConfig;

/// Delay before the single retry on a transient transport failure.
const RETRY_DELAY: Duration = Duration::from_secs(1);

pub struct CompletionClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl CompletionClient {
    pub fn new(config: &AiConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("roadmap-scout/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AiError::Init(format!("completion HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    /// Send one prompt and parse the model's reply as JSON.
    ///
    /// Transient transport failures (connect, timeout) are retried once;
    /// anything else surfaces immediately.
    pub async fn complete(&self, prompt: &str) -> Result<Value, AiError> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "response_format": {"type": "json_object"},
        });

        let response = match self.send_once(&body).await {
            Ok(response) => response,
            Err(e) if is_transient(&e) => {
                warn!("Completion request failed ({}), retrying once", e);
                tokio::time::sleep(RETRY_DELAY).await;
                self.send_once(&body).await?
            }
            Err(e) => return Err(e.into()),
        };

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Status { status, body });
        }

        let completion: ChatCompletion = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(AiError::MissingContent)?;

        debug!("Completion reply: {} bytes", content.len());
        serde_json::from_str(&content).map_err(AiError::from)
    }

    async fn send_once(&self, body: &Value) -> Result<reqwest::Response, reqwest::Error> {
        self.client
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
    }
}

fn is_transient(e: &reqwest::Error) -> bool {
    e.is_timeout() || e.is_connect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AiConfig {
        AiConfig {
            api_key: "test-key".to_string(),
            api_url: "https://api.example.com/openai/v1/".to_string(),
            model: "test-model".to_string(),
            timeout_secs: 5,
        }
    }

    #[test]
    fn new_trims_trailing_slash() {
        let client = CompletionClient::new(&test_config()).unwrap();
        assert_eq!(client.api_url, "https://api.example.com/openai/v1");
    }

    #[test]
    fn chat_completion_reply_deserializes() {
        let raw = r#"{
            "id": "cmpl-1",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "{\"ok\":true}"}}]
        }"#;
        let completion: ChatCompletion = serde_json::from_str(raw).unwrap();
        assert_eq!(completion.choices[0].message.content, "{\"ok\":true}");
    }

    #[test]
    fn empty_choices_maps_to_missing_content() {
        let completion: ChatCompletion = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let content = completion.choices.into_iter().next().map(|c| c.message.content);
        assert!(content.is_none());
    }
}
