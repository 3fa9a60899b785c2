//! The remote chat-completions backend.
//!
//! A thin synchronous HTTP wrapper: one POST per exchange, retried with
//! exponential backoff and jitter on server errors (500/502/503/504) and
//! transport failures. Client errors (bad key, bad request) never retry.

use std::time::Duration;

use rand::Rng;
use serde_json::{Value, json};
use tracing::warn;

use super::{Assistant, AssistantError};

const SYSTEM_PROMPT: &str = "You are a task planning assistant who is good at \
splitting complex goals into concrete steps. Give clear, structured task \
breakdowns and scheduling advice.";

/// Connection settings for the remote backend.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Chat-completions endpoint URL.
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl RemoteConfig {
    pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
    pub const DEFAULT_MAX_RETRIES: u32 = 3;

    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: Self::DEFAULT_MODEL.to_owned(),
            timeout: Self::DEFAULT_TIMEOUT,
            max_retries: Self::DEFAULT_MAX_RETRIES,
        }
    }
}

/// Backoff before retry `retries` (1-based): 1s base, doubling, plus up to
/// one second of jitter.
fn backoff_delay(retries: u32) -> Duration {
    let base_ms = 1000u64 * 2u64.pow(retries.saturating_sub(1));
    let jitter_ms = rand::rng().random_range(0..1000u64);
    Duration::from_millis(base_ms + jitter_ms)
}

/// The remote assistant client.
pub struct RemoteAssistant {
    config: RemoteConfig,
}

impl RemoteAssistant {
    /// Build a client. Fails up front when the API key is empty so callers
    /// surface the configuration problem before any exchange.
    pub fn new(config: RemoteConfig) -> Result<Self, AssistantError> {
        if config.api_key.trim().is_empty() {
            return Err(AssistantError::MissingApiKey);
        }
        Ok(Self { config })
    }

    fn request_body(&self, user_text: &str) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": user_text },
            ],
            "temperature": 0.7,
            "max_tokens": 1500,
        })
    }

    /// One attempt: POST, check status, pull the reply text out.
    fn execute(&self, body: &Value) -> Result<String, AssistantError> {
        let response = ureq::post(&self.config.endpoint)
            .timeout(self.config.timeout)
            .set("Authorization", &format!("Bearer {}", self.config.api_key))
            .send_json(body.clone())
            .map_err(|e| match e {
                ureq::Error::Status(code, _) => AssistantError::Status(code),
                ureq::Error::Transport(t) => AssistantError::Transport(t.to_string()),
            })?;

        let payload: Value = response
            .into_json()
            .map_err(|_| AssistantError::MalformedResponse)?;

        extract_reply(&payload).ok_or(AssistantError::MalformedResponse)
    }
}

/// Pull `choices[0].message.content` out of a completions payload.
fn extract_reply(payload: &Value) -> Option<String> {
    let content = payload
        .get("choices")?
        .get(0)?
        .get("message")?
        .get("content")?
        .as_str()?
        .trim();
    if content.is_empty() {
        None
    } else {
        Some(content.to_owned())
    }
}

/// Server errors and transport failures are worth retrying; anything else
/// (auth failures, malformed payloads) will not improve on a second try.
fn is_retryable(error: &AssistantError) -> bool {
    matches!(
        error,
        AssistantError::Status(500 | 502 | 503 | 504) | AssistantError::Transport(_)
    )
}

impl Assistant for RemoteAssistant {
    fn reply(&self, user_text: &str) -> Result<String, AssistantError> {
        let body = self.request_body(user_text);
        let mut retries = 0;

        loop {
            match self.execute(&body) {
                Ok(reply) => return Ok(reply),
                Err(error) if is_retryable(&error) && retries < self.config.max_retries => {
                    retries += 1;
                    let delay = backoff_delay(retries);
                    warn!(
                        error = %error,
                        retry = retries,
                        max = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "remote assistant request failed; retrying"
                    );
                    std::thread::sleep(delay);
                }
                Err(error) => {
                    if retries > 0 {
                        return Err(AssistantError::RetriesExhausted {
                            attempts: retries + 1,
                            source: Box::new(error),
                        });
                    }
                    return Err(error);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
