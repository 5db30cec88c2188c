use serde_json::{json, Value};
use std::time::Duration;

use super::{AiError, CompletionClient, CompletionRequest, CompletionResponse};
use crate::config::LlmConfig;

/// Groq's OpenAI-compatible chat-completions endpoint. Also works against any
/// other server speaking the same protocol via `llm.base_url`.
pub struct GroqClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GroqClient {
    pub fn new(config: &LlmConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AiError(format!("HTTP client error: {}", e)))?;

        Ok(GroqClient {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[rocket::async_trait]
impl CompletionClient for GroqClient {
    fn provider(&self) -> &'static str {
        "groq"
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionResponse, AiError> {
        if self.api_key.is_empty() {
            return Err(AiError("Groq API key not configured".into()));
        }

        let url = format!("{}/chat/completions", self.base_url);

        let body = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": req.system},
                {"role": "user", "content": req.prompt}
            ],
            "max_tokens": req.max_tokens,
            "temperature": req.temperature
        });

        let resp = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError(format!("Groq request failed: {}", e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            log::debug!("[ai] Groq error body: {}", super::preview(&text, 500));
            return Err(AiError(format!("Groq returned {}", status)));
        }

        let json: Value = resp
            .json()
            .await
            .map_err(|e| AiError(format!("Groq JSON parse error: {}", e)))?;

        if json
            .pointer("/choices/0/finish_reason")
            .and_then(|r| r.as_str())
            == Some("length")
        {
            log::warn!(
                "[ai] Groq reply hit max_tokens ({}); JSON is likely truncated",
                req.max_tokens
            );
        }

        let text = json
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AiError("Groq reply has no message content".into()))?
            .to_string();

        Ok(CompletionResponse {
            text,
            provider: self.provider().into(),
            model: self.model.clone(),
        })
    }
}
