pub mod fallback;
pub mod groq;
pub mod normalize;
pub mod pipeline;
pub mod prompts;
pub mod validate;

use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;

// ── Types ─────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
}

/// Failure talking to the completion provider.
#[derive(Debug)]
pub struct AiError(pub String);

impl std::fmt::Display for AiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why a model reply could not become a post. Every variant is recovered by
/// the template post; none of them reaches the HTTP caller.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    CompletionUnavailable(String),
    NoJsonFound,
    MalformedJson { candidate: String, error: String },
    MissingField(&'static str),
    Aborted(String),
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CompletionUnavailable(e) => write!(f, "completion unavailable: {}", e),
            Self::NoJsonFound => write!(f, "no JSON object in model reply"),
            Self::MalformedJson { error, .. } => write!(f, "malformed JSON: {}", error),
            Self::MissingField(name) => write!(f, "missing or empty field '{}'", name),
            Self::Aborted(e) => write!(f, "generation aborted: {}", e),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Fixed sampling parameters for blog generation, taken from config at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl From<&LlmConfig> for GenerationSettings {
    fn from(llm: &LlmConfig) -> Self {
        GenerationSettings {
            temperature: llm.temperature,
            max_tokens: llm.max_tokens,
        }
    }
}

// ── Client ────────────────────────────────────────────

/// A text-completion backend. One call, no retries; the caller decides what
/// to do on failure.
#[rocket::async_trait]
pub trait CompletionClient: Send + Sync {
    fn provider(&self) -> &'static str;

    fn model(&self) -> &str;

    /// Whether credentials are present. An unconfigured client still answers
    /// `complete`, with an error.
    fn is_configured(&self) -> bool;

    async fn complete(&self, req: &CompletionRequest) -> Result<CompletionResponse, AiError>;
}

/// First `max` characters of `text`, for log lines.
pub fn preview(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
