use serde::Deserialize;
use std::env;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

/// Smallest completion budget that still fits a full post in one reply.
pub const MIN_MAX_TOKENS: u32 = 1500;

/// Sampling band that keeps replies close to the JSON contract.
pub const RECOMMENDED_TEMPERATURE: RangeInclusive<f32> = 0.3..=0.4;

const DEFAULT_CONFIG_PATH: &str = "first-draft.toml";

#[derive(Debug)]
pub struct ConfigError(pub String);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Types ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub llm: LlmConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        LlmConfig {
            api_key: String::new(),
            base_url: "https://api.groq.com/openai/v1".to_string(),
            model: "llama-3.3-70b-versatile".to_string(),
            temperature: 0.35,
            max_tokens: 2048,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub cors_allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            cors_allowed_origin: "*".to_string(),
        }
    }
}

// ── Loading ───────────────────────────────────────────

/// Load the config file named by `FIRST_DRAFT_CONFIG` (or `first-draft.toml`),
/// then apply environment overrides. A missing file means defaults.
pub fn load() -> Result<Config, ConfigError> {
    let path = env::var("FIRST_DRAFT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_from(&path, |name| env::var(name).ok())
}

/// `load` with the file path and variable lookup supplied by the caller.
pub fn load_from<F>(path: &str, var: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = if Path::new(path).exists() {
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError(format!("Cannot read {}: {}", path, e)))?;
        log::info!("[config] Loaded {}", path);
        parse(&text)?
    } else {
        log::info!("[config] {} not found, using defaults", path);
        Config::default()
    };

    if let Some(key) = var("GROQ_API_KEY") {
        config.llm.api_key = key;
    }
    if let Some(model) = var("FIRST_DRAFT_MODEL") {
        config.llm.model = model;
    }
    if let Some(url) = var("FIRST_DRAFT_BASE_URL") {
        config.llm.base_url = url;
    }

    for warning in config.validate()? {
        log::warn!("[config] {}", warning);
    }
    Ok(config)
}

pub fn parse(text: &str) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError(format!("Invalid config: {}", e)))
}

impl Config {
    /// Reject unusable values and raise a too-small token budget, since a
    /// truncated reply can never be parsed. Returns the warnings for values
    /// that are usable but likely to hurt output quality.
    pub fn validate(&mut self) -> Result<Vec<String>, ConfigError> {
        let llm = &mut self.llm;
        if llm.model.trim().is_empty() {
            return Err(ConfigError("llm.model must not be empty".into()));
        }
        if llm.base_url.trim().is_empty() {
            return Err(ConfigError("llm.base_url must not be empty".into()));
        }
        if !(0.0..=2.0).contains(&llm.temperature) {
            return Err(ConfigError(format!(
                "llm.temperature must be between 0 and 2, got {}",
                llm.temperature
            )));
        }
        if llm.timeout_secs == 0 {
            return Err(ConfigError("llm.timeout_secs must be positive".into()));
        }

        let mut warnings = Vec::new();
        if !RECOMMENDED_TEMPERATURE.contains(&llm.temperature) {
            warnings.push(format!(
                "llm.temperature {} is outside {}-{}; expect more malformed replies",
                llm.temperature,
                RECOMMENDED_TEMPERATURE.start(),
                RECOMMENDED_TEMPERATURE.end()
            ));
        }
        if llm.max_tokens < MIN_MAX_TOKENS {
            warnings.push(format!(
                "llm.max_tokens {} is below {}; raising it",
                llm.max_tokens, MIN_MAX_TOKENS
            ));
            llm.max_tokens = MIN_MAX_TOKENS;
        }
        if llm.api_key.is_empty() {
            warnings.push("No API key configured; every request will use the template post".into());
        }
        Ok(warnings)
    }
}
