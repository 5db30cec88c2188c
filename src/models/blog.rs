use serde::{Deserialize, Serialize};

pub const DEFAULT_TONE: &str = "Informative";
pub const DEFAULT_AUDIENCE: &str = "General";

// ── Request ───────────────────────────────────────────

#[derive(Debug)]
pub struct InvalidRequest(pub String);

impl std::fmt::Display for InvalidRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Wire shape of a generation request. All three keys are required; blank
/// tone/audience values are replaced with defaults by `BlogRequest::new`.
#[derive(Debug, Deserialize)]
pub struct BlogRequestForm {
    pub topic: String,
    pub tone: String,
    pub audience: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "BlogRequestForm")]
pub struct BlogRequest {
    topic: String,
    tone: String,
    audience: String,
}

impl BlogRequest {
    pub fn new(topic: &str, tone: &str, audience: &str) -> Result<Self, InvalidRequest> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(InvalidRequest("topic must not be empty".into()));
        }
        Ok(BlogRequest {
            topic: topic.to_string(),
            tone: or_default(tone, DEFAULT_TONE),
            audience: or_default(audience, DEFAULT_AUDIENCE),
        })
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn tone(&self) -> &str {
        &self.tone
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }
}

impl TryFrom<BlogRequestForm> for BlogRequest {
    type Error = InvalidRequest;

    fn try_from(form: BlogRequestForm) -> Result<Self, Self::Error> {
        BlogRequest::new(&form.topic, &form.tone, &form.audience)
    }
}

fn or_default(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

// ── Tone ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Informative,
    Friendly,
    Motivational,
    Professional,
    Casual,
}

impl Tone {
    pub const ALL: [Tone; 5] = [
        Tone::Informative,
        Tone::Friendly,
        Tone::Motivational,
        Tone::Professional,
        Tone::Casual,
    ];

    /// Case-insensitive lookup; unknown tones are `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Informative => "Informative",
            Self::Friendly => "Friendly",
            Self::Motivational => "Motivational",
            Self::Professional => "Professional",
            Self::Casual => "Casual",
        }
    }

    /// Short style description, shown in the front-end and fed to the prompt.
    pub fn preview(&self) -> &'static str {
        match self {
            Self::Informative => "Factual, structured, clear.",
            Self::Friendly => "Warm, conversational, approachable.",
            Self::Motivational => "Energetic, inspiring, action-driven.",
            Self::Professional => "Corporate, serious, to-the-point.",
            Self::Casual => "Chill, relaxed, everyday tone.",
        }
    }

    /// Opening phrase used by the template post.
    pub fn intro_phrase(&self) -> &'static str {
        match self {
            Self::Informative => "Here is a clear, structured look at",
            Self::Friendly => "Let's chat about",
            Self::Motivational => "Get ready to take charge of",
            Self::Professional => "This guide provides a concise professional overview of",
            Self::Casual => "So you want to get into",
        }
    }
}

// ── Post ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPost {
    pub title: String,
    pub meta_description: String,
    pub tags: String,
    pub body: String,
}

impl BlogPost {
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .collect()
    }

    pub fn word_count(&self) -> usize {
        self.body.split_whitespace().count()
    }
}
