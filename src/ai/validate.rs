use serde_json::{Map, Value};

use super::GenerationError;
use crate::models::blog::BlogPost;

pub const REQUIRED_FIELDS: [&str; 4] = ["title", "meta_description", "tags", "body"];

pub const META_DESCRIPTION_LIMIT: usize = 160;
pub const EXPECTED_TAGS: usize = 5;
pub const MIN_BODY_WORDS: usize = 500;

/// Build a post from a parsed reply. Every required field must be a string that
/// is non-empty after trimming; values are kept exactly as received.
pub fn validate(fields: &Map<String, Value>) -> Result<BlogPost, GenerationError> {
    Ok(BlogPost {
        title: text_field(fields, "title")?,
        meta_description: text_field(fields, "meta_description")?,
        tags: text_field(fields, "tags")?,
        body: text_field(fields, "body")?,
    })
}

fn text_field(fields: &Map<String, Value>, name: &'static str) -> Result<String, GenerationError> {
    match fields.get(name) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.clone()),
        _ => Err(GenerationError::MissingField(name)),
    }
}

/// Soft guidelines a post can miss without being rejected.
pub fn quality_notes(post: &BlogPost) -> Vec<String> {
    let mut notes = Vec::new();

    let meta_len = post.meta_description.chars().count();
    if meta_len > META_DESCRIPTION_LIMIT {
        notes.push(format!(
            "meta description is {} chars (limit {})",
            meta_len, META_DESCRIPTION_LIMIT
        ));
    }

    let tags = post.tag_list().len();
    if tags != EXPECTED_TAGS {
        notes.push(format!("{} tags (expected {})", tags, EXPECTED_TAGS));
    }

    let words = post.word_count();
    if words < MIN_BODY_WORDS {
        notes.push(format!("body is {} words (minimum {})", words, MIN_BODY_WORDS));
    }

    if !post.body.lines().any(|l| l.trim_start().starts_with('#')) {
        notes.push("body has no markdown headings".to_string());
    }

    notes
}
