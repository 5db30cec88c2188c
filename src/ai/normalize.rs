//! Turns a raw model reply into a parsed JSON object.
//!
//! Only cheap structural fixes are applied: trim, strip code fences, cut the
//! outermost `{ ... }` span, repair control characters, then a strict parse.
//! Anything that still fails to parse is reported, never patched further.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

use super::GenerationError;

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedJson {
    pub text: String,
    pub fields: Map<String, Value>,
}

fn opening_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^```[A-Za-z0-9_+.-]*[ \t]*\r?\n?").expect("valid fence regex"))
}

fn closing_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r?\n?[ \t]*```$").expect("valid fence regex"))
}

pub fn normalize(raw: &str) -> Result<NormalizedJson, GenerationError> {
    let unfenced = strip_code_fences(raw.trim());
    let candidate = extract_object(unfenced).ok_or(GenerationError::NoJsonFound)?;
    let text = repair_control_chars(candidate);

    match serde_json::from_str::<Map<String, Value>>(&text) {
        Ok(fields) => Ok(NormalizedJson { text, fields }),
        Err(e) => Err(GenerationError::MalformedJson {
            candidate: text,
            error: e.to_string(),
        }),
    }
}

/// Remove one leading fence (with optional language tag) and one trailing fence.
pub fn strip_code_fences(text: &str) -> &str {
    let text = match opening_fence().find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    };
    let text = match closing_fence().find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    };
    text.trim()
}

/// First `{` through last `}`. Braces are not balanced: the expected reply is
/// one flat object, and anything after it is commentary.
pub fn extract_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Make control characters legal for a strict JSON parse.
///
/// Inside string literals, raw line breaks and tabs become their two-char
/// escapes so the markdown body keeps its lines; other control characters are
/// dropped. Outside strings only JSON whitespace survives. DEL is always dropped.
pub fn repair_control_chars(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;

    for ch in text.chars() {
        if ch == '\u{7f}' {
            continue;
        }
        if !in_string {
            match ch {
                '"' => {
                    in_string = true;
                    out.push(ch);
                }
                ' ' | '\n' | '\r' | '\t' => out.push(ch),
                c if (c as u32) < 0x20 => {}
                c => out.push(c),
            }
            continue;
        }

        if escaped {
            if (ch as u32) < 0x20 {
                // backslash followed by a raw control char; keep waiting for a real escape
                continue;
            }
            escaped = false;
            out.push(ch);
            continue;
        }

        match ch {
            '"' => {
                in_string = false;
                out.push(ch);
            }
            '\\' => {
                escaped = true;
                out.push(ch);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {}
            c => out.push(c),
        }
    }

    out
}
