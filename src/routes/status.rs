use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use serde_json::{json, Value};

use std::sync::Arc;

use crate::ai::CompletionClient;
use crate::models::blog::{Tone, DEFAULT_AUDIENCE};

const PRESET_TOPICS: &[&str] = &[
    "Top AI Tools in 2025",
    "Morning Routine for Designers",
    "Marketing Hacks for Startups",
    "Mental Health for Remote Workers",
];

// ── Status Check ──────────────────────────────────────

#[get("/status")]
pub fn status(client: &State<Arc<dyn CompletionClient>>) -> Json<Value> {
    Json(json!({
        "ok": true,
        "provider": client.provider(),
        "model": client.model(),
        "configured": client.is_configured(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ── Form Options ──────────────────────────────────────

#[get("/options")]
pub fn form_options() -> Json<Value> {
    let tones: Vec<Value> = Tone::ALL
        .iter()
        .map(|t| json!({"name": t.name(), "preview": t.preview()}))
        .collect();
    Json(json!({
        "tones": tones,
        "preset_topics": PRESET_TOPICS,
        "default_audience": DEFAULT_AUDIENCE,
    }))
}

// ── CORS Preflight ────────────────────────────────────

#[options("/<_..>")]
pub fn preflight() -> Status {
    Status::NoContent
}
