use rocket::http::Header;
use rocket::serde::json::{self, Json};
use rocket::State;

use std::sync::Arc;

use crate::ai::pipeline::{self, Origin};
use crate::ai::{CompletionClient, GenerationSettings};
use crate::models::blog::{BlogPost, BlogRequest};

use super::{rejected, ApiError};

/// The post plus an `X-Draft-Origin: model|template` header.
#[derive(Responder)]
pub struct GeneratedPost {
    post: Json<BlogPost>,
    origin: Header<'static>,
}

// ── Generate Blog Post ────────────────────────────────

/// Only a malformed request body is an error here; once the request is valid
/// the answer is always a complete post, from the model or the template.
#[post("/generate", format = "json", data = "<body>")]
pub async fn generate_post(
    client: &State<Arc<dyn CompletionClient>>,
    settings: &State<GenerationSettings>,
    body: Result<Json<BlogRequest>, json::Error<'_>>,
) -> Result<GeneratedPost, ApiError> {
    let request = body.map_err(rejected)?.into_inner();
    let generated = pipeline::generate(client.inner().clone(), *settings.inner(), request).await;

    let origin = match generated.origin {
        Origin::Model => "model",
        Origin::Fallback => "template",
    };
    Ok(GeneratedPost {
        post: Json(generated.post),
        origin: Header::new("X-Draft-Origin", origin),
    })
}
