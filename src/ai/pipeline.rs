use log::{debug, info, warn};
use rocket::tokio::task::{JoinError, JoinHandle};
use std::sync::Arc;
use uuid::Uuid;

use super::{
    fallback, normalize, preview, prompts, validate, CompletionClient, CompletionRequest,
    GenerationError, GenerationSettings,
};
use crate::models::blog::{BlogPost, BlogRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub post: BlogPost,
    pub origin: Origin,
}

/// Produce a post for `request`. Always succeeds: any failure on the model path,
/// including a panic in the attempt task, yields the template post instead.
pub async fn generate(
    client: Arc<dyn CompletionClient>,
    settings: GenerationSettings,
    request: BlogRequest,
) -> Generated {
    let request_id = Uuid::new_v4();
    info!(
        "[ai] {} generating \"{}\" (tone: {}, audience: {})",
        request_id,
        request.topic(),
        request.tone(),
        request.audience()
    );

    let task_request = request.clone();
    let mut task = AttemptTask(rocket::tokio::spawn(async move {
        attempt(client.as_ref(), settings, &task_request, request_id).await
    }));

    let outcome = match task.join().await {
        Ok(result) => result,
        Err(e) => Err(GenerationError::Aborted(e.to_string())),
    };

    match outcome {
        Ok(post) => {
            info!("[ai] {} model post accepted", request_id);
            Generated {
                post,
                origin: Origin::Model,
            }
        }
        Err(e) => {
            if let GenerationError::MalformedJson { candidate, .. } = &e {
                debug!("[ai] {} rejected candidate: {}", request_id, preview(candidate, 500));
            }
            warn!("[ai] {} using template post: {}", request_id, e);
            Generated {
                post: fallback::generate(&request),
                origin: Origin::Fallback,
            }
        }
    }
}

/// Owns the spawned attempt. Dropping it (the caller went away before the
/// model answered) aborts the task instead of leaving it detached.
struct AttemptTask(JoinHandle<Result<BlogPost, GenerationError>>);

impl AttemptTask {
    async fn join(&mut self) -> Result<Result<BlogPost, GenerationError>, JoinError> {
        (&mut self.0).await
    }
}

impl Drop for AttemptTask {
    fn drop(&mut self) {
        self.0.abort();
    }
}

async fn attempt(
    client: &dyn CompletionClient,
    settings: GenerationSettings,
    request: &BlogRequest,
    request_id: Uuid,
) -> Result<BlogPost, GenerationError> {
    let req = CompletionRequest {
        system: prompts::blog_system(),
        prompt: prompts::blog_post(request),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
    };

    let resp = client
        .complete(&req)
        .await
        .map_err(|e| GenerationError::CompletionUnavailable(e.0))?;

    debug!(
        "[ai] {} raw reply from {} ({}): {}",
        request_id,
        resp.provider,
        resp.model,
        preview(&resp.text, 500)
    );

    let normalized = normalize::normalize(&resp.text)?;
    debug!("[ai] {} candidate JSON is {} bytes", request_id, normalized.text.len());
    let post = validate::validate(&normalized.fields)?;

    for note in validate::quality_notes(&post) {
        debug!("[ai] {} quality: {}", request_id, note);
    }

    Ok(post)
}
