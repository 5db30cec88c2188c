pub mod export;
pub mod generate;
pub mod status;

use rocket::http::Status;
use rocket::response::status::Custom;
use rocket::serde::json::{self, Json};
use serde_json::{json, Value};

pub type ApiError = Custom<Json<Value>>;

// ── Helpers ───────────────────────────────────────────

pub fn api_error(code: Status, message: impl Into<String>) -> ApiError {
    Custom(code, Json(json!({"ok": false, "error": message.into()})))
}

/// Map a JSON body that failed to deserialize to 400 (unreadable) or 422
/// (wrong shape, missing key, blank topic).
pub fn rejected(err: json::Error<'_>) -> ApiError {
    match err {
        json::Error::Io(e) => api_error(Status::BadRequest, format!("Unreadable body: {}", e)),
        json::Error::Parse(_, e) => api_error(Status::UnprocessableEntity, e.to_string()),
    }
}

// ── Route Registration ────────────────────────────────

pub fn routes() -> Vec<rocket::Route> {
    routes![
        generate::generate_post,
        export::export_docx,
        status::status,
        status::form_options,
        status::preflight,
    ]
}
