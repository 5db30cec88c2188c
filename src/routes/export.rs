use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use rocket::serde::json::{self, Json};
use serde_json::{Map, Value};

use crate::ai::validate;
use crate::export;

use super::{api_error, rejected, ApiError};

pub struct DocxFile {
    bytes: Vec<u8>,
    filename: String,
}

impl<'r> Responder<'r, 'static> for DocxFile {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        Response::build_from(self.bytes.respond_to(req)?)
            .header(ContentType::new("application", export::DOCX_MIME_SUBTYPE))
            .raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", self.filename),
            )
            .ok()
    }
}

// ── Export ────────────────────────────────────────────

/// Export a post as `.docx`. The post comes from the client, so it goes
/// through the same field checks as a model reply.
#[post("/export", format = "json", data = "<body>")]
pub fn export_docx(body: Result<Json<Map<String, Value>>, json::Error<'_>>) -> Result<DocxFile, ApiError> {
    let fields = body.map_err(rejected)?.into_inner();
    let post = validate::validate(&fields)
        .map_err(|e| api_error(Status::UnprocessableEntity, e.to_string()))?;

    let bytes = export::to_docx(&post).map_err(|e| {
        log::error!("[export] Failed to build docx: {}", e);
        api_error(Status::InternalServerError, "Failed to build document")
    })?;

    Ok(DocxFile {
        bytes,
        filename: export::filename(&post),
    })
}
