//! Document upload, download and removal.
//!
//! Uploads arrive as `multipart/form-data` with a `file` part holding the
//! bytes and a `fileName` part naming them. Other parts are ignored.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::*;

/// Multipart request body limit (32 MiB).
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

/// `POST /v1/ply/practice/:practiceId/upload`
///
/// Missing parts are passed through empty; the controller rejects them.
pub async fn upload(
    State(ctx): State<ApiContext>,
    Path(practice_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<DocumentCreated>, ApiError> {
    let mut multipart = multipart?;
    let mut file_name = String::new();
    let mut content = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("file") => content = field.bytes().await?.to_vec(),
            Some("fileName") => file_name = field.text().await?,
            other => tracing::debug!(part = ?other, "Ignoring multipart part"),
        }
    }

    let document_id = ctx
        .controller
        .upload_document(&practice_id, &file_name, &content)?;
    Ok(Json(DocumentCreated { document_id }))
}

/// `GET /v1/ply/document/:documentId` — raw file bytes, typed by the
/// stored file name's extension.
pub async fn download(
    State(ctx): State<ApiContext>,
    Path(document_id): Path<String>,
) -> Result<Response, ApiError> {
    let (document, content) = ctx.controller.read_document_content(&document_id)?;
    let content_type = mime_guess::from_path(&document.file_name).first_or_octet_stream();
    Ok(([(header::CONTENT_TYPE, content_type.to_string())], content).into_response())
}

pub async fn delete(
    State(ctx): State<ApiContext>,
    Path(document_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    ctx.controller.delete_document(&document_id)?;
    Ok(Json(StatusResponse::completed()))
}
