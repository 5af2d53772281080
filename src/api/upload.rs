// SPDX-License-Identifier: PMPL-1.0-or-later
//! Generic uploads (`/api/upload`, `/api/upload/multiple`) and the
//! multipart helpers shared with the image and media handlers.

use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use super::AppState;
use crate::config::UploadConfig;
use crate::error::{Error, Result};
use crate::media::MediaKind;
use crate::uploads::StoredFile;

/// Room for multipart boundaries and headers on top of the file limit
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn routes(uploads: &UploadConfig) -> Router<AppState> {
    let single = uploads.max_media_bytes + MULTIPART_OVERHEAD;
    let multiple = uploads.max_media_bytes * uploads.max_files + MULTIPART_OVERHEAD;

    Router::new()
        .route("/upload", post(upload).layer(DefaultBodyLimit::max(single)))
        .route("/upload/multiple", post(upload_multiple).layer(DefaultBodyLimit::max(multiple)))
}

/// Body limit for a route accepting one file of at most `max_bytes`
pub(crate) fn file_body_limit(max_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_bytes + MULTIPART_OVERHEAD)
}

/// One file read from a multipart request
#[derive(Debug)]
pub(crate) struct UploadedFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Read every file sent under `field`; other fields are ignored
pub(crate) async fn read_files(
    multipart: &mut Multipart,
    field: &str,
    max_files: usize,
    max_bytes: usize,
) -> Result<Vec<UploadedFile>> {
    let mut files = Vec::new();

    while let Some(part) = multipart.next_field().await? {
        if part.name() != Some(field) {
            continue;
        }
        if files.len() == max_files {
            return Err(Error::BadRequest(format!(
                "Too many files: at most {} per request",
                max_files
            )));
        }

        let file_name = part.file_name().unwrap_or("upload").to_string();
        let content_type = part
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = part.bytes().await?;

        if bytes.len() > max_bytes {
            return Err(Error::PayloadTooLarge(format!(
                "The uploaded file exceeds the size limit ({}MB).",
                max_bytes / (1024 * 1024)
            )));
        }

        files.push(UploadedFile { file_name, content_type, bytes });
    }

    Ok(files)
}

/// Read exactly one file under `field`, with `missing` as the 400 message
pub(crate) async fn read_file(
    multipart: &mut Multipart,
    field: &str,
    max_bytes: usize,
    missing: &str,
) -> Result<UploadedFile> {
    read_files(multipart, field, 1, max_bytes)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::BadRequest(missing.to_string()))
}

/// Reference to a stored upload in image and media responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub filename: String,
    pub original_name: String,
    pub path: String,
    pub url: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,
}

impl FileRef {
    pub fn new(stored: &StoredFile) -> Self {
        Self {
            filename: stored.filename.clone(),
            original_name: stored.original_name.clone(),
            path: stored.path.clone(),
            url: stored.url.clone(),
            kind: None,
        }
    }

    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub file: StoredFile,
}

#[derive(Debug, Serialize)]
pub struct MultipleUploadResponse {
    pub message: &'static str,
    pub files: Vec<StoredFile>,
}

async fn upload(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<UploadResponse>> {
    let limits = &state.config.uploads;
    let file = read_file(&mut multipart, "file", limits.max_media_bytes, "No file uploaded").await?;
    let stored = state.uploads.store(&file.file_name, &file.content_type, &file.bytes).await?;

    tracing::info!(file = %stored.filename, "File uploaded successfully");
    Ok(Json(UploadResponse { message: "File uploaded successfully", file: stored }))
}

async fn upload_multiple(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MultipleUploadResponse>> {
    let limits = &state.config.uploads;
    let files = read_files(&mut multipart, "files", limits.max_files, limits.max_media_bytes).await?;
    if files.is_empty() {
        return Err(Error::BadRequest("No files uploaded".to_string()));
    }

    let mut stored = Vec::with_capacity(files.len());
    for file in &files {
        stored.push(state.uploads.store(&file.file_name, &file.content_type, &file.bytes).await?);
    }

    tracing::info!(count = stored.len(), "Multiple files uploaded successfully");
    Ok(Json(MultipleUploadResponse { message: "Files uploaded successfully", files: stored }))
}
