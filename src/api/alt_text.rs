// SPDX-License-Identifier: PMPL-1.0-or-later
//! `/api/alt-text` handlers

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::upload::{file_body_limit, read_file, FileRef};
use super::{required, AppState, JsonBody};
use crate::analyzers::alt_text::{analyze_images, assess_alt_text, AltTextAssessment, ImageAnalysis};
use crate::analyzers::Page;
use crate::config::UploadConfig;
use crate::error::{Error, Result};

pub fn routes(uploads: &UploadConfig) -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/check", post(check))
        .route(
            "/generate",
            post(generate).layer(file_body_limit(uploads.max_image_bytes)),
        )
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub html: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckRequest {
    pub alt_text: Option<String>,
    pub image_context: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResponse {
    pub alt_text: String,
    pub analysis: AltTextAssessment,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub image: FileRef,
    pub alt_text: String,
}

async fn analyze(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AnalyzeRequest>,
) -> Result<Json<ImageAnalysis>> {
    let html = required(req.html, "HTML content is required")?;
    let analysis = analyze_images(&Page::parse(&html), &state.fallback);
    tracing::info!(
        total = analysis.total_images,
        issues = analysis.issues_found,
        "image analysis complete"
    );
    Ok(Json(analysis))
}

/// Score alt text; an empty string is scored, only a missing field is rejected
async fn check(JsonBody(req): JsonBody<CheckRequest>) -> Result<Json<CheckResponse>> {
    let alt_text = req
        .alt_text
        .ok_or_else(|| Error::BadRequest("Alt text is required".to_string()))?;
    let analysis = assess_alt_text(&alt_text, req.image_context.as_deref());
    Ok(Json(CheckResponse { alt_text, analysis }))
}

async fn generate(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<GenerateResponse>> {
    let file = read_file(
        &mut multipart,
        "image",
        state.config.uploads.max_image_bytes,
        "No image file provided",
    )
    .await?;
    if !file.content_type.to_ascii_lowercase().starts_with("image/") {
        return Err(Error::UnsupportedMediaType("Only image files are allowed".to_string()));
    }

    let stored = state.uploads.store(&file.file_name, &file.content_type, &file.bytes).await?;

    let alt_text = match &state.assistant {
        Some(assistant) => match assistant.describe_image(&file.bytes, &file.content_type).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "alt text generation failed, using template");
                state.fallback.alt_text(&file.file_name)
            }
        },
        None => state.fallback.alt_text(&file.file_name),
    };
    tracing::info!(image = %stored.filename, %alt_text, "generated alt text");

    Ok(Json(GenerateResponse {
        success: true,
        image: FileRef::new(&stored),
        alt_text,
    }))
}
