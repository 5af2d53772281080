// SPDX-License-Identifier: PMPL-1.0-or-later
//! `/api/media` handlers
//!
//! `/analyze` and `/generate-transcript` take any audio or video file in
//! the `media` field; the remaining routes take a video in `video`.

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use super::upload::{file_body_limit, read_file, FileRef, UploadedFile};
use super::AppState;
use crate::config::UploadConfig;
use crate::error::{Error, Result};
use crate::media::{
    audio_descriptions, caption_track, media_issues, sign_language_guidance, AudioDescription, Caption,
    MediaIssue, MediaKind, SignLanguageGuidance,
};
use crate::uploads::StoredFile;

pub fn routes(uploads: &UploadConfig) -> Router<AppState> {
    let limit = uploads.max_media_bytes;
    Router::new()
        .route("/analyze", post(analyze).layer(file_body_limit(limit)))
        .route("/generate-transcript", post(generate_transcript).layer(file_body_limit(limit)))
        .route("/generate-captions", post(generate_captions).layer(file_body_limit(limit)))
        .route("/audio-description", post(audio_description).layer(file_body_limit(limit)))
        .route("/sign-language", post(sign_language).layer(file_body_limit(limit)))
}

#[derive(Debug, Serialize)]
pub struct MediaAnalysisResponse {
    pub success: bool,
    pub media: FileRef,
    pub issues: Vec<MediaIssue>,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub success: bool,
    pub media: FileRef,
    pub transcript: String,
}

#[derive(Debug, Serialize)]
pub struct CaptionsResponse {
    pub success: bool,
    pub video: FileRef,
    pub captions: Vec<Caption>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioDescriptionResponse {
    pub success: bool,
    pub video: FileRef,
    pub audio_descriptions: Vec<AudioDescription>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignLanguageResponse {
    pub success: bool,
    pub video: FileRef,
    pub sign_language_guidance: SignLanguageGuidance,
}

/// Read and store an audio or video upload from the `media` field
async fn store_media(state: &AppState, multipart: &mut Multipart) -> Result<(UploadedFile, StoredFile, MediaKind)> {
    let file = read_file(multipart, "media", state.config.uploads.max_media_bytes, "No media file provided").await?;
    let kind = MediaKind::from_mime(&file.content_type)
        .ok_or_else(|| Error::UnsupportedMediaType("Only audio and video files are allowed".to_string()))?;

    let stored = state.uploads.store(&file.file_name, &file.content_type, &file.bytes).await?;
    tracing::info!(file = %stored.path, %kind, "Media file uploaded");
    Ok((file, stored, kind))
}

/// Read and store a video upload from the `video` field
async fn store_video(state: &AppState, multipart: &mut Multipart) -> Result<StoredFile> {
    let file = read_file(multipart, "video", state.config.uploads.max_media_bytes, "No video file provided").await?;
    if MediaKind::from_mime(&file.content_type) != Some(MediaKind::Video) {
        return Err(Error::UnsupportedMediaType("Only video files are allowed".to_string()));
    }

    let stored = state.uploads.store(&file.file_name, &file.content_type, &file.bytes).await?;
    tracing::info!(file = %stored.path, "Video file uploaded");
    Ok(stored)
}

async fn analyze(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<MediaAnalysisResponse>> {
    let (_, stored, kind) = store_media(&state, &mut multipart).await?;
    let issues = media_issues(kind);
    tracing::info!(%kind, issues = issues.len(), "media analysis complete");

    Ok(Json(MediaAnalysisResponse {
        success: true,
        media: FileRef::new(&stored).with_kind(kind),
        issues,
    }))
}

/// Speech-to-text for audio when an assistant is configured; video and
/// every fallback use a template transcript
async fn generate_transcript(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscriptResponse>> {
    let (file, stored, kind) = store_media(&state, &mut multipart).await?;

    let transcript = match (&state.assistant, kind) {
        (Some(assistant), MediaKind::Audio) => {
            match assistant
                .transcribe_audio(file.bytes.to_vec(), &file.file_name, &file.content_type)
                .await
            {
                Ok(text) => text,
                Err(err) => {
                    tracing::warn!(error = %err, "transcription failed, using template");
                    state.fallback.transcript(kind)
                }
            }
        }
        _ => state.fallback.transcript(kind),
    };

    Ok(Json(TranscriptResponse {
        success: true,
        media: FileRef::new(&stored).with_kind(kind),
        transcript,
    }))
}

async fn generate_captions(State(state): State<AppState>, mut multipart: Multipart) -> Result<Json<CaptionsResponse>> {
    let stored = store_video(&state, &mut multipart).await?;
    Ok(Json(CaptionsResponse {
        success: true,
        video: FileRef::new(&stored),
        captions: caption_track(),
    }))
}

async fn audio_description(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AudioDescriptionResponse>> {
    let stored = store_video(&state, &mut multipart).await?;
    Ok(Json(AudioDescriptionResponse {
        success: true,
        video: FileRef::new(&stored),
        audio_descriptions: audio_descriptions(),
    }))
}

/// Speech cannot be detected in stored video, so interpretation is always
/// reported as required
async fn sign_language(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SignLanguageResponse>> {
    let stored = store_video(&state, &mut multipart).await?;
    Ok(Json(SignLanguageResponse {
        success: true,
        video: FileRef::new(&stored),
        sign_language_guidance: sign_language_guidance(true),
    }))
}
