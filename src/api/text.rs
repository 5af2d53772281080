// SPDX-License-Identifier: PMPL-1.0-or-later
//! `/api/text` handlers

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::{required, AppState, JsonBody};
use crate::error::Result;
use crate::text::glossary::{Abbreviation, PronunciationGuide, UnusualWord};
use crate::text::simplify::DEFAULT_TARGET_LEVEL;
use crate::text::{
    abbreviations, preview, pronunciation_guidance, simplify_locally, unusual_words, ReadabilityReport,
    Simplification,
};

const TEXT_REQUIRED: &str = "Text content is required";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/simplify", post(simplify))
        .route("/analyze-readability", post(analyze_readability))
        .route("/unusual-words", post(find_unusual_words))
        .route("/abbreviations", post(find_abbreviations))
        .route("/pronunciation", post(pronunciation))
}

#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifyRequest {
    pub text: Option<String>,
    pub target_reading_level: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusualWordsResponse {
    pub text: String,
    pub unusual_words: Vec<UnusualWord>,
}

#[derive(Debug, Serialize)]
pub struct AbbreviationsResponse {
    pub text: String,
    pub abbreviations: Vec<Abbreviation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PronunciationResponse {
    pub text: String,
    pub pronunciation_guidance: Vec<PronunciationGuide>,
}

async fn simplify(State(state): State<AppState>, JsonBody(req): JsonBody<SimplifyRequest>) -> Result<Json<Simplification>> {
    let text = required(req.text, TEXT_REQUIRED)?;
    let target = req
        .target_reading_level
        .filter(|level| !level.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TARGET_LEVEL.to_string());

    let simplified = match &state.assistant {
        Some(assistant) => match assistant.simplify_text(&text, &target).await {
            Ok(simplified) => simplified,
            Err(err) => {
                tracing::warn!(error = %err, "assistant simplification failed, using local simplifier");
                simplify_locally(&text)
            }
        },
        None => simplify_locally(&text),
    };

    let result = Simplification::new(&text, simplified, &target);
    tracing::info!(
        from = %result.original.reading_level,
        to = %result.simplified.reading_level,
        target = %target,
        "simplified text"
    );
    Ok(Json(result))
}

async fn analyze_readability(JsonBody(req): JsonBody<TextRequest>) -> Result<Json<ReadabilityReport>> {
    let text = required(req.text, TEXT_REQUIRED)?;
    Ok(Json(ReadabilityReport::analyze(&text)))
}

async fn find_unusual_words(JsonBody(req): JsonBody<TextRequest>) -> Result<Json<UnusualWordsResponse>> {
    let text = required(req.text, TEXT_REQUIRED)?;
    Ok(Json(UnusualWordsResponse {
        unusual_words: unusual_words(&text),
        text: preview(&text),
    }))
}

async fn find_abbreviations(JsonBody(req): JsonBody<TextRequest>) -> Result<Json<AbbreviationsResponse>> {
    let text = required(req.text, TEXT_REQUIRED)?;
    Ok(Json(AbbreviationsResponse {
        abbreviations: abbreviations(&text),
        text: preview(&text),
    }))
}

async fn pronunciation(JsonBody(req): JsonBody<TextRequest>) -> Result<Json<PronunciationResponse>> {
    let text = required(req.text, TEXT_REQUIRED)?;
    Ok(Json(PronunciationResponse {
        pronunciation_guidance: pronunciation_guidance(&text),
        text: preview(&text),
    }))
}
