// SPDX-License-Identifier: PMPL-1.0-or-later
//! `/api/contrast` handlers

use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;

use super::{required, AppState, JsonBody};
use crate::analyzers::contrast::{analyze_contrast, ContrastAnalysis, ContrastCheck, ContrastSuggestion};
use crate::analyzers::Page;
use crate::color::{Color, AAA_NORMAL};
use crate::error::{Error, Result};

const COLORS_REQUIRED: &str = "Foreground and background colors are required";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze))
        .route("/check", post(check))
        .route("/suggest", post(suggest))
}

#[derive(Debug, Deserialize)]
pub struct HtmlRequest {
    pub html: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ColorPairRequest {
    pub foreground: Option<String>,
    pub background: Option<String>,
    /// Target ratio; 7:1 (AAA normal text) when absent
    pub required: Option<f64>,
}

impl ColorPairRequest {
    fn colors(self) -> Result<(Color, Color)> {
        let foreground = required(self.foreground, COLORS_REQUIRED)?;
        let background = required(self.background, COLORS_REQUIRED)?;
        Ok((foreground.parse()?, background.parse()?))
    }
}

async fn analyze(JsonBody(req): JsonBody<HtmlRequest>) -> Result<Json<ContrastAnalysis>> {
    let html = required(req.html, "HTML content is required")?;
    let analysis = analyze_contrast(&Page::parse(&html));
    tracing::info!(
        analyzed = analysis.analyzed,
        issues = analysis.issues.len(),
        "contrast analysis complete"
    );
    Ok(Json(analysis))
}

async fn check(JsonBody(req): JsonBody<ColorPairRequest>) -> Result<Json<ContrastCheck>> {
    let (foreground, background) = req.colors()?;
    Ok(Json(ContrastCheck::new(foreground, background)))
}

async fn suggest(JsonBody(req): JsonBody<ColorPairRequest>) -> Result<Json<ContrastSuggestion>> {
    let target = req.required.unwrap_or(AAA_NORMAL);
    if !target.is_finite() || target <= 0.0 {
        return Err(Error::BadRequest("required must be a positive contrast ratio".to_string()));
    }

    let (foreground, background) = req.colors()?;
    let suggestion = ContrastSuggestion::new(foreground, background, target);
    tracing::debug!(
        %foreground,
        improved = %suggestion.improved.foreground,
        passes = suggestion.passes,
        "suggested contrast fix"
    );
    Ok(Json(suggestion))
}
