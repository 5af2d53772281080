// SPDX-License-Identifier: PMPL-1.0-or-later
//! `/api/aria` handlers
//!
//! Each handler parses the document in a synchronous helper: the parsed
//! tree is not `Send` and must not live across an await.

use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use super::{blocking, required, AppState, JsonBody};
use crate::analyzers::aria::{status_message_issues, suggest_fixes, validate_aria, AriaFix};
use crate::analyzers::semantic::{
    heading_structure, landmark_regions, validate_semantics, HeadingStructure, LandmarkRegions,
};
use crate::analyzers::{MarkupIssue, Page};
use crate::error::{Error, Result};

const HTML_REQUIRED: &str = "HTML content is required";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/validate", post(validate))
        .route("/fix", post(fix))
        .route("/status-messages", post(status_messages))
        .route("/semantic-structure", post(semantic_structure))
}

#[derive(Debug, Deserialize)]
pub struct HtmlRequest {
    pub html: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixRequest {
    pub html: Option<String>,
    pub issue_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResponse {
    pub total_issues: usize,
    pub aria_issues: usize,
    pub semantic_issues: usize,
    pub status_message_issues: usize,
    pub issues: Vec<MarkupIssue>,
}

impl ValidationResponse {
    fn of(html: &str) -> Self {
        let page = Page::parse(html);
        let aria = validate_aria(&page);
        let semantic = validate_semantics(&page);
        let status = status_message_issues(&page);

        let (aria_issues, semantic_issues, status_message_issues) = (aria.len(), semantic.len(), status.len());
        let issues: Vec<MarkupIssue> = aria.into_iter().chain(semantic).chain(status).collect();

        Self {
            total_issues: issues.len(),
            aria_issues,
            semantic_issues,
            status_message_issues,
            issues,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FixResponse {
    pub fixes: Vec<AriaFix>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusMessagesResponse {
    pub total_issues: usize,
    pub issues: Vec<MarkupIssue>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticStructureResponse {
    pub total_issues: usize,
    pub issues: Vec<MarkupIssue>,
    pub heading_structure: HeadingStructure,
    pub landmark_regions: LandmarkRegions,
}

impl SemanticStructureResponse {
    fn of(html: &str) -> Self {
        let page = Page::parse(html);
        let issues = validate_semantics(&page);
        Self {
            total_issues: issues.len(),
            issues,
            heading_structure: heading_structure(&page),
            landmark_regions: landmark_regions(&page),
        }
    }
}

async fn validate(JsonBody(req): JsonBody<HtmlRequest>) -> Result<Json<ValidationResponse>> {
    let html = required(req.html, HTML_REQUIRED)?;
    let response = blocking(move || ValidationResponse::of(&html)).await?;
    tracing::info!(
        aria = response.aria_issues,
        semantic = response.semantic_issues,
        status = response.status_message_issues,
        "ARIA validation complete"
    );
    Ok(Json(response))
}

async fn fix(JsonBody(req): JsonBody<FixRequest>) -> Result<Json<FixResponse>> {
    let html = required(req.html, HTML_REQUIRED)?;
    let issues = blocking(move || ValidationResponse::of(&html).issues).await?;

    let fixes = suggest_fixes(&issues, req.issue_id.as_deref()).ok_or_else(|| {
        Error::NotFound(format!(
            "Issue with ID {} not found",
            req.issue_id.as_deref().unwrap_or_default()
        ))
    })?;
    Ok(Json(FixResponse { fixes }))
}

async fn status_messages(JsonBody(req): JsonBody<HtmlRequest>) -> Result<Json<StatusMessagesResponse>> {
    let html = required(req.html, HTML_REQUIRED)?;
    let issues = status_message_issues(&Page::parse(&html));
    Ok(Json(StatusMessagesResponse { total_issues: issues.len(), issues }))
}

async fn semantic_structure(JsonBody(req): JsonBody<HtmlRequest>) -> Result<Json<SemanticStructureResponse>> {
    let html = required(req.html, HTML_REQUIRED)?;
    let structure = blocking(move || SemanticStructureResponse::of(&html)).await?;
    Ok(Json(structure))
}
