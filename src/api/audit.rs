// SPDX-License-Identifier: PMPL-1.0-or-later
//! `POST /api/audit`: every analyzer over one HTML document

use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use super::{blocking, required, AppState, JsonBody};
use crate::analyzers::audit_html;
use crate::error::{Error, Result};
use crate::findings::WcagLevel;
use crate::report::AuditReport;

pub fn routes() -> Router<AppState> {
    Router::new().route("/audit", post(audit))
}

#[derive(Debug, Deserialize)]
pub struct AuditRequest {
    pub html: Option<String>,
    /// Highest conformance level checked; AAA when absent
    pub level: Option<String>,
}

async fn audit(JsonBody(req): JsonBody<AuditRequest>) -> Result<Json<Value>> {
    let html = required(req.html, "HTML content is required")?;
    let level = match req.level.as_deref() {
        Some(level) => level.parse::<WcagLevel>().map_err(Error::BadRequest)?,
        None => WcagLevel::AAA,
    };

    let findings = blocking(move || audit_html(&html, None, level)).await?;
    tracing::info!(%level, findings = findings.len(), "audit complete");
    Ok(Json(serde_json::to_value(AuditReport::new(&findings))?))
}
