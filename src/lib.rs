// SPDX-License-Identifier: PMPL-1.0-or-later
//! wcag-auditor - WCAG 2.1 AAA accessibility auditing service
//!
//! An HTTP backend (plus a small CLI) that inspects HTML, text, images and
//! audio/video uploads and returns accessibility findings with concrete
//! remediations.
//!
//! ## Checks
//!
//! - **Contrast** (1.4.3/1.4.6): ratio checks and automatic color remediation
//! - **Alt Text** (1.1.1): presence, quality scoring and generation
//! - **ARIA** (4.1.2/4.1.3): roles, accessible names, status messages
//! - **Semantic** (1.3.1): landmarks, headings, lists and tables
//! - **Text** (3.1.3-3.1.6): readability, unusual words, abbreviations,
//!   pronunciation, simplification
//! - **Media** (1.2.x/1.4.2): captions, transcripts, audio description, sign
//!   language guidance
//! - **Language** (3.1.1/3.1.5): page language and reading level
//!
//! The color adjuster in [`color`] is the algorithmic core: it walks a
//! foreground color's HSL lightness away from the background until the
//! required ratio is met.

pub mod analyzers;
pub mod api;
pub mod assist;
pub mod color;
pub mod config;
pub mod error;
pub mod fallback;
pub mod findings;
pub mod media;
pub mod report;
pub mod templates;
pub mod text;
pub mod uploads;

pub use api::{build_router, AppState};
pub use color::{adjust_for_contrast, contrast_ratio, Color};
pub use config::Config;
pub use error::{Error, Result};
pub use findings::{Finding, FindingSet, Severity, WcagLevel};
