// SPDX-License-Identifier: PMPL-1.0-or-later
//! Plain-language support for WCAG 3.1.x: readability scoring, glossary
//! lookups and offline simplification.

pub mod glossary;
pub mod readability;
pub mod simplify;

pub use glossary::{abbreviations, pronunciation_guidance, unusual_words};
pub use readability::{ReadabilityReport, ReadingLevel};
pub use simplify::{simplify_locally, Simplification};

const PREVIEW_CHARS: usize = 100;

/// Leading slice of a text echoed back in responses
pub fn preview(text: &str) -> String {
    crate::analyzers::truncate(text, PREVIEW_CHARS)
}
