// SPDX-License-Identifier: PMPL-1.0-or-later
//! AI assistance for alt text, text simplification and transcription.
//!
//! Handlers treat the assistant as optional: when none is configured, or a
//! call fails, they fall back to [`crate::fallback`] templates or the local
//! simplifier.

pub mod openai;

use async_trait::async_trait;

use crate::error::Result;

pub use openai::OpenAiClient;

/// A remote model that can describe, rewrite and transcribe content
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Short screen-reader description of an image
    async fn describe_image(&self, image: &[u8], mime: &str) -> Result<String>;

    /// Rewrite text at roughly the given reading level (e.g. "grade6")
    async fn simplify_text(&self, text: &str, target_level: &str) -> Result<String>;

    /// Speech-to-text for an audio file
    async fn transcribe_audio(&self, audio: Vec<u8>, file_name: &str, mime: &str) -> Result<String>;
}
