// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration management for wcag-auditor
//!
//! Values come from an optional TOML file layered under
//! `WCAG_AUDITOR__<SECTION>__<KEY>` environment variables. `OPENAI_API_KEY`
//! fills in the assistant key when neither source sets one.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;

const MIB: usize = 1024 * 1024;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub uploads: UploadConfig,

    /// OpenAI-compatible assistant; disabled without an API key
    #[serde(default)]
    pub openai: OpenAiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Limit for JSON request bodies
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_body_limit() -> usize {
    2 * MIB
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    /// Root directory for stored uploads, served under `/uploads`
    #[serde(default = "default_upload_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: usize,

    /// Audio, video and generic uploads
    #[serde(default = "default_max_media_bytes")]
    pub max_media_bytes: usize,

    /// Files accepted by one `/api/upload/multiple` request
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: default_upload_dir(),
            max_image_bytes: default_max_image_bytes(),
            max_media_bytes: default_max_media_bytes(),
            max_files: default_max_files(),
        }
    }
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_image_bytes() -> usize {
    5 * MIB
}

fn default_max_media_bytes() -> usize {
    50 * MIB
}

fn default_max_files() -> usize {
    10
}

#[derive(Debug, Deserialize, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_vision_model")]
    pub vision_model: String,

    #[serde(default = "default_text_model")]
    pub text_model: String,

    #[serde(default = "default_transcription_model")]
    pub transcription_model: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            vision_model: default_vision_model(),
            text_model: default_text_model(),
            transcription_model: default_transcription_model(),
            timeout_secs: default_timeout(),
        }
    }
}

impl OpenAiConfig {
    /// The API key, if one is set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_vision_model() -> String {
    "gpt-4o".to_string()
}

fn default_text_model() -> String {
    "gpt-4".to_string()
}

fn default_transcription_model() -> String {
    "whisper-1".to_string()
}

fn default_timeout() -> u64 {
    60
}

impl Config {
    /// Load configuration from file and environment
    pub fn load(path: &str) -> Result<Self> {
        let path = Path::new(path);

        let mut builder = config::Config::builder();
        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else {
            tracing::warn!("Config file {} not found, using defaults", path.display());
        }
        builder = builder.add_source(
            config::Environment::with_prefix("WCAG_AUDITOR")
                .separator("__")
                .try_parsing(true),
        );

        let mut parsed: Config = builder.build()?.try_deserialize()?;

        if parsed.openai.api_key().is_none() {
            parsed.openai.api_key = std::env::var("OPENAI_API_KEY").ok();
        }

        Ok(parsed)
    }
}
