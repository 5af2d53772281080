// SPDX-License-Identifier: PMPL-1.0-or-later
//! Upload storage.
//!
//! Files land in `<root>/<category>/<uuid>-<name>`, where the category comes
//! from the MIME type and the name is the client's file name with any path
//! components and unsafe characters removed.

use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Longest sanitized name kept, in characters
const MAX_NAME_LENGTH: usize = 200;

/// Subdirectory an upload is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadCategory {
    Images,
    Audio,
    Video,
    Other,
}

impl UploadCategory {
    pub fn for_mime(mime: &str) -> Self {
        let mime = mime.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            UploadCategory::Images
        } else if mime.starts_with("audio/") {
            UploadCategory::Audio
        } else if mime.starts_with("video/") {
            UploadCategory::Video
        } else {
            UploadCategory::Other
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            UploadCategory::Images => "images",
            UploadCategory::Audio => "audio",
            UploadCategory::Video => "video",
            UploadCategory::Other => "other",
        }
    }
}

/// Descriptor of a stored upload, as returned to clients
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// Stored file name without its extension
    pub id: String,
    pub original_name: String,
    pub filename: String,
    pub path: String,
    pub size: u64,
    pub mimetype: String,
    /// Public URL under `/uploads`
    pub url: String,
}

/// Writes uploads below a root directory
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persist one upload and describe it
    pub async fn store(&self, original_name: &str, mimetype: &str, bytes: &[u8]) -> Result<StoredFile> {
        let category = UploadCategory::for_mime(mimetype);
        let dir = self.root.join(category.dir_name());
        tokio::fs::create_dir_all(&dir).await?;

        let filename = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(original_name));
        let path = dir.join(&filename);
        tokio::fs::write(&path, bytes).await?;

        tracing::info!(
            file = %path.display(),
            size = bytes.len(),
            mimetype,
            "stored upload"
        );

        let id = Path::new(&filename)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or_else(|| Error::Internal(format!("stored file has no name: {}", filename)))?;

        Ok(StoredFile {
            id,
            original_name: original_name.to_string(),
            url: format!("/uploads/{}/{}", category.dir_name(), filename),
            filename,
            path: path.display().to_string(),
            size: bytes.len() as u64,
            mimetype: mimetype.to_string(),
        })
    }
}

/// Reduce a client-supplied file name to a safe single path component.
///
/// Directory parts (either separator) are dropped, characters outside
/// `[A-Za-z0-9._-]` become `_`, and leading dots are removed so the result
/// can never be `.`, `..` or a hidden file. An empty result becomes `upload`.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
                ch
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LENGTH)
        .collect();

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}
