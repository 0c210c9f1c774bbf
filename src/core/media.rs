//! File storage for uploaded itinerary images
//!
//! Bytes live on disk under the media root; rows only keep the path
//! relative to that root (e.g. `itineraries/<uuid>.png`).

use std::io;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Media directory handle
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory served under `/media`
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store bytes under `subdir` with a fresh file name; returns the relative path
    pub async fn save(&self, subdir: &str, extension: &str, bytes: &[u8]) -> io::Result<String> {
        let dir = self.root.join(subdir);
        tokio::fs::create_dir_all(&dir).await?;

        let file_name = format!("{}.{}", Uuid::new_v4().simple(), extension);
        tokio::fs::write(dir.join(&file_name), bytes).await?;

        let relative = format!("{}/{}", subdir, file_name);
        tracing::debug!(path = %relative, size = bytes.len(), "media file stored");
        Ok(relative)
    }

    /// Remove a stored file; a file that is already gone is not an error
    pub async fn remove(&self, relative_path: &str) -> io::Result<()> {
        let Some(path) = self.resolve(relative_path) else {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("media path escapes the media root: {}", relative_path),
            ));
        };

        match tokio::fs::remove_file(path).await {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    /// Absolute path of a stored file, refusing anything outside the root
    pub fn resolve(&self, relative_path: &str) -> Option<PathBuf> {
        let relative = Path::new(relative_path);
        let contained = relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
        contained.then(|| self.root.join(relative))
    }
}

/// File extension for an accepted image content type
pub fn image_extension(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}
