//! Local disk storage for evidence images.
//!
//! Files are written under the upload directory with a generated name
//! (`<uuid-v7>.<ext>`) and served by actix-files under [`PUBLIC_PREFIX`].

use std::fmt::Display;
use std::path::{Path, PathBuf};

use futures_util::{Stream, StreamExt};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// URL prefix under which stored evidence is served.
pub const PUBLIC_PREFIX: &str = "/uploads";

/// Image extensions kept from the client's filename.
const ALLOWED_IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"];

/// A file written to the evidence directory.
#[derive(Debug, Clone)]
pub struct StoredEvidence {
    /// Generated file name, unique per upload.
    pub file_name: String,
    /// Public path to record in the database.
    pub url: String,
    pub size: usize,
}

/// Evidence file store rooted at the upload directory.
#[derive(Debug, Clone)]
pub struct EvidenceStore {
    root: PathBuf,
    max_size: usize,
}

impl EvidenceStore {
    pub fn new(root: impl Into<PathBuf>, max_size: usize) -> Self {
        Self {
            root: root.into(),
            max_size,
        }
    }

    /// Directory the files live in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maximum accepted file size in bytes.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> AppResult<()> {
        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::Storage(format!(
                "Failed to create upload directory {}: {}",
                self.root.display(),
                e
            ))
        })
    }

    /// Check that an upload is an image and pick the extension to store it under.
    ///
    /// The content type must be `image/*`. The client's file extension is kept
    /// when it is a known image extension, otherwise one is derived from the
    /// content type.
    pub fn image_extension(
        content_type: Option<&str>,
        original_name: Option<&str>,
    ) -> AppResult<String> {
        let content_type = content_type
            .map(|ct| ct.trim().to_lowercase())
            .unwrap_or_default();

        let Some(subtype) = content_type.strip_prefix("image/") else {
            return Err(AppError::Validation(format!(
                "Only image files are accepted (got '{}')",
                if content_type.is_empty() {
                    "unknown"
                } else {
                    content_type.as_str()
                }
            )));
        };

        let from_name = original_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()));

        if let Some(ext) = from_name {
            return Ok(ext);
        }

        let ext = match subtype {
            "jpeg" | "pjpeg" => "jpg",
            "svg+xml" => "svg",
            "x-ms-bmp" => "bmp",
            other if ALLOWED_IMAGE_EXTENSIONS.contains(&other) => other,
            _ => "img",
        };
        Ok(ext.to_string())
    }

    /// Stream an upload to disk under a freshly generated name.
    ///
    /// Fails with `Validation` once more than `max_size` bytes arrive; the
    /// partial file is removed before returning.
    pub async fn store<S, B, E>(&self, mut stream: S, extension: &str) -> AppResult<StoredEvidence>
    where
        S: Stream<Item = Result<B, E>> + Unpin,
        B: AsRef<[u8]>,
        E: Display,
    {
        let file_name = format!("{}.{}", Uuid::now_v7(), extension);
        let path = self.root.join(&file_name);

        let mut file = tokio::fs::File::create(&path).await.map_err(|e| {
            AppError::Storage(format!("Failed to create file {}: {}", file_name, e))
        })?;

        let mut size: usize = 0;
        let outcome: AppResult<()> = async {
            while let Some(chunk) = stream.next().await {
                let data =
                    chunk.map_err(|e| AppError::InvalidInput(format!("Read error: {}", e)))?;
                let data = data.as_ref();
                size += data.len();

                if size > self.max_size {
                    return Err(AppError::Validation(format!(
                        "Evidence exceeds maximum size of {} bytes",
                        self.max_size
                    )));
                }

                file.write_all(data)
                    .await
                    .map_err(|e| AppError::Storage(format!("Failed to write file: {}", e)))?;
            }

            file.flush()
                .await
                .map_err(|e| AppError::Storage(format!("Failed to flush file: {}", e)))
        }
        .await;

        if let Err(err) = outcome {
            drop(file);
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!("Failed to remove partial evidence {}: {}", path.display(), e);
            }
            return Err(err);
        }

        info!("Stored evidence {} ({} bytes)", file_name, size);

        Ok(StoredEvidence {
            url: format!("{}/{}", PUBLIC_PREFIX, file_name),
            file_name,
            size,
        })
    }

    /// Remove a stored file by the public URL recorded in the database.
    ///
    /// Returns `Ok(false)` when the file was already gone. URLs outside
    /// [`PUBLIC_PREFIX`] or containing path separators are refused.
    pub async fn remove_by_url(&self, url: &str) -> AppResult<bool> {
        let file_name = url
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| !name.is_empty() && !name.contains(['/', '\\']) && *name != "..")
            .ok_or_else(|| AppError::InvalidInput(format!("Not an evidence URL: {}", url)))?;

        match tokio::fs::remove_file(self.root.join(file_name)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AppError::Storage(format!(
                "Failed to remove evidence {}: {}",
                file_name, e
            ))),
        }
    }
}
