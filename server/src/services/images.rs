//! Images service
//!
//! Attaches images to computers and serves them back.
//! Integrates Repository and BlobStore.
//!
//! Replacing an image is not atomic. The steps run in the order
//! upload new, repoint record, delete old: a failure part way can leave
//! an orphaned blob, but never a record that points at a deleted one.
//! Partial application is reported as `AppError::InconsistentState`.

use crate::config::{DEFAULT_IMAGE_NAME, MAX_FILENAME_LENGTH};
use crate::database::{Computer, Repository};
use crate::error::{AppError, Result};
use crate::storage::{BlobInfo, BlobStore};
use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Service for managing computer images
#[derive(Clone)]
pub struct ImagesService {
    repo: Repository,
    blob_store: Arc<dyn BlobStore>,
}

impl ImagesService {
    pub fn new(repo: Repository, blob_store: Arc<dyn BlobStore>) -> Self {
        Self { repo, blob_store }
    }

    /// Get image bytes and metadata by blob id
    pub async fn get_image(&self, image_id: &str) -> Result<(BlobInfo, Vec<u8>)> {
        let info = self.blob_store.info(image_id).await?;
        let data = self.blob_store.download(image_id).await?;
        Ok((info, data))
    }

    /// Store an image for a computer, replacing any previous one.
    ///
    /// Returns the computer with its new image reference.
    pub async fn store_image<R>(
        &self,
        computer_id: &str,
        name: &str,
        mut stream: R,
    ) -> Result<Computer>
    where
        R: AsyncRead + Unpin + Send,
    {
        // Fetch the computer; fails before anything is uploaded
        let mut computer = self.repo.get_computer(computer_id).await?;
        let old_image = computer.image_id.clone().filter(|_| computer.has_image());

        let mut data = Vec::new();
        stream.read_to_end(&mut data).await?;

        // Validate filename (prevent path traversal)
        let filename = sanitize_filename(name);
        tracing::info!(
            "Storing image: {} for computer: {} (size: {} bytes)",
            filename,
            computer.id,
            data.len()
        );

        // Upload the new image first
        let new_image = self.blob_store.upload(&filename, &data).await?;

        // Repoint the computer at it
        match self.repo.set_image_id(&computer.id, Some(new_image.as_str())).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(
                    "Computer {} disappeared before image {} was attached",
                    computer.id,
                    new_image
                );
                return Err(AppError::InconsistentState(format!(
                    "computer {} was removed while attaching image; image {} is orphaned",
                    computer.id, new_image
                )));
            }
            Err(e) => {
                tracing::warn!("Failed to attach image {} to {}: {}", new_image, computer.id, e);
                return Err(AppError::InconsistentState(format!(
                    "image {} uploaded but computer {} was not updated: {}",
                    new_image, computer.id, e
                )));
            }
        }

        computer.image_id = Some(new_image.clone());

        // Delete the old image last
        if let Some(old_image) = old_image {
            match self.blob_store.delete(&old_image).await {
                Ok(()) => {
                    tracing::debug!("Replaced image {} with {}", old_image, new_image);
                }
                // A dangling or malformed reference has nothing left to delete
                Err(e) if e.is_not_found() || matches!(e, AppError::InvalidInput(_)) => {
                    tracing::debug!("Old image {} was already gone: {}", old_image, e);
                }
                Err(e) => {
                    tracing::warn!(
                        "Computer {} now uses image {} but old image {} was not deleted: {}",
                        computer.id,
                        new_image,
                        old_image,
                        e
                    );
                    return Err(AppError::InconsistentState(format!(
                        "old image {} of computer {} was not deleted and is orphaned: {}",
                        old_image, computer.id, e
                    )));
                }
            }
        }

        tracing::info!("Image stored: {} for computer: {}", new_image, computer.id);

        Ok(computer)
    }
}

/// Sanitize filename to prevent path traversal in download headers
fn sanitize_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .filter(|c| *c != '/' && *c != '\\' && *c != '\0')
        .take(MAX_FILENAME_LENGTH)
        .collect();

    if cleaned.trim().is_empty() {
        DEFAULT_IMAGE_NAME.to_string()
    } else {
        cleaned
    }
}
