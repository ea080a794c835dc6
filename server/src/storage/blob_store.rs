//! Image blob storage
//!
//! Blobs live in the `images` bucket of the same database as the records.
//! Each upload gets a fresh id, so replacing an image never overwrites
//! the bytes another record might still reference.

use crate::config::IMAGE_BUCKET_NAME;
use crate::database::parse_id;
use crate::error::{AppError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::{FromRow, SqlitePool};
use uuid::Uuid;

/// Metadata for a stored blob
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BlobInfo {
    pub id: String,
    pub filename: String,
    pub length: i64,
    /// SHA-256 hash of the content
    pub sha256: String,
    pub uploaded_at: DateTime<Utc>,
}

/// Binary large-object storage for record images.
///
/// Held as `Arc<dyn BlobStore>` so services can run against any backend.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store bytes under a new id and return that id.
    async fn upload(&self, filename: &str, data: &[u8]) -> Result<String>;

    /// Read a blob's bytes. Fails with `ImageNotFound` if the id does not resolve.
    async fn download(&self, id: &str) -> Result<Vec<u8>>;

    /// Read a blob's metadata.
    async fn info(&self, id: &str) -> Result<BlobInfo>;

    /// Remove a blob. Fails with `ImageNotFound` if it is already gone.
    async fn delete(&self, id: &str) -> Result<()>;

    async fn exists(&self, id: &str) -> Result<bool>;
}

/// Blob store backed by the `images` table
#[derive(Clone)]
pub struct DbBlobStore {
    pool: SqlitePool,
}

impl DbBlobStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Calculate SHA-256 hash of data
    fn calculate_hash(data: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(data);
        format!("{:x}", hasher.finalize())
    }
}

#[async_trait]
impl BlobStore for DbBlobStore {
    async fn upload(&self, filename: &str, data: &[u8]) -> Result<String> {
        let id = Uuid::new_v4().to_string();

        // Calculate hash
        let hash = Self::calculate_hash(data);

        // Write to images bucket
        let sql = format!(
            r#"
            INSERT INTO {} (id, filename, length, sha256, uploaded_at, data)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            IMAGE_BUCKET_NAME
        );

        sqlx::query(&sql)
            .bind(&id)
            .bind(filename)
            .bind(data.len() as i64)
            .bind(&hash)
            .bind(Utc::now())
            .bind(data)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Uploaded blob: {} ({} bytes, sha256 {})", id, data.len(), hash);

        Ok(id)
    }

    async fn download(&self, id: &str) -> Result<Vec<u8>> {
        let id = parse_id(id)?;

        let sql = format!("SELECT data FROM {} WHERE id = ?", IMAGE_BUCKET_NAME);

        let data: Vec<u8> = sqlx::query_scalar(&sql)
            .bind(&id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::ImageNotFound(id.clone()))?;

        tracing::debug!("Downloaded blob: {} ({} bytes)", id, data.len());

        Ok(data)
    }

    async fn info(&self, id: &str) -> Result<BlobInfo> {
        let id = parse_id(id)?;

        // Metadata only; the bytes stay in the row
        let sql = format!(
            "SELECT id, filename, length, sha256, uploaded_at FROM {} WHERE id = ?",
            IMAGE_BUCKET_NAME
        );

        let info = sqlx::query_as::<_, BlobInfo>(&sql)
            .bind(&id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::ImageNotFound(id.clone()))?;

        Ok(info)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let id = parse_id(id)?;

        let sql = format!("DELETE FROM {} WHERE id = ?", IMAGE_BUCKET_NAME);

        let rows = sqlx::query(&sql)
            .bind(&id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        // Nothing removed means the blob was already gone
        if rows == 0 {
            return Err(AppError::ImageNotFound(id));
        }

        tracing::debug!("Deleted blob: {}", id);

        Ok(())
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        let id = parse_id(id)?;

        let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", IMAGE_BUCKET_NAME);

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(&id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::initialize_database;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_store() -> DbBlobStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        DbBlobStore::new(pool)
    }

    #[tokio::test]
    async fn test_upload_and_download() {
        let store = create_test_store().await;

        let data = b"\x89PNG fake image bytes";
        let id = store.upload("altair.png", data).await.unwrap();

        let read_data = store.download(&id).await.unwrap();
        assert_eq!(data, read_data.as_slice());
    }

    #[tokio::test]
    async fn test_same_content_gets_distinct_ids() {
        let store = create_test_store().await;

        let id1 = store.upload("a.png", b"same").await.unwrap();
        let id2 = store.upload("b.png", b"same").await.unwrap();
        assert_ne!(id1, id2);

        store.delete(&id1).await.unwrap();
        assert_eq!(store.download(&id2).await.unwrap(), b"same");
    }

    #[tokio::test]
    async fn test_info() {
        let store = create_test_store().await;

        let id = store.upload("apple-i.jpg", b"Hello, World!").await.unwrap();
        let info = store.info(&id).await.unwrap();

        assert_eq!(info.id, id);
        assert_eq!(info.filename, "apple-i.jpg");
        assert_eq!(info.length, 13);
        assert_eq!(
            info.sha256,
            "dffd6021bb2bd5b0af676290809ec3a53191dd81c7f70a4b28688a362182986f"
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let store = create_test_store().await;

        let id = store.upload("x.bin", b"Delete test").await.unwrap();
        assert!(store.exists(&id).await.unwrap());

        store.delete(&id).await.unwrap();

        assert!(!store.exists(&id).await.unwrap());
        assert!(matches!(store.download(&id).await, Err(AppError::ImageNotFound(_))));
        assert!(matches!(store.delete(&id).await, Err(AppError::ImageNotFound(_))));
    }

    #[tokio::test]
    async fn test_malformed_id() {
        let store = create_test_store().await;

        assert!(matches!(store.download("../etc").await, Err(AppError::InvalidInput(_))));
    }
}
