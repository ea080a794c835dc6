//! Storage module
//!
//! Provides blob storage for record images.

pub mod blob_store;

pub use blob_store::{BlobInfo, BlobStore, DbBlobStore};
