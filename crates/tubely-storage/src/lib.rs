//! Tubely Storage Library
//!
//! Storage abstraction with two backends: a local asset directory for
//! thumbnails and S3 (through `object_store`) for videos.
//!
//! # Storage key format
//!
//! - **Thumbnails**: `<base64url(32 random bytes)>.<ext>` at the asset root
//! - **Videos**: `<aspect category>/<hex(16 random bytes)>.mp4`
//!
//! Keys must not contain `..` or a leading `/`. Key generation is centralized
//! in the `keys` module.

pub mod factory;
pub mod keys;
pub mod local;
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::{create_asset_storage, create_object_storage};
pub use local::LocalStorage;
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
