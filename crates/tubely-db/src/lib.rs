//! Tubely persistence layer
//!
//! PostgreSQL repositories behind traits so the API can be exercised with
//! in-memory fakes.

pub mod db;

pub use db::{run_migrations, PgVideoRepository, VideoRepository};
