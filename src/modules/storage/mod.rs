//! Storage module for report images
//!
//! Provides the MinIO/S3-compatible client used to store uploaded
//! report photos in a single public bucket.

pub mod minio_client;

pub use minio_client::MinIOClient;
