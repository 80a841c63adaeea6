//! Core types and traits for the tinylink URL shortener.
//!
//! This crate provides the shared vocabulary used by the storage
//! backends, the shortener service, and the HTTP gateway.

pub mod error;
pub mod repository;
pub mod short_id;
pub mod shortener;

pub use error::{ShortenerError, StorageError};
pub use repository::{Repository, UrlRecord};
pub use short_id::ShortId;
pub use shortener::Shortener;
