//! Repository implementations for the tinylink URL shortener.
//!
//! Two backends share the same in-memory table: [`MemoryRepository`]
//! keeps state for the process lifetime only, while
//! [`JsonFileRepository`] rewrites a single JSON file on every insert
//! and reloads it on demand.

mod table;

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;
pub use tinylink_core::{Repository, StorageError, UrlRecord};

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;
