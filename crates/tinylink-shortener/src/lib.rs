//! URL shortener service implementation.
//!
//! This crate provides the orchestration service tying URL validation
//! to a repository backend. Core types are re-exported from
//! `tinylink_core`.

pub mod service;
pub mod validator;

pub use service::ShortenerService;
pub use tinylink_core::{Shortener, ShortenerError};
pub use validator::{DnsValidator, UrlValidator};
