//! HTTP gateway for the tinylink URL shortener.
//!
//! Binds the shorten and resolve operations to their HTTP contract:
//! `POST /api/shorturl` accepts a form-encoded `url` field and answers
//! with JSON, `GET /api/shorturl/{shorturl}` redirects to the stored
//! original URL.

pub mod app;
pub mod cli;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use state::AppState;
