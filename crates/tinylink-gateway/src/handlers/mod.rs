mod health;
mod url;

pub use health::health_handler;
pub use url::{not_found_handler, resolve_handler, shorten_handler};
