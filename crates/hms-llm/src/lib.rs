pub mod client;
pub mod config;
pub mod error;
pub mod sanitize;

// Re-export core types
pub use client::{ChatCompletion, OpenRouterClient};
pub use config::ClientConfig;
pub use error::{LlmError, Result};
pub use sanitize::{clean_response, format_html};
