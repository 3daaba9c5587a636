use thiserror::Error;

/// Unified error type for chat completion calls.
///
/// Deliberately small: a non-2xx HTTP status is not an error here. The
/// service reports its own failures inside the JSON body and that body is
/// handed back to the caller as a normal response.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network unreachable, connection aborted, body cut short
    #[error("transport error: {0}")]
    Transport(String),

    /// Response body was not valid JSON
    #[error("parse error: {0}")]
    Parse(String),

    /// Request could not be constructed (bad header name/value)
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LlmError>;
