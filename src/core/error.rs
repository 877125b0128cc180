use thiserror::Error;

/// Centralized error types for the application
///
/// All fallible operations outside the dispatcher convert into this enum so
/// callers can decide per class whether to abort, degrade or just log.
///
/// # Example
///
/// ```no_run
/// use profilebot::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// Telegram API errors
    #[error("Telegram error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    /// IO errors (catalog and subscriber files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP/Fetch errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP status code errors
    #[error("HTTP request failed with status: {0}")]
    HttpStatus(reqwest::StatusCode),

    /// URL parsing errors
    #[error("URL parsing error: {0}")]
    Url(#[from] url::ParseError),

    /// Startup configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Malformed inline button payloads
    #[error("Callback error: {0}")]
    Callback(#[from] CallbackParseError),
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

/// Missing or unparsable environment configuration. Always fatal at startup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    #[error("environment variable {var} has invalid value {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Rejected inline button payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallbackParseError {
    #[error("empty callback payload")]
    Empty,

    #[error("unknown callback action: {0}")]
    UnknownAction(String),

    #[error("invalid profile index in callback payload: {0}")]
    BadIndex(String),
}
