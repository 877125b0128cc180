//! Core utilities, configuration, and common functionality

pub mod config;
pub mod error;
pub mod keep_alive;
pub mod logging;
pub mod pagination;
pub mod web_server;

// Re-exports for convenience
pub use config::BotConfig;
pub use error::{AppError, AppResult, CallbackParseError, ConfigError};
pub use logging::{init_logger, install_panic_hook, log_startup_configuration};
pub use pagination::{advance, Direction};
