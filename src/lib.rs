//! Profilebot - Telegram bot that shows a catalog of profile cards
//!
//! Users page through the cards with inline buttons and can ask to be put in
//! touch with a profile, which notifies the administrator. The administrator
//! can broadcast texts and cards to everyone who subscribed.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors, logging, paging and the health endpoint
//! - `storage`: Profile catalog and the persisted subscriber set
//! - `telegram`: Bot setup, handlers, keyboards and broadcasts
//! - `cli`: Command line entry points

pub mod cli;
pub mod core;
pub mod storage;
pub mod telegram;

// Re-export commonly used types for convenience
pub use crate::core::{config, AppError, AppResult};
pub use storage::{Catalog, Profile, SubscriberStore};
pub use telegram::{schema, HandlerDeps};
