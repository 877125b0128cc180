//! Profile catalog and subscriber persistence

pub mod catalog;
pub mod subscribers;

// Re-exports for convenience
pub use catalog::{Catalog, Profile};
pub use subscribers::SubscriberStore;
