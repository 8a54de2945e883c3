//! Narrated Deck Player Library
//!
//! Terminal host for Narrated Deck: configuration, console commands and the
//! timer-driven session loop.
//!
//! This library exposes the core components for testing purposes.

pub mod config;
pub mod console;
pub mod error;
pub mod report;
pub mod session;

// Re-export commonly used types for convenience
pub use config::PlayerConfig;
pub use error::{PlayerError, Result};
pub use session::{Flow, Session};
