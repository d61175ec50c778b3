//! # Holocron Common Library
//!
//! Shared code for the holocron crates:
//! - Error types
//! - Event types (HolocronEvent) and the EventBus
//! - TOML configuration loading and root folder resolution
//! - Timestamp helpers

pub mod config;
pub mod error;
pub mod events;
pub mod time;

pub use error::{Error, Result};
