//! # SPD Common Library
//!
//! Shared code for the Spaces dashboard modules including:
//! - External API record types (SpaceRecord)
//! - Configuration loading
//! - Common error types
//! - Timestamp utilities
//! - Human-readable duration formatting

pub mod api;
pub mod config;
pub mod error;
pub mod human_time;
pub mod time;

pub use config::DashboardConfig;
pub use error::{Error, Result};
