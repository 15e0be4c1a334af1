//! Shared types for the dashboard REST API
//!
//! The REST endpoints themselves are an external collaborator; this module
//! only defines the record shapes the core reads from them.

pub mod types;

pub use types::SpaceRecord;
