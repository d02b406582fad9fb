//! Shared types for the mini CRM
//!
//! Contains the lead domain types used by the store, the automation rules,
//! and the HTTP layer, plus the common error and logging setup.

pub mod errors;
pub mod logging;
pub mod types;

pub use errors::*;
pub use logging::Component;
pub use types::*;
