//! Core business logic modules
//!
//! Pure business logic with no I/O dependencies

pub mod automation;
pub mod dashboard;

// Re-export commonly used types
pub use dashboard::{Dashboard, TOP_LEADS_LIMIT};
