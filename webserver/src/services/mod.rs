//! Service implementations
//!
//! Real implementations of all service traits for production use

pub mod sqlite_store;

#[cfg(test)]
mod tests;

// Re-export service implementations
pub use sqlite_store::SqliteLeadStore;
