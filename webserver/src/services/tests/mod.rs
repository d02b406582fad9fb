//! Service tests for webserver
//!
//! This module contains tests for the store implementations.

pub mod fixtures;
pub mod sqlite_store;
