//! Webserver library for the mini CRM
//!
//! Serves the lead dashboard, CRUD forms, the JSON API, and the automation
//! endpoints on top of an injected lead store.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod traits;
pub mod web;
pub mod webserver_impl;

// Re-export main types
pub use config::{Args, DatabaseLocation, ServerConfig};
pub use error::{WebServerError, WebServerResult};
pub use webserver_impl::WebServer;

// Re-export trait definitions
pub use traits::{LeadStore, MockLeadStore};

// Re-export service implementations
pub use services::SqliteLeadStore;
