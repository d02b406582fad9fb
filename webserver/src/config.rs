//! Command line and environment configuration

use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::error::{WebServerError, WebServerResult};

/// Database used when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite:///mini_crm.db";

/// Command line arguments; each flag falls back to an environment variable
#[derive(Parser, Debug, Clone)]
#[command(name = "minicrm")]
#[command(about = "Mini CRM for tracking sales leads")]
pub struct Args {
    /// Persistence backend, e.g. sqlite:///mini_crm.db or sqlite::memory:
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Address to bind the HTTP server to
    #[arg(long, env = "MINICRM_HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port for the HTTP server
    #[arg(long, env = "MINICRM_PORT", default_value = "5000")]
    pub port: u16,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MINICRM_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

/// Where the lead store keeps its data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseLocation {
    File(PathBuf),
    Memory,
}

impl DatabaseLocation {
    /// Parse a database URL in the `sqlite://` family
    ///
    /// `sqlite:///name.db` is relative to the working directory and
    /// `sqlite:////abs/name.db` is absolute. A bare path is accepted too.
    pub fn parse(url: &str) -> WebServerResult<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(WebServerError::config("DATABASE_URL is empty"));
        }
        if matches!(url, ":memory:" | "sqlite::memory:" | "sqlite://" | "sqlite:///:memory:") {
            return Ok(Self::Memory);
        }

        let path = match url.strip_prefix("sqlite://") {
            Some(rest) => rest.strip_prefix('/').unwrap_or(rest),
            None if url.contains("://") => {
                return Err(WebServerError::config(format!(
                    "Unsupported database URL '{url}', only sqlite is available"
                )));
            }
            None => url,
        };

        if path.is_empty() {
            return Ok(Self::Memory);
        }
        Ok(Self::File(PathBuf::from(path)))
    }
}

/// Resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: SocketAddr,
    pub database: DatabaseLocation,
    pub log_level: String,
}

impl ServerConfig {
    pub fn from_args(args: Args) -> WebServerResult<Self> {
        Ok(Self {
            bind_address: SocketAddr::new(args.host, args.port),
            database: DatabaseLocation::parse(&args.database_url)?,
            log_level: args.log_level,
        })
    }
}
