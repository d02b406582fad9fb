//! Mini CRM server entry point
//!
//! Reads configuration from the command line and environment (including a
//! `.env` file), opens the lead store, and serves HTTP until Ctrl+C.

use clap::Parser;
use shared::{Component, crm_info, logging};
use tokio::signal;

use webserver::{Args, ServerConfig, SqliteLeadStore, WebServer, WebServerResult};

#[tokio::main]
async fn main() -> WebServerResult<()> {
    // A missing .env file is fine
    let _ = dotenv::dotenv();

    let args = Args::parse();
    logging::init_tracing_with_level(Some(args.log_level.as_str()));

    let config = ServerConfig::from_args(args)?;
    logging::log_startup(Component::Server, &format!("mini CRM on {}", config.bind_address));
    crm_info!(Component::Server, "🗄️ Database: {:?}", config.database);

    let store = SqliteLeadStore::open_location(&config.database)?;
    let webserver = WebServer::new(store);

    let shutdown = async {
        match signal::ctrl_c().await {
            Ok(()) => logging::log_shutdown(Component::Server, "Received Ctrl+C signal"),
            Err(err) => logging::log_error(Component::Server, "Signal handling", &err),
        }
    };

    webserver.run(config.bind_address, shutdown).await?;

    logging::log_success(Component::Server, "Mini CRM stopped gracefully");
    Ok(())
}
