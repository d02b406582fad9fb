//! Main webserver implementation
//!
//! The `WebServer` struct owns the injected lead store and builds the axum
//! router. Every handler receives it through axum state, so there is no
//! global database handle.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    routing::{get, post},
};
use shared::{Component, crm_info, logging};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{WebServerError, WebServerResult};
use crate::traits::LeadStore;
use crate::web::handlers::{api, automation, pages};

/// Main webserver struct with dependency injection
pub struct WebServer<S: LeadStore> {
    store: Arc<S>,
    started_at: Instant,
}

// Manual impl so the store itself does not need to be Clone
impl<S: LeadStore> Clone for WebServer<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            started_at: self.started_at,
        }
    }
}

impl<S> WebServer<S>
where
    S: LeadStore + 'static,
{
    /// Create a new webserver around a store
    pub fn new(store: S) -> Self {
        Self::with_shared_store(Arc::new(store))
    }

    /// Create a webserver around a store the caller keeps a handle to
    pub fn with_shared_store(store: Arc<S>) -> Self {
        Self {
            store,
            started_at: Instant::now(),
        }
    }

    /// Lead store used by the handlers
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            // Pages
            .route("/", get(pages::dashboard::<S>))
            .route("/leads", get(pages::list_leads::<S>))
            .route("/lead/add", get(pages::add_lead_form).post(pages::add_lead::<S>))
            .route("/lead/:id", get(pages::lead_detail::<S>))
            .route("/lead/:id/edit", get(pages::edit_lead_form::<S>))
            .route("/lead/:id/update", post(pages::update_lead::<S>))
            .route("/lead/:id/delete", post(pages::delete_lead::<S>))

            // Automation
            .route(
                "/automation/run",
                get(automation::automation_page::<S>).post(automation::run_automation::<S>),
            )
            .route("/api/automation/preview", get(automation::automation_preview::<S>))

            // API routes
            .route("/api/leads", get(api::list_leads::<S>).post(api::create_lead::<S>))

            // Health check
            .route("/health", get(api::health_check::<S>))

            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Serve until `shutdown` resolves
    pub async fn run<F>(&self, bind_address: SocketAddr, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();

        let listener = tokio::net::TcpListener::bind(bind_address)
            .await
            .map_err(|e| WebServerError::config(format!("Failed to bind to {bind_address}: {e}")))?;

        crm_info!(Component::Server, "🌐 Web server listening on http://{}", bind_address);
        crm_info!(Component::Server, "📊 Dashboard available at http://{}/", bind_address);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        logging::log_success(Component::Server, "HTTP server stopped");
        Ok(())
    }
}
