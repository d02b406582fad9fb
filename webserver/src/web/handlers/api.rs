//! REST API handlers
//!
//! JSON endpoints for listing and creating leads

use axum::{
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
};
use serde_json::{Value, json};
use shared::{Component, Lead, crm_debug, crm_info, crm_warn};

use crate::error::{WebServerError, WebServerResult};
use crate::traits::LeadStore;
use crate::web::forms::{API_SCORE_RANGE, ApiLeadRequest, random_score};
use crate::webserver_impl::WebServer;

/// `GET /api/leads`
pub async fn list_leads<S>(State(server): State<WebServer<S>>) -> WebServerResult<Json<Vec<Lead>>>
where
    S: LeadStore + 'static,
{
    Ok(Json(server.store().list(None).await?))
}

/// `POST /api/leads`
///
/// A missing body, or one that is not JSON at all, is treated like an empty
/// object and fails on the name check. JSON with a field of the wrong shape is
/// rejected with the decoder's message, which names the field.
pub async fn create_lead<S>(
    State(server): State<WebServer<S>>,
    body: Result<Json<ApiLeadRequest>, JsonRejection>,
) -> WebServerResult<(StatusCode, Json<Value>)>
where
    S: LeadStore + 'static,
{
    let request = match body {
        Ok(Json(request)) => request,
        Err(JsonRejection::JsonDataError(rejection)) => {
            crm_warn!(Component::Server, "Rejected lead body: {}", rejection.body_text());
            return Err(WebServerError::invalid(rejection.body_text()));
        }
        Err(rejection) => {
            crm_debug!(Component::Server, "Unreadable lead body: {}", rejection);
            ApiLeadRequest::default()
        }
    };

    let new_lead = request.into_new_lead(random_score(API_SCORE_RANGE))?;
    let lead = server.store().insert(new_lead).await?;
    crm_info!(Component::Server, "➕ Added lead {} ({}) via API", lead.id, lead.name);

    Ok((StatusCode::CREATED, Json(json!({ "status": "ok", "lead": lead }))))
}

/// `GET /health`
pub async fn health_check<S>(State(server): State<WebServer<S>>) -> Json<Value>
where
    S: LeadStore + 'static,
{
    Json(json!({
        "status": "healthy",
        "uptime_seconds": server.uptime_seconds(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
