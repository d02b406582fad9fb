//! Automation run and preview handlers

use axum::{extract::State, response::Html, response::Json};
use serde_json::{Value, json};
use shared::{Component, Transition, crm_info};

use crate::core::automation;
use crate::error::WebServerResult;
use crate::traits::LeadStore;
use crate::web::views;
use crate::webserver_impl::WebServer;

/// `GET /automation/run`: show what a run would change
pub async fn automation_page<S>(State(server): State<WebServer<S>>) -> WebServerResult<Html<String>>
where
    S: LeadStore + 'static,
{
    let leads = server.store().active_leads().await?;
    Ok(views::automation(&automation::plan(&leads)))
}

/// `POST /automation/run`: apply the rules and report counts
pub async fn run_automation<S>(State(server): State<WebServer<S>>) -> WebServerResult<Json<Value>>
where
    S: LeadStore + 'static,
{
    let transitions = server.store().apply_automation().await?;
    let processed = automation::summarize(&transitions);
    crm_info!(
        Component::Automation,
        "⚙️ Automation run: {} converted, {} qualified, {} contacted",
        processed.converted,
        processed.qualified,
        processed.contacted
    );
    Ok(Json(json!({ "status": "ok", "processed": processed })))
}

/// `GET /api/automation/preview`: read-only list of pending transitions
pub async fn automation_preview<S>(State(server): State<WebServer<S>>) -> WebServerResult<Json<Vec<Transition>>>
where
    S: LeadStore + 'static,
{
    let leads = server.store().active_leads().await?;
    Ok(Json(automation::plan(&leads)))
}
