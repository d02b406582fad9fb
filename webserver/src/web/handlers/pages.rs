//! Browser-facing page handlers
//!
//! Dashboard, lead list and detail, and the add/edit/delete form flows

use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use shared::{Component, crm_info};

use crate::core::{Dashboard, TOP_LEADS_LIMIT};
use crate::error::{WebServerError, WebServerResult};
use crate::traits::LeadStore;
use crate::web::forms::{FORM_SCORE_RANGE, LeadForm, ListQuery, NoticeQuery, random_score};
use crate::web::views;
use crate::webserver_impl::WebServer;

/// `GET /`
pub async fn dashboard<S>(State(server): State<WebServer<S>>) -> WebServerResult<Html<String>>
where
    S: LeadStore + 'static,
{
    let counts = server.store().status_counts().await?;
    let top_leads = server.store().top_by_score(TOP_LEADS_LIMIT).await?;
    Ok(views::dashboard(&Dashboard::new(counts, top_leads)))
}

/// `GET /leads[?status=]`
pub async fn list_leads<S>(
    State(server): State<WebServer<S>>,
    Query(query): Query<ListQuery>,
) -> WebServerResult<Html<String>>
where
    S: LeadStore + 'static,
{
    let filter = query.status_filter()?;
    let leads = server.store().list(filter).await?;
    Ok(views::lead_list(&leads, filter, query.notice.as_deref()))
}

/// `GET /lead/{id}`
pub async fn lead_detail<S>(
    State(server): State<WebServer<S>>,
    Path(id): Path<i64>,
    Query(query): Query<NoticeQuery>,
) -> WebServerResult<Html<String>>
where
    S: LeadStore + 'static,
{
    let lead = server.store().get(id).await?.ok_or(WebServerError::NotFound)?;
    Ok(views::lead_detail(&lead, query.notice.as_deref()))
}

/// `GET /lead/add`
pub async fn add_lead_form() -> Html<String> {
    views::add_form()
}

/// `POST /lead/add`
pub async fn add_lead<S>(
    State(server): State<WebServer<S>>,
    Form(form): Form<LeadForm>,
) -> WebServerResult<Redirect>
where
    S: LeadStore + 'static,
{
    let new_lead = form.into_new_lead(random_score(FORM_SCORE_RANGE))?;
    let lead = server.store().insert(new_lead).await?;
    crm_info!(Component::Server, "➕ Added lead {} ({}) via form", lead.id, lead.name);
    Ok(Redirect::to("/leads?notice=added"))
}

/// `GET /lead/{id}/edit`
pub async fn edit_lead_form<S>(
    State(server): State<WebServer<S>>,
    Path(id): Path<i64>,
) -> WebServerResult<Html<String>>
where
    S: LeadStore + 'static,
{
    let lead = server.store().get(id).await?.ok_or(WebServerError::NotFound)?;
    Ok(views::edit_form(&lead))
}

/// `POST /lead/{id}/update`
pub async fn update_lead<S>(
    State(server): State<WebServer<S>>,
    Path(id): Path<i64>,
    Form(form): Form<LeadForm>,
) -> WebServerResult<Redirect>
where
    S: LeadStore + 'static,
{
    let patch = form.into_patch()?;
    let lead = server.store().update(id, patch).await?.ok_or(WebServerError::NotFound)?;
    crm_info!(Component::Server, "✏️ Updated lead {}", lead.id);
    Ok(Redirect::to(&format!("/lead/{}?notice=updated", lead.id)))
}

/// `POST /lead/{id}/delete`
pub async fn delete_lead<S>(
    State(server): State<WebServer<S>>,
    Path(id): Path<i64>,
) -> WebServerResult<Redirect>
where
    S: LeadStore + 'static,
{
    if !server.store().delete(id).await? {
        return Err(WebServerError::NotFound);
    }
    crm_info!(Component::Server, "🗑️ Deleted lead {}", id);
    Ok(Redirect::to("/leads?notice=deleted"))
}
