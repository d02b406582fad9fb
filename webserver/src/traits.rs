//! Service trait definitions for dependency injection
//!
//! Persistence is abstracted behind these traits so handlers can be tested
//! against mocks.

use async_trait::async_trait;

use shared::{Lead, LeadPatch, LeadStatus, NewLead, StatusCounts, Transition};
use crate::error::WebServerResult;

/// Lead persistence service trait
#[mockall::automock]
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Store a new lead and return it with its id and timestamps
    async fn insert(&self, lead: NewLead) -> WebServerResult<Lead>;

    /// Fetch a single lead
    async fn get(&self, id: i64) -> WebServerResult<Option<Lead>>;

    /// List leads newest first, optionally restricted to one status
    async fn list(&self, status: Option<LeadStatus>) -> WebServerResult<Vec<Lead>>;

    /// Apply a partial update; `None` when the lead does not exist
    async fn update(&self, id: i64, patch: LeadPatch) -> WebServerResult<Option<Lead>>;

    /// Permanently delete a lead; `false` when it did not exist
    async fn delete(&self, id: i64) -> WebServerResult<bool>;

    /// Count leads per status
    async fn status_counts(&self) -> WebServerResult<StatusCounts>;

    /// Highest scoring leads, best first
    async fn top_by_score(&self, limit: usize) -> WebServerResult<Vec<Lead>>;

    /// Leads the automation rules may still move
    async fn active_leads(&self) -> WebServerResult<Vec<Lead>>;

    /// Run the automation rules and persist their result in one transaction
    async fn apply_automation(&self) -> WebServerResult<Vec<Transition>>;
}
