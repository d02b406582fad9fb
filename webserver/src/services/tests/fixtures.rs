//! Test fixtures for webserver service tests

use shared::{LeadStatus, NewLead};

use crate::services::SqliteLeadStore;
use crate::traits::LeadStore;

/// Fresh in-memory store
pub fn create_test_store() -> SqliteLeadStore {
    SqliteLeadStore::open_in_memory().expect("in-memory store should open")
}

/// Minimal new lead with the given status and score
pub fn create_test_lead(name: &str, status: LeadStatus, score: i64) -> NewLead {
    NewLead::new(name).with_status(status).with_score(score)
}

/// Store seeded with one lead per automation rule plus terminal leads
///
/// Returns the ids in insertion order:
/// converting, qualifying, already qualified, contacting, untouched new,
/// converted, lost.
pub async fn create_seeded_store() -> (SqliteLeadStore, Vec<i64>) {
    let store = create_test_store();
    let leads = vec![
        create_test_lead("Hot", LeadStatus::Contacted, 95),
        create_test_lead("Warm", LeadStatus::New, 85),
        create_test_lead("Steady", LeadStatus::Qualified, 82),
        create_test_lead("Mail", LeadStatus::New, 30).with_email("mail@example.com"),
        create_test_lead("Quiet", LeadStatus::New, 30),
        create_test_lead("Done", LeadStatus::Converted, 99),
        create_test_lead("Gone", LeadStatus::Lost, 95).with_email("gone@example.com"),
    ];

    let mut ids = Vec::with_capacity(leads.len());
    for lead in leads {
        ids.push(store.insert(lead).await.expect("seed insert").id);
    }
    (store, ids)
}
