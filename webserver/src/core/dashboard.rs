//! Dashboard aggregation

use shared::{Lead, LeadStatus, StatusCounts};

/// Number of leads shown in the top-scoring table
pub const TOP_LEADS_LIMIT: usize = 5;

/// Data shown on the dashboard page
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub status_counts: StatusCounts,
    pub total_leads: u64,
    pub top_leads: Vec<Lead>,
}

impl Dashboard {
    pub fn new(status_counts: StatusCounts, mut top_leads: Vec<Lead>) -> Self {
        top_leads.truncate(TOP_LEADS_LIMIT);
        Self {
            total_leads: status_counts.total(),
            status_counts,
            top_leads,
        }
    }

    /// Status counts in pipeline order
    pub fn rows(&self) -> Vec<(LeadStatus, u64)> {
        LeadStatus::ALL
            .into_iter()
            .map(|status| (status, self.status_counts.get(status)))
            .collect()
    }

    /// Share of leads that reached converted, in percent
    pub fn conversion_rate(&self) -> f64 {
        if self.total_leads == 0 {
            return 0.0;
        }
        self.status_counts.converted as f64 * 100.0 / self.total_leads as f64
    }
}
