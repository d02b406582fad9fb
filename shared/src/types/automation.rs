//! Results of an automation pass

use serde::{Deserialize, Serialize};

use super::lead::LeadStatus;

/// A status change the automation rules decided on for one lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub id: i64,
    pub from: LeadStatus,
    pub to: LeadStatus,
    pub score: i64,
}

/// Number of leads moved into each status by an automation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomationSummary {
    pub converted: u64,
    pub qualified: u64,
    pub contacted: u64,
}

impl AutomationSummary {
    /// Tally transitions by their target status
    pub fn from_transitions(transitions: &[Transition]) -> Self {
        let mut summary = Self::default();
        for transition in transitions {
            match transition.to {
                LeadStatus::Converted => summary.converted += 1,
                LeadStatus::Qualified => summary.qualified += 1,
                LeadStatus::Contacted => summary.contacted += 1,
                LeadStatus::New | LeadStatus::Lost => {}
            }
        }
        summary
    }

    pub fn total(&self) -> u64 {
        self.converted + self.qualified + self.contacted
    }
}
