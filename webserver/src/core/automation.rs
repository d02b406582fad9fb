//! Automation rules for moving leads through the pipeline
//!
//! Pure business logic with no I/O dependencies. Both the preview and the
//! apply path go through [`plan`], so they always agree.

use shared::{AutomationSummary, Lead, LeadStatus, Transition};

/// Score at which a lead counts as converted
pub const CONVERT_THRESHOLD: i64 = 90;

/// Score at which a lead counts as qualified
pub const QUALIFY_THRESHOLD: i64 = 80;

/// Next status for a lead; first matching rule wins
///
/// Terminal statuses are returned unchanged.
pub fn next_status(status: LeadStatus, score: i64, has_email: bool) -> LeadStatus {
    if status.is_terminal() {
        return status;
    }
    if score >= CONVERT_THRESHOLD {
        LeadStatus::Converted
    } else if score >= QUALIFY_THRESHOLD {
        LeadStatus::Qualified
    } else if has_email && status == LeadStatus::New {
        LeadStatus::Contacted
    } else {
        status
    }
}

/// Transition for a single lead, if the rules would change it
pub fn evaluate(lead: &Lead) -> Option<Transition> {
    let to = next_status(lead.status, lead.score, lead.has_email());
    (to != lead.status).then_some(Transition {
        id: lead.id,
        from: lead.status,
        to,
        score: lead.score,
    })
}

/// All transitions the rules would make over a batch of leads, in input order
pub fn plan(leads: &[Lead]) -> Vec<Transition> {
    leads.iter().filter_map(evaluate).collect()
}

/// Summary reported after an apply
pub fn summarize(transitions: &[Transition]) -> AutomationSummary {
    AutomationSummary::from_transitions(transitions)
}
