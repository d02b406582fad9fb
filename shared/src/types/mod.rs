//! Core shared types

pub mod automation;
pub mod lead;

pub use automation::{AutomationSummary, Transition};
pub use lead::{
    Lead, LeadPatch, LeadStatus, MAX_SCORE, MIN_SCORE, NewLead, StatusCounts, parse_score, timestamp,
    validate_score,
};
