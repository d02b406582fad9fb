//! Request bodies and query strings accepted by the HTTP layer

use rand::Rng;
use serde::Deserialize;
use std::ops::RangeInclusive;

use shared::{LeadPatch, LeadStatus, NewLead, SharedError, SharedResult, parse_score, validate_score};

use crate::error::WebServerResult;

/// Default source for leads created through the HTML form
pub const FORM_SOURCE: &str = "website";

/// Default source for leads created through the JSON API
pub const API_SOURCE: &str = "api";

/// Random score range for form-created leads without a score
pub const FORM_SCORE_RANGE: RangeInclusive<i64> = 10..=90;

/// Random score range for API-created leads without a score
pub const API_SCORE_RANGE: RangeInclusive<i64> = 0..=90;

/// Pick a placeholder score
pub fn random_score(range: RangeInclusive<i64>) -> i64 {
    rand::thread_rng().gen_range(range)
}

/// Blank form fields count as missing
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `?status=&notice=` on the lead list
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub notice: Option<String>,
}

impl ListQuery {
    /// An empty status means "no filter"
    pub fn status_filter(&self) -> WebServerResult<Option<LeadStatus>> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => Ok(Some(raw.parse()?)),
        }
    }
}

/// `?notice=` on the detail page
#[derive(Debug, Default, Deserialize)]
pub struct NoticeQuery {
    pub notice: Option<String>,
}

/// Fields posted by the add and edit forms
#[derive(Debug, Default, Clone, Deserialize)]
pub struct LeadForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: Option<String>,
    pub score: Option<String>,
    pub notes: Option<String>,
}

impl LeadForm {
    /// Build a new lead; `fallback_score` is used when the score is blank
    pub fn into_new_lead(self, fallback_score: i64) -> WebServerResult<NewLead> {
        let name = non_blank(self.name).ok_or(SharedError::NameRequired)?;
        let score = match non_blank(self.score) {
            Some(raw) => parse_score(&raw)?,
            None => validate_score(fallback_score)?,
        };

        Ok(NewLead {
            name,
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            source: Some(non_blank(self.source).unwrap_or_else(|| FORM_SOURCE.to_string())),
            status: LeadStatus::New,
            score,
            notes: non_blank(self.notes),
        })
    }

    /// Build a patch; blank fields keep the stored value
    pub fn into_patch(self) -> WebServerResult<LeadPatch> {
        let status = non_blank(self.status)
            .map(|raw| raw.trim().parse::<LeadStatus>())
            .transpose()?;
        let score = non_blank(self.score).map(|raw| parse_score(&raw)).transpose()?;

        Ok(LeadPatch {
            name: non_blank(self.name),
            email: non_blank(self.email),
            phone: non_blank(self.phone),
            source: non_blank(self.source),
            status,
            score,
            notes: non_blank(self.notes),
        })
    }
}

/// A scalar JSON field value; API clients send numbers and numeric strings
/// interchangeably
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JsonScalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl JsonScalar {
    pub fn into_text(self) -> String {
        match self {
            JsonScalar::Int(value) => value.to_string(),
            JsonScalar::Float(value) => value.to_string(),
            JsonScalar::Bool(value) => value.to_string(),
            JsonScalar::Text(value) => value,
        }
    }

    /// Fractional numbers are truncated; text must hold a whole number
    pub fn into_score(self) -> SharedResult<i64> {
        match self {
            JsonScalar::Int(value) => validate_score(value),
            JsonScalar::Float(value) if value.is_finite() => validate_score(value.trunc() as i64),
            JsonScalar::Text(raw) => parse_score(&raw),
            other => Err(SharedError::InvalidScore { input: other.into_text() }),
        }
    }
}

/// JSON body of `POST /api/leads`
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ApiLeadRequest {
    pub name: Option<JsonScalar>,
    pub email: Option<JsonScalar>,
    pub phone: Option<JsonScalar>,
    pub source: Option<JsonScalar>,
    pub score: Option<JsonScalar>,
    pub notes: Option<JsonScalar>,
}

impl ApiLeadRequest {
    pub fn into_new_lead(self, fallback_score: i64) -> WebServerResult<NewLead> {
        let name = non_blank(self.name.map(JsonScalar::into_text)).ok_or(SharedError::NameRequired)?;
        let score = match self.score {
            Some(raw) => raw.into_score()?,
            None => fallback_score,
        };
        let lead = NewLead {
            name,
            email: self.email.map(JsonScalar::into_text),
            phone: self.phone.map(JsonScalar::into_text),
            source: Some(
                self.source
                    .map(JsonScalar::into_text)
                    .unwrap_or_else(|| API_SOURCE.to_string()),
            ),
            status: LeadStatus::New,
            score,
            notes: self.notes.map(JsonScalar::into_text),
        };
        lead.validate()?;
        Ok(lead)
    }
}
