//! Lead records and their lifecycle status

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{SharedError, SharedResult};

/// Lowest accepted lead score
pub const MIN_SCORE: i64 = 0;

/// Highest accepted lead score
pub const MAX_SCORE: i64 = 100;

/// Position of a lead in the sales pipeline
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

impl LeadStatus {
    /// Every status in pipeline order
    pub const ALL: [LeadStatus; 5] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::Converted,
        LeadStatus::Lost,
    ];

    /// Statuses the automation pass is allowed to move
    pub const ACTIVE: [LeadStatus; 3] = [LeadStatus::New, LeadStatus::Contacted, LeadStatus::Qualified];

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Converted => "converted",
            LeadStatus::Lost => "lost",
        }
    }

    /// Converted and lost leads never leave their status through automation
    pub fn is_terminal(&self) -> bool {
        matches!(self, LeadStatus::Converted | LeadStatus::Lost)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| SharedError::InvalidStatus { input: s.to_string() })
    }
}

/// Check that a score lies in the accepted range
pub fn validate_score(value: i64) -> SharedResult<i64> {
    if (MIN_SCORE..=MAX_SCORE).contains(&value) {
        Ok(value)
    } else {
        Err(SharedError::ScoreOutOfRange {
            value,
            min: MIN_SCORE,
            max: MAX_SCORE,
        })
    }
}

/// Parse a score typed into a form field
pub fn parse_score(input: &str) -> SharedResult<i64> {
    let value = input
        .trim()
        .parse::<i64>()
        .map_err(|_| SharedError::InvalidScore { input: input.to_string() })?;
    validate_score(value)
}

/// A stored lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: LeadStatus,
    pub score: i64,
    pub notes: Option<String>,
    #[serde(with = "timestamp")]
    pub created_at: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub updated_at: NaiveDateTime,
}

impl Lead {
    /// An email counts as present only when it is set and non-empty
    pub fn has_email(&self) -> bool {
        self.email.as_deref().is_some_and(|email| !email.is_empty())
    }
}

/// Fields for a lead that has not been stored yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    #[serde(default)]
    pub status: LeadStatus,
    #[serde(default)]
    pub score: i64,
    pub notes: Option<String>,
}

impl NewLead {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: None,
            phone: None,
            source: None,
            status: LeadStatus::New,
            score: 0,
            notes: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn with_status(mut self, status: LeadStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score;
        self
    }

    pub fn validate(&self) -> SharedResult<()> {
        if self.name.trim().is_empty() {
            return Err(SharedError::NameRequired);
        }
        validate_score(self.score)?;
        Ok(())
    }
}

/// Partial update of a stored lead; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub source: Option<String>,
    pub status: Option<LeadStatus>,
    pub score: Option<i64>,
    pub notes: Option<String>,
}

impl LeadPatch {
    pub fn validate(&self) -> SharedResult<()> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(SharedError::NameRequired);
            }
        }
        if let Some(score) = self.score {
            validate_score(score)?;
        }
        Ok(())
    }
}

/// Number of leads per status, zero-filled for statuses with no leads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub new: u64,
    pub contacted: u64,
    pub qualified: u64,
    pub converted: u64,
    pub lost: u64,
}

impl StatusCounts {
    pub fn get(&self, status: LeadStatus) -> u64 {
        match status {
            LeadStatus::New => self.new,
            LeadStatus::Contacted => self.contacted,
            LeadStatus::Qualified => self.qualified,
            LeadStatus::Converted => self.converted,
            LeadStatus::Lost => self.lost,
        }
    }

    pub fn set(&mut self, status: LeadStatus, count: u64) {
        match status {
            LeadStatus::New => self.new = count,
            LeadStatus::Contacted => self.contacted = count,
            LeadStatus::Qualified => self.qualified = count,
            LeadStatus::Converted => self.converted = count,
            LeadStatus::Lost => self.lost = count,
        }
    }

    pub fn total(&self) -> u64 {
        LeadStatus::ALL.iter().map(|status| self.get(*status)).sum()
    }
}

/// `YYYY-MM-DD HH:MM:SS`, the format SQLite's `CURRENT_TIMESTAMP` produces
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
