use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use super::StoreError;

/// Persisted result of a game from the tracked player's point of view.
///
/// Stored as the literal text "Won" / "Lost". Draws never reach the store.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum MatchOutcome {
    Won,
    Lost,
}

/// Database model for the match_records table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: i64,
    pub opponent: Option<String>,
    pub outcome: MatchOutcome,
    pub date: Option<String>, // YYYY-MM-DD, no timezone
}

impl MatchRecord {
    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            opponent: self.opponent.clone(),
            outcome: self.outcome,
            date: self.date.clone(),
        }
    }
}

/// A record that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMatch {
    pub opponent: Option<String>,
    pub outcome: MatchOutcome,
    pub date: Option<String>,
}

impl NewMatch {
    /// Builds a new match, folding empty opponent/date strings into `None`
    pub fn new(opponent: Option<String>, outcome: MatchOutcome, date: Option<String>) -> Self {
        Self {
            opponent: non_empty(opponent),
            outcome,
            date: non_empty(date),
        }
    }

    pub fn dedup_key(&self) -> DedupKey {
        DedupKey {
            opponent: self.opponent.clone(),
            outcome: self.outcome,
            date: self.date.clone(),
        }
    }

    pub fn into_record(self, id: i64) -> MatchRecord {
        MatchRecord {
            id,
            opponent: self.opponent,
            outcome: self.outcome,
            date: self.date,
        }
    }
}

/// The (opponent, outcome, date) triple that identifies "the same game".
///
/// Two genuinely different games against the same opponent with the same
/// outcome on the same day collapse into one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub opponent: Option<String>,
    pub outcome: MatchOutcome,
    pub date: Option<String>,
}

/// Partial update applied by a manual edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchUpdate {
    pub outcome: Option<MatchOutcome>,
    pub opponent: Option<String>,
    pub date: Option<String>,
}

impl MatchUpdate {
    pub fn is_empty(&self) -> bool {
        self.outcome.is_none() && self.opponent.is_none() && self.date.is_none()
    }

    /// Applies the update. An empty opponent or date string clears the field.
    pub fn apply_to(&self, record: &mut MatchRecord) {
        if let Some(outcome) = self.outcome {
            record.outcome = outcome;
        }
        if let Some(opponent) = &self.opponent {
            record.opponent = non_empty(Some(opponent.clone()));
        }
        if let Some(date) = &self.date {
            record.date = non_empty(Some(date.clone()));
        }
    }
}

/// Win/loss counters shown above the record list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTotals {
    pub won: u64,
    pub lost: u64,
}

/// Parses free-form outcome text ("won", "Lost", ...) as typed by a user
pub fn parse_outcome(raw: &str) -> Result<MatchOutcome, StoreError> {
    raw.trim().parse::<MatchOutcome>().map_err(|_| {
        StoreError::Validation(format!(
            "invalid outcome '{}', expected 'Won' or 'Lost'",
            raw.trim()
        ))
    })
}

/// Checks a manually entered date is a real calendar day in YYYY-MM-DD form
pub fn validate_date(date: Option<&str>) -> Result<(), StoreError> {
    match date.map(str::trim) {
        None | Some("") => Ok(()),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_| StoreError::Validation(format!("invalid date '{value}', expected YYYY-MM-DD"))),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
