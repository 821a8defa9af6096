use serde::{Deserialize, Serialize};

use super::models::{parse_outcome, MatchUpdate, NewMatch};
use super::StoreError;

/// Body of POST /matches
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateMatchRequest {
    pub outcome: String,
    #[serde(default)]
    pub opponent: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl CreateMatchRequest {
    pub fn into_new_match(self) -> Result<NewMatch, StoreError> {
        let outcome = parse_outcome(&self.outcome)?;
        Ok(NewMatch::new(self.opponent, outcome, self.date))
    }
}

/// Body of PATCH /matches/:id. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateMatchRequest {
    #[serde(default)]
    pub outcome: Option<String>,
    #[serde(default)]
    pub opponent: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

impl UpdateMatchRequest {
    pub fn into_update(self) -> Result<MatchUpdate, StoreError> {
        let outcome = self.outcome.as_deref().map(parse_outcome).transpose()?;
        Ok(MatchUpdate {
            outcome,
            opponent: self.opponent,
            date: self.date,
        })
    }
}
