use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    models::{validate_date, MatchOutcome, MatchRecord, MatchTotals, MatchUpdate, NewMatch},
    repository::MatchRepository,
    StoreError,
};

/// Manual record keeping: everything the shell does besides synchronizing
pub struct MatchService {
    repository: Arc<dyn MatchRepository>,
}

impl MatchService {
    pub fn new(repository: Arc<dyn MatchRepository>) -> Self {
        Self { repository }
    }

    #[instrument(skip(self, new_match), fields(outcome = %new_match.outcome))]
    pub async fn add(&self, new_match: NewMatch) -> Result<MatchRecord, StoreError> {
        validate_date(new_match.date.as_deref())?;
        let new_match = NewMatch::new(new_match.opponent, new_match.outcome, new_match.date);

        let record = self.repository.insert_match(&new_match).await?;
        info!(match_id = record.id, "Match added");
        Ok(record)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i64) -> Result<MatchRecord, StoreError> {
        self.repository
            .get_match(id)
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<MatchRecord>, StoreError> {
        self.repository.list_matches().await
    }

    #[instrument(skip(self, update))]
    pub async fn edit(&self, id: i64, update: MatchUpdate) -> Result<MatchRecord, StoreError> {
        if update.is_empty() {
            return Err(StoreError::Validation(
                "update must change outcome, opponent or date".to_string(),
            ));
        }
        validate_date(update.date.as_deref())?;

        let mut record = self.get(id).await?;
        update.apply_to(&mut record);
        self.repository.update_match(&record).await?;

        info!(match_id = id, outcome = %record.outcome, "Match edited");
        Ok(record)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        self.repository.delete_match(id).await?;
        info!(match_id = id, "Match deleted");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn totals(&self) -> Result<MatchTotals, StoreError> {
        let won = self.repository.count_by_outcome(MatchOutcome::Won).await?;
        let lost = self.repository.count_by_outcome(MatchOutcome::Lost).await?;
        Ok(MatchTotals { won, lost })
    }

    /// Wipes every record; the next insert gets id 1
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), StoreError> {
        warn!("Resetting all match records");
        self.repository.reset_all().await
    }
}
