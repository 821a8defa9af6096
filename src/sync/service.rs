use std::sync::Arc;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info, instrument, warn};

use super::{
    classifier::{classify, game_date, opponent_of},
    SyncError, SyncRequest, SyncSummary,
};
use crate::{
    chesscom::{ArchiveSource, MonthlyArchive},
    matches::{MatchBatch, MatchOutcome, MatchRepository, NewMatch, StoreError},
};

/// Pulls a player's recent Chess.com games into the match store.
///
/// Passes are serialised: a second caller waits for the running pass to
/// finish, so concurrent passes cannot both insert the same game.
pub struct ArchiveSynchronizer {
    source: Arc<dyn ArchiveSource>,
    repository: Arc<dyn MatchRepository>,
    pass_lock: AsyncMutex<()>,
}

impl ArchiveSynchronizer {
    pub fn new(source: Arc<dyn ArchiveSource>, repository: Arc<dyn MatchRepository>) -> Self {
        Self {
            source,
            repository,
            pass_lock: AsyncMutex::new(()),
        }
    }

    pub async fn synchronize(
        &self,
        player_id: &str,
        months_window: usize,
    ) -> Result<SyncSummary, SyncError> {
        self.synchronize_with(&SyncRequest::new(player_id, months_window))
            .await
    }

    #[instrument(
        skip(self, request),
        fields(player_id = %request.player_id, months = request.months)
    )]
    pub async fn synchronize_with(&self, request: &SyncRequest) -> Result<SyncSummary, SyncError> {
        let _guard = self.pass_lock.lock().await;
        info!("Starting sync pass");

        let locators = self.source.archive_index(&request.player_id).await?;
        if locators.is_empty() {
            info!("Player has no game archives");
            return Ok(SyncSummary::default());
        }

        let window = select_window(&locators, request.months);
        debug!(
            available = locators.len(),
            selected = window.len(),
            "Selected archive window"
        );

        // Fetch everything before touching the store so a remote failure
        // leaves nothing behind.
        let mut archives = Vec::with_capacity(window.len());
        for locator in window {
            let archive = self.source.monthly_archive(locator).await?;
            debug!(locator = %locator, games = archive.games.len(), "Fetched monthly archive");
            archives.push(archive);
        }

        let summary = self.merge(request, &archives).await?;

        info!(
            scanned = summary.scanned,
            won = summary.won,
            lost = summary.lost,
            inserted = summary.inserted,
            "Sync pass completed"
        );
        Ok(summary)
    }

    /// Classifies and dedups every game inside one batch, committing once
    async fn merge(
        &self,
        request: &SyncRequest,
        archives: &[MonthlyArchive],
    ) -> Result<SyncSummary, SyncError> {
        let mut batch = self.repository.begin_batch().await?;
        let mut summary = SyncSummary::default();

        match scan_into(batch.as_mut(), request, archives, &mut summary).await {
            Ok(()) => {
                batch.commit().await?;
                Ok(summary)
            }
            Err(err) => {
                warn!(error = %err, "Sync pass failed, rolling back");
                if let Err(rollback_err) = batch.rollback().await {
                    warn!(error = %rollback_err, "Rollback of failed sync pass also failed");
                }
                Err(err.into())
            }
        }
    }
}

/// The last `months` locators of a chronological list
pub fn select_window(locators: &[String], months: usize) -> &[String] {
    &locators[locators.len().saturating_sub(months)..]
}

async fn scan_into(
    batch: &mut dyn MatchBatch,
    request: &SyncRequest,
    archives: &[MonthlyArchive],
    summary: &mut SyncSummary,
) -> Result<(), StoreError> {
    let player_id = request.player_id.as_str();

    for game in archives.iter().flat_map(|archive| archive.games.iter()) {
        summary.scanned += 1;

        if !request.accepts_time_class(game.time_class.as_deref()) {
            continue;
        }

        let Some(outcome) = classify(game, player_id).as_match_outcome() else {
            continue;
        };
        match outcome {
            MatchOutcome::Won => summary.won += 1,
            MatchOutcome::Lost => summary.lost += 1,
        }

        let candidate = NewMatch::new(
            opponent_of(game, player_id).map(str::to_string),
            outcome,
            game_date(game.end_time),
        );

        if batch.exists_match(&candidate.dedup_key()).await? {
            debug!(
                opponent = ?candidate.opponent,
                date = ?candidate.date,
                outcome = %outcome,
                "Skipping already recorded match"
            );
            continue;
        }

        batch.insert_match(&candidate).await?;
        summary.inserted += 1;
    }

    Ok(())
}
