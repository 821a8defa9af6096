//! Chess.com public API client
//!
//! Two read-only endpoints are used: the per-player archive index and the
//! per-month game list. Chess.com asks API users to identify themselves with
//! a `User-Agent` carrying contact details and answers 403 otherwise.

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use super::{
    models::{ArchiveIndex, MonthlyArchive},
    RemoteError,
};

pub const CHESSCOM_BASE_URL: &str = "https://api.chess.com/pub";
pub const DEFAULT_USER_AGENT: &str = "chess-tally/0.1.0 (contact: chess-tally@example.com)";
pub const INDEX_TIMEOUT: Duration = Duration::from_secs(20);
pub const ARCHIVE_TIMEOUT: Duration = Duration::from_secs(30);

/// Where monthly game archives come from
#[async_trait]
pub trait ArchiveSource: Send + Sync {
    /// Monthly archive locators for a player, oldest first
    async fn archive_index(&self, player_id: &str) -> Result<Vec<String>, RemoteError>;

    /// Games of one monthly archive
    async fn monthly_archive(&self, locator: &str) -> Result<MonthlyArchive, RemoteError>;
}

#[derive(Debug, Clone)]
pub struct ChessComConfig {
    pub base_url: String,
    pub user_agent: String,
    pub index_timeout: Duration,
    pub archive_timeout: Duration,
}

impl Default for ChessComConfig {
    fn default() -> Self {
        Self {
            base_url: CHESSCOM_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            index_timeout: INDEX_TIMEOUT,
            archive_timeout: ARCHIVE_TIMEOUT,
        }
    }
}

pub struct ChessComClient {
    http_client: reqwest::Client,
    config: ChessComConfig,
}

impl ChessComClient {
    pub fn new(config: ChessComConfig) -> Result<Self, RemoteError> {
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RemoteError::Unavailable(e.to_string()))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// `{base}/player/{player_id}/games/archives`, with the player id
    /// percent-encoded as a single path segment
    pub fn archive_index_url(&self, player_id: &str) -> Result<Url, RemoteError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| RemoteError::Unavailable(format!("invalid base url: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| RemoteError::Unavailable("base url cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(["player", player_id, "games", "archives"]);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        timeout: Duration,
        missing: impl FnOnce() -> RemoteError,
    ) -> Result<T, RemoteError> {
        debug!(url = %url, "Requesting Chess.com API");

        let response = self
            .http_client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "Chess.com request failed");
                RemoteError::Unavailable(e.to_string())
            })?;

        let status = response.status();
        if let Some(err) = classify_status(status, url.as_str(), missing) {
            warn!(url = %url, status = status.as_u16(), "Chess.com returned an error status");
            return Err(err);
        }

        response.json::<T>().await.map_err(|e| {
            warn!(url = %url, error = %e, "Chess.com response could not be decoded");
            RemoteError::Unavailable(format!("invalid response body: {e}"))
        })
    }
}

/// 404 is "unknown player", 403 and 429 are policy rejections, anything else
/// that is not a success counts as the service being unavailable.
fn classify_status(
    status: StatusCode,
    url: &str,
    missing: impl FnOnce() -> RemoteError,
) -> Option<RemoteError> {
    if status.is_success() {
        return None;
    }

    Some(match status {
        StatusCode::NOT_FOUND => missing(),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => RemoteError::Rejected {
            status: status.as_u16(),
            url: url.to_string(),
        },
        other => RemoteError::Unavailable(format!("unexpected status {} from {url}", other)),
    })
}

#[async_trait]
impl ArchiveSource for ChessComClient {
    #[instrument(skip(self))]
    async fn archive_index(&self, player_id: &str) -> Result<Vec<String>, RemoteError> {
        let url = self.archive_index_url(player_id)?;
        let index: ArchiveIndex = self
            .get_json(url, self.config.index_timeout, || {
                RemoteError::NotFound(player_id.to_string())
            })
            .await?;

        debug!(archive_count = index.archives.len(), "Archive index fetched");
        Ok(index.archives)
    }

    #[instrument(skip(self))]
    async fn monthly_archive(&self, locator: &str) -> Result<MonthlyArchive, RemoteError> {
        let url = Url::parse(locator)
            .map_err(|e| RemoteError::Unavailable(format!("invalid archive locator: {e}")))?;
        let archive: MonthlyArchive = self
            .get_json(url, self.config.archive_timeout, || {
                RemoteError::NotFound(locator.to_string())
            })
            .await?;

        debug!(game_count = archive.games.len(), "Monthly archive fetched");
        Ok(archive)
    }
}
