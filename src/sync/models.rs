use serde::{Deserialize, Serialize};

/// Counters reported by one sync pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncSummary {
    pub scanned: u32,
    pub won: u32,
    pub lost: u32,
    /// Always 0: draws are classified as ignored
    pub draws: u32,
    pub inserted: u32,
}

impl SyncSummary {
    /// Why nothing was inserted, when nothing was
    pub fn explain(&self) -> Option<&'static str> {
        if self.inserted > 0 {
            None
        } else if self.scanned == 0 {
            Some("No games were found in the selected months.")
        } else if self.won + self.lost == 0 {
            Some("No wins or losses found; draws and other results are ignored.")
        } else {
            Some("All detected wins and losses were already recorded.")
        }
    }
}

/// Parameters of one sync pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncRequest {
    pub player_id: String,
    /// How many of the most recent monthly archives to scan
    pub months: usize,
    /// Only count games of these time classes ("blitz", "rapid", ...)
    #[serde(default)]
    pub time_classes: Option<Vec<String>>,
}

impl SyncRequest {
    pub fn new(player_id: impl Into<String>, months: usize) -> Self {
        Self {
            player_id: player_id.into(),
            months,
            time_classes: None,
        }
    }

    pub fn with_time_classes(mut self, time_classes: Vec<String>) -> Self {
        self.time_classes = Some(time_classes);
        self
    }

    /// Games with no time class never pass a filter
    pub fn accepts_time_class(&self, time_class: Option<&str>) -> bool {
        match &self.time_classes {
            None => true,
            Some(allowed) => time_class
                .map(|class| allowed.iter().any(|a| a.eq_ignore_ascii_case(class)))
                .unwrap_or(false),
        }
    }
}

/// Body returned by POST /sync
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub summary: SyncSummary,
    pub message: String,
}

impl From<SyncSummary> for SyncReport {
    fn from(summary: SyncSummary) -> Self {
        let message = match summary.explain() {
            Some(reason) => format!("No new matches inserted. {reason}"),
            None => format!("Inserted {} new matches.", summary.inserted),
        };
        Self { summary, message }
    }
}
