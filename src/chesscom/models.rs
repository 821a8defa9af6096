use serde::{Deserialize, Serialize};

/// Response of `/player/{username}/games/archives`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchiveIndex {
    /// Monthly archive URLs, oldest first
    #[serde(default)]
    pub archives: Vec<String>,
}

/// Response of one monthly archive URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyArchive {
    #[serde(default)]
    pub games: Vec<GameRecord>,
}

/// One finished game as reported by Chess.com.
///
/// Every field is optional on the wire; missing data degrades to empty
/// values rather than failing the whole archive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    #[serde(default)]
    pub white: PlayerSide,
    #[serde(default)]
    pub black: PlayerSide,
    /// Epoch seconds, UTC
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub time_class: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSide {
    #[serde(default)]
    pub username: Option<String>,
    /// Per-side result token: "win", "resigned", "stalemate", ...
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub rating: Option<u32>,
}

impl PlayerSide {
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }

    pub fn result(&self) -> &str {
        self.result.as_deref().unwrap_or_default()
    }

    /// A missing username or a blank player id never matches
    pub fn is_player(&self, player_id: &str) -> bool {
        let username = self.username();
        !username.is_empty() && !player_id.is_empty() && username.eq_ignore_ascii_case(player_id)
    }
}
