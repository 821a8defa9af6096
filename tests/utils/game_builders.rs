#![allow(dead_code)] // Test utilities may not all be used in every test

use chess_tally::chesscom::{GameRecord, PlayerSide};

// ============================================================================
// Timestamps
// ============================================================================

/// 2024-03-15T12:00:00Z
pub const MARCH_15_2024: i64 = 1_710_504_000;
pub const ONE_DAY: i64 = 86_400;

// ============================================================================
// Game Setup Utilities
// ============================================================================

pub struct GameBuilder {
    white: PlayerSide,
    black: PlayerSide,
    end_time: Option<i64>,
    time_class: Option<String>,
}

impl GameBuilder {
    pub fn new() -> Self {
        Self {
            white: PlayerSide::default(),
            black: PlayerSide::default(),
            end_time: Some(MARCH_15_2024),
            time_class: Some("blitz".to_string()),
        }
    }

    pub fn white(mut self, username: &str, result: &str) -> Self {
        self.white = side(username, result);
        self
    }

    pub fn black(mut self, username: &str, result: &str) -> Self {
        self.black = side(username, result);
        self
    }

    pub fn ended_at(mut self, end_time: i64) -> Self {
        self.end_time = Some(end_time);
        self
    }

    pub fn without_end_time(mut self) -> Self {
        self.end_time = None;
        self
    }

    pub fn time_class(mut self, time_class: &str) -> Self {
        self.time_class = Some(time_class.to_string());
        self
    }

    pub fn build(self) -> GameRecord {
        GameRecord {
            white: self.white,
            black: self.black,
            end_time: self.end_time,
            time_class: self.time_class,
            url: None,
        }
    }

    /// `player` beats `opponent` playing white
    pub fn win_as_white(player: &str, opponent: &str) -> GameRecord {
        Self::new()
            .white(player, "win")
            .black(opponent, "resigned")
            .build()
    }

    /// `player` loses to `opponent` playing black
    pub fn loss_as_black(player: &str, opponent: &str) -> GameRecord {
        Self::new()
            .white(opponent, "win")
            .black(player, "checkmated")
            .build()
    }

    pub fn stalemate(player: &str, opponent: &str) -> GameRecord {
        Self::new()
            .white(player, "stalemate")
            .black(opponent, "stalemate")
            .build()
    }
}

fn side(username: &str, result: &str) -> PlayerSide {
    PlayerSide {
        username: Some(username.to_string()),
        result: Some(result.to_string()),
        rating: Some(1500),
    }
}

/// Chess.com style monthly locator for a player
pub fn month_url(player: &str, year: u16, month: u8) -> String {
    format!("https://api.chess.com/pub/player/{player}/games/{year}/{month:02}")
}
