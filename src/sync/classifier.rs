use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::chesscom::GameRecord;
use crate::matches::MatchOutcome;

/// Result tokens meaning the side won
pub const WIN_TOKENS: &[&str] = &["win"];

/// Result tokens meaning the side lost
pub const LOSS_TOKENS: &[&str] = &[
    "checkmated",
    "resigned",
    "timeout",
    "lose",
    "abandoned",
    "mate",
    "flagged",
];

/// Draw tokens. Listed for reference only: they classify as `Ignored`.
pub const DRAW_TOKENS: &[&str] = &[
    "agreed",
    "repetition",
    "stalemate",
    "insufficient",
    "timevsinsufficient",
    "50move",
];

/// Verdict for one game from one player's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
    /// Draws, unknown tokens, and games the player did not take part in
    Ignored,
}

impl Outcome {
    pub fn as_match_outcome(self) -> Option<MatchOutcome> {
        match self {
            Outcome::Won => Some(MatchOutcome::Won),
            Outcome::Lost => Some(MatchOutcome::Lost),
            Outcome::Ignored => None,
        }
    }
}

/// Classifies `game` for `player_id`. Never fails; anything unexpected is
/// `Ignored`.
pub fn classify(game: &GameRecord, player_id: &str) -> Outcome {
    let side = if game.white.is_player(player_id) {
        &game.white
    } else if game.black.is_player(player_id) {
        &game.black
    } else {
        return Outcome::Ignored;
    };

    let token = side.result().to_ascii_lowercase();
    if WIN_TOKENS.contains(&token.as_str()) {
        Outcome::Won
    } else if LOSS_TOKENS.contains(&token.as_str()) {
        Outcome::Lost
    } else {
        Outcome::Ignored
    }
}

/// The other side's username, as Chess.com spells it
pub fn opponent_of<'a>(game: &'a GameRecord, player_id: &str) -> Option<&'a str> {
    let opponent = if game.white.is_player(player_id) {
        &game.black
    } else {
        &game.white
    };
    opponent.username.as_deref()
}

/// UTC calendar day of an epoch-seconds timestamp, as YYYY-MM-DD.
/// A zero timestamp counts as no date.
pub fn game_date(end_time: Option<i64>) -> Option<String> {
    let end_time = end_time.filter(|&ts| ts != 0)?;
    DateTime::from_timestamp(end_time, 0).map(|dt| dt.format("%Y-%m-%d").to_string())
}
