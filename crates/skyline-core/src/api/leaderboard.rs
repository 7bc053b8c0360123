use std::fmt;

use serde::{Deserialize, Serialize};

/// One row of the global ranking, ordered descending by score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
}

/// Error from the remote ranking service. Carries the backend's message and
/// optional error code; always non-fatal to gameplay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardError {
    pub message: String,
    pub code: Option<String>,
}

impl LeaderboardError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} (code {})", self.message, code),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for LeaderboardError {}

/// Remote leaderboard service.
///
/// `submit_score` has upsert-if-higher semantics: a lower score than the
/// stored one is accepted and discarded. Implementations must not block the
/// frame loop — the session treats submission as task hand-off with no join
/// point, so a network-backed implementation should queue and return.
pub trait Leaderboard {
    fn submit_score(&self, name: &str, total_score: u32) -> Result<(), LeaderboardError>;

    fn fetch_top(&self, limit: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError>;

    fn user_exists(&self, name: &str) -> Result<bool, LeaderboardError>;
}
