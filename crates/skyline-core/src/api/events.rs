//! Events the simulation emits for the host to present.
//! The session pushes into per-frame queues; the host drains them after
//! each tick and never calls back into the simulation.

/// A sound playback request. Fire-and-forget: the host may drop it, playback
/// failure never reaches the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEvent {
    /// Ensure the background music loop is running.
    MusicStart,
    /// Stop the background music (game over).
    MusicStop,
    /// A life was lost.
    LifeLost,
    /// All lives exhausted.
    Wasted,
}

/// Per-citizen line of the level summary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitizenSummary {
    pub name: &'static str,
    pub priority: u8,
    pub points: u32,
    pub correct_order: bool,
}

/// Lifecycle notifications for the presentation sink.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A level finished loading and the simulation went active.
    LevelLoaded { level: u32 },
    /// HUD refresh: lives remaining and the next citizen to rescue
    /// (None once all are rescued).
    Hud {
        lives: u8,
        next_citizen: Option<&'static str>,
    },
    /// The player died. Lives shown are what remains after the death.
    Death { lives: u8 },
    /// Level cleared; authoritative score and stars plus the summary table.
    LevelSummary {
        level: u32,
        score: u32,
        stars: u8,
        citizens: Vec<CitizenSummary>,
    },
    /// Lives exhausted and the presentation delay has elapsed.
    GameOver,
    /// Advanced past the last defined level.
    FinalVictory { total_score: u32 },
    /// Non-blocking notice (e.g. a failed leaderboard submission).
    Notice { message: String },
}
