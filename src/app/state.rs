use bevy::prelude::*;

/// Session lifecycle. Linear start-to-leaderboard:
/// Setup -> PlayerPrep -> Active -> RoundEnd -> (PlayerPrep | Leaderboard).
/// Setup is skipped entirely for single-player configurations and is never
/// re-entered mid-session.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// Collect the player count.
    #[default]
    Setup,
    /// Current player's name entry; waits for the explicit start signal.
    PlayerPrep,
    /// A running round: shapes live, clock ticking.
    Active,
    /// Per-round summary for the player that just finished.
    RoundEnd,
    /// Final ranking with the three-slot podium.
    Leaderboard,
}
