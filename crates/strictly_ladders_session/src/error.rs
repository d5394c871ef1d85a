//! Session errors.

use derive_more::Display;
use strictly_ladders::PlayerId;

/// Failure while driving a session.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SessionError {
    /// The session task is no longer receiving intents.
    #[display("Session has stopped")]
    Closed,
    /// The session task panicked or was cancelled.
    #[display("Session task failed: {}", _0)]
    Join(String),
    /// Unattended play gave up before anyone won.
    #[display("No winner after {} turns", _0)]
    TurnLimit(u32),
    /// The session refused an intent the driver relied on.
    #[display("Session refused to continue: {}", _0)]
    Stalled(String),
    /// A game ended without the expected winner record.
    #[display("Game over announced for player {} but state disagrees", _0)]
    WinnerMismatch(PlayerId),
}

impl std::error::Error for SessionError {}
