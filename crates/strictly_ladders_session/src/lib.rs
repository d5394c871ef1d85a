//! Scheduled sessions for strictly_ladders.
//!
//! Wraps the synchronous [`strictly_ladders::Game`] in a tokio task that
//! paces turns for a presentation layer, plus configuration and headless
//! simulation used by the `ladders` binary.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod autoplay;
mod config;
mod error;
mod event;
mod intent;
mod session;
mod simulate;

pub use autoplay::play_to_completion;
pub use config::{ConfigError, SessionConfig, TimingConfig};
pub use error::SessionError;
pub use event::GameEvent;
pub use intent::Intent;
pub use session::{Session, SessionHandle};
pub use simulate::{SimulationReport, simulate};
