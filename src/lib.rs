//! Robot duel on a 7x7 grid: a scripted opponent, a 150 second match clock
//! and an engine that owns all match state.
//!
//! The window front end lives in the binary; everything here runs without a
//! display and is driven either by `runner::MatchRunner` or by replaying
//! `engine::Command`s.

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod geometry;
pub mod headless;
pub mod intent;
pub mod logging;
pub mod pathfinding;
pub mod policy;
pub mod robot;
pub mod runner;
pub mod state;
pub mod types;

pub use engine::{Command, Engine};
pub use error::{ActionError, EngineError};
pub use events::MatchEvent;
pub use intent::Intent;
pub use runner::MatchRunner;
pub use state::{MatchState, Outcome};
pub use types::{Direction, Phase, Position, Side};
