// Engine error types: rejected robot actions and lifecycle misuse

use crate::types::{Phase, Position, Side};
use thiserror::Error;

/// Reasons a robot action leaves the match untouched. These are silent
/// no-ops for the player; the engine only reports them to its caller.
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum ActionError {
    #[error("target {0} is off the board")]
    OutOfBounds(Position),
    #[error("{0} has no ammo")]
    NoAmmo(Side),
    #[error("{0} is not on its reloader")]
    NotOnReloader(Side),
    #[error("match is not running ({0})")]
    NotRunning(Phase),
    #[error("intents are not accepted during {0}")]
    WrongPhase(Phase),
}

/// Lifecycle errors
#[derive(Error, Debug, PartialEq, Eq, Copy, Clone)]
pub enum EngineError {
    #[error("cannot start a match while {0} is running")]
    AlreadyRunning(Phase),
}
