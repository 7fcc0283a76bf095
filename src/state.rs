// Match state: phase, clock, both robots and the message feed

use crate::config::{MAX_AMMO, TOTAL_GAME_TIME};
use crate::events::EventLog;
use crate::robot::RobotState;
use crate::types::{Phase, Position, Side};

/// Final result from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Victory,
    Defeat,
    Draw,
}

impl Outcome {
    pub fn from_scores(user: i32, enemy: i32) -> Self {
        match user.cmp(&enemy) {
            std::cmp::Ordering::Greater => Outcome::Victory,
            std::cmp::Ordering::Less => Outcome::Defeat,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Victory => "VICTORY!",
            Outcome::Defeat => "DEFEAT",
            Outcome::Draw => "DRAW",
        }
    }
}

/// Snapshot of a match. The engine owns the live copy; everyone else reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    pub phase: Phase,
    pub time_remaining: u32, // Seconds
    pub user: RobotState,
    pub enemy: RobotState,
    pub log: EventLog,
}

impl MatchState {
    pub fn new() -> Self {
        MatchState {
            phase: Phase::Waiting,
            time_remaining: TOTAL_GAME_TIME,
            user: RobotState::new(Side::User),
            enemy: RobotState::new(Side::Enemy),
            log: EventLog::new(),
        }
    }

    pub fn robot(&self, side: Side) -> &RobotState {
        match side {
            Side::User => &self.user,
            Side::Enemy => &self.enemy,
        }
    }

    pub(crate) fn robot_mut(&mut self, side: Side) -> &mut RobotState {
        match side {
            Side::User => &mut self.user,
            Side::Enemy => &mut self.enemy,
        }
    }

    pub fn elapsed(&self) -> u32 {
        TOTAL_GAME_TIME.saturating_sub(self.time_remaining)
    }

    /// Which robot stands on `cell`, if any.
    pub fn occupant(&self, cell: Position) -> Option<Side> {
        [Side::User, Side::Enemy]
            .into_iter()
            .find(|side| self.robot(*side).position == cell)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        if self.phase != Phase::Ended {
            return None;
        }
        Some(Outcome::from_scores(self.user.score, self.enemy.score))
    }

    // Control gating for the player's console
    pub fn can_shoot(&self) -> bool {
        self.phase == Phase::Teleop && self.user.has_ammo()
    }

    pub fn can_reload(&self) -> bool {
        self.phase == Phase::Teleop && self.user.is_on_reloader() && self.user.ammo < MAX_AMMO
    }

    /// Clock as `m:ss`.
    pub fn format_clock(&self) -> String {
        format!("{}:{:02}", self.time_remaining / 60, self.time_remaining % 60)
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}
