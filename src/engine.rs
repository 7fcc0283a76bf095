//! The match engine: sole owner of `MatchState` and every rule that mutates it.

use crate::config::{AUTO_PHASE_DURATION, TOTAL_GAME_TIME};
use crate::error::{ActionError, EngineError};
use crate::events::{MatchEvent, MoveOutcome, ShotOutcome};
use crate::geometry::is_in_range;
use crate::intent::Intent;
use crate::pathfinding::next_step;
use crate::policy::{Action, Policy, ScriptedPolicy};
use crate::state::MatchState;
use crate::types::{Phase, Position, Side};
use log::info;
use std::collections::VecDeque;

/// Every input the engine understands. A recorded `Vec<Command>` replays a
/// match exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    ClockSecond,
    SimTick,
    Intent(Intent),
}

pub struct Engine {
    state: MatchState,
    policy: Box<dyn Policy>,
    events: VecDeque<MatchEvent>,
}

impl Engine {
    pub fn new() -> Self {
        Self::with_policy(Box::new(ScriptedPolicy))
    }

    /// Builds an engine whose AI-controlled robots follow `policy`.
    pub fn with_policy(policy: Box<dyn Policy>) -> Self {
        Engine {
            state: MatchState::new(),
            policy,
            events: VecDeque::new(),
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn snapshot(&self) -> MatchState {
        self.state.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Hands queued events to the caller (sound cues, stats).
    pub fn drain_events(&mut self) -> impl Iterator<Item = MatchEvent> + '_ {
        self.events.drain(..)
    }

    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Start => {
                if let Err(e) = self.start() {
                    crate::debug_engine!("start ignored: {}", e);
                }
            }
            Command::ClockSecond => self.clock_second(),
            Command::SimTick => self.sim_tick(),
            Command::Intent(intent) => {
                self.apply_intent(intent);
            }
        }
    }

    /// Resets both robots and the clock and enters AUTO. Only valid from
    /// WAITING or ENDED.
    pub fn start(&mut self) -> Result<(), EngineError> {
        let previous = self.state.phase;
        if previous.is_running() {
            return Err(EngineError::AlreadyRunning(previous));
        }

        self.state = MatchState::new();
        self.state.phase = Phase::Auto;
        self.events.clear();
        info!("Match started ({}s, {}s auto)", TOTAL_GAME_TIME, AUTO_PHASE_DURATION);

        self.emit(MatchEvent::Started);
        self.emit(MatchEvent::PhaseChanged {
            from: previous,
            to: Phase::Auto,
        });
        Ok(())
    }

    /// One second of match clock.
    pub fn clock_second(&mut self) {
        if !self.state.phase.is_running() {
            return;
        }

        if self.state.time_remaining <= 1 {
            self.state.time_remaining = 0;
            self.state.phase = Phase::Ended;
            info!(
                "Match over: user {} - enemy {}",
                self.state.user.score, self.state.enemy.score
            );
            self.emit(MatchEvent::Ended {
                user_score: self.state.user.score,
                enemy_score: self.state.enemy.score,
            });
            return;
        }

        self.state.time_remaining -= 1;
        crate::debug_clock!("T-{}s ({})", self.state.time_remaining, self.state.phase);

        if self.state.phase == Phase::Auto && self.state.elapsed() == AUTO_PHASE_DURATION {
            self.state.phase = Phase::Teleop;
            info!("Autonomous period over, teleop enabled");
            self.emit(MatchEvent::PhaseChanged {
                from: Phase::Auto,
                to: Phase::Teleop,
            });
        }
    }

    /// One simulation tick: the enemy acts first, then (during AUTO only)
    /// the user's robot. The user decides against the enemy's new position.
    pub fn sim_tick(&mut self) {
        if !self.state.phase.is_running() {
            return;
        }
        for side in [Side::Enemy, Side::User] {
            if self.is_ai_controlled(side) {
                self.run_ai(side);
            }
        }
    }

    pub fn is_ai_controlled(&self, side: Side) -> bool {
        match side {
            Side::Enemy => self.state.phase.is_running(),
            Side::User => self.state.phase == Phase::Auto,
        }
    }

    fn run_ai(&mut self, side: Side) {
        let agent = *self.state.robot(side);
        let opponent = self.state.robot(side.other()).position;
        let action = self
            .policy
            .decide(&agent, opponent, side.goal(), side.reloader());

        let result = match action {
            Action::Move(target) => {
                let step = next_step(agent.position, target, opponent);
                self.move_robot(side, step).map(|_| ())
            }
            Action::Shoot => self.shoot(side).map(|_| ()),
            Action::Reload => self.reload(side),
            Action::Idle => Ok(()),
        };

        if let Err(e) = result {
            crate::debug_engine!(side => "{:?} had no effect: {}", action, e);
        }
    }

    /// Applies a player intent. Only honored during TELEOP; returns whether
    /// the match state changed.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        let result = if self.state.phase != Phase::Teleop {
            Err(ActionError::WrongPhase(self.state.phase))
        } else {
            match intent {
                Intent::Move(direction) => {
                    let target = self.state.user.position.offset(direction);
                    self.move_robot(Side::User, target).map(|_| ())
                }
                Intent::Shoot => self.shoot(Side::User).map(|_| ()),
                Intent::Reload => self.reload(Side::User),
            }
        };

        match result {
            Ok(()) => {
                crate::debug_input!(Side::User => "{:?} applied", intent);
                true
            }
            Err(e) => {
                crate::debug_input!(Side::User => "{:?} ignored: {}", intent, e);
                false
            }
        }
    }

    fn ensure_running(&self) -> Result<(), ActionError> {
        if self.state.phase.is_running() {
            Ok(())
        } else {
            Err(ActionError::NotRunning(self.state.phase))
        }
    }

    /// Moves `side` to `target`. Adjacency is the caller's business; the
    /// engine only checks the board edge and the other robot.
    pub fn move_robot(&mut self, side: Side, target: Position) -> Result<MoveOutcome, ActionError> {
        self.ensure_running()?;
        if !target.in_bounds() {
            return Err(ActionError::OutOfBounds(target));
        }

        if target == self.state.robot(side.other()).position {
            self.state.robot_mut(side).score -= 1;
            crate::debug_engine!(side => "collision at {}, -1", target);
            self.emit(MatchEvent::Collided { side, at: target });
            return Ok(MoveOutcome::Collided);
        }

        let from = self.state.robot(side).position;
        self.state.robot_mut(side).position = target;
        if from != target {
            self.emit(MatchEvent::Moved {
                side,
                from,
                to: target,
            });
        }
        Ok(MoveOutcome::Moved)
    }

    /// Fires one round. The round is spent whatever it hits; own goal is
    /// checked before the opponent's.
    pub fn shoot(&mut self, side: Side) -> Result<ShotOutcome, ActionError> {
        self.ensure_running()?;
        let shooter = self.state.robot_mut(side);
        if !shooter.spend_round() {
            return Err(ActionError::NoAmmo(side));
        }
        let from = shooter.position;

        let outcome = if is_in_range(from, side.goal()) {
            self.state.robot_mut(side).score += 1;
            ShotOutcome::OwnGoal
        } else if is_in_range(from, side.other().goal()) {
            self.state.robot_mut(side.other()).score += 1;
            ShotOutcome::WrongGoal
        } else {
            ShotOutcome::Miss
        };

        crate::debug_engine!(side => "shot from {}: {:?}", from, outcome);
        self.emit(MatchEvent::Shot {
            side,
            from,
            outcome,
        });
        Ok(outcome)
    }

    /// Refills ammo, but only on the side's own reloader.
    pub fn reload(&mut self, side: Side) -> Result<(), ActionError> {
        self.ensure_running()?;
        let robot = self.state.robot_mut(side);
        if !robot.is_on_reloader() {
            return Err(ActionError::NotOnReloader(side));
        }
        robot.refill();
        self.emit(MatchEvent::Reloaded { side });
        Ok(())
    }

    fn emit(&mut self, event: MatchEvent) {
        if let Some(message) = event.message() {
            self.state.log.push(message);
        }
        self.events.push_back(event);
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `commands` through a fresh engine and returns the final state.
pub fn replay<I>(commands: I) -> MatchState
where
    I: IntoIterator<Item = Command>,
{
    let mut engine = Engine::new();
    for command in commands {
        engine.handle(command);
    }
    engine.snapshot()
}
