//! Windowless matches in virtual time, with a scripted stand-in for the
//! human operator during TELEOP.

use crate::config::TICK_RATE_MS;
use crate::engine::Engine;
use crate::events::{MatchEvent, ShotOutcome};
use crate::intent::Intent;
use crate::pathfinding::next_step;
use crate::policy::{Action, Policy, ScriptedPolicy};
use crate::runner::{MatchRunner, TimerEvent};
use crate::state::{MatchState, Outcome};
use crate::types::{Direction, Phase, Side};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Produces player intents from a match snapshot. Consulted once per
/// simulation tick while the match is in TELEOP.
pub trait Operator {
    fn next_intent(&mut self, state: &MatchState) -> Option<Intent>;
}

/// Leaves the controls alone.
#[derive(Debug, Default)]
pub struct IdleOperator;

impl Operator for IdleOperator {
    fn next_intent(&mut self, _state: &MatchState) -> Option<Intent> {
        None
    }
}

/// Mashes buttons, reproducibly.
#[derive(Debug)]
pub struct RandomOperator {
    rng: StdRng,
}

impl RandomOperator {
    pub fn new(seed: u64) -> Self {
        RandomOperator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        RandomOperator {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Operator for RandomOperator {
    fn next_intent(&mut self, _state: &MatchState) -> Option<Intent> {
        match self.rng.gen_range(0..7) {
            0..=3 => Some(Intent::Move(Direction::ALL[self.rng.gen_range(0..4)])),
            4 => Some(Intent::Shoot),
            5 => Some(Intent::Reload),
            _ => None,
        }
    }
}

/// Plays the user side with the scripted policy, expressed as key presses.
#[derive(Debug, Default)]
pub struct AutopilotOperator {
    policy: ScriptedPolicy,
}

impl Operator for AutopilotOperator {
    fn next_intent(&mut self, state: &MatchState) -> Option<Intent> {
        let user = &state.user;
        let opponent = state.enemy.position;
        match self
            .policy
            .decide(user, opponent, Side::User.goal(), Side::User.reloader())
        {
            Action::Move(target) => {
                let step = next_step(user.position, target, opponent);
                Direction::between(user.position, step).map(Intent::Move)
            }
            Action::Shoot => Some(Intent::Shoot),
            Action::Reload => Some(Intent::Reload),
            Action::Idle => None,
        }
    }
}

/// Tallies for one finished match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchSummary {
    pub user_score: i32,
    pub enemy_score: i32,
    pub sim_ticks: u32,
    pub intents_sent: u32,
    pub intents_accepted: u32,
    pub shots: u32,
    pub wrong_goal_shots: u32,
    pub collisions: u32,
}

impl MatchSummary {
    pub fn outcome(&self) -> Outcome {
        Outcome::from_scores(self.user_score, self.enemy_score)
    }

    fn record(&mut self, event: &MatchEvent) {
        match event {
            MatchEvent::Shot { outcome, .. } => {
                self.shots += 1;
                if *outcome == ShotOutcome::WrongGoal {
                    self.wrong_goal_shots += 1;
                }
            }
            MatchEvent::Collided { .. } => self.collisions += 1,
            _ => {}
        }
    }
}

/// Plays one full match on `runner`, stepping virtual time one simulation
/// tick at a time.
pub fn run_match(runner: &mut MatchRunner, operator: &mut dyn Operator) -> MatchSummary {
    let mut summary = MatchSummary::default();
    if let Err(e) = runner.start() {
        warn!("Headless match not started: {}", e);
        return summary;
    }

    while runner.state().phase.is_running() {
        if runner.state().phase == Phase::Teleop {
            if let Some(intent) = operator.next_intent(runner.state()) {
                summary.intents_sent += 1;
                if runner.intent(intent) {
                    summary.intents_accepted += 1;
                }
            }
        }

        let fired = runner.advance(TICK_RATE_MS);
        summary.sim_ticks += fired.iter().filter(|e| **e == TimerEvent::SimTick).count() as u32;
        for event in runner.drain_events() {
            summary.record(&event);
        }
    }

    let state = runner.state();
    summary.user_score = state.user.score;
    summary.enemy_score = state.enemy.score;
    summary
}

/// Runs `matches` back-to-back on a single engine, restarting after each.
pub fn run_series(matches: u32, operator: &mut dyn Operator) -> Vec<MatchSummary> {
    let mut runner = MatchRunner::new(Engine::new());
    (1..=matches)
        .map(|n| {
            let summary = run_match(&mut runner, operator);
            info!(
                "Match {}: user {} - enemy {} ({}) shots {} wrong-goal {} collisions {}",
                n,
                summary.user_score,
                summary.enemy_score,
                summary.outcome().label(),
                summary.shots,
                summary.wrong_goal_shots,
                summary.collisions
            );
            summary
        })
        .collect()
}
