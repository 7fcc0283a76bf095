//! Scripted decision making for AI-controlled robots.

use crate::geometry::{is_in_range, manhattan_distance};
use crate::robot::RobotState;
use crate::types::Position;

/// What an AI-controlled robot wants to do this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Head toward a cell; the engine turns this into one pathfinding step.
    Move(Position),
    Shoot,
    Reload,
    /// Do nothing this tick. `ScriptedPolicy` never returns it.
    Idle,
}

/// A stateless decision function over a robot's view of the board.
pub trait Policy {
    fn decide(
        &self,
        agent: &RobotState,
        opponent: Position,
        target_goal: Position,
        reloader: Position,
    ) -> Action;
}

/// The fixed opponent policy. Rules are checked in strict priority order:
///
/// 1. Empty magazine: reload if standing on the reloader, else walk to it.
/// 2. Goal within range: shoot.
/// 3. Otherwise walk to the nearest (Manhattan) in-range cell, taking the
///    first one in row-major scan order on ties.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScriptedPolicy;

impl Policy for ScriptedPolicy {
    fn decide(
        &self,
        agent: &RobotState,
        opponent: Position,
        target_goal: Position,
        reloader: Position,
    ) -> Action {
        let action = if agent.ammo == 0 {
            if agent.position == reloader {
                Action::Reload
            } else {
                Action::Move(reloader)
            }
        } else if is_in_range(agent.position, target_goal) {
            Action::Shoot
        } else {
            Action::Move(best_firing_spot(agent.position, target_goal))
        };

        crate::debug_policy!(
            agent.side => "at {} ammo {} (opponent {}): {:?}",
            agent.position,
            agent.ammo,
            opponent,
            action
        );
        action
    }
}

/// Closest cell (by Manhattan distance) from which `goal` is in range.
/// `min_by_key` keeps the first minimum, so ties resolve in scan order.
pub fn best_firing_spot(from: Position, goal: Position) -> Position {
    Position::all_cells()
        .filter(|cell| is_in_range(*cell, goal))
        .min_by_key(|cell| manhattan_distance(from, *cell))
        .unwrap_or(from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ENEMY_GOAL, ENEMY_RELOADER, USER_GOAL, USER_RELOADER};
    use crate::types::Side;

    fn robot_at(side: Side, x: i32, y: i32, ammo: u32) -> RobotState {
        RobotState {
            position: Position::new(x, y),
            ammo,
            ..RobotState::new(side)
        }
    }

    #[test]
    fn test_empty_robot_heads_to_reloader() {
        let enemy = robot_at(Side::Enemy, 1, 1, 0);
        let action = ScriptedPolicy.decide(&enemy, Position::new(2, 5), ENEMY_GOAL, ENEMY_RELOADER);
        assert_eq!(action, Action::Move(ENEMY_RELOADER));
    }

    #[test]
    fn test_empty_robot_on_reloader_reloads() {
        let enemy = robot_at(Side::Enemy, 6, 6, 0);
        let action = ScriptedPolicy.decide(&enemy, Position::new(2, 5), ENEMY_GOAL, ENEMY_RELOADER);
        assert_eq!(action, Action::Reload);
    }

    #[test]
    fn test_reload_rule_beats_shoot_rule() {
        // In range of its goal but empty: ammo comes first
        let enemy = robot_at(Side::Enemy, 1, 1, 0);
        let action = ScriptedPolicy.decide(&enemy, Position::new(5, 5), ENEMY_GOAL, ENEMY_RELOADER);
        assert_ne!(action, Action::Shoot);
    }

    #[test]
    fn test_in_range_shoots() {
        let user = robot_at(Side::User, 3, 3, 2);
        let action = ScriptedPolicy.decide(&user, Position::new(4, 5), USER_GOAL, USER_RELOADER);
        assert_eq!(action, Action::Shoot);
    }

    #[test]
    fn test_out_of_range_seeks_firing_spot() {
        let user = RobotState::new(Side::User);
        let action = ScriptedPolicy.decide(&user, Position::new(4, 5), USER_GOAL, USER_RELOADER);
        assert_eq!(action, Action::Move(Position::new(3, 3)));

        let enemy = RobotState::new(Side::Enemy);
        let action = ScriptedPolicy.decide(&enemy, Position::new(2, 5), ENEMY_GOAL, ENEMY_RELOADER);
        assert_eq!(action, Action::Move(Position::new(3, 3)));
    }

    #[test]
    fn test_firing_spot_clamps_into_range_box() {
        // In-range cells form a box around the goal; the nearest one is the
        // agent's position clamped into that box
        assert_eq!(best_firing_spot(Position::new(6, 5), ENEMY_GOAL), Position::new(3, 3));
        assert_eq!(best_firing_spot(Position::new(5, 1), ENEMY_GOAL), Position::new(3, 1));
        assert_eq!(best_firing_spot(Position::new(5, 4), USER_GOAL), Position::new(5, 3));
        assert_eq!(best_firing_spot(Position::new(0, 4), USER_GOAL), Position::new(3, 3));
        assert_eq!(best_firing_spot(Position::new(6, 6), USER_GOAL), Position::new(6, 3));
    }

    #[test]
    fn test_firing_spot_from_far_corner() {
        assert_eq!(best_firing_spot(Position::new(0, 0), USER_GOAL), Position::new(3, 0));
        assert_eq!(best_firing_spot(Position::new(0, 1), USER_GOAL), Position::new(3, 1));
    }

    #[test]
    fn test_policy_as_trait_object() {
        let policy: Box<dyn Policy> = Box::new(ScriptedPolicy);
        let user = robot_at(Side::User, 6, 1, 1);
        assert_eq!(policy.decide(&user, Position::new(0, 0), USER_GOAL, USER_RELOADER), Action::Shoot);
    }
}
