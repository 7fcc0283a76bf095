//! Single-step pathfinding on the 4-connected board.

use crate::types::{Direction, Position};
use std::collections::{HashSet, VecDeque};

/// Returns the first step along a shortest orthogonal path from `start` to
/// `target`, treating `obstacle` as impassable.
///
/// Neighbors are expanded in `Direction::ALL` order (up, down, left, right),
/// which decides between equally short paths. When `target` cannot be
/// reached the robot stays put and `start` is returned.
///
/// The search is rebuilt on every call since the obstacle (the other robot)
/// moves between ticks.
pub fn next_step(start: Position, target: Position, obstacle: Position) -> Position {
    if start == target {
        return start;
    }

    // Each queued cell carries the first step taken to reach it
    let mut queue: VecDeque<(Position, Option<Position>)> = VecDeque::new();
    let mut visited = HashSet::new();
    queue.push_back((start, None));
    visited.insert(start);

    while let Some((current, first_step)) = queue.pop_front() {
        if current == target {
            let step = first_step.unwrap_or(start);
            crate::debug_path!("{} -> {} via {} (avoiding {})", start, target, step, obstacle);
            return step;
        }

        for direction in Direction::ALL {
            let next = current.offset(direction);
            if !next.in_bounds() || next == obstacle {
                continue;
            }
            if visited.insert(next) {
                queue.push_back((next, first_step.or(Some(next))));
            }
        }
    }

    crate::debug_path!("{} -> {} unreachable (avoiding {}), holding", start, target, obstacle);
    start
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::manhattan_distance;

    // Plain BFS distance used to check that a step lies on a shortest path
    fn path_length(start: Position, target: Position, obstacle: Position) -> Option<u32> {
        let mut queue = VecDeque::from([(start, 0)]);
        let mut visited = HashSet::from([start]);
        while let Some((current, dist)) = queue.pop_front() {
            if current == target {
                return Some(dist);
            }
            for direction in Direction::ALL {
                let next = current.offset(direction);
                if next.in_bounds() && next != obstacle && visited.insert(next) {
                    queue.push_back((next, dist + 1));
                }
            }
        }
        None
    }

    #[test]
    fn test_start_equals_target() {
        let p = Position::new(3, 3);
        assert_eq!(next_step(p, p, Position::new(3, 4)), p);
    }

    #[test]
    fn test_detour_around_obstacle() {
        let start = Position::new(0, 0);
        let target = Position::new(6, 0);
        let obstacle = Position::new(3, 0);

        let step = next_step(start, target, obstacle);

        assert_eq!(manhattan_distance(start, step), 1);
        assert_ne!(step, obstacle);
        let total = path_length(start, target, obstacle).unwrap();
        let remaining = path_length(step, target, obstacle).unwrap();
        assert_eq!(remaining + 1, total);
        assert!(step == Position::new(1, 0) || step == Position::new(0, 1));
    }

    #[test]
    fn test_tie_break_prefers_down_over_right() {
        // Both (2,3) and (3,2) start a shortest path; down is expanded first
        let step = next_step(Position::new(2, 2), Position::new(3, 3), Position::new(6, 6));
        assert_eq!(step, Position::new(2, 3));
    }

    #[test]
    fn test_tie_break_prefers_up_over_left() {
        let step = next_step(Position::new(4, 4), Position::new(3, 3), Position::new(0, 0));
        assert_eq!(step, Position::new(4, 3));
    }

    #[test]
    fn test_adjacent_target() {
        let step = next_step(Position::new(5, 6), Position::new(6, 6), Position::new(0, 0));
        assert_eq!(step, Position::new(6, 6));
    }

    #[test]
    fn test_obstacle_on_target_holds_position() {
        let start = Position::new(4, 6);
        let reloader = Position::new(6, 6);
        assert_eq!(next_step(start, reloader, reloader), start);
    }

    #[test]
    fn test_out_of_bounds_target_holds_position() {
        let start = Position::new(0, 0);
        assert_eq!(next_step(start, Position::new(-1, 0), Position::new(5, 5)), start);
    }

    #[test]
    fn test_never_steps_onto_obstacle() {
        let obstacle = Position::new(3, 3);
        for start in Position::all_cells().filter(|p| *p != obstacle) {
            for target in Position::all_cells().filter(|p| *p != obstacle) {
                let step = next_step(start, target, obstacle);
                assert_ne!(step, obstacle, "{start} -> {target}");
                assert!(step.in_bounds());
            }
        }
    }
}
