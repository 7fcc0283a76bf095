//! Distance helpers for range checks and firing-spot ranking.

use crate::config::SHOOT_RANGE;
use crate::types::Position;

/// Chebyshev distance: diagonal steps cost the same as orthogonal ones.
pub fn chebyshev_distance(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

/// Manhattan distance, used as a grid-step cost proxy.
pub fn manhattan_distance(a: Position, b: Position) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

pub fn is_in_range(shooter: Position, target: Position) -> bool {
    chebyshev_distance(shooter, target) <= SHOOT_RANGE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chebyshev_distance() {
        assert_eq!(chebyshev_distance(Position::new(0, 0), Position::new(3, 1)), 3);
        assert_eq!(chebyshev_distance(Position::new(2, 5), Position::new(6, 0)), 5);
        assert_eq!(chebyshev_distance(Position::new(4, 4), Position::new(4, 4)), 0);
    }

    #[test]
    fn test_manhattan_distance() {
        assert_eq!(manhattan_distance(Position::new(0, 0), Position::new(3, 1)), 4);
        assert_eq!(manhattan_distance(Position::new(2, 5), Position::new(3, 3)), 3);
    }

    #[test]
    fn test_is_in_range() {
        assert!(is_in_range(Position::new(0, 0), Position::new(3, 0)));
        assert!(!is_in_range(Position::new(0, 0), Position::new(4, 0)));
        // Diagonal at the range edge
        assert!(is_in_range(Position::new(3, 3), Position::new(6, 0)));
        assert!(!is_in_range(Position::new(2, 4), Position::new(6, 0)));
    }
}
