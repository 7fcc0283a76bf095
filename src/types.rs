use crate::config;
use std::fmt;

/// A cell on the board. Coordinates are signed so that out-of-bounds
/// targets (e.g. stepping off the edge) can be represented and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        (0..config::GRID_SIZE).contains(&self.x) && (0..config::GRID_SIZE).contains(&self.y)
    }

    pub fn offset(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Iterates every board cell in row-major order (y outer, x inner).
    pub fn all_cells() -> impl Iterator<Item = Position> {
        (0..config::GRID_SIZE)
            .flat_map(|y| (0..config::GRID_SIZE).map(move |x| Position { x, y }))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Orthogonal step directions. Screen coordinates: y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed expansion order used by the pathfinder.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Direction of a single orthogonal step from `from` to `to`, if any.
    pub fn between(from: Position, to: Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|direction| from.offset(*direction) == to)
    }
}

/// The two robots on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    User,
    Enemy,
}

impl Side {
    pub fn other(&self) -> Side {
        match self {
            Side::User => Side::Enemy,
            Side::Enemy => Side::User,
        }
    }

    /// The goal this side scores on.
    pub fn goal(&self) -> Position {
        match self {
            Side::User => config::USER_GOAL,
            Side::Enemy => config::ENEMY_GOAL,
        }
    }

    pub fn reloader(&self) -> Position {
        match self {
            Side::User => config::USER_RELOADER,
            Side::Enemy => config::ENEMY_RELOADER,
        }
    }

    pub fn start_position(&self) -> Position {
        match self {
            Side::User => config::USER_START,
            Side::Enemy => config::ENEMY_START,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Side::User => "User",
            Side::Enemy => "Enemy",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Match phases. Transitions are linear: Waiting -> Auto -> Teleop -> Ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Waiting,
    Auto,
    Teleop,
    Ended,
}

impl Phase {
    /// True while the clocks are running and ticks have an effect.
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Auto | Phase::Teleop)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Phase::Waiting => "READY",
            Phase::Auto => "AUTO MODE",
            Phase::Teleop => "TELEOP MODE",
            Phase::Ended => "GAME OVER",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_bounds() {
        assert!(Position::new(0, 0).in_bounds());
        assert!(Position::new(6, 6).in_bounds());
        assert!(!Position::new(-1, 3).in_bounds());
        assert!(!Position::new(3, 7).in_bounds());
    }

    #[test]
    fn test_all_cells_row_major() {
        let cells: Vec<Position> = Position::all_cells().collect();
        assert_eq!(cells.len(), 49);
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[1], Position::new(1, 0));
        assert_eq!(cells[7], Position::new(0, 1));
        assert_eq!(cells[48], Position::new(6, 6));
    }

    #[test]
    fn test_direction_between() {
        let origin = Position::new(3, 3);
        assert_eq!(Direction::between(origin, Position::new(3, 2)), Some(Direction::Up));
        assert_eq!(Direction::between(origin, Position::new(4, 3)), Some(Direction::Right));
        assert_eq!(Direction::between(origin, Position::new(4, 4)), None);
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn test_side_board_cells() {
        assert_eq!(Side::User.other(), Side::Enemy);
        assert_eq!(Side::User.goal(), Position::new(6, 0));
        assert_eq!(Side::Enemy.goal(), Position::new(0, 0));
        assert_eq!(Side::User.reloader(), Position::new(0, 6));
        assert_eq!(Side::Enemy.reloader(), Position::new(6, 6));
    }
}
