use crate::config::MAX_AMMO;
use crate::types::{Position, Side};

/// Per-side robot state: where it stands, what it carries, what it scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotState {
    pub side: Side,
    pub position: Position,
    pub ammo: u32,
    pub score: i32, // Collision penalties can push this below zero
}

impl RobotState {
    /// A fresh robot at its side's start cell with a full magazine.
    pub fn new(side: Side) -> Self {
        RobotState {
            side,
            position: side.start_position(),
            ammo: MAX_AMMO,
            score: 0,
        }
    }

    pub fn has_ammo(&self) -> bool {
        self.ammo > 0
    }

    pub fn is_on_reloader(&self) -> bool {
        self.position == self.side.reloader()
    }

    /// Consumes one round. Returns false (and changes nothing) when empty.
    pub fn spend_round(&mut self) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        true
    }

    /// Refills to capacity; the magazine is set, not topped up past MAX_AMMO.
    pub fn refill(&mut self) {
        self.ammo = MAX_AMMO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_robot() {
        let user = RobotState::new(Side::User);
        assert_eq!(user.position, Position::new(2, 5));
        assert_eq!(user.ammo, MAX_AMMO);
        assert_eq!(user.score, 0);

        let enemy = RobotState::new(Side::Enemy);
        assert_eq!(enemy.position, Position::new(4, 5));
    }

    #[test]
    fn test_spend_round_stops_at_zero() {
        let mut robot = RobotState::new(Side::Enemy);
        for expected in (0..MAX_AMMO).rev() {
            assert!(robot.spend_round());
            assert_eq!(robot.ammo, expected);
        }
        assert!(!robot.spend_round());
        assert_eq!(robot.ammo, 0);
    }

    #[test]
    fn test_refill_sets_max() {
        let mut robot = RobotState::new(Side::User);
        robot.ammo = 1;
        robot.refill();
        assert_eq!(robot.ammo, MAX_AMMO);
        robot.refill();
        assert_eq!(robot.ammo, MAX_AMMO);
    }

    #[test]
    fn test_is_on_reloader() {
        let mut robot = RobotState::new(Side::User);
        assert!(!robot.is_on_reloader());
        robot.position = Position::new(0, 6);
        assert!(robot.is_on_reloader());
        // The enemy's reloader doesn't count for the user
        robot.position = Position::new(6, 6);
        assert!(!robot.is_on_reloader());
    }
}
