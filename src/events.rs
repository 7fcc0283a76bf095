use crate::config::{AUTO_PHASE_DURATION, LOG_CAPACITY};
use crate::types::{Phase, Position, Side};
use std::collections::VecDeque;

/// Result of an accepted move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved,
    /// Target was the other robot's cell: no move, mover loses a point.
    Collided,
}

/// Result of a shot that had ammo behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    OwnGoal,
    WrongGoal,
    Miss,
}

/// Everything the engine reports to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEvent {
    Started,
    PhaseChanged { from: Phase, to: Phase },
    Moved { side: Side, from: Position, to: Position },
    Collided { side: Side, at: Position },
    Shot { side: Side, from: Position, outcome: ShotOutcome },
    Reloaded { side: Side },
    Ended { user_score: i32, enemy_score: i32 },
}

impl MatchEvent {
    /// Line for the on-screen feed, if this event is worth one.
    pub fn message(&self) -> Option<String> {
        match self {
            MatchEvent::Started => Some("Match started!".to_string()),
            MatchEvent::PhaseChanged { to: Phase::Auto, .. } => {
                Some(format!("AUTO MODE: {} seconds", AUTO_PHASE_DURATION))
            }
            MatchEvent::PhaseChanged { to: Phase::Teleop, .. } => {
                Some("TELEOP ENABLED! Take control!".to_string())
            }
            MatchEvent::PhaseChanged { .. } => None,
            MatchEvent::Moved { .. } => None,
            MatchEvent::Collided { side, .. } => Some(format!("{side} collision! -1 pt")),
            MatchEvent::Shot { side, outcome, .. } => match outcome {
                ShotOutcome::OwnGoal => Some(format!("{side} scored! +1")),
                ShotOutcome::WrongGoal => Some(format!(
                    "{side} shot the wrong goal! {} +1",
                    side.other()
                )),
                ShotOutcome::Miss => None,
            },
            // Only the player's own reloads show up in the feed
            MatchEvent::Reloaded { side: Side::User } => Some("User reloaded!".to_string()),
            MatchEvent::Reloaded { side: Side::Enemy } => None,
            MatchEvent::Ended {
                user_score,
                enemy_score,
            } => Some(format!("Time! Final score {user_score} - {enemy_score}")),
        }
    }
}

/// Rolling feed of recent messages, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLog {
    messages: VecDeque<String>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog {
            messages: VecDeque::with_capacity(LOG_CAPACITY),
        }
    }

    pub fn push(&mut self, message: String) {
        self.messages.push_front(message);
        self.messages.truncate(LOG_CAPACITY);
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn latest(&self) -> Option<&str> {
        self.messages.front().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_newest_first_and_capped() {
        let mut log = EventLog::new();
        for i in 0..8 {
            log.push(format!("msg {i}"));
        }
        assert_eq!(log.len(), LOG_CAPACITY);
        assert_eq!(log.latest(), Some("msg 7"));
        let all: Vec<&str> = log.iter().collect();
        assert_eq!(all, vec!["msg 7", "msg 6", "msg 5", "msg 4", "msg 3"]);
    }

    #[test]
    fn test_clear() {
        let mut log = EventLog::new();
        log.push("hello".to_string());
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.latest(), None);
    }

    #[test]
    fn test_messages() {
        let shot = MatchEvent::Shot {
            side: Side::User,
            from: Position::new(1, 1),
            outcome: ShotOutcome::WrongGoal,
        };
        assert_eq!(shot.message().as_deref(), Some("User shot the wrong goal! Enemy +1"));

        let miss = MatchEvent::Shot {
            side: Side::Enemy,
            from: Position::new(6, 6),
            outcome: ShotOutcome::Miss,
        };
        assert_eq!(miss.message(), None);

        assert_eq!(MatchEvent::Reloaded { side: Side::Enemy }.message(), None);
        assert!(MatchEvent::Reloaded { side: Side::User }.message().is_some());

        let collided = MatchEvent::Collided {
            side: Side::Enemy,
            at: Position::new(2, 2),
        };
        assert_eq!(collided.message().as_deref(), Some("Enemy collision! -1 pt"));
    }
}
