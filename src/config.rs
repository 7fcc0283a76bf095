//! Configuration constants for the duel board and match clock.

use crate::types::Position;

// Board
pub const GRID_SIZE: i32 = 7; // Board is GRID_SIZE x GRID_SIZE cells
pub const MAX_AMMO: u32 = 3;
pub const SHOOT_RANGE: i32 = 3; // Chebyshev distance

// Goals sit on row 0, reloaders on the last row
pub const USER_GOAL: Position = Position { x: 6, y: 0 };
pub const ENEMY_GOAL: Position = Position { x: 0, y: 0 };
pub const USER_RELOADER: Position = Position { x: 0, y: 6 };
pub const ENEMY_RELOADER: Position = Position { x: 6, y: 6 };

// Starting positions
pub const USER_START: Position = Position { x: 2, y: 5 };
pub const ENEMY_START: Position = Position { x: 4, y: 5 };

// Match clock
pub const TOTAL_GAME_TIME: u32 = 150; // 2m 30s
pub const AUTO_PHASE_DURATION: u32 = 30;
pub const CLOCK_TICK_MS: u64 = 1000;
pub const TICK_RATE_MS: u64 = 600; // AI movement cadence

// Event log
pub const LOG_CAPACITY: usize = 5;

// Rendering configuration
pub const WINDOW_WIDTH: i32 = 760;
pub const WINDOW_HEIGHT: i32 = 720;
pub const HEADER_HEIGHT: f32 = 90.0;
pub const BOARD_SIZE: f32 = 560.0; // Square board area in pixels
pub const BOARD_MARGIN: f32 = 20.0;
pub const CELL_SIZE: f32 = BOARD_SIZE / GRID_SIZE as f32;
pub const SIDE_PANEL_X: f32 = BOARD_MARGIN * 2.0 + BOARD_SIZE;
