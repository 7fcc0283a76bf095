use macroquad::prelude::*;
use robo_duel::config::{
    BOARD_MARGIN, BOARD_SIZE, CELL_SIZE, HEADER_HEIGHT, MAX_AMMO, SIDE_PANEL_X, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use robo_duel::geometry::is_in_range;
use robo_duel::robot::RobotState;
use robo_duel::state::MatchState;
use robo_duel::types::{Phase, Position, Side};

const BOARD_TOP: f32 = HEADER_HEIGHT + BOARD_MARGIN;
const ROBOT_RADIUS: f32 = CELL_SIZE * 0.34;
const PANEL_PADDING: f32 = 12.0;
const LOG_WRAP_CHARS: usize = 20;

fn faded_color(mut color: Color, alpha: f32) -> Color {
    color.a *= alpha;
    color
}

fn brighten_color(color: Color, amount: f32) -> Color {
    Color::new(
        (color.r + amount).min(1.0),
        (color.g + amount).min(1.0),
        (color.b + amount).min(1.0),
        color.a,
    )
}

fn side_color(side: Side) -> Color {
    match side {
        Side::User => Color::from_rgba(60, 130, 230, 255),
        Side::Enemy => Color::from_rgba(220, 70, 60, 255),
    }
}

fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Waiting => LIGHTGRAY,
        Phase::Auto => ORANGE,
        Phase::Teleop => GREEN,
        Phase::Ended => GOLD,
    }
}

/// Screen position of a cell's top-left corner.
pub fn cell_origin(cell: Position) -> Vec2 {
    vec2(
        BOARD_MARGIN + cell.x as f32 * CELL_SIZE,
        BOARD_TOP + cell.y as f32 * CELL_SIZE,
    )
}

/// Board cell under a screen point, if the point is on the board.
pub fn cell_at(x: f32, y: f32) -> Option<Position> {
    let board_x = x - BOARD_MARGIN;
    let board_y = y - BOARD_TOP;
    if board_x < 0.0 || board_y < 0.0 || board_x >= BOARD_SIZE || board_y >= BOARD_SIZE {
        return None;
    }
    let cell = Position::new((board_x / CELL_SIZE) as i32, (board_y / CELL_SIZE) as i32);
    cell.in_bounds().then_some(cell)
}

// Greedy word wrap for the narrow message panel
fn wrap_words(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

// Handles drawing the match with macroquad
pub struct Renderer {
    title_font: Option<Font>,
    ui_font: Option<Font>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            title_font: None,
            ui_font: None,
        }
    }

    // Fonts are optional; macroquad's built-in font is used when missing
    pub async fn load_fonts(&mut self) {
        match load_ttf_font("assets/title.ttf").await {
            Ok(font) => self.title_font = Some(font),
            Err(e) => log::warn!("Failed to load font assets/title.ttf: {}", e),
        }
        match load_ttf_font("assets/default.ttf").await {
            Ok(font) => self.ui_font = Some(font),
            Err(e) => log::warn!("Failed to load UI font assets/default.ttf: {}", e),
        }
    }

    fn text_params(&self, font_size: u16, color: Color) -> TextParams<'_> {
        TextParams {
            font: self.ui_font.as_ref(),
            font_size,
            color,
            ..Default::default()
        }
    }

    fn draw_centered_text(&self, text: &str, center_x: f32, y: f32, font_size: u16, color: Color) {
        let dims = measure_text(text, self.ui_font.as_ref(), font_size, 1.0);
        draw_text_ex(text, center_x - dims.width / 2.0, y, self.text_params(font_size, color));
    }

    pub fn draw_frame(&self, state: &MatchState) {
        clear_background(Color::from_rgba(14, 16, 28, 255));

        self.draw_header(state);
        self.draw_board(state);
        self.draw_robot(&state.enemy);
        self.draw_robot(&state.user);
        self.draw_side_panel(state);
        self.draw_controls_hint();

        match state.phase {
            Phase::Waiting => self.draw_announcement("ROBO DUEL", "Press ENTER to start"),
            Phase::Ended => {
                let title = state.outcome().map_or(Phase::Ended.label(), |o| o.label());
                let hint = format!(
                    "{} - {}   Press ENTER to play again",
                    state.user.score, state.enemy.score
                );
                self.draw_announcement(title, &hint);
            }
            Phase::Auto | Phase::Teleop => {}
        }
    }

    fn draw_header(&self, state: &MatchState) {
        let width = WINDOW_WIDTH as f32;
        draw_rectangle(0.0, 0.0, width, HEADER_HEIGHT, Color::from_rgba(20, 20, 50, 255));
        draw_line(0.0, HEADER_HEIGHT, width, HEADER_HEIGHT, 2.0, Color::from_rgba(40, 40, 90, 255));

        let score_size = 28;
        let user_text = format!("USER {}", state.user.score);
        draw_text_ex(&user_text, 24.0, 52.0, self.text_params(score_size, side_color(Side::User)));

        let enemy_text = format!("{} ENEMY", state.enemy.score);
        let enemy_dims = measure_text(&enemy_text, self.ui_font.as_ref(), score_size, 1.0);
        draw_text_ex(
            &enemy_text,
            width - 24.0 - enemy_dims.width,
            52.0,
            self.text_params(score_size, side_color(Side::Enemy)),
        );

        let clock_color = if state.phase.is_running() && state.time_remaining <= 10 {
            RED
        } else {
            WHITE
        };
        let title_params = TextParams {
            font: self.title_font.as_ref(),
            font_size: 40,
            color: clock_color,
            ..Default::default()
        };
        let clock = state.format_clock();
        let clock_dims = measure_text(&clock, self.title_font.as_ref(), 40, 1.0);
        draw_text_ex(&clock, (width - clock_dims.width) / 2.0, 48.0, title_params);

        self.draw_centered_text(state.phase.label(), width / 2.0, 76.0, 18, phase_color(state.phase));
    }

    fn draw_board(&self, state: &MatchState) {
        draw_rectangle(
            BOARD_MARGIN - 4.0,
            BOARD_TOP - 4.0,
            BOARD_SIZE + 8.0,
            BOARD_SIZE + 8.0,
            Color::from_rgba(40, 44, 70, 255),
        );

        for cell in Position::all_cells() {
            let origin = cell_origin(cell);
            draw_rectangle(origin.x + 1.0, origin.y + 1.0, CELL_SIZE - 2.0, CELL_SIZE - 2.0, Self::cell_fill(cell));
            if let Some(label) = Self::cell_label(cell) {
                self.draw_centered_text(
                    label,
                    origin.x + CELL_SIZE / 2.0,
                    origin.y + 16.0,
                    13,
                    faded_color(WHITE, 0.8),
                );
            }
        }

        // Target lock: the player's goal is in range
        if state.phase == Phase::Teleop && is_in_range(state.user.position, Side::User.goal()) {
            let origin = cell_origin(Side::User.goal());
            draw_rectangle_lines(origin.x + 2.0, origin.y + 2.0, CELL_SIZE - 4.0, CELL_SIZE - 4.0, 4.0, GOLD);
        }
    }

    fn cell_fill(cell: Position) -> Color {
        for side in [Side::User, Side::Enemy] {
            if cell == side.goal() {
                return faded_color(side_color(side), 0.55);
            }
            if cell == side.reloader() {
                return faded_color(side_color(side), 0.25);
            }
        }
        if (cell.x + cell.y) % 2 == 0 {
            Color::from_rgba(28, 31, 50, 255)
        } else {
            Color::from_rgba(24, 27, 44, 255)
        }
    }

    fn cell_label(cell: Position) -> Option<&'static str> {
        [Side::User, Side::Enemy].into_iter().find_map(|side| {
            if cell == side.goal() {
                Some("GOAL")
            } else if cell == side.reloader() {
                Some("AMMO")
            } else {
                None
            }
        })
    }

    fn draw_robot(&self, robot: &RobotState) {
        let origin = cell_origin(robot.position);
        let center = origin + vec2(CELL_SIZE / 2.0, CELL_SIZE / 2.0);
        let color = side_color(robot.side);

        draw_circle(center.x + 3.0, center.y + 3.0, ROBOT_RADIUS, Color::from_rgba(0, 0, 0, 90));
        draw_circle(center.x, center.y, ROBOT_RADIUS, color);
        draw_circle_lines(center.x, center.y, ROBOT_RADIUS, 2.0, brighten_color(color, 0.3));

        let badge = match robot.side {
            Side::User => "U",
            Side::Enemy => "E",
        };
        self.draw_centered_text(badge, center.x, center.y + 8.0, 24, WHITE);

        // Ammo pips along the bottom of the cell
        let pip_y = origin.y + CELL_SIZE - 8.0;
        for i in 0..MAX_AMMO {
            let offset = (i as f32 - (MAX_AMMO as f32 - 1.0) / 2.0) * 10.0;
            let pip_color = if i < robot.ammo {
                GOLD
            } else {
                Color::from_rgba(54, 58, 70, 255)
            };
            draw_circle(center.x + offset, pip_y, 3.5, pip_color);
        }
    }

    fn draw_side_panel(&self, state: &MatchState) {
        let panel_width = WINDOW_WIDTH as f32 - SIDE_PANEL_X;
        let text_x = SIDE_PANEL_X + PANEL_PADDING;
        let mut y = BOARD_TOP;

        draw_rectangle(SIDE_PANEL_X, HEADER_HEIGHT, panel_width, WINDOW_HEIGHT as f32 - HEADER_HEIGHT, Color::from_rgba(20, 20, 50, 255));

        let label_params = self.text_params(14, LIGHTGRAY);
        draw_text_ex("AMMO", text_x, y + 14.0, label_params.clone());
        let ammo_text = format!("{}/{}", state.user.ammo, MAX_AMMO);
        draw_text_ex(&ammo_text, text_x + 60.0, y + 14.0, self.text_params(18, GOLD));
        y += 34.0;

        // Console buttons, lit when they would do something
        let controls = [("SHOOT [5]", state.can_shoot()), ("RELOAD [R]", state.can_reload())];
        for (label, enabled) in controls {
            let fill = if enabled {
                Color::from_rgba(40, 100, 40, 255)
            } else {
                Color::from_rgba(44, 48, 60, 255)
            };
            draw_rectangle(text_x, y, panel_width - 2.0 * PANEL_PADDING, 26.0, fill);
            let color = if enabled { WHITE } else { GRAY };
            self.draw_centered_text(label, SIDE_PANEL_X + panel_width / 2.0, y + 18.0, 14, color);
            y += 34.0;
        }

        y += 10.0;
        draw_text_ex("LOG", text_x, y + 14.0, label_params);
        y += 32.0;

        for (i, message) in state.log.iter().enumerate() {
            // Older lines fade out
            let alpha = 1.0 - i as f32 * 0.15;
            for line in wrap_words(message, LOG_WRAP_CHARS) {
                draw_text_ex(&line, text_x, y, self.text_params(13, faded_color(WHITE, alpha)));
                y += 16.0;
            }
            y += 6.0;
        }
    }

    fn draw_controls_hint(&self) {
        let hint = "MOVE 6/7/9/8 or arrows   SHOOT 5   RELOAD R   START Enter   QUIT Esc";
        let y = BOARD_TOP + BOARD_SIZE + 24.0;
        self.draw_centered_text(hint, BOARD_MARGIN + BOARD_SIZE / 2.0, y, 15, GRAY);
    }

    fn draw_announcement(&self, msg: &str, hint: &str) {
        let rect_width = 500.0;
        let rect_height = 120.0;
        let x = (WINDOW_WIDTH as f32 / 2.0) - (rect_width / 2.0);
        let y = (WINDOW_HEIGHT as f32 / 2.0) - (rect_height / 2.0);
        draw_rectangle(x, y, rect_width, rect_height, Color::from_rgba(0, 0, 0, 180));

        let title_size = 32;
        let title_params = TextParams {
            font: self.title_font.as_ref(),
            font_size: title_size,
            color: WHITE,
            ..Default::default()
        };
        let title_dims = measure_text(msg, self.title_font.as_ref(), title_size, 1.0);
        let title_x = x + (rect_width - title_dims.width) / 2.0;
        draw_text_ex(msg, title_x, y + 56.0, title_params);

        self.draw_centered_text(hint, x + rect_width / 2.0, y + rect_height - 22.0, 18, LIGHTGRAY);
    }

    pub fn window_should_close() -> bool {
        is_key_down(KeyCode::Escape) || is_quit_requested()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_at_corners() {
        assert_eq!(cell_at(BOARD_MARGIN, BOARD_TOP), Some(Position::new(0, 0)));
        assert_eq!(
            cell_at(BOARD_MARGIN + BOARD_SIZE - 1.0, BOARD_TOP + BOARD_SIZE - 1.0),
            Some(Position::new(6, 6))
        );
    }

    #[test]
    fn test_cell_at_off_board() {
        assert_eq!(cell_at(BOARD_MARGIN - 0.5, BOARD_TOP + 10.0), None);
        assert_eq!(cell_at(BOARD_MARGIN + BOARD_SIZE, BOARD_TOP + 10.0), None);
        assert_eq!(cell_at(BOARD_MARGIN + 10.0, HEADER_HEIGHT / 2.0), None);
        assert_eq!(cell_at(SIDE_PANEL_X + 20.0, BOARD_TOP + 100.0), None);
    }

    #[test]
    fn test_cell_centers_map_back() {
        for cell in Position::all_cells() {
            let center = cell_origin(cell) + vec2(CELL_SIZE / 2.0, CELL_SIZE / 2.0);
            assert_eq!(cell_at(center.x, center.y), Some(cell));
        }
    }

    #[test]
    fn test_wrap_words() {
        assert_eq!(wrap_words("User reloaded!", 20), vec!["User reloaded!"]);
        assert_eq!(
            wrap_words("TELEOP ENABLED! Take control!", 16),
            vec!["TELEOP ENABLED!", "Take control!"]
        );
        assert!(wrap_words("", 20).is_empty());
    }

    #[test]
    fn test_special_cells_are_labelled() {
        assert_eq!(Renderer::cell_label(Side::User.goal()), Some("GOAL"));
        assert_eq!(Renderer::cell_label(Side::Enemy.reloader()), Some("AMMO"));
        assert_eq!(Renderer::cell_label(Position::new(3, 3)), None);
    }
}
