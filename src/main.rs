mod audio;
mod game;
mod input;
mod render;

use clap::{Parser, ValueEnum};
use log::info;
use macroquad::prelude::Conf;
use robo_duel::config::{WINDOW_HEIGHT, WINDOW_WIDTH};
use robo_duel::headless::{self, AutopilotOperator, IdleOperator, Operator, RandomOperator};
use robo_duel::logging;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OperatorArg {
    /// Never touches the controls
    Idle,
    /// Random key presses (see --seed)
    Random,
    /// Plays the user side with the scripted policy
    Autopilot,
}

// --- Command Line Arguments ---
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Debug filter to specify log topics (e.g., "engine,policy")
    /// Available topics: engine, policy, path, clock, input
    #[arg(long)]
    debug_filter: Option<String>,

    /// Run matches without opening a window.
    #[arg(long)]
    headless: bool,

    /// Number of headless matches to play.
    #[arg(long, default_value_t = 1)]
    matches: u32,

    /// Seed for the random operator.
    #[arg(long)]
    seed: Option<u64>,

    /// Who drives the user robot in TELEOP when headless.
    #[arg(long, value_enum, default_value_t = OperatorArg::Autopilot)]
    operator: OperatorArg,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Robo Duel".to_owned(),
        window_width: WINDOW_WIDTH,
        window_height: WINDOW_HEIGHT,
        window_resizable: false,
        ..Default::default()
    }
}

fn init_logging(args: &Args) {
    // RUST_LOG takes over from the built-in logger when present
    if std::env::var_os("RUST_LOG").is_some() {
        if let Err(e) = env_logger::try_init() {
            eprintln!("Warning: Failed to initialize env_logger: {}", e);
        }
        return;
    }

    let level = logging::parse_level(&args.log_level);
    if let Err(e) = logging::init_logger(level, args.debug_filter.clone()) {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
}

fn run_headless(args: &Args) {
    let mut operator: Box<dyn Operator> = match args.operator {
        OperatorArg::Idle => Box::new(IdleOperator),
        OperatorArg::Random => Box::new(match args.seed {
            Some(seed) => RandomOperator::new(seed),
            None => RandomOperator::from_entropy(),
        }),
        OperatorArg::Autopilot => Box::new(AutopilotOperator::default()),
    };

    info!("Running {} headless match(es) with the {:?} operator", args.matches, args.operator);
    let summaries = headless::run_series(args.matches, &mut *operator);

    let wins = summaries
        .iter()
        .filter(|s| s.user_score > s.enemy_score)
        .count();
    info!("User won {} of {} match(es)", wins, summaries.len());
}

async fn run_window() {
    let mut game = game::Game::new();
    game.load_assets().await;

    info!("Initializing macroquad rendering system");
    let mut renderer = render::Renderer::new();
    renderer.load_fonts().await;
    info!("Renderer initialized.");

    game.run(&mut renderer).await;
}

fn main() {
    let args = Args::parse();
    init_logging(&args);

    info!("Initializing Robo Duel...");

    if args.headless {
        run_headless(&args);
    } else {
        macroquad::Window::from_config(window_conf(), run_window());
    }
}
