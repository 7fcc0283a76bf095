use crate::audio::AudioManager;
use crate::input;
use crate::render::Renderer;
use log::info;
use macroquad::prelude::{get_frame_time, next_frame};
use robo_duel::engine::Engine;
use robo_duel::runner::{FrameAccumulator, MatchRunner};
use robo_duel::types::Phase;

/// Owns the match runner and drives it from the macroquad frame loop.
pub struct Game {
    runner: MatchRunner,
    frames: FrameAccumulator,
    audio: AudioManager,
    last_phase: Phase,
}

impl Game {
    pub fn new() -> Self {
        Game {
            runner: MatchRunner::new(Engine::new()),
            frames: FrameAccumulator::new(),
            audio: AudioManager::new(),
            last_phase: Phase::Waiting,
        }
    }

    pub async fn load_assets(&mut self) {
        self.audio.load_assets().await;
    }

    /// Run the main loop until the window is closed or Escape is pressed
    pub async fn run(&mut self, renderer: &mut Renderer) {
        info!("Starting main loop...");

        while !Renderer::window_should_close() {
            self.update();
            renderer.draw_frame(self.runner.state());
            next_frame().await;
        }

        info!("Exiting Robo Duel.");
    }

    fn update(&mut self) {
        let frame = input::poll(self.runner.state());
        if frame.start {
            match self.runner.start() {
                Ok(()) => self.frames = FrameAccumulator::new(),
                Err(e) => log::debug!("Start ignored: {}", e),
            }
        }
        for intent in frame.intents {
            self.runner.intent(intent);
        }

        let elapsed_ms = self.frames.push_seconds(get_frame_time());
        self.runner.advance(elapsed_ms);

        for event in self.runner.drain_events() {
            self.audio.play_event(&event);
        }

        let phase = self.runner.state().phase;
        if phase != self.last_phase {
            info!("Phase: {} -> {}", self.last_phase, phase);
            self.last_phase = phase;
        }
    }
}
