use log::warn;
use macroquad::audio::{Sound, load_sound, play_sound_once};
use robo_duel::events::{MatchEvent, ShotOutcome};

async fn load_cue(path: &str) -> Option<Sound> {
    load_sound(path)
        .await
        .map_err(|e| {
            warn!("Failed to load sound '{}': {}", path, e);
            e
        })
        .ok()
}

#[derive(Default)]
pub struct AudioManager {
    fire_sound: Option<Sound>,
    score_sound: Option<Sound>,
    collision_sound: Option<Sound>,
    reload_sound: Option<Sound>,
    end_sound: Option<Sound>,
}

impl AudioManager {
    pub fn new() -> Self {
        Default::default()
    }

    // Missing files leave the cue silent
    pub async fn load_assets(&mut self) {
        self.fire_sound = load_cue("assets/fire1.ogg").await;
        self.score_sound = load_cue("assets/score1.ogg").await;
        self.collision_sound = load_cue("assets/boom1.ogg").await;
        self.reload_sound = load_cue("assets/reload1.ogg").await;
        self.end_sound = load_cue("assets/end1.ogg").await;
    }

    fn play(sound: &Option<Sound>) {
        if let Some(sound) = sound {
            play_sound_once(sound);
        }
    }

    pub fn play_event(&self, event: &MatchEvent) {
        match event {
            MatchEvent::Shot { outcome: ShotOutcome::Miss, .. } => Self::play(&self.fire_sound),
            MatchEvent::Shot { .. } => Self::play(&self.score_sound),
            MatchEvent::Collided { .. } => Self::play(&self.collision_sound),
            MatchEvent::Reloaded { .. } => Self::play(&self.reload_sound),
            MatchEvent::Ended { .. } => Self::play(&self.end_sound),
            MatchEvent::Started | MatchEvent::PhaseChanged { .. } | MatchEvent::Moved { .. } => {}
        }
    }
}
