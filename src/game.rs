//! Main-loop session
//!
//! Owns the single `GameState` and everything that feeds it. Each host
//! frame runs the tracker (only when the camera produced a new frame), then
//! one simulation tick, then scene-change bookkeeping.

use rand_pcg::Pcg32;
use serde::Serialize;

use crate::catalog::Catalog;
use crate::consts::PAUSE_LOCK_FRAMES;
use crate::settings::Settings;
use crate::sim::rng::seeded;
use crate::sim::{GameState, Scene, SfxEvent, SfxKey, TickContext, tick};
use crate::tracking::{Detection, SyncReport, Tracker};
use crate::tuning::Tuning;

/// Supplier of raw mouth detections for the current camera frame
pub trait DetectionSource {
    fn detect(&mut self) -> Vec<Detection>;
}

impl<F> DetectionSource for F
where
    F: FnMut() -> Vec<Detection>,
{
    fn detect(&mut self) -> Vec<Detection> {
        self()
    }
}

/// Per-frame host input
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    /// Camera frame timestamp; the tracker skips repeated values
    pub video_time: f64,
    /// Canvas size in pixels
    pub width: f32,
    pub height: f32,
}

/// One row of the final board
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Standing {
    pub rank: usize,
    /// 1-based player number
    pub player: usize,
    pub score: u64,
    pub hp: f32,
    pub max_combo: u32,
    pub survival_frames: u32,
    pub eliminated: bool,
    pub loser_mark: Option<&'static str>,
}

/// A running game session
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    tracker: Tracker,
    tuning: Tuning,
    catalog: Catalog,
    settings: Settings,
    rng: Pcg32,
    last_video_time: Option<f64>,
    last_scene: Scene,
    pause_lock_frames: u32,
}

impl Game {
    pub fn new(tuning: Tuning, settings: Settings, seed: u64) -> Self {
        let state = GameState::new();
        let last_scene = state.scene;
        Self {
            state,
            tracker: Tracker::new(),
            tuning,
            catalog: Catalog::for_theme(settings.theme),
            settings,
            rng: seeded(seed),
            last_video_time: None,
            last_scene,
            pause_lock_frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn pause_locked(&self) -> bool {
        self.pause_lock_frames > 0
    }

    /// Swap presets; the theme's item pool applies from the next tick
    pub fn apply_settings(&mut self, settings: Settings) {
        if settings.theme != self.settings.theme {
            self.catalog = Catalog::for_theme(settings.theme);
        }
        log::info!(
            "Settings: spawn {} / fall {} / theme {}",
            settings.spawn_rate.as_str(),
            settings.fall_speed.as_str(),
            settings.theme.as_str()
        );
        self.settings = settings;
    }

    /// Advance one host frame; returns the tracker report if it ran
    pub fn frame(&mut self, input: &FrameInput, source: &mut dyn DetectionSource) -> Option<SyncReport> {
        let mut report = None;
        if self.state.scene != Scene::Loading && self.last_video_time != Some(input.video_time) {
            self.last_video_time = Some(input.video_time);
            let detections = source.detect();
            report = Some(self.tracker.sync(&mut self.state.players, &detections, &self.tuning));
        }

        let ctx = TickContext::new(&self.tuning, &self.catalog, self.settings.modifiers());
        tick(&mut self.state, &ctx, &mut self.rng, input.width, input.height);

        if self.last_scene != Scene::GameOver && self.state.scene == Scene::GameOver {
            self.on_game_over();
        }
        self.last_scene = self.state.scene;
        self.pause_lock_frames = self.pause_lock_frames.saturating_sub(1);
        report
    }

    /// Hand queued sound cues to the audio layer
    pub fn drain_sfx(&mut self) -> Vec<SfxEvent> {
        std::mem::take(&mut self.state.sfx_queue)
    }

    /// Camera and model are ready
    pub fn finish_loading(&mut self) {
        if self.state.scene == Scene::Loading {
            self.state.scene = Scene::Intro;
            self.last_scene = Scene::Intro;
            log::info!("Ready: {}", self.catalog.theme.title());
        }
    }

    /// Start from the title screen or restart after game over
    pub fn start(&mut self) -> bool {
        let restart = match self.state.scene {
            Scene::Intro => false,
            Scene::GameOver => true,
            Scene::Loading | Scene::Playing => return false,
        };
        self.tracker.clear();
        self.state.reset_playing();
        self.state.push_sfx(if restart { SfxKey::UiRestart } else { SfxKey::UiStart });
        self.last_scene = Scene::Playing;
        self.pause_lock_frames = PAUSE_LOCK_FRAMES;
        log::info!("Match {}", if restart { "restarted" } else { "started" });
        true
    }

    /// Forget every player and return to the title screen
    pub fn reset_all(&mut self) -> bool {
        if self.state.scene == Scene::Loading {
            return false;
        }
        self.tracker.clear();
        self.state.reset_all();
        self.state.push_sfx(SfxKey::UiRestart);
        self.last_scene = Scene::Intro;
        self.pause_lock_frames = PAUSE_LOCK_FRAMES;
        log::info!("Reset to title screen");
        true
    }

    /// Pause key; ignored outside a match or right after a scene action
    pub fn toggle_pause(&mut self) -> bool {
        if self.pause_lock_frames > 0 || self.state.scene != Scene::Playing {
            return false;
        }
        self.state.is_paused = !self.state.is_paused;
        self.state.push_sfx(if self.state.is_paused {
            SfxKey::UiPauseOn
        } else {
            SfxKey::UiPauseOff
        });
        true
    }

    /// Resume button on the pause overlay
    pub fn resume(&mut self) -> bool {
        if !self.state.is_paused || self.state.scene != Scene::Playing {
            return false;
        }
        self.state.is_paused = false;
        self.state.push_sfx(SfxKey::UiPauseOff);
        self.pause_lock_frames = PAUSE_LOCK_FRAMES;
        true
    }

    /// Participants ordered by score (ties by slot)
    pub fn standings(&self) -> Vec<Standing> {
        let mut players: Vec<_> = self.state.participants().collect();
        players.sort_by(|a, b| b.score.cmp(&a.score).then(a.id.cmp(&b.id)));
        players
            .into_iter()
            .enumerate()
            .map(|(i, p)| Standing {
                rank: i + 1,
                player: p.id + 1,
                score: p.score,
                hp: p.hp,
                max_combo: p.max_combo,
                survival_frames: p.survival_frames,
                eliminated: p.eliminated,
                loser_mark: p.loser_mark,
            })
            .collect()
    }

    fn on_game_over(&mut self) {
        self.state.push_sfx(SfxKey::GameOver);
        let standings = self.standings();
        log::info!(
            "Game over at frame {} (level {}, {} players)",
            self.state.frame,
            self.state.level,
            standings.len()
        );
        for s in &standings {
            log::info!(
                "  #{} P{}: {} pts, max combo {}, survived {} frames{}",
                s.rank,
                s.player,
                s.score,
                s.max_combo,
                s.survival_frames,
                if s.eliminated { " (out)" } else { "" }
            );
        }
    }
}
