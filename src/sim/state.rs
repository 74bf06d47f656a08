//! Game state and core simulation types
//!
//! A single `GameState` value is owned by the main loop. The tracker writes
//! slot identity and position; the simulation owns everything else.

use serde::Serialize;

use crate::catalog::ItemConfig;
use crate::consts::*;
use crate::sim::sfx::{SfxEvent, SfxKey};

/// Top-level scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scene {
    /// Camera/model still starting up
    Loading,
    /// Title screen, waiting for start
    Intro,
    /// Active match
    Playing,
    /// Match finished, final board shown
    GameOver,
}

/// Timed global surprise events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurpriseKind {
    /// Golden item weight boosted
    GoldenRush,
    /// Items fall faster
    DoubleDrop,
    /// Trap weight boosted, screen flashes
    TrapScare,
    /// Short slow-motion window
    Freeze,
}

/// One of the fixed player slots
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSlot {
    pub id: usize,
    /// Normalized screen position (0..1)
    pub x: f32,
    pub y: f32,
    pub mouth_open: bool,
    /// Consecutive frames without a matched detection
    pub lost_frames: u32,
    /// Has been assigned a face at least once
    pub enrolled: bool,
    /// Currently tracked
    pub active: bool,
    pub eliminated: bool,
    pub loser_mark: Option<&'static str>,

    pub score: u64,
    pub hp: f32,
    pub sugar: f32,
    pub balance: i32,
    pub combo: u32,
    pub max_combo: u32,
    pub healthy_streak: u32,

    pub shield_frames: u32,
    pub fever_frames: u32,
    pub magnet_frames: u32,
    pub reflect_frames: u32,
    pub score_boost_frames: u32,
    pub dizzy_frames: u32,
    pub mask_frames: u32,
    pub sunglasses_frames: u32,
    /// Frames survived with hp > 0
    pub survival_frames: u32,
}

impl PlayerSlot {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            x: 0.5,
            y: 0.6,
            mouth_open: false,
            lost_frames: 0,
            enrolled: false,
            active: false,
            eliminated: false,
            loser_mark: None,
            score: 0,
            hp: MAX_HP,
            sugar: 0.0,
            balance: 0,
            combo: 0,
            max_combo: 0,
            healthy_streak: 0,
            shield_frames: 0,
            fever_frames: 0,
            magnet_frames: 0,
            reflect_frames: 0,
            score_boost_frames: 0,
            dizzy_frames: 0,
            mask_frames: 0,
            sunglasses_frames: 0,
            survival_frames: 0,
        }
    }

    /// Fresh slot that remembers where its face was last seen
    pub fn reset_keeping_position(&self) -> Self {
        Self {
            x: self.x,
            y: self.y,
            ..Self::new(self.id)
        }
    }

    /// Can take part in gameplay this tick
    pub fn is_eligible(&self) -> bool {
        self.active && self.hp > 0.0
    }

    /// Can eat an item this tick
    pub fn can_eat(&self) -> bool {
        self.active && self.mouth_open && self.hp > 0.0 && self.mask_frames == 0
    }

    /// Count every personal window down by one
    pub fn decay_timers(&mut self) {
        self.shield_frames = self.shield_frames.saturating_sub(1);
        self.fever_frames = self.fever_frames.saturating_sub(1);
        self.magnet_frames = self.magnet_frames.saturating_sub(1);
        self.reflect_frames = self.reflect_frames.saturating_sub(1);
        self.score_boost_frames = self.score_boost_frames.saturating_sub(1);
        self.dizzy_frames = self.dizzy_frames.saturating_sub(1);
        self.mask_frames = self.mask_frames.saturating_sub(1);
        self.sunglasses_frames = self.sunglasses_frames.saturating_sub(1);
    }

    pub fn add_hp(&mut self, amount: f32) {
        self.hp = (self.hp + amount).clamp(0.0, MAX_HP);
    }

    pub fn add_sugar(&mut self, amount: f32) {
        self.sugar = (self.sugar + amount).clamp(0.0, MAX_SUGAR);
    }

    pub fn add_balance(&mut self, amount: i32) {
        self.balance = (self.balance + amount).clamp(BALANCE_MIN, BALANCE_MAX);
    }

    /// Add a signed score delta, never dropping below zero
    pub fn add_score(&mut self, delta: i64) {
        let next = (self.score as i64).saturating_add(delta).max(0);
        self.score = next as u64;
    }

    /// Flag elimination once hp runs out; returns true on the transition
    pub fn mark_eliminated(&mut self) -> bool {
        if self.eliminated || self.hp > 0.0 {
            return false;
        }
        self.eliminated = true;
        if self.loser_mark.is_none() {
            self.loser_mark = Some(LOSER_MARKS[self.id % LOSER_MARKS.len()]);
        }
        true
    }
}

/// An item currently falling
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FallingItem {
    pub config: ItemConfig,
    /// Pixel position
    pub x: f32,
    pub y: f32,
    /// Pixels per tick
    pub vy: f32,
}

/// Floating score/emoji popup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloatText {
    pub text: String,
    pub x: f32,
    pub y: f32,
    /// 0xRRGGBB
    pub color: u32,
    pub life: i32,
    pub size: f32,
}

/// Poop-storm screen decoration (normalized position)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoopSplat {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub alpha: f32,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameState {
    pub scene: Scene,
    pub is_paused: bool,
    /// Ticks since the match started
    pub frame: u32,
    pub level: u32,
    pub items: Vec<FallingItem>,
    pub float_texts: Vec<FloatText>,
    pub players: [PlayerSlot; MAX_PLAYERS],
    /// Sound cues for the audio layer (drained per frame)
    pub sfx_queue: Vec<SfxEvent>,
    /// Symmetric pairwise kiss cooldowns
    pub kiss_cooldowns: [[u32; MAX_PLAYERS]; MAX_PLAYERS],
    pub shake_frames: u32,
    pub storm_frames: u32,
    pub endgame_frames: u32,
    /// Endgame window fires at most once per match
    pub endgame_triggered: bool,
    pub slow_frames: u32,
    pub audience_cooldown_frames: u32,
    pub poop_storm_frames: u32,
    pub trap_flash_frames: u32,
    pub poop_splats: Vec<PoopSplat>,
    pub surprise_frames: u32,
    pub surprise: Option<SurpriseKind>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Initial state at process start
    pub fn new() -> Self {
        Self {
            scene: Scene::Loading,
            is_paused: false,
            frame: 0,
            level: 1,
            items: Vec::new(),
            float_texts: Vec::new(),
            players: std::array::from_fn(PlayerSlot::new),
            sfx_queue: Vec::new(),
            kiss_cooldowns: [[0; MAX_PLAYERS]; MAX_PLAYERS],
            shake_frames: 0,
            storm_frames: 0,
            endgame_frames: 0,
            endgame_triggered: false,
            slow_frames: 0,
            audience_cooldown_frames: 0,
            poop_storm_frames: 0,
            trap_flash_frames: 0,
            poop_splats: Vec::new(),
            surprise_frames: 0,
            surprise: None,
        }
    }

    /// Start a fresh match; slots keep their last position but lose identity
    pub fn reset_playing(&mut self) {
        let players = std::array::from_fn(|i| self.players[i].reset_keeping_position());
        *self = Self {
            scene: Scene::Playing,
            players,
            ..Self::new()
        };
    }

    /// Back to the title screen with every slot forgotten
    pub fn reset_all(&mut self) {
        *self = Self {
            scene: Scene::Intro,
            ..Self::new()
        };
    }

    pub fn push_sfx(&mut self, key: SfxKey) {
        self.sfx_queue.push(key.into());
    }

    pub fn float_text(&mut self, text: impl Into<String>, x: f32, y: f32, color: u32, life: i32, size: f32) {
        self.float_texts.push(FloatText {
            text: text.into(),
            x,
            y,
            color,
            life,
            size,
        });
    }

    /// Slots that are active with hp left
    pub fn eligible_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_eligible()).count()
    }

    /// Slots that have ever been enrolled this match
    pub fn participants(&self) -> impl Iterator<Item = &PlayerSlot> {
        self.players.iter().filter(|p| p.enrolled)
    }

    pub fn total_score(&self) -> u64 {
        self.players.iter().map(|p| p.score).sum()
    }

    /// True once someone has played and nobody has hp left
    pub fn all_participants_down(&self) -> bool {
        let mut any = false;
        for p in self.participants() {
            any = true;
            if p.hp > 0.0 {
                return false;
            }
        }
        any
    }
}
