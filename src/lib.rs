//! Mouth King - a webcam party game where open mouths eat falling food
//!
//! Core modules:
//! - `tracking`: Turns noisy per-frame mouth detections into stable player slots
//! - `sim`: Per-frame gameplay simulation (spawning, eating, scoring, events)
//! - `game`: Main-loop session wiring tracker, simulation and host actions
//! - `tuning`: Data-driven game balance
//! - `catalog`: Item definitions and event themes
//! - `settings`: Player-facing spawn/fall speed presets

pub mod catalog;
pub mod game;
pub mod logging;
pub mod settings;
pub mod sim;
pub mod tracking;
pub mod tuning;
#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use catalog::{Catalog, ItemConfig, ItemId, ItemKind, Theme};
pub use game::{DetectionSource, FrameInput, Game, Standing};
pub use settings::{FallSpeed, GameplayModifiers, Settings, SpawnRate};
pub use tuning::{BalanceProfile, Tuning, TuningError};

use glam::Vec2;

/// Game-wide constants that are structural rather than tunable
pub mod consts {
    /// Fixed number of player slots
    pub const MAX_PLAYERS: usize = 4;
    pub const MAX_HP: f32 = 100.0;
    pub const MAX_SUGAR: f32 = 100.0;

    /// Diet balance range (negative = healthy, positive = junk)
    pub const BALANCE_MIN: i32 = -50;
    pub const BALANCE_MAX: i32 = 50;

    /// Marks handed to eliminated players, keyed by `id % 4`
    pub const LOSER_MARKS: [&str; 4] = ["😷", "🐷", "🤐", "💀"];

    /// Pause toggles are ignored for this many frames after a scene action
    pub const PAUSE_LOCK_FRAMES: u32 = 20;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    Vec2::new(ax, ay).distance(Vec2::new(bx, by))
}
