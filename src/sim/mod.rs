//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same state, tuning, catalog and
//! random sequence, a tick always produces the same result:
//! - One call to `tick` is one frame
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (by slot index, items back-to-front)
//! - No rendering, audio or platform dependencies

pub mod effects;
pub mod events;
pub mod hit;
pub mod rng;
pub mod sfx;
pub mod spawn;
pub mod state;
pub mod tick;

#[cfg(test)]
mod properties;

pub use effects::{EffectAction, ItemEffect, Window, effect_for};
pub use hit::{HitOutcome, apply_player_hit};
pub use rng::{RandomSource, ScriptedRng};
pub use sfx::{SfxEvent, SfxKey};
pub use state::{FallingItem, FloatText, GameState, PlayerSlot, PoopSplat, Scene, SurpriseKind};
pub use tick::{TickContext, tick};
