//! Fixed timestep simulation tick
//!
//! Advances the match by exactly one frame. Step order is significant: the
//! schedule runs before timers decay, spawning happens before physics, and
//! consumption resolves after items have moved.

use super::events::{decay_global_timers, roll_audience_event, run_schedule, update_kiss_gag};
use super::hit::apply_player_hit;
use super::rng::RandomSource;
use super::spawn::spawn_items;
use super::state::{GameState, Scene};
use crate::catalog::{Catalog, Theme};
use crate::distance;
use crate::settings::GameplayModifiers;
use crate::tuning::Tuning;

/// Items are culled once this far below the bottom edge
const OFFSCREEN_MARGIN: f32 = 40.0;

/// Read-only inputs shared by every tick
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub tuning: &'a Tuning,
    pub catalog: &'a Catalog,
    pub modifiers: GameplayModifiers,
}

impl<'a> TickContext<'a> {
    pub fn new(tuning: &'a Tuning, catalog: &'a Catalog, modifiers: GameplayModifiers) -> Self {
        Self {
            tuning,
            catalog,
            modifiers,
        }
    }

    pub fn theme(&self) -> Theme {
        self.catalog.theme
    }
}

/// Advance the game state by one tick
///
/// No-op unless the scene is `Playing` and the game is not paused.
pub fn tick(state: &mut GameState, ctx: &TickContext, rng: &mut dyn RandomSource, width: f32, height: f32) {
    if state.scene != Scene::Playing || state.is_paused {
        return;
    }
    let tuning = ctx.tuning;

    state.frame += 1;
    run_schedule(state, ctx, rng, width, height);

    state.level = tuning.level_for_score(state.total_score());

    // Hunger, personal timers, dizzy jitter
    let hunger = tuning.hunger_base_decay + state.level as f32 * tuning.hunger_level_decay;
    for p in state.players.iter_mut().filter(|p| p.active) {
        p.add_hp(-hunger);
        p.decay_timers();
        if p.hp > 0.0 {
            p.survival_frames += 1;
        }
        if p.dizzy_frames > 0 {
            let jitter = (0.002 + (p.dizzy_frames % 6) as f32 * 0.0006).min(0.006);
            p.x = (p.x + (rng.next_f32() - 0.5) * jitter).clamp(0.02, 0.98);
            p.y = (p.y + (rng.next_f32() - 0.5) * jitter).clamp(0.02, 0.98);
        }
        if p.mark_eliminated() {
            log::debug!("P{} starved at frame {}", p.id + 1, state.frame);
        }
    }

    decay_global_timers(state);
    roll_audience_event(state, ctx, rng, width, height);
    update_kiss_gag(state, ctx, width, height);
    spawn_items(state, ctx, rng, width);

    // Falling
    let fall = if state.slow_frames > 0 {
        tuning.powerup_slow_fall_multiplier
    } else {
        1.0
    };
    for item in &mut state.items {
        item.y += item.vy * fall;
    }
    state.items.retain(|item| item.y < height + OFFSCREEN_MARGIN);

    consume_items(state, ctx, rng, width, height);

    for text in &mut state.float_texts {
        text.y -= 1.0;
        text.life -= 1;
    }
    state.float_texts.retain(|text| text.life > 0);
    state.shake_frames = state.shake_frames.saturating_sub(1);

    if state.all_participants_down() {
        state.scene = Scene::GameOver;
    }
}

/// Back-to-front pass; the first eligible slot in index order wins an item
fn consume_items(state: &mut GameState, ctx: &TickContext, rng: &mut dyn RandomSource, width: f32, height: f32) {
    let mut i = state.items.len();
    while i > 0 {
        i -= 1;
        let Some(item) = state.items.get(i).cloned() else {
            continue;
        };

        let eater = state.players.iter().position(|p| {
            if !p.can_eat() {
                return false;
            }
            let (mut px, mut py) = (p.x * width, p.y * height);
            if p.dizzy_frames > 0 {
                px = width - px;
                py = height - py;
            }
            let radius = if p.magnet_frames > 0 {
                ctx.tuning.mouth_radius * ctx.tuning.powerup_magnet_multiplier
            } else {
                ctx.tuning.mouth_radius
            };
            distance(px, py, item.x, item.y) <= radius
        });

        if let Some(pid) = eater {
            let outcome = apply_player_hit(state, pid, &item, ctx, rng);
            if outcome.cleared_items {
                break;
            }
            state.items.remove(i);
        }
    }
}
