//! Item spawning
//!
//! Spawn cadence speeds up with level, active players and storms; the item
//! drawn is a weighted pick whose trap and golden weights react to the
//! current balance row, endgame and surprise events.

use super::rng::RandomSource;
use super::state::{FallingItem, GameState, SurpriseKind};
use super::tick::TickContext;
use crate::catalog::{ItemConfig, ItemId, ItemKind};
use crate::tuning::{BalanceProfile, Tuning};

/// Items spawned per spawn tick
pub fn burst_size(active_players: usize) -> usize {
    if active_players >= 4 {
        3
    } else if active_players >= 2 {
        2
    } else {
        1
    }
}

/// Ticks between spawns for the current state
pub fn spawn_interval(state: &GameState, ctx: &TickContext, active_players: usize) -> u32 {
    let tuning = ctx.tuning;
    let min = tuning.spawn_min_interval.max(1);

    let base = tuning
        .spawn_base_interval
        .saturating_sub(state.level.saturating_mul(tuning.spawn_level_speedup))
        .max(min);
    let player_divisor = 1.0 + active_players.saturating_sub(1) as f32 * tuning.spawn_player_factor;
    let mut interval = ((base as f32 / player_divisor).floor() as u32).max(min);

    interval = ((interval as f32 * ctx.modifiers.spawn_interval_scale).floor() as u32).max(min);

    if state.storm_frames > 0 {
        interval = ((interval as f32 * tuning.storm_spawn_multiplier).floor() as u32).max(min);
    }
    interval
}

/// Spawn weight of an item under current conditions
pub fn item_weight(item: &ItemConfig, state: &GameState, tuning: &Tuning, balance: BalanceProfile) -> f32 {
    let mut weight = item.weight;
    if state.surprise == Some(SurpriseKind::GoldenRush) && item.id == ItemId::Golden {
        weight = (weight * tuning.surprise_golden_multiplier).floor().max(1.0);
    }
    if item.kind == ItemKind::Trap {
        weight = (weight * balance.trap_weight_multiplier).floor().max(1.0);
        if state.endgame_frames > 0 {
            weight = (weight * tuning.endgame_trap_weight_multiplier).floor().max(1.0);
        }
        if state.surprise == Some(SurpriseKind::TrapScare) {
            weight = (weight * tuning.surprise_trap_multiplier).floor().max(1.0);
        }
    }
    weight
}

/// Index picked by walking the cumulative weights with one roll
pub fn weighted_pick(weights: &[f32], rng: &mut dyn RandomSource) -> usize {
    let total: f32 = weights.iter().sum();
    let mut r = rng.next_f32() * total;
    for (idx, weight) in weights.iter().enumerate() {
        r -= weight;
        if r <= 0.0 {
            return idx;
        }
    }
    0
}

/// Spawn a burst of items if this tick is a spawn tick
pub fn spawn_items(state: &mut GameState, ctx: &TickContext, rng: &mut dyn RandomSource, width: f32) {
    let active = state.eligible_count();
    if active == 0 || ctx.catalog.items.is_empty() {
        return;
    }
    let tuning = ctx.tuning;
    let balance = tuning.balance_for(active);

    let interval = spawn_interval(state, ctx, active);
    if state.frame % interval != 0 {
        return;
    }

    let weights: Vec<f32> = ctx
        .catalog
        .items
        .iter()
        .map(|item| item_weight(item, state, tuning, balance))
        .collect();
    let drop_multiplier = if state.surprise == Some(SurpriseKind::DoubleDrop) {
        tuning.drop_speed_multiplier
    } else {
        1.0
    };

    for i in 0..burst_size(active) {
        let config = ctx.catalog.items[weighted_pick(&weights, rng)];
        let x = rng.next_f32() * (width - 60.0) + 30.0;
        let y = -30.0 - i as f32 * 22.0;
        let vy = (2.8 + state.level as f32 * 0.45 + rng.next_f32() * 0.7)
            * balance.fall_speed_multiplier
            * drop_multiplier
            * ctx.modifiers.fall_speed_scale;
        state.items.push(FallingItem { config, x, y, vy });
    }
}
