//! Scheduled and random global events
//!
//! Surprises, storms and the endgame are keyed on the frame counter; the
//! audience event fires whenever its cooldown runs out. The kiss gag is a
//! pure side effect of two faces getting close.

use super::rng::RandomSource;
use super::sfx::SfxKey;
use super::state::{GameState, Scene, SurpriseKind};
use super::tick::TickContext;
use crate::consts::MAX_PLAYERS;
use crate::distance;

/// Map a uniform roll onto the four surprise kinds (25% each)
pub fn surprise_from_roll(roll: f32) -> SurpriseKind {
    if roll < 0.25 {
        SurpriseKind::GoldenRush
    } else if roll < 0.5 {
        SurpriseKind::DoubleDrop
    } else if roll < 0.75 {
        SurpriseKind::TrapScare
    } else {
        SurpriseKind::Freeze
    }
}

/// Start a surprise window (also used by the red packet item)
pub fn start_surprise(state: &mut GameState, ctx: &TickContext, kind: SurpriseKind) {
    state.surprise = Some(kind);
    state.surprise_frames = state.surprise_frames.max(ctx.tuning.surprise_duration_frames);
}

/// Frame-keyed events: surprise, storm, endgame and match end
pub fn run_schedule(state: &mut GameState, ctx: &TickContext, rng: &mut dyn RandomSource, width: f32, height: f32) {
    let tuning = ctx.tuning;
    let frame = state.frame;

    if frame > 0 && frame % tuning.surprise_interval_frames.max(1) == 0 {
        let kind = surprise_from_roll(rng.next_f32());
        state.surprise = Some(kind);
        if kind == SurpriseKind::Freeze {
            state.slow_frames = state.slow_frames.max(tuning.surprise_freeze_frames);
        }
        state.surprise_frames = tuning.surprise_duration_frames;
        let banner = ctx.theme().surprise_banner(kind);
        state.float_text(banner, width * 0.5, height * 0.18, 0xffffff, 45, 34.0);
        if kind == SurpriseKind::TrapScare {
            state.trap_flash_frames = state.trap_flash_frames.max(tuning.surprise_scare_frames);
        }
        log::debug!("Surprise {:?} at frame {}", kind, frame);
    }

    if frame > 0 && frame % tuning.storm_interval_frames.max(1) == 0 {
        state.storm_frames = state.storm_frames.max(tuning.storm_duration_frames);
        log::debug!("Storm at frame {}", frame);
    }

    let endgame_start = tuning
        .match_duration_frames
        .saturating_sub(tuning.endgame_duration_frames);
    if !state.endgame_triggered && frame >= endgame_start {
        state.endgame_triggered = true;
        state.endgame_frames = tuning.endgame_duration_frames;
        log::debug!("Endgame window opens at frame {}", frame);
    }

    if frame >= tuning.match_duration_frames {
        state.scene = Scene::GameOver;
    }
}

/// Count global windows down, tearing down their decorations when they end
pub fn decay_global_timers(state: &mut GameState) {
    state.storm_frames = state.storm_frames.saturating_sub(1);
    state.endgame_frames = state.endgame_frames.saturating_sub(1);
    state.slow_frames = state.slow_frames.saturating_sub(1);
    state.audience_cooldown_frames = state.audience_cooldown_frames.saturating_sub(1);
    if state.poop_storm_frames > 0 {
        state.poop_storm_frames -= 1;
        if state.poop_storm_frames == 0 {
            state.poop_splats.clear();
        }
    }
    state.trap_flash_frames = state.trap_flash_frames.saturating_sub(1);
    if state.surprise_frames > 0 {
        state.surprise_frames -= 1;
        if state.surprise_frames == 0 {
            state.surprise = None;
        }
    }
}

/// Audience event: storm, quake or a sugar rush for everyone
pub fn roll_audience_event(state: &mut GameState, ctx: &TickContext, rng: &mut dyn RandomSource, width: f32, height: f32) {
    if state.audience_cooldown_frames > 0 {
        return;
    }
    let tuning = ctx.tuning;
    let (x, y) = (width * 0.5, height * 0.22);
    let roll = rng.next_f32();
    if roll < 0.34 {
        state.storm_frames = state.storm_frames.max(tuning.storm_duration_frames);
        state.float_text("🌪️", x, y, 0xb9f2ff, 45, 34.0);
    } else if roll < 0.67 {
        state.shake_frames = state.shake_frames.max(tuning.audience_quake_frames);
        state.float_text("💥", x, y, 0xffd166, 45, 34.0);
    } else {
        for p in state.players.iter_mut().filter(|p| p.enrolled) {
            p.add_sugar(tuning.audience_sugar_boost);
        }
        state.float_text("🍬", x, y, 0xff7ad9, 45, 34.0);
    }
    state.audience_cooldown_frames = tuning.audience_interval_frames;
}

/// Close-range kiss gag between every pair of active players
pub fn update_kiss_gag(state: &mut GameState, ctx: &TickContext, width: f32, height: f32) {
    let tuning = ctx.tuning;
    for i in 0..MAX_PLAYERS {
        for j in (i + 1)..MAX_PLAYERS {
            let cooldown = state.kiss_cooldowns[i][j].saturating_sub(1);
            state.kiss_cooldowns[i][j] = cooldown;
            state.kiss_cooldowns[j][i] = cooldown;

            let (p1, p2) = (&state.players[i], &state.players[j]);
            if !p1.active || !p2.active {
                continue;
            }
            let dist = distance(p1.x * width, p1.y * height, p2.x * width, p2.y * height);
            if dist <= tuning.mouth_radius * 2.0 && cooldown == 0 {
                let mid_x = (p1.x + p2.x) * 0.5 * width;
                let mid_y = (p1.y + p2.y) * 0.5 * height - 20.0;
                state.kiss_cooldowns[i][j] = tuning.kiss_cooldown_frames;
                state.kiss_cooldowns[j][i] = tuning.kiss_cooldown_frames;
                state.shake_frames = state.shake_frames.max(12);
                state.push_sfx(SfxKey::Kiss);
                state.float_text("💋", mid_x, mid_y, 0xff86c8, 50, 46.0);
            }
        }
    }
}
