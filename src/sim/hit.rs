//! Item-hit resolution
//!
//! Called once per consumed item. Order: base score and combo, diet side
//! effects, the item's special effect, trap damage (shield, then reflect,
//! then hp), global multipliers, elimination, combo milestones.

use super::effects::{EffectAction, Frames, Window, effect_for};
use super::events::start_surprise;
use super::rng::RandomSource;
use super::sfx::SfxKey;
use super::state::{FallingItem, GameState, PlayerSlot, PoopSplat};
use super::tick::TickContext;
use crate::catalog::ItemKind;
use crate::consts::MAX_HP;

/// Number of splats scattered when a poop storm starts
const POOP_SPLAT_COUNT: usize = 8;

/// What a single hit did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitOutcome {
    /// Score delta after all multipliers (bonus-score effects not included)
    pub gained: i64,
    /// The item wiped every falling item
    pub cleared_items: bool,
    /// Damage was absorbed by the shield
    pub blocked: bool,
}

fn window_mut(player: &mut PlayerSlot, window: Window) -> &mut u32 {
    match window {
        Window::Shield => &mut player.shield_frames,
        Window::Fever => &mut player.fever_frames,
        Window::Magnet => &mut player.magnet_frames,
        Window::Reflect => &mut player.reflect_frames,
        Window::Dizzy => &mut player.dizzy_frames,
        Window::Mask => &mut player.mask_frames,
    }
}

fn scale_floor(value: i64, factor: f64) -> i64 {
    (value as f64 * factor).floor() as i64
}

/// Resolve `item` being eaten by slot `pid`
pub fn apply_player_hit(
    state: &mut GameState,
    pid: usize,
    item: &FallingItem,
    ctx: &TickContext,
    rng: &mut dyn RandomSource,
) -> HitOutcome {
    let tuning = ctx.tuning;
    let config = &item.config;
    let mut outcome = HitOutcome {
        gained: 0,
        cleared_items: false,
        blocked: false,
    };
    state.push_sfx(config.sfx);

    // Base score and combo
    let previous_combo = state.players[pid].combo;
    let mut gained = config.score;
    {
        let player = &mut state.players[pid];
        if player.fever_frames > 0 && gained > 0 {
            gained = scale_floor(gained, 1.5);
        }
        if gained > 0 {
            player.combo += 1;
            gained += i64::from((player.combo * 4).min(40));
        } else {
            player.combo = 0;
        }
        player.max_combo = player.max_combo.max(player.combo);
    }

    // Diet side effects
    match config.kind {
        ItemKind::Healthy => {
            let player = &mut state.players[pid];
            player.add_balance(-6);
            player.add_hp(6.0);
            player.healthy_streak += 1;
            if player.healthy_streak >= tuning.healthy_streak_for_sunglasses {
                player.healthy_streak = 0;
                player.sunglasses_frames = tuning.sunglasses_frames;
                state.float_text("😎", item.x, item.y - 18.0, 0xf5c542, 45, 32.0);
            }
        }
        ItemKind::Junk => {
            let player = &mut state.players[pid];
            player.add_balance(8);
            player.add_sugar(12.0);
            player.healthy_streak = 0;
        }
        ItemKind::Trap => {
            state.players[pid].healthy_streak = 0;
            state.float_text("⚠️", item.x, item.y - 28.0, 0xff6b6b, 30, 24.0);
        }
        ItemKind::Buff => {}
    }

    // Special effect
    let effect = effect_for(config.id);
    for action in effect.actions {
        match *action {
            EffectAction::Heal(amount) => state.players[pid].add_hp(amount),
            EffectAction::FullHeal => state.players[pid].hp = MAX_HP,
            EffectAction::Sugar(delta) => state.players[pid].add_sugar(delta),
            EffectAction::ZeroSugar => state.players[pid].sugar = 0.0,
            EffectAction::BonusScore(bonus) => state.players[pid].add_score(bonus),
            EffectAction::Grant(window, frames) => {
                let len = resolve_frames(frames, window.tuned_frames(tuning));
                *window_mut(&mut state.players[pid], window) = len;
            }
            EffectAction::Extend(window, frames) => {
                let len = resolve_frames(frames, window.tuned_frames(tuning));
                let slot = window_mut(&mut state.players[pid], window);
                *slot = (*slot).max(len);
            }
            EffectAction::ComboFloor(floor) => {
                let player = &mut state.players[pid];
                player.combo = player.combo.max(floor);
                player.max_combo = player.max_combo.max(player.combo);
            }
            EffectAction::SlowMotion => {
                state.slow_frames = state.slow_frames.max(tuning.powerup_slow_frames);
            }
            EffectAction::ClearItems => {
                state.items.clear();
                outcome.cleared_items = true;
            }
            EffectAction::Shake(frames) => {
                let len = resolve_frames(frames, tuning.bomb_shake_frames);
                state.shake_frames = state.shake_frames.max(len);
            }
            EffectAction::Flash => {
                state.trap_flash_frames = state.trap_flash_frames.max(tuning.trap_flash_frames);
            }
            EffectAction::PoopStorm => {
                if state.poop_storm_frames == 0 {
                    state.poop_splats = (0..POOP_SPLAT_COUNT)
                        .map(|_| PoopSplat {
                            x: rng.next_f32(),
                            y: rng.next_f32(),
                            r: 40.0 + rng.next_f32() * 80.0,
                            alpha: 0.18 + rng.next_f32() * 0.18,
                        })
                        .collect();
                }
                state.poop_storm_frames = state.poop_storm_frames.max(tuning.poop_storm_frames);
            }
            EffectAction::Sfx(key) => state.push_sfx(key),
            EffectAction::Banner {
                text,
                color,
                rise,
                life,
                size,
            } => state.float_text(text, item.x, item.y - rise, color, life, size),
            EffectAction::SurpriseChance(chance, kind) => {
                if rng.next_f32() < chance {
                    start_surprise(state, ctx, kind);
                }
            }
        }
    }

    // Trap damage
    if effect.trap_damage > 0.0 {
        state.trap_flash_frames = state.trap_flash_frames.max(tuning.trap_flash_frames);
        state.push_sfx(SfxKey::TrapHit);
        let player = &mut state.players[pid];
        if player.shield_frames > 0 {
            player.shield_frames = player.shield_frames.saturating_sub(tuning.shield_depletion_frames);
            outcome.blocked = true;
            state.push_sfx(SfxKey::TrapBlock);
            state.float_text(format!("P{} BLOCK", pid + 1), item.x, item.y - 22.0, 0x6dd5ff, 28, 18.0);
        } else if player.reflect_frames > 0 {
            gained += effect.trap_damage as i64;
        } else {
            player.add_hp(-effect.trap_damage);
            state.push_sfx(SfxKey::PlayerHurt);
        }
    }

    // Global and personal multipliers compound
    let mut multiplier = 1.0_f64;
    if state.storm_frames > 0 {
        multiplier *= f64::from(tuning.storm_score_multiplier);
    }
    if state.endgame_frames > 0 {
        multiplier *= f64::from(tuning.endgame_score_multiplier);
    }
    if state.players[pid].score_boost_frames > 0 {
        multiplier *= f64::from(tuning.combo_score_boost_multiplier);
    }
    if gained > 0 && multiplier != 1.0 {
        gained = scale_floor(gained, multiplier);
    }

    let player = &mut state.players[pid];
    player.add_score(gained);
    player.mark_eliminated();

    // Combo milestones, each only on the hit that crosses it
    let combo = player.combo;
    if combo > 0 && combo != previous_combo && (combo == 3 || combo % 5 == 0) {
        state.push_sfx(SfxKey::ComboUp);
    }
    if combo == 5 && previous_combo < 5 {
        let player = &mut state.players[pid];
        player.score_boost_frames = player.score_boost_frames.max(tuning.combo_score_boost_frames);
        state.float_text("✨", item.x, item.y - 20.0, 0xffe066, 40, 28.0);
    }
    if combo == 10 && previous_combo < 10 {
        let player = &mut state.players[pid];
        player.shield_frames = player.shield_frames.max(tuning.combo_shield_frames);
        state.float_text("🛡️", item.x, item.y - 20.0, 0x6dd5ff, 40, 26.0);
    }
    if combo == 15 && previous_combo < 15 {
        let player = &mut state.players[pid];
        player.fever_frames = player.fever_frames.max(tuning.combo_fever_frames);
        state.float_text("🔥", item.x, item.y - 20.0, 0xff8c42, 40, 26.0);
    }

    let (text, color) = if gained >= 0 {
        (format!("P{} +{}", pid + 1, gained), 0x2ecc71)
    } else {
        (format!("P{} {}", pid + 1, gained), 0xe74c3c)
    };
    state.float_text(text, item.x, item.y, color, 35, 20.0);

    outcome.gained = gained;
    outcome
}

fn resolve_frames(frames: Frames, tuned: u32) -> u32 {
    match frames {
        Frames::Tuned => tuned,
        Frames::Fixed(n) => n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, ItemId, Theme};
    use crate::settings::GameplayModifiers;
    use crate::sim::rng::ScriptedRng;
    use crate::sim::state::SurpriseKind;
    use crate::tuning::Tuning;

    struct Fixture {
        tuning: Tuning,
        catalog: Catalog,
        state: GameState,
    }

    impl Fixture {
        fn new() -> Self {
            let mut state = GameState::new();
            state.reset_playing();
            state.players[0].active = true;
            state.players[0].enrolled = true;
            Self {
                tuning: Tuning::default(),
                catalog: Catalog::for_theme(Theme::SpringFestivalHorse),
                state,
            }
        }

        fn falling(&self, id: ItemId) -> FallingItem {
            FallingItem {
                config: *self.catalog.get(id).expect("item in catalog"),
                x: 100.0,
                y: 200.0,
                vy: 3.0,
            }
        }

        fn hit(&mut self, id: ItemId, rng: &mut ScriptedRng) -> HitOutcome {
            let item = self.falling(id);
            let ctx = TickContext::new(&self.tuning, &self.catalog, GameplayModifiers::default());
            apply_player_hit(&mut self.state, 0, &item, &ctx, rng)
        }

        fn has_sfx(&self, key: SfxKey) -> bool {
            self.state.sfx_queue.iter().any(|e| e.key == key)
        }
    }

    #[test]
    fn test_first_apple_scores_with_combo_bonus() {
        let mut fx = Fixture::new();
        fx.state.players[0].hp = 50.0;
        let outcome = fx.hit(ItemId::Apple, &mut ScriptedRng::constant(0.5));
        let p = &fx.state.players[0];
        assert_eq!(outcome.gained, 14);
        assert_eq!(p.combo, 1);
        assert_eq!(p.score, 14);
        assert_eq!(p.hp, 56.0);
        assert_eq!(p.balance, -6);
        assert!(fx.has_sfx(SfxKey::ItemHealthy));
    }

    #[test]
    fn test_fever_multiplies_positive_score() {
        let mut fx = Fixture::new();
        fx.state.players[0].fever_frames = 10;
        // burger 45 * 1.5 = 67, combo bonus 4
        let outcome = fx.hit(ItemId::Burger, &mut ScriptedRng::constant(0.5));
        assert_eq!(outcome.gained, 71);
        assert_eq!(fx.state.players[0].sugar, 12.0);
    }

    #[test]
    fn test_shield_absorbs_bomb() {
        let mut fx = Fixture::new();
        fx.state.players[0].shield_frames = 60;
        fx.state.players[0].combo = 4;
        let outcome = fx.hit(ItemId::Bomb, &mut ScriptedRng::constant(0.5));
        let p = &fx.state.players[0];
        assert!(outcome.blocked);
        assert_eq!(p.shield_frames, 0);
        assert_eq!(p.hp, MAX_HP);
        assert_eq!(p.combo, 0);
        assert_eq!(p.max_combo, 0);
        assert!(fx.has_sfx(SfxKey::TrapBlock));
        assert!(!fx.has_sfx(SfxKey::PlayerHurt));
        assert!(fx.state.float_texts.iter().any(|t| t.text == "P1 BLOCK"));
        assert_eq!(fx.state.shake_frames, fx.tuning.bomb_shake_frames);
    }

    #[test]
    fn test_shield_absorbs_partially() {
        let mut fx = Fixture::new();
        fx.state.players[0].shield_frames = 150;
        fx.hit(ItemId::Poop, &mut ScriptedRng::constant(0.5));
        assert_eq!(fx.state.players[0].shield_frames, 90);
        fx.hit(ItemId::Rotten, &mut ScriptedRng::constant(0.5));
        assert_eq!(fx.state.players[0].shield_frames, 30);
        assert_eq!(fx.state.players[0].hp, MAX_HP);
    }

    #[test]
    fn test_reflect_turns_damage_into_score() {
        let mut fx = Fixture::new();
        fx.state.players[0].reflect_frames = 30;
        // bee: -18 + 12 reflected = -6
        let outcome = fx.hit(ItemId::Bee, &mut ScriptedRng::constant(0.5));
        assert_eq!(outcome.gained, -6);
        assert_eq!(fx.state.players[0].hp, MAX_HP);
        assert_eq!(fx.state.players[0].score, 0);
        assert_eq!(fx.state.players[0].mask_frames, fx.tuning.mask_frames);
    }

    #[test]
    fn test_trap_damage_clamps_hp_and_eliminates() {
        let mut fx = Fixture::new();
        fx.state.players[0].hp = 10.0;
        fx.hit(ItemId::Bomb, &mut ScriptedRng::constant(0.5));
        let p = &fx.state.players[0];
        assert_eq!(p.hp, 0.0);
        assert!(p.eliminated);
        assert_eq!(p.loser_mark, Some(crate::consts::LOSER_MARKS[0]));
        assert!(fx.has_sfx(SfxKey::PlayerHurt));
        assert!(fx.has_sfx(SfxKey::Explosion));
    }

    #[test]
    fn test_multipliers_compound() {
        let mut fx = Fixture::new();
        fx.state.storm_frames = 5;
        fx.state.endgame_frames = 5;
        fx.state.players[0].score_boost_frames = 5;
        // apple: 14 * 1.5 * 2 * 1.1 = 46.2
        let outcome = fx.hit(ItemId::Apple, &mut ScriptedRng::constant(0.5));
        assert_eq!(outcome.gained, 46);
    }

    #[test]
    fn test_golden_full_heal_and_bonus() {
        let mut fx = Fixture::new();
        fx.state.players[0].hp = 20.0;
        fx.state.players[0].sugar = 70.0;
        let outcome = fx.hit(ItemId::Golden, &mut ScriptedRng::constant(0.5));
        let p = &fx.state.players[0];
        assert_eq!(p.hp, MAX_HP);
        assert_eq!(p.sugar, 0.0);
        assert_eq!(outcome.gained, 154);
        assert_eq!(p.score, 300 + 154);
    }

    #[test]
    fn test_healthy_streak_grants_sunglasses() {
        let mut fx = Fixture::new();
        for _ in 0..3 {
            fx.hit(ItemId::Broccoli, &mut ScriptedRng::constant(0.5));
        }
        let p = &fx.state.players[0];
        assert_eq!(p.healthy_streak, 0);
        assert_eq!(p.sunglasses_frames, fx.tuning.sunglasses_frames);
        assert!(fx.state.float_texts.iter().any(|t| t.text == "😎"));
    }

    #[test]
    fn test_junk_breaks_healthy_streak() {
        let mut fx = Fixture::new();
        fx.hit(ItemId::Apple, &mut ScriptedRng::constant(0.5));
        fx.hit(ItemId::Apple, &mut ScriptedRng::constant(0.5));
        fx.hit(ItemId::Candy, &mut ScriptedRng::constant(0.5));
        assert_eq!(fx.state.players[0].healthy_streak, 0);
        assert_eq!(fx.state.players[0].sunglasses_frames, 0);
        assert_eq!(fx.state.players[0].balance, -4);
    }

    #[test]
    fn test_combo_milestones_fire_once() {
        let mut fx = Fixture::new();
        fx.state.players[0].combo = 4;
        fx.hit(ItemId::Candy, &mut ScriptedRng::constant(0.5));
        assert_eq!(fx.state.players[0].combo, 5);
        assert_eq!(fx.state.players[0].score_boost_frames, fx.tuning.combo_score_boost_frames);
        assert!(fx.has_sfx(SfxKey::ComboUp));

        fx.state.players[0].score_boost_frames = 0;
        fx.state.sfx_queue.clear();
        fx.state.players[0].combo = 9;
        fx.hit(ItemId::Apple, &mut ScriptedRng::constant(0.5));
        assert_eq!(fx.state.players[0].combo, 10);
        assert_eq!(fx.state.players[0].shield_frames, fx.tuning.combo_shield_frames);
        assert_eq!(fx.state.players[0].score_boost_frames, 0);

        fx.state.players[0].combo = 14;
        fx.hit(ItemId::Apple, &mut ScriptedRng::constant(0.5));
        assert_eq!(fx.state.players[0].fever_frames, fx.tuning.combo_fever_frames);
    }

    #[test]
    fn test_clear_wipes_items() {
        let mut fx = Fixture::new();
        let apple = fx.falling(ItemId::Apple);
        fx.state.items.push(apple.clone());
        fx.state.items.push(apple);
        let outcome = fx.hit(ItemId::Clear, &mut ScriptedRng::constant(0.5));
        assert!(outcome.cleared_items);
        assert!(fx.state.items.is_empty());
    }

    #[test]
    fn test_poop_storm_scatters_splats_once() {
        let mut fx = Fixture::new();
        fx.hit(ItemId::Poop, &mut ScriptedRng::constant(0.25));
        assert_eq!(fx.state.poop_splats.len(), POOP_SPLAT_COUNT);
        assert_eq!(fx.state.poop_splats[0].r, 60.0);
        assert_eq!(fx.state.poop_storm_frames, fx.tuning.poop_storm_frames);

        let mut rng = ScriptedRng::constant(0.9);
        fx.hit(ItemId::Poop, &mut rng);
        assert_eq!(fx.state.poop_splats[0].r, 60.0);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_red_packet_can_start_golden_rush() {
        let mut fx = Fixture::new();
        fx.hit(ItemId::RedPacket, &mut ScriptedRng::constant(0.9));
        assert_eq!(fx.state.surprise, None);
        fx.hit(ItemId::RedPacket, &mut ScriptedRng::constant(0.1));
        assert_eq!(fx.state.surprise, Some(SurpriseKind::GoldenRush));
        assert_eq!(fx.state.surprise_frames, fx.tuning.surprise_duration_frames);
    }

    #[test]
    fn test_themed_floors() {
        let mut fx = Fixture::new();
        fx.state.players[0].shield_frames = 120;
        fx.hit(ItemId::Dumpling, &mut ScriptedRng::constant(0.5));
        assert_eq!(fx.state.players[0].shield_frames, 120);
        fx.hit(ItemId::HorseCake, &mut ScriptedRng::constant(0.5));
        assert_eq!(fx.state.players[0].magnet_frames, 180);
    }
}
