//! Property tests for the simulation and tracker invariants

use proptest::prelude::*;

use super::hit::apply_player_hit;
use super::rng::ScriptedRng;
use super::state::{FallingItem, GameState, Scene};
use super::tick::{TickContext, tick};
use crate::catalog::{Catalog, Theme};
use crate::consts::*;
use crate::settings::GameplayModifiers;
use crate::tracking::{Detection, Tracker};
use crate::tuning::Tuning;

fn assert_clamped(state: &GameState) {
    for p in &state.players {
        assert!((0.0..=MAX_HP).contains(&p.hp), "hp {}", p.hp);
        assert!((0.0..=MAX_SUGAR).contains(&p.sugar), "sugar {}", p.sugar);
        assert!((BALANCE_MIN..=BALANCE_MAX).contains(&p.balance), "balance {}", p.balance);
        assert!(p.max_combo >= p.combo);
    }
}

fn unit() -> impl Strategy<Value = f32> {
    0.0f32..1.0
}

proptest! {
    #[test]
    fn level_is_monotonic_in_score(a in 0u64..10_000_000, b in 0u64..10_000_000) {
        let tuning = Tuning::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(tuning.level_for_score(lo) <= tuning.level_for_score(hi));
        prop_assert_eq!(u64::from(tuning.level_for_score(a)), 1 + a / tuning.level_score_step);
    }

    #[test]
    fn hits_keep_stats_clamped(
        picks in prop::collection::vec(0usize..24, 1..80),
        rolls in prop::collection::vec(unit(), 1..16),
        fever in any::<bool>(),
        shield in 0u32..200,
        reflect in any::<bool>(),
    ) {
        let tuning = Tuning::default();
        let catalog = Catalog::for_theme(Theme::SpringFestivalHorse);
        let ctx = TickContext::new(&tuning, &catalog, GameplayModifiers::default());
        let mut rng = ScriptedRng::new(rolls);
        let mut state = GameState::new();
        state.reset_playing();
        let p = &mut state.players[0];
        p.active = true;
        p.enrolled = true;
        p.fever_frames = if fever { 100 } else { 0 };
        p.shield_frames = shield;
        p.reflect_frames = if reflect { 100 } else { 0 };

        for pick in picks {
            let config = catalog.items[pick % catalog.items.len()];
            let item = FallingItem { config, x: 100.0, y: 100.0, vy: 3.0 };
            apply_player_hit(&mut state, 0, &item, &ctx, &mut rng);
            assert_clamped(&state);
        }
    }

    #[test]
    fn ticks_keep_stats_clamped(
        rolls in prop::collection::vec(unit(), 1..64),
        positions in prop::collection::vec((unit(), unit(), any::<bool>()), MAX_PLAYERS),
        frames in 1usize..400,
    ) {
        let tuning = Tuning::default();
        let catalog = Catalog::for_theme(Theme::SpringFestivalHorse);
        let ctx = TickContext::new(&tuning, &catalog, GameplayModifiers::default());
        let mut rng = ScriptedRng::new(rolls);
        let mut state = GameState::new();
        state.reset_playing();
        for (p, (x, y, open)) in state.players.iter_mut().zip(positions) {
            p.active = true;
            p.enrolled = true;
            p.x = x;
            p.y = y;
            p.mouth_open = open;
        }

        for _ in 0..frames {
            let (frame, level, running) = (state.frame, state.level, state.scene == Scene::Playing);
            let expected_level = tuning.level_for_score(state.total_score());
            tick(&mut state, &ctx, &mut rng, 640.0, 480.0);
            assert_clamped(&state);
            if running {
                prop_assert_eq!(state.frame, frame + 1);
                prop_assert_eq!(state.level, expected_level);
            } else {
                prop_assert_eq!(state.level, level);
            }
        }
    }

    #[test]
    fn tick_is_noop_when_not_running(
        scene in prop_oneof![Just(Scene::Loading), Just(Scene::Intro), Just(Scene::GameOver), Just(Scene::Playing)],
        frame in 0u32..10_000,
        storm in 0u32..300,
        score in 0u64..5_000,
    ) {
        let tuning = Tuning::default();
        let catalog = Catalog::default();
        let ctx = TickContext::new(&tuning, &catalog, GameplayModifiers::default());
        let mut state = GameState::new();
        state.scene = scene;
        state.is_paused = scene == Scene::Playing;
        state.frame = frame;
        state.storm_frames = storm;
        state.players[0].score = score;
        state.players[0].active = true;
        let before = state.clone();

        let mut rng = ScriptedRng::constant(0.5);
        tick(&mut state, &ctx, &mut rng, 640.0, 480.0);

        prop_assert_eq!(state, before);
        prop_assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn tracker_never_loses_enrollment(
        frames in prop::collection::vec(
            prop::collection::vec((unit(), unit(), unit()), 0..6),
            1..60,
        ),
    ) {
        let tuning = Tuning::default();
        let mut tracker = Tracker::new();
        let mut state = GameState::new();
        let mut enrolled_before = 0;

        for raw in frames {
            let detections: Vec<Detection> = raw.into_iter().map(|(x, y, r)| Detection::new(x, y, r)).collect();
            tracker.sync(&mut state.players, &detections, &tuning);
            let enrolled = state.players.iter().filter(|p| p.enrolled).count();
            prop_assert!(enrolled >= enrolled_before);
            prop_assert!(state.players.iter().all(|p| p.enrolled || !p.active));
            enrolled_before = enrolled;
        }
    }
}
