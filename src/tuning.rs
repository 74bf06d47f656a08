//! Data-driven game balance
//!
//! Every threshold, window length and multiplier the tracker and the
//! simulation read. Hosts may override any subset from JSON; missing fields
//! keep the shipped defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::MAX_PLAYERS;

/// Errors raised while loading or validating a tuning override
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`{field}` must be greater than zero")]
    ZeroField { field: &'static str },
    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("balance table needs {expected} rows, got {actual}")]
    BalanceRows { expected: usize, actual: usize },
}

/// Per-active-player-count difficulty adjustments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceProfile {
    pub trap_weight_multiplier: f32,
    pub fall_speed_multiplier: f32,
}

impl BalanceProfile {
    pub const fn new(trap_weight_multiplier: f32, fall_speed_multiplier: f32) -> Self {
        Self {
            trap_weight_multiplier,
            fall_speed_multiplier,
        }
    }
}

/// Rows for 1, 2, 3 and 4 active players
pub const DEFAULT_BALANCE: [BalanceProfile; MAX_PLAYERS] = [
    BalanceProfile::new(1.0, 1.0),
    BalanceProfile::new(0.92, 1.06),
    BalanceProfile::new(0.86, 1.12),
    BalanceProfile::new(0.8, 1.2),
];

/// All gameplay and tracking constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Tuning {
    // === Mouth / tracking ===
    pub mouth_open_threshold: f32,
    /// Pickup radius in pixels
    pub mouth_radius: f32,
    pub tracking_max_distance: f32,
    pub tracking_lost_grace_frames: u32,
    pub tracking_merge_distance: f32,
    pub tracking_candidate_merge_distance: f32,
    pub tracking_candidate_min_distance: f32,
    pub tracking_new_player_frames: u32,
    pub tracking_candidate_max_age: u32,
    /// Max-distance relaxation for slots that are currently inactive
    pub tracking_inactive_relax: f32,

    // === Hunger / level ===
    pub hunger_base_decay: f32,
    pub hunger_level_decay: f32,
    pub level_score_step: u64,

    // === Spawning ===
    pub spawn_base_interval: u32,
    pub spawn_min_interval: u32,
    pub spawn_level_speedup: u32,
    pub spawn_player_factor: f32,

    // === Personal windows ===
    pub fever_frames: u32,
    pub shield_frames: u32,
    pub mask_frames: u32,
    pub sunglasses_frames: u32,
    pub healthy_streak_for_sunglasses: u32,
    pub dizzy_frames: u32,
    /// Shield frames consumed per blocked trap
    pub shield_depletion_frames: u32,

    // === Kiss gag ===
    pub kiss_cooldown_frames: u32,

    // === Storm / match ===
    pub storm_interval_frames: u32,
    pub storm_duration_frames: u32,
    pub storm_spawn_multiplier: f32,
    pub storm_score_multiplier: f32,
    pub match_duration_frames: u32,
    pub endgame_duration_frames: u32,
    pub endgame_score_multiplier: f32,
    pub endgame_trap_weight_multiplier: f32,

    // === Power-ups ===
    pub powerup_slow_frames: u32,
    pub powerup_magnet_frames: u32,
    pub powerup_reflect_frames: u32,
    pub powerup_magnet_multiplier: f32,
    pub powerup_slow_fall_multiplier: f32,

    // === Combo rewards ===
    pub combo_score_boost_frames: u32,
    pub combo_score_boost_multiplier: f32,
    pub combo_shield_frames: u32,
    pub combo_fever_frames: u32,

    // === Audience ===
    pub audience_interval_frames: u32,
    pub audience_quake_frames: u32,
    pub audience_sugar_boost: f32,

    // === Trap visuals ===
    pub poop_storm_frames: u32,
    pub trap_flash_frames: u32,
    pub bomb_shake_frames: u32,

    // === Surprise events ===
    pub surprise_interval_frames: u32,
    pub surprise_duration_frames: u32,
    pub surprise_scare_frames: u32,
    pub surprise_freeze_frames: u32,
    pub surprise_golden_multiplier: f32,
    pub surprise_trap_multiplier: f32,
    pub drop_speed_multiplier: f32,

    /// Balance rows indexed by `active players - 1`
    pub balance_by_players: Vec<BalanceProfile>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            mouth_open_threshold: 0.05,
            mouth_radius: 50.0,
            tracking_max_distance: 0.2,
            tracking_lost_grace_frames: 18,
            tracking_merge_distance: 0.06,
            tracking_candidate_merge_distance: 0.08,
            tracking_candidate_min_distance: 0.12,
            tracking_new_player_frames: 12,
            tracking_candidate_max_age: 30,
            tracking_inactive_relax: 1.6,

            hunger_base_decay: 0.06,
            hunger_level_decay: 0.012,
            level_score_step: 1500,

            spawn_base_interval: 52,
            spawn_min_interval: 9,
            spawn_level_speedup: 3,
            spawn_player_factor: 0.25,

            fever_frames: 240,
            shield_frames: 180,
            mask_frames: 120,
            sunglasses_frames: 240,
            healthy_streak_for_sunglasses: 3,
            dizzy_frames: 180,
            shield_depletion_frames: 60,

            kiss_cooldown_frames: 90,

            storm_interval_frames: 1800,
            storm_duration_frames: 300,
            storm_spawn_multiplier: 0.6,
            storm_score_multiplier: 1.5,
            match_duration_frames: 10800,
            endgame_duration_frames: 600,
            endgame_score_multiplier: 2.0,
            endgame_trap_weight_multiplier: 1.6,

            powerup_slow_frames: 240,
            powerup_magnet_frames: 240,
            powerup_reflect_frames: 240,
            powerup_magnet_multiplier: 1.35,
            powerup_slow_fall_multiplier: 0.55,

            combo_score_boost_frames: 300,
            combo_score_boost_multiplier: 1.1,
            combo_shield_frames: 120,
            combo_fever_frames: 180,

            audience_interval_frames: 600,
            audience_quake_frames: 90,
            audience_sugar_boost: 20.0,

            poop_storm_frames: 180,
            trap_flash_frames: 18,
            bomb_shake_frames: 22,

            surprise_interval_frames: 1200,
            surprise_duration_frames: 180,
            surprise_scare_frames: 120,
            surprise_freeze_frames: 90,
            surprise_golden_multiplier: 4.0,
            surprise_trap_multiplier: 1.5,
            drop_speed_multiplier: 1.25,

            balance_by_players: DEFAULT_BALANCE.to_vec(),
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would divide by zero or invert the game's rules
    pub fn validate(&self) -> Result<(), TuningError> {
        let nonzero = [
            ("levelScoreStep", self.level_score_step),
            ("spawnMinInterval", u64::from(self.spawn_min_interval)),
            ("stormIntervalFrames", u64::from(self.storm_interval_frames)),
            ("surpriseIntervalFrames", u64::from(self.surprise_interval_frames)),
            ("matchDurationFrames", u64::from(self.match_duration_frames)),
        ];
        for (field, value) in nonzero {
            if value == 0 {
                return Err(TuningError::ZeroField { field });
            }
        }

        let non_negative = [
            ("mouthRadius", self.mouth_radius),
            ("spawnPlayerFactor", self.spawn_player_factor),
            ("stormSpawnMultiplier", self.storm_spawn_multiplier),
            ("stormScoreMultiplier", self.storm_score_multiplier),
            ("endgameScoreMultiplier", self.endgame_score_multiplier),
            ("endgameTrapWeightMultiplier", self.endgame_trap_weight_multiplier),
            ("powerupMagnetMultiplier", self.powerup_magnet_multiplier),
            ("powerupSlowFallMultiplier", self.powerup_slow_fall_multiplier),
            ("comboScoreBoostMultiplier", self.combo_score_boost_multiplier),
            ("surpriseGoldenMultiplier", self.surprise_golden_multiplier),
            ("surpriseTrapMultiplier", self.surprise_trap_multiplier),
            ("dropSpeedMultiplier", self.drop_speed_multiplier),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(TuningError::Negative { field, value });
            }
        }

        if self.balance_by_players.len() != MAX_PLAYERS {
            return Err(TuningError::BalanceRows {
                expected: MAX_PLAYERS,
                actual: self.balance_by_players.len(),
            });
        }
        Ok(())
    }

    /// Balance row for the given number of active players (clamped to 1..=4)
    pub fn balance_for(&self, active_players: usize) -> BalanceProfile {
        let idx = active_players.clamp(1, MAX_PLAYERS) - 1;
        self.balance_by_players
            .get(idx)
            .or_else(|| self.balance_by_players.first())
            .copied()
            .unwrap_or(DEFAULT_BALANCE[0])
    }

    /// Level for a given cumulative score: `1 + floor(total / step)`
    pub fn level_for_score(&self, total_score: u64) -> u32 {
        let step = self.level_score_step.max(1);
        (1 + total_score / step).min(u64::from(u32::MAX)) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_balance_table_monotonic() {
        let tuning = Tuning::default();
        let one = tuning.balance_for(1);
        let four = tuning.balance_for(4);
        assert!(four.trap_weight_multiplier < one.trap_weight_multiplier);
        assert!(four.fall_speed_multiplier > one.fall_speed_multiplier);
    }

    #[test]
    fn test_balance_for_clamps_count() {
        let tuning = Tuning::default();
        assert_eq!(tuning.balance_for(0), tuning.balance_for(1));
        assert_eq!(tuning.balance_for(9), tuning.balance_for(4));
    }

    #[test]
    fn test_partial_json_override() {
        let tuning = Tuning::from_json(r#"{ "mouthRadius": 64, "trackingNewPlayerFrames": 4 }"#)
            .expect("valid override");
        assert_eq!(tuning.mouth_radius, 64.0);
        assert_eq!(tuning.tracking_new_player_frames, 4);
        assert_eq!(tuning.level_score_step, 1500);
    }

    #[test]
    fn test_rejects_zero_level_step() {
        let err = Tuning::from_json(r#"{ "levelScoreStep": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::ZeroField { field: "levelScoreStep" }));
    }

    #[test]
    fn test_rejects_short_balance_table() {
        let err = Tuning::from_json(
            r#"{ "balanceByPlayers": [{ "trapWeightMultiplier": 1.0, "fallSpeedMultiplier": 1.0 }] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, TuningError::BalanceRows { expected: 4, actual: 1 }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(Tuning::from_json("{"), Err(TuningError::Json(_))));
    }

    #[test]
    fn test_level_for_score() {
        let tuning = Tuning::default();
        assert_eq!(tuning.level_for_score(0), 1);
        assert_eq!(tuning.level_for_score(1499), 1);
        assert_eq!(tuning.level_for_score(1500), 2);
        assert_eq!(tuning.level_for_score(4600), 4);
    }
}
