//! Sound cue queue entries
//!
//! The simulation only appends; the audio layer drains once per frame.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SfxKey {
    UiStart,
    UiRestart,
    UiPauseOn,
    UiPauseOff,
    ItemHealthy,
    ItemJunk,
    ItemTrap,
    ItemBuff,
    Kiss,
    TrapHit,
    PoopSpray,
    Explosion,
    Dizzy,
    TrapBlock,
    PlayerHurt,
    FeverOn,
    ShieldOn,
    ComboUp,
    GameOver,
}

impl SfxKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SfxKey::UiStart => "ui_start",
            SfxKey::UiRestart => "ui_restart",
            SfxKey::UiPauseOn => "ui_pause_on",
            SfxKey::UiPauseOff => "ui_pause_off",
            SfxKey::ItemHealthy => "item_healthy",
            SfxKey::ItemJunk => "item_junk",
            SfxKey::ItemTrap => "item_trap",
            SfxKey::ItemBuff => "item_buff",
            SfxKey::Kiss => "kiss",
            SfxKey::TrapHit => "trap_hit",
            SfxKey::PoopSpray => "poop_spray",
            SfxKey::Explosion => "explosion",
            SfxKey::Dizzy => "dizzy",
            SfxKey::TrapBlock => "trap_block",
            SfxKey::PlayerHurt => "player_hurt",
            SfxKey::FeverOn => "fever_on",
            SfxKey::ShieldOn => "shield_on",
            SfxKey::ComboUp => "combo_up",
            SfxKey::GameOver => "game_over",
        }
    }
}

/// One queued sound cue
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SfxEvent {
    pub key: SfxKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f32>,
}

impl From<SfxKey> for SfxEvent {
    fn from(key: SfxKey) -> Self {
        Self {
            key,
            volume: None,
            rate: None,
        }
    }
}
