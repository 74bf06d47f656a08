//! Per-item special effects
//!
//! Each item id maps to a trap damage value and a short list of actions that
//! the hit resolver applies in order. Items without a special effect map to
//! `ItemEffect::NONE`.

use crate::catalog::ItemId;
use crate::sim::sfx::SfxKey;
use crate::sim::state::SurpriseKind;
use crate::tuning::Tuning;

/// Personal timed windows an item can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Window {
    Shield,
    Fever,
    Magnet,
    Reflect,
    Dizzy,
    Mask,
}

impl Window {
    /// Default length of the window from tuning
    pub fn tuned_frames(&self, tuning: &Tuning) -> u32 {
        match self {
            Window::Shield => tuning.shield_frames,
            Window::Fever => tuning.fever_frames,
            Window::Magnet => tuning.powerup_magnet_frames,
            Window::Reflect => tuning.powerup_reflect_frames,
            Window::Dizzy => tuning.dizzy_frames,
            Window::Mask => tuning.mask_frames,
        }
    }
}

/// Window/shake length source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frames {
    /// Length configured in `Tuning`
    Tuned,
    Fixed(u32),
}

/// A single effect step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EffectAction {
    Heal(f32),
    FullHeal,
    /// Signed sugar delta
    Sugar(f32),
    ZeroSugar,
    /// Added straight to the eater's score, outside combo/multipliers
    BonusScore(i64),
    /// Set a personal window, replacing what is left
    Grant(Window, Frames),
    /// Raise a personal window to at least this length
    Extend(Window, Frames),
    ComboFloor(u32),
    /// Global slow-motion window
    SlowMotion,
    ClearItems,
    /// `Tuned` means the bomb shake length
    Shake(Frames),
    Flash,
    PoopStorm,
    Sfx(SfxKey),
    Banner {
        text: &'static str,
        color: u32,
        rise: f32,
        life: i32,
        size: f32,
    },
    /// Roll to start a surprise event
    SurpriseChance(f32, SurpriseKind),
}

/// Resolved special effect of an item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemEffect {
    pub trap_damage: f32,
    pub actions: &'static [EffectAction],
}

impl ItemEffect {
    pub const NONE: ItemEffect = ItemEffect {
        trap_damage: 0.0,
        actions: &[],
    };

    const fn new(trap_damage: f32, actions: &'static [EffectAction]) -> Self {
        Self {
            trap_damage,
            actions,
        }
    }
}

// Must expand to a struct literal: the action slices below are promoted to 'static
macro_rules! banner {
    ($text:expr, $color:expr, $rise:expr, $life:expr, $size:expr) => {
        EffectAction::Banner {
            text: $text,
            color: $color,
            rise: $rise,
            life: $life,
            size: $size,
        }
    };
}

/// Special effect table keyed by item id
pub fn effect_for(id: ItemId) -> ItemEffect {
    use EffectAction::*;

    match id {
        ItemId::Bomb => ItemEffect::new(
            28.0,
            &[
                Shake(Frames::Tuned),
                Flash,
                Sfx(SfxKey::Explosion),
                banner!("💥", 0xffd166, 20.0, 40, 36.0),
            ],
        ),
        ItemId::Poop => ItemEffect::new(
            16.0,
            &[
                PoopStorm,
                Sfx(SfxKey::PoopSpray),
                banner!("💩", 0x8f6b2c, 18.0, 40, 34.0),
            ],
        ),
        ItemId::Rotten => ItemEffect::new(
            14.0,
            &[
                Grant(Window::Dizzy, Frames::Tuned),
                Sfx(SfxKey::Dizzy),
                banner!("💫", 0xb0a1ff, 18.0, 45, 30.0),
            ],
        ),
        ItemId::Bee => ItemEffect::new(
            12.0,
            &[
                Grant(Window::Mask, Frames::Tuned),
                banner!("😷", 0xc2f0ff, 18.0, 45, 32.0),
            ],
        ),
        ItemId::Water => ItemEffect::new(0.0, &[Heal(10.0), Sugar(-20.0)]),
        ItemId::Clock => ItemEffect::new(
            0.0,
            &[
                Grant(Window::Fever, Frames::Tuned),
                banner!("🔥", 0xff8c42, 18.0, 45, 28.0),
                Sfx(SfxKey::FeverOn),
            ],
        ),
        ItemId::Shield => ItemEffect::new(
            0.0,
            &[
                Grant(Window::Shield, Frames::Tuned),
                banner!("🛡️", 0x6dd5ff, 18.0, 45, 26.0),
                Sfx(SfxKey::ShieldOn),
            ],
        ),
        ItemId::Brush => ItemEffect::new(0.0, &[ZeroSugar]),
        ItemId::Golden => ItemEffect::new(0.0, &[FullHeal, ZeroSugar, BonusScore(300)]),
        ItemId::Slow => ItemEffect::new(0.0, &[SlowMotion, banner!("⏳", 0x9fd3ff, 18.0, 45, 30.0)]),
        ItemId::Magnet => ItemEffect::new(
            0.0,
            &[
                Extend(Window::Magnet, Frames::Tuned),
                banner!("🧲", 0xff6f61, 18.0, 45, 30.0),
            ],
        ),
        ItemId::Clear => ItemEffect::new(0.0, &[ClearItems, banner!("💥", 0xffd166, 18.0, 45, 30.0)]),
        ItemId::Reflect => ItemEffect::new(
            0.0,
            &[
                Extend(Window::Reflect, Frames::Tuned),
                banner!("🔁", 0xc3f0ca, 18.0, 45, 30.0),
            ],
        ),
        ItemId::RedPacket => ItemEffect::new(
            0.0,
            &[
                BonusScore(80),
                SurpriseChance(0.2, SurpriseKind::GoldenRush),
                banner!("🧧", 0xffcf5c, 18.0, 45, 30.0),
            ],
        ),
        ItemId::Orange => ItemEffect::new(0.0, &[Heal(8.0), ComboFloor(1)]),
        ItemId::Dumpling => ItemEffect::new(0.0, &[Heal(5.0), Extend(Window::Shield, Frames::Fixed(90))]),
        ItemId::HorseCake => ItemEffect::new(0.0, &[Extend(Window::Magnet, Frames::Fixed(180))]),
        ItemId::Firecracker => ItemEffect::new(
            18.0,
            &[
                Shake(Frames::Fixed(14)),
                Flash,
                banner!("🧨", 0xff8a5c, 20.0, 40, 32.0),
            ],
        ),
        ItemId::Apple
        | ItemId::Broccoli
        | ItemId::Cucumber
        | ItemId::Burger
        | ItemId::Donut
        | ItemId::Candy => ItemEffect::NONE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{BASE_ITEMS, Catalog, ItemKind, Theme};

    #[test]
    fn test_trap_damage_table() {
        let damage = |id| effect_for(id).trap_damage;
        assert_eq!(damage(ItemId::Bomb), 28.0);
        assert_eq!(damage(ItemId::Poop), 16.0);
        assert_eq!(damage(ItemId::Rotten), 14.0);
        assert_eq!(damage(ItemId::Bee), 12.0);
        assert_eq!(damage(ItemId::Firecracker), 18.0);
    }

    #[test]
    fn test_only_traps_deal_damage() {
        let catalog = Catalog::for_theme(Theme::SpringFestivalHorse);
        for item in &catalog.items {
            let effect = effect_for(item.id);
            if item.kind == ItemKind::Trap {
                assert!(effect.trap_damage > 0.0, "{} should hurt", item.id.as_str());
            } else {
                assert_eq!(effect.trap_damage, 0.0, "{} should not hurt", item.id.as_str());
            }
        }
    }

    #[test]
    fn test_plain_food_has_no_special_effect() {
        for item in BASE_ITEMS.iter().filter(|i| matches!(i.kind, ItemKind::Healthy | ItemKind::Junk)) {
            assert_eq!(effect_for(item.id), ItemEffect::NONE);
        }
    }

    #[test]
    fn test_golden_effect() {
        let effect = effect_for(ItemId::Golden);
        assert!(effect.actions.contains(&EffectAction::FullHeal));
        assert!(effect.actions.contains(&EffectAction::ZeroSugar));
        assert!(effect.actions.contains(&EffectAction::BonusScore(300)));
    }

    #[test]
    fn test_window_lengths_from_tuning() {
        let tuning = Tuning::default();
        assert_eq!(Window::Fever.tuned_frames(&tuning), 240);
        assert_eq!(Window::Mask.tuned_frames(&tuning), 120);
        assert_eq!(Window::Dizzy.tuned_frames(&tuning), 180);
    }
}
