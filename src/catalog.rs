//! Item catalog and event themes
//!
//! The simulation only reads `id`, `kind`, `score`, `weight` and `sfx`; emoji
//! and names travel along for the presentation layer.

use serde::{Deserialize, Serialize};

use crate::sim::sfx::SfxKey;
use crate::sim::state::SurpriseKind;

/// Broad item category, drives diet/streak side effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Healthy,
    Junk,
    Trap,
    Buff,
}

/// Every item the game knows about, including themed extras
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemId {
    Apple,
    Broccoli,
    Cucumber,
    Burger,
    Donut,
    Candy,
    Bomb,
    Poop,
    Rotten,
    Bee,
    Water,
    Clock,
    Shield,
    Brush,
    Golden,
    Slow,
    Magnet,
    Clear,
    Reflect,
    RedPacket,
    Orange,
    Dumpling,
    HorseCake,
    Firecracker,
}

impl ItemId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemId::Apple => "apple",
            ItemId::Broccoli => "broccoli",
            ItemId::Cucumber => "cucumber",
            ItemId::Burger => "burger",
            ItemId::Donut => "donut",
            ItemId::Candy => "candy",
            ItemId::Bomb => "bomb",
            ItemId::Poop => "poop",
            ItemId::Rotten => "rotten",
            ItemId::Bee => "bee",
            ItemId::Water => "water",
            ItemId::Clock => "clock",
            ItemId::Shield => "shield",
            ItemId::Brush => "brush",
            ItemId::Golden => "golden",
            ItemId::Slow => "slow",
            ItemId::Magnet => "magnet",
            ItemId::Clear => "clear",
            ItemId::Reflect => "reflect",
            ItemId::RedPacket => "red_packet",
            ItemId::Orange => "orange",
            ItemId::Dumpling => "dumpling",
            ItemId::HorseCake => "horse_cake",
            ItemId::Firecracker => "firecracker",
        }
    }
}

/// Static item definition
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemConfig {
    pub id: ItemId,
    pub emoji: &'static str,
    pub name: &'static str,
    pub score: i64,
    pub kind: ItemKind,
    pub weight: f32,
    pub sfx: SfxKey,
}

const fn item(
    id: ItemId,
    emoji: &'static str,
    name: &'static str,
    score: i64,
    kind: ItemKind,
    weight: f32,
) -> ItemConfig {
    let sfx = match kind {
        ItemKind::Healthy => SfxKey::ItemHealthy,
        ItemKind::Junk => SfxKey::ItemJunk,
        ItemKind::Trap => SfxKey::ItemTrap,
        ItemKind::Buff => SfxKey::ItemBuff,
    };
    ItemConfig {
        id,
        emoji,
        name,
        score,
        kind,
        weight,
        sfx,
    }
}

/// Items available in every theme
pub const BASE_ITEMS: [ItemConfig; 19] = [
    item(ItemId::Apple, "🍎", "Apple", 10, ItemKind::Healthy, 16.0),
    item(ItemId::Broccoli, "🥦", "Broccoli", 8, ItemKind::Healthy, 12.0),
    item(ItemId::Cucumber, "🥒", "Cucumber", 6, ItemKind::Healthy, 10.0),
    item(ItemId::Burger, "🍔", "Burger", 45, ItemKind::Junk, 10.0),
    item(ItemId::Donut, "🍩", "Donut", 35, ItemKind::Junk, 9.0),
    item(ItemId::Candy, "🍬", "Candy", 25, ItemKind::Junk, 8.0),
    item(ItemId::Bomb, "💣", "Bomb", -35, ItemKind::Trap, 7.0),
    item(ItemId::Poop, "💩", "Poop", -25, ItemKind::Trap, 8.0),
    item(ItemId::Rotten, "🧟", "Rotten Fruit", -20, ItemKind::Trap, 6.0),
    item(ItemId::Bee, "🐝", "Bee", -18, ItemKind::Trap, 6.0),
    item(ItemId::Water, "💧", "Water", 8, ItemKind::Buff, 4.0),
    item(ItemId::Clock, "🕒", "Pocket Watch", 8, ItemKind::Buff, 3.0),
    item(ItemId::Shield, "🛡️", "Shield", 8, ItemKind::Buff, 3.0),
    item(ItemId::Brush, "🪥", "Toothbrush", 8, ItemKind::Buff, 3.0),
    item(ItemId::Golden, "🌟", "Golden Apple", 150, ItemKind::Buff, 1.0),
    item(ItemId::Slow, "⏳", "Time Stop", 0, ItemKind::Buff, 2.0),
    item(ItemId::Magnet, "🧲", "Magnet", 0, ItemKind::Buff, 2.0),
    item(ItemId::Clear, "💥", "Screen Clear", 0, ItemKind::Buff, 1.0),
    item(ItemId::Reflect, "🔁", "Reflect", 0, ItemKind::Buff, 2.0),
];

const SPRING_EXTRA_ITEMS: [ItemConfig; 5] = [
    item(ItemId::RedPacket, "🧧", "Red Packet", 65, ItemKind::Buff, 5.0),
    item(ItemId::Orange, "🍊", "Lucky Orange", 12, ItemKind::Healthy, 8.0),
    item(ItemId::Dumpling, "🥟", "Dumpling", 22, ItemKind::Buff, 6.0),
    item(ItemId::HorseCake, "🐎", "Horse Cake", 10, ItemKind::Buff, 4.0),
    item(ItemId::Firecracker, "🧨", "Firecracker", -26, ItemKind::Trap, 5.0),
];

const SPRING_WEIGHTS: [(ItemId, f32); 3] = [
    (ItemId::Golden, 1.8),
    (ItemId::Water, 1.2),
    (ItemId::Bomb, 0.9),
];

/// Event theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Default,
    SpringFestivalHorse,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Default => "default",
            Theme::SpringFestivalHorse => "spring_festival_horse",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "default" => Some(Theme::Default),
            "spring_festival_horse" => Some(Theme::SpringFestivalHorse),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Theme::Default => "Mouth King",
            Theme::SpringFestivalHorse => "Mouth King: Festival Feast",
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            Theme::Default => "Up to 4 players on one screen",
            Theme::SpringFestivalHorse => "Festival special: guard the reunion dinner",
        }
    }

    fn weight_multiplier(&self, id: ItemId) -> f32 {
        match self {
            Theme::Default => 1.0,
            Theme::SpringFestivalHorse => SPRING_WEIGHTS
                .iter()
                .find(|(item, _)| *item == id)
                .map(|(_, mult)| *mult)
                .unwrap_or(1.0),
        }
    }

    fn extra_items(&self) -> &'static [ItemConfig] {
        match self {
            Theme::Default => &[],
            Theme::SpringFestivalHorse => &SPRING_EXTRA_ITEMS,
        }
    }

    /// Banner emoji shown when a surprise event starts
    pub fn surprise_banner(&self, kind: SurpriseKind) -> &'static str {
        match (self, kind) {
            (Theme::SpringFestivalHorse, SurpriseKind::GoldenRush) => "🎆",
            (Theme::SpringFestivalHorse, SurpriseKind::DoubleDrop) => "🐎",
            (Theme::SpringFestivalHorse, SurpriseKind::TrapScare) => "🧨",
            (_, SurpriseKind::GoldenRush) => "🌟",
            (_, SurpriseKind::DoubleDrop) => "🎉",
            (_, SurpriseKind::TrapScare) => "👻",
            (_, SurpriseKind::Freeze) => "🧊",
        }
    }
}

/// Effective spawn pool for a theme
#[derive(Debug, Clone)]
pub struct Catalog {
    pub theme: Theme,
    pub items: Vec<ItemConfig>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::for_theme(Theme::Default)
    }
}

impl Catalog {
    /// Base items with theme weight multipliers, followed by themed extras
    pub fn for_theme(theme: Theme) -> Self {
        let mut items: Vec<ItemConfig> = BASE_ITEMS
            .iter()
            .map(|item| ItemConfig {
                weight: item.weight * theme.weight_multiplier(item.id),
                ..*item
            })
            .collect();
        items.extend_from_slice(theme.extra_items());
        Self { theme, items }
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemConfig> {
        self.items.iter().find(|item| item.id == id)
    }
}
