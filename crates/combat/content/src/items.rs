//! Consumable items and the inventory-backed item oracle.

use combat_core::{ActiveEffect, Combatant, EffectKind, ItemOracle};
use serde::{Deserialize, Serialize};

/// What a consumable does when used in combat.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Restores HP, capped at max.
    Healing { amount: f64 },
    /// Restores MP, capped at max.
    Mana { amount: f64 },
    /// Grants a temporary armor bonus for `duration` turn cycles.
    Fortify { armor: f64, duration: u32 },
}

/// Static item definition from the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub name: String,
    pub kind: ItemKind,
    #[serde(default)]
    pub description: String,
}

#[derive(Clone, Debug, PartialEq)]
struct Slot {
    item: ItemDefinition,
    count: u32,
}

/// A counted stack of consumables implementing [`ItemOracle`].
///
/// `use_in_combat` returns `false` without mutating anything when the
/// item is unknown, out of stock, or would have no effect (healing at
/// full HP); the caller keeps the turn in that case.
#[derive(Clone, Debug, Default)]
pub struct Inventory {
    slots: Vec<Slot>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` units, merging with an existing stack by name.
    pub fn add(&mut self, item: ItemDefinition, count: u32) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.item.name == item.name) {
            slot.count += count;
            return;
        }
        self.slots.push(Slot { item, count });
    }

    pub fn count(&self, name: &str) -> u32 {
        self.slots
            .iter()
            .find(|s| s.item.name == name)
            .map_or(0, |s| s.count)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.count == 0)
    }

    /// Stacks with at least one unit left, in acquisition order.
    pub fn stocked(&self) -> impl Iterator<Item = (&ItemDefinition, u32)> {
        self.slots
            .iter()
            .filter(|s| s.count > 0)
            .map(|s| (&s.item, s.count))
    }

    fn apply(item: &ItemDefinition, user: &mut Combatant) -> bool {
        match item.kind {
            ItemKind::Healing { amount } => {
                if user.hp.current() >= user.hp.max() {
                    tracing::debug!(item = %item.name, "already at full HP, not consumed");
                    return false;
                }
                user.apply_heal(amount);
            }
            ItemKind::Mana { amount } => {
                if user.mp.current() >= user.mp.max() {
                    tracing::debug!(item = %item.name, "already at full MP, not consumed");
                    return false;
                }
                user.regen_mp(amount);
            }
            ItemKind::Fortify { armor, duration } => {
                user.set_effect(ActiveEffect {
                    name: item.name.clone(),
                    kind: EffectKind::ArmorBonus,
                    magnitude: armor,
                    remaining: duration,
                });
            }
        }
        true
    }
}

impl ItemOracle for Inventory {
    fn use_in_combat(&mut self, user: &mut Combatant, item: &str) -> bool {
        let Some(slot) = self
            .slots
            .iter_mut()
            .find(|s| s.item.name == item && s.count > 0)
        else {
            return false;
        };
        if !Self::apply(&slot.item, user) {
            return false;
        }
        slot.count -= 1;
        tracing::debug!(item, remaining = slot.count, "item consumed");
        true
    }
}
