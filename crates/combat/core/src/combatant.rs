//! Mutable runtime state for one side of an encounter.
//!
//! All mutation goes through the operations defined here; the
//! resolver and scheduler never poke fields directly. HP and MP are
//! clamped into `[0, max]` by the meters, maxima are never touched
//! mid-encounter, and effect entries are removed the instant their
//! remaining duration reaches 0.

use arrayvec::ArrayVec;
use strum::{Display, EnumString};

use crate::config::CombatConfig;
use crate::effect::EffectKind;
use crate::stats::{Attribute, Attributes, ResourceMeter};

/// Secondary status conditions that gate action availability.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ConditionKind {
    /// Blocks all actions, with a per-turn breakout chance.
    Sleep,
    /// Blocks skill usage.
    Curse,
    /// Cosmetic bookkeeping for an incoming damage-over-time effect.
    Poison,
}

/// A status condition with its remaining duration in turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Condition {
    pub kind: ConditionKind,
    pub remaining: u32,
}

/// A timed effect currently active on a combatant.
///
/// Buffs and over-time effects live on the *caster*; the opponent is
/// the implicit target of damage-over-time ticks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub name: String,
    pub kind: EffectKind,
    /// Magnitude resolved against the caster's stats at cast time.
    pub magnitude: f64,
    pub remaining: u32,
}

/// Equipment-derived weapon data.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponProfile {
    pub min: f64,
    pub max: f64,
    /// Primary stat added at half value to both range ends.
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: Option<Attribute>,
    /// Secondary stats, each added at half value when nonzero.
    #[cfg_attr(feature = "serde", serde(default))]
    pub bonus_stats: ArrayVec<Attribute, { CombatConfig::MAX_WEAPON_BONUS_STATS }>,
}

/// What fell off during an end-of-cycle decay pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DecayReport {
    pub expired_effects: Vec<String>,
    pub lifted_conditions: Vec<ConditionKind>,
}

impl DecayReport {
    pub fn is_empty(&self) -> bool {
        self.expired_effects.is_empty() && self.lifted_conditions.is_empty()
    }
}

/// Runtime record for the player or a monster instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    pub name: String,
    pub level: u32,
    pub hp: ResourceMeter,
    pub mp: ResourceMeter,
    pub attributes: Attributes,
    pub weapon: WeaponProfile,
    /// Percentage damage reduction from equipment (0–100+).
    pub armor_value: f64,
    /// Temporary percentage armor from active effects.
    pub armor_bonus: f64,
    /// Temporary percentage dodge from active effects.
    pub dodge_bonus: f64,
    /// Accumulated experience (player only; monsters ignore it).
    pub xp: u32,
    /// Carried gold (player only).
    pub gold: u32,
    active_effects: Vec<ActiveEffect>,
    conditions: ArrayVec<Condition, { CombatConfig::MAX_CONDITIONS }>,
}

impl Combatant {
    pub fn new(
        name: impl Into<String>,
        level: u32,
        hp: ResourceMeter,
        mp: ResourceMeter,
        attributes: Attributes,
        weapon: WeaponProfile,
        armor_value: f64,
    ) -> Self {
        Self {
            name: name.into(),
            level,
            hp,
            mp,
            attributes,
            weapon,
            armor_value,
            armor_bonus: 0.0,
            dodge_bonus: 0.0,
            xp: 0,
            gold: 0,
            active_effects: Vec::new(),
            conditions: ArrayVec::new(),
        }
    }

    // ========================================================================
    // Resource operations
    // ========================================================================

    /// Subtracts HP, clamped at 0. Negative amounts heal (unclamped
    /// armor edge case) and cap at max HP.
    pub fn apply_damage(&mut self, amount: f64) {
        self.hp.damage(amount);
    }

    /// Restores HP, capped at max.
    pub fn apply_heal(&mut self, amount: f64) {
        self.hp.restore(amount);
    }

    /// Spends MP; returns false without mutation if short.
    #[must_use]
    pub fn spend_mp(&mut self, amount: f64) -> bool {
        self.mp.spend(amount)
    }

    /// Restores MP, capped at max.
    pub fn regen_mp(&mut self, amount: f64) {
        self.mp.restore(amount);
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_empty()
    }

    // ========================================================================
    // Effect operations
    // ========================================================================

    /// Inserts or refreshes an active effect.
    ///
    /// Armor/dodge bonus kinds raise the matching temporary modifier
    /// while the entry lives; a refresh replaces the old contribution
    /// rather than stacking with itself.
    pub fn set_effect(&mut self, effect: ActiveEffect) {
        if effect.remaining == 0 {
            return;
        }
        self.remove_effect(&effect.name);
        self.apply_modifier(&effect, 1.0);
        self.active_effects.push(effect);
    }

    /// Removes one active effect by name, lowering any temporary
    /// modifier it contributed.
    pub fn remove_effect(&mut self, name: &str) -> Option<ActiveEffect> {
        let index = self.active_effects.iter().position(|e| e.name == name)?;
        let effect = self.active_effects.remove(index);
        self.apply_modifier(&effect, -1.0);
        Some(effect)
    }

    pub fn has_effect(&self, name: &str) -> bool {
        self.active_effects.iter().any(|e| e.name == name)
    }

    /// Active effects in insertion order.
    pub fn active_effects(&self) -> &[ActiveEffect] {
        &self.active_effects
    }

    /// Sum of active damage-bonus magnitudes, fed into the weapon
    /// damage range.
    pub fn damage_bonus_total(&self) -> f64 {
        self.active_effects
            .iter()
            .filter(|e| e.kind == EffectKind::DamageBonus)
            .map(|e| e.magnitude)
            .sum()
    }

    /// First periodic (DOT/HOT) effect in insertion order, if any.
    ///
    /// Only this one ticks on the owner's turn; later entries wait
    /// their turn in line.
    pub fn first_periodic_effect(&self) -> Option<&ActiveEffect> {
        self.active_effects.iter().find(|e| e.kind.is_periodic())
    }

    /// Decrements one named effect by a single turn, removing it at 0.
    ///
    /// This is the per-turn path reserved for periodic effects; the
    /// cycle-wide decay never touches them.
    pub fn decrement_effect(&mut self, name: &str) -> bool {
        let Some(index) = self.active_effects.iter().position(|e| e.name == name) else {
            return false;
        };
        let effect = &mut self.active_effects[index];
        effect.remaining = effect.remaining.saturating_sub(1);
        if effect.remaining == 0 {
            let expired = self.active_effects.remove(index);
            self.apply_modifier(&expired, -1.0);
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Condition operations
    // ========================================================================

    /// Inserts or refreshes a status condition.
    pub fn set_condition(&mut self, kind: ConditionKind, duration: u32) {
        if duration == 0 {
            return;
        }
        if let Some(existing) = self.conditions.iter_mut().find(|c| c.kind == kind) {
            existing.remaining = existing.remaining.max(duration);
            return;
        }
        if !self.conditions.is_full() {
            self.conditions.push(Condition {
                kind,
                remaining: duration,
            });
        }
    }

    pub fn clear_condition(&mut self, kind: ConditionKind) {
        self.conditions.retain(|c| c.kind != kind);
    }

    pub fn has_condition(&self, kind: ConditionKind) -> bool {
        self.conditions.iter().any(|c| c.kind == kind)
    }

    pub fn is_asleep(&self) -> bool {
        self.has_condition(ConditionKind::Sleep)
    }

    pub fn is_cursed(&self) -> bool {
        self.has_condition(ConditionKind::Curse)
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    // ========================================================================
    // Cycle decay
    // ========================================================================

    /// End-of-cycle decay: every non-periodic active effect and every
    /// status condition loses one turn. Entries reaching 0 are removed
    /// immediately and reported. Periodic effects are exempt: they
    /// decrement on their own per-turn application path, so the two
    /// paths can never double-decrement the same entry in one cycle.
    pub fn decrement_effects(&mut self) -> DecayReport {
        let mut report = DecayReport::default();

        let mut index = 0;
        while index < self.active_effects.len() {
            if self.active_effects[index].kind.is_periodic() {
                index += 1;
                continue;
            }
            let effect = &mut self.active_effects[index];
            effect.remaining = effect.remaining.saturating_sub(1);
            if effect.remaining == 0 {
                let expired = self.active_effects.remove(index);
                self.apply_modifier(&expired, -1.0);
                report.expired_effects.push(expired.name);
            } else {
                index += 1;
            }
        }

        for condition in self.conditions.iter_mut() {
            condition.remaining = condition.remaining.saturating_sub(1);
            if condition.remaining == 0 {
                report.lifted_conditions.push(condition.kind);
            }
        }
        self.conditions.retain(|c| c.remaining > 0);

        report
    }

    /// Clears all combat-scoped state at encounter start: temporary
    /// modifiers, active effects, and status conditions.
    pub fn reset_combat_state(&mut self) {
        self.armor_bonus = 0.0;
        self.dodge_bonus = 0.0;
        self.active_effects.clear();
        self.conditions.clear();
    }

    fn apply_modifier(&mut self, effect: &ActiveEffect, sign: f64) {
        match effect.kind {
            EffectKind::ArmorBonus => self.armor_bonus += sign * effect.magnitude,
            EffectKind::DodgeBonus => self.dodge_bonus += sign * effect.magnitude,
            _ => {}
        }
    }
}
