//! Derived-value formulas.
//!
//! Balance numbers live in [`CombatConfig`]; the integration
//! scenarios in `tests/` assert on the numeric output here.

use crate::combatant::WeaponProfile;
use crate::config::CombatConfig;

use super::attributes::Attributes;

/// Initiative weight of one side.
///
/// ```text
/// weight = (0.5 × Agility + 0.5 × Luck) / 100
/// ```
pub fn initiative_weight(attrs: &Attributes) -> f64 {
    (0.5 * attrs.agility + 0.5 * attrs.luck) / 100.0
}

/// Probability that the side with `own` weight acts first.
///
/// Both weights zero resolves to a fair coin (0.5).
pub fn first_turn_probability(own: f64, opponent: f64) -> f64 {
    let total = own + opponent;
    if total <= 0.0 {
        0.5
    } else {
        own / total
    }
}

/// Chance to dodge an incoming attack.
///
/// ```text
/// dodge = 0.02 × Agility + dodge_bonus / 100
/// ```
pub fn dodge_chance(attrs: &Attributes, dodge_bonus: f64, config: &CombatConfig) -> f64 {
    config.dodge_chance_per_agility * attrs.agility + dodge_bonus / 100.0
}

/// Critical-hit chance. Applies to player attacks only; the monster's
/// basic attack never crits.
pub fn crit_chance(attrs: &Attributes, config: &CombatConfig) -> f64 {
    config.crit_chance_per_agility * attrs.agility
}

/// Fraction of damage removed by armor.
///
/// ```text
/// reduction = (armor_value + armor_bonus) / 100
/// ```
///
/// Deliberately NOT clamped to [0, 1]: stacked armor bonuses above
/// 100% invert the damage sign and an attack heals its target. The
/// resource meter still caps the result at max HP.
pub fn armor_reduction(armor_value: f64, armor_bonus: f64) -> f64 {
    (armor_value + armor_bonus) / 100.0
}

/// Applies an armor reduction fraction to rolled damage.
pub fn reduce_damage(damage: f64, reduction: f64) -> f64 {
    damage * (1.0 - reduction)
}

/// MP restored at the start of the owning side's turn.
pub fn mp_regen(attrs: &Attributes, config: &CombatConfig) -> f64 {
    config.mp_regen_per_will * attrs.will
}

/// Effective weapon damage range for one attack.
///
/// Both ends of the equipment range are raised by half the weapon's
/// scaling stat, half of each nonzero secondary stat, and the full
/// magnitude of any active damage-bonus effects.
pub fn weapon_damage_range(
    weapon: &WeaponProfile,
    attrs: &Attributes,
    damage_bonus_total: f64,
) -> (f64, f64) {
    let mut boost = damage_bonus_total;
    if let Some(scaling) = weapon.scaling {
        boost += 0.5 * attrs.get(scaling);
    }
    for &stat in &weapon.bonus_stats {
        let value = attrs.get(stat);
        if value != 0.0 {
            boost += 0.5 * value;
        }
    }
    (weapon.min + boost, weapon.max + boost)
}

/// Flee success probability.
///
/// ```text
/// p = 0.5 + 0.05 × (player Agility − monster Agility)
/// ```
///
/// Values outside [0, 1] degrade to never/always via probability
/// semantics; no explicit clamp is needed.
pub fn flee_chance(player_agility: f64, monster_agility: f64, config: &CombatConfig) -> f64 {
    config.flee_base + config.flee_agility_factor * (player_agility - monster_agility)
}

/// Maximum HP for a freshly created player character.
///
/// Monsters take their HP from template data instead.
pub fn max_hp(level: u32, attrs: &Attributes) -> f64 {
    40.0 + 10.0 * level as f64 + 2.0 * attrs.strength
}

/// Maximum MP for a freshly created player character.
pub fn max_mp(level: u32, attrs: &Attributes) -> f64 {
    10.0 + 2.0 * level as f64 + 2.0 * attrs.intelligence + attrs.will
}
