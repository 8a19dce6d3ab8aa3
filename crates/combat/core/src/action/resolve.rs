//! Attack and skill resolution.

use crate::combatant::{ActiveEffect, Combatant, ConditionKind};
use crate::config::CombatConfig;
use crate::effect::{EffectKind, Skill};
use crate::encounter::Side;
use crate::env::RngOracle;
use crate::event::CombatEvent;
use crate::stats;

use super::ActionError;

/// Resolves one basic attack: damage roll in the effective weapon
/// range, defender dodge check, crit check (player attacks only),
/// armor reduction, HP subtraction.
///
/// Emits the outcome events; the caller runs the terminal check.
pub fn resolve_attack(
    attacker: &Combatant,
    defender: &mut Combatant,
    attacker_side: Side,
    rng: &mut dyn RngOracle,
    config: &CombatConfig,
    events: &mut Vec<CombatEvent>,
) {
    let (min, max) = stats::weapon_damage_range(
        &attacker.weapon,
        &attacker.attributes,
        attacker.damage_bonus_total(),
    );
    let mut damage = rng.range_f64(min, max);

    let dodge = stats::dodge_chance(&defender.attributes, defender.dodge_bonus, config);
    if rng.chance(dodge) {
        events.push(CombatEvent::AttackDodged {
            defender: attacker_side.opponent(),
        });
        return;
    }

    // Only the player's attacks can crit.
    let critical = attacker_side == Side::Player
        && rng.chance(stats::crit_chance(&attacker.attributes, config));
    if critical {
        damage *= config.crit_multiplier;
    }

    let reduction = stats::armor_reduction(defender.armor_value, defender.armor_bonus);
    let final_damage = stats::reduce_damage(damage, reduction);
    defender.apply_damage(final_damage);

    tracing::debug!(
        side = %attacker_side,
        rolled = damage,
        reduction,
        dealt = final_damage,
        "attack resolved"
    );
    events.push(CombatEvent::AttackHit {
        attacker: attacker_side,
        damage: final_damage,
        critical,
    });
}

/// Resolves one skill cast by `caster` against `opponent`.
///
/// Fails without any state change if the caster is cursed or short on
/// MP; on success, every effect of the skill is applied in catalog
/// order, branching by kind:
///
/// - instantaneous kinds mutate HP immediately (no armor);
/// - buffs and over-time kinds are stored on the caster;
/// - sleep/curse land on the opponent's condition list, and a
///   damage-over-time cast also tags the opponent as poisoned for
///   display purposes.
pub fn resolve_skill(
    caster: &mut Combatant,
    opponent: &mut Combatant,
    caster_side: Side,
    skill: &Skill,
    events: &mut Vec<CombatEvent>,
) -> Result<(), ActionError> {
    if caster.is_cursed() {
        return Err(ActionError::Cursed);
    }
    if !caster.spend_mp(skill.mp_cost) {
        return Err(ActionError::InsufficientMp);
    }

    events.push(CombatEvent::SkillCast {
        caster: caster_side,
        skill: skill.name.clone(),
    });

    for spec in &skill.effects {
        let magnitude = spec.magnitude(&caster.attributes);
        match spec.kind {
            EffectKind::DirectDamage => {
                opponent.apply_damage(magnitude);
                events.push(CombatEvent::SkillDamage {
                    caster: caster_side,
                    amount: magnitude,
                });
            }
            EffectKind::Heal => {
                caster.apply_heal(magnitude);
                events.push(CombatEvent::SkillHeal {
                    caster: caster_side,
                    amount: magnitude,
                });
            }
            EffectKind::Sleep => {
                opponent.set_condition(ConditionKind::Sleep, spec.duration);
                events.push(CombatEvent::ConditionInflicted {
                    target: caster_side.opponent(),
                    condition: ConditionKind::Sleep,
                    duration: spec.duration,
                });
            }
            EffectKind::Curse => {
                opponent.set_condition(ConditionKind::Curse, spec.duration);
                events.push(CombatEvent::ConditionInflicted {
                    target: caster_side.opponent(),
                    condition: ConditionKind::Curse,
                    duration: spec.duration,
                });
            }
            EffectKind::DamageOverTime
            | EffectKind::HealOverTime
            | EffectKind::DamageBonus
            | EffectKind::ArmorBonus
            | EffectKind::DodgeBonus => {
                caster.set_effect(ActiveEffect {
                    name: spec.name.clone(),
                    kind: spec.kind,
                    magnitude,
                    remaining: spec.duration,
                });
                events.push(CombatEvent::EffectApplied {
                    owner: caster_side,
                    effect: spec.name.clone(),
                    duration: spec.duration,
                });
                if spec.kind == EffectKind::DamageOverTime {
                    // Cosmetic bookkeeping so the victim shows as
                    // poisoned while the tick runs.
                    opponent.set_condition(ConditionKind::Poison, spec.duration);
                    events.push(CombatEvent::ConditionInflicted {
                        target: caster_side.opponent(),
                        condition: ConditionKind::Poison,
                        duration: spec.duration,
                    });
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{ClassKind, EffectSpec};
    use crate::env::PcgRng;
    use crate::stats::{Attribute, Attributes, ResourceMeter};
    use crate::combatant::WeaponProfile;

    fn fighter(agility: f64) -> Combatant {
        Combatant::new(
            "fighter",
            1,
            ResourceMeter::full(50.0),
            ResourceMeter::full(20.0),
            Attributes {
                agility,
                ..Attributes::default()
            },
            WeaponProfile {
                min: 5.0,
                max: 10.0,
                ..WeaponProfile::default()
            },
            0.0,
        )
    }

    fn skill(effects: Vec<EffectSpec>) -> Skill {
        Skill {
            name: "test_skill".into(),
            class: ClassKind::Player,
            mp_cost: 5.0,
            effects,
        }
    }

    #[test]
    fn attack_with_no_dodge_or_armor_lands_in_weapon_range() {
        let attacker = fighter(0.0);
        let mut defender = fighter(0.0);
        let mut rng = PcgRng::new(5);
        let mut events = Vec::new();
        resolve_attack(
            &attacker,
            &mut defender,
            Side::Monster, // no crit on monster attacks
            &mut rng,
            &CombatConfig::default(),
            &mut events,
        );
        let lost = 50.0 - defender.hp.current();
        assert!((5.0..=10.0).contains(&lost), "lost {lost}");
        assert!(matches!(
            events[0],
            CombatEvent::AttackHit {
                critical: false,
                ..
            }
        ));
    }

    #[test]
    fn guaranteed_dodge_prevents_all_damage() {
        let attacker = fighter(0.0);
        let mut defender = fighter(50.0); // dodge chance 1.0
        let mut rng = PcgRng::new(5);
        let mut events = Vec::new();
        resolve_attack(
            &attacker,
            &mut defender,
            Side::Player,
            &mut rng,
            &CombatConfig::default(),
            &mut events,
        );
        assert_eq!(defender.hp.current(), 50.0);
        assert_eq!(
            events,
            vec![CombatEvent::AttackDodged {
                defender: Side::Monster
            }]
        );
    }

    #[test]
    fn over_100_percent_armor_turns_the_hit_into_healing() {
        let attacker = fighter(0.0);
        let mut defender = fighter(0.0);
        defender.armor_value = 150.0;
        defender.apply_damage(20.0); // down to 30
        let mut rng = PcgRng::new(5);
        let mut events = Vec::new();
        resolve_attack(
            &attacker,
            &mut defender,
            Side::Monster,
            &mut rng,
            &CombatConfig::default(),
            &mut events,
        );
        assert!(defender.hp.current() > 30.0);
    }

    #[test]
    fn cursed_caster_cannot_cast_and_pays_nothing() {
        let mut caster = fighter(0.0);
        let mut opponent = fighter(0.0);
        caster.set_condition(ConditionKind::Curse, 2);
        let spell = skill(vec![]);
        let mut events = Vec::new();
        let err = resolve_skill(&mut caster, &mut opponent, Side::Player, &spell, &mut events);
        assert_eq!(err, Err(ActionError::Cursed));
        assert_eq!(caster.mp.current(), 20.0);
        assert!(events.is_empty());
    }

    #[test]
    fn insufficient_mp_fails_without_mutation() {
        let mut caster = fighter(0.0);
        let mut opponent = fighter(0.0);
        let mut spell = skill(vec![]);
        spell.mp_cost = 100.0;
        let mut events = Vec::new();
        let err = resolve_skill(&mut caster, &mut opponent, Side::Player, &spell, &mut events);
        assert_eq!(err, Err(ActionError::InsufficientMp));
        assert_eq!(caster.mp.current(), 20.0);
    }

    #[test]
    fn direct_damage_bypasses_armor_and_mutates_immediately() {
        let mut caster = fighter(0.0);
        caster.attributes.intelligence = 6.0;
        let mut opponent = fighter(0.0);
        opponent.armor_value = 90.0; // would reduce an attack; skills ignore it
        let spell = skill(vec![EffectSpec {
            name: "firebolt".into(),
            kind: EffectKind::DirectDamage,
            base: 4.0,
            duration: 0,
            scaling: Some(Attribute::Intelligence),
        }]);
        let mut events = Vec::new();
        resolve_skill(&mut caster, &mut opponent, Side::Player, &spell, &mut events).unwrap();
        assert_eq!(opponent.hp.current(), 40.0); // 4 + 1.0×6 = 10
        assert_eq!(caster.mp.current(), 15.0);
    }

    #[test]
    fn dot_cast_stores_on_caster_and_poisons_the_target() {
        let mut caster = fighter(0.0);
        let mut opponent = fighter(0.0);
        let spell = skill(vec![EffectSpec {
            name: "venom".into(),
            kind: EffectKind::DamageOverTime,
            base: 3.0,
            duration: 4,
            scaling: None,
        }]);
        let mut events = Vec::new();
        resolve_skill(&mut caster, &mut opponent, Side::Player, &spell, &mut events).unwrap();
        assert!(caster.has_effect("venom"));
        assert!(opponent.has_condition(ConditionKind::Poison));
        assert_eq!(opponent.hp.current(), 50.0); // no tick at cast time
    }

    #[test]
    fn multi_effect_skill_applies_every_effect() {
        let mut caster = fighter(0.0);
        let mut opponent = fighter(0.0);
        let spell = skill(vec![
            EffectSpec {
                name: "smite".into(),
                kind: EffectKind::DirectDamage,
                base: 5.0,
                duration: 0,
                scaling: None,
            },
            EffectSpec {
                name: "hex".into(),
                kind: EffectKind::Curse,
                base: 0.0,
                duration: 3,
                scaling: None,
            },
        ]);
        let mut events = Vec::new();
        resolve_skill(&mut caster, &mut opponent, Side::Player, &spell, &mut events).unwrap();
        assert_eq!(opponent.hp.current(), 45.0);
        assert!(opponent.is_cursed());
    }
}
