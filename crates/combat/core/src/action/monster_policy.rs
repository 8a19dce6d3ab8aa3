//! Fixed probability policy for the monster's turn.

use crate::combatant::{Combatant, ConditionKind};
use crate::config::CombatConfig;
use crate::effect::ClassKind;
use crate::encounter::Side;
use crate::env::{RngOracle, SkillOracle};
use crate::event::CombatEvent;

use super::resolve::{resolve_attack, resolve_skill};
use super::ActionError;

/// Runs the monster's action for one turn.
///
/// Policy, in order:
/// 1. Asleep: breakout roll at `0.05 × Intelligence`; on failure the
///    turn is spent doing nothing, on success the monster acts.
/// 2. Cursed: forced basic attack.
/// 3. Otherwise each MP-eligible skill in the pool (registry order)
///    passes on a 50% roll; the first pass is cast.
/// 4. Fallback: basic attack (same formula as the player's, monster
///    stats, no crit).
///
/// The caller always ends the turn afterwards, even on `Err`: a
/// failed skill resolution degrades to a visible warning and never
/// aborts the encounter.
pub fn monster_take_turn(
    monster: &mut Combatant,
    player: &mut Combatant,
    skill_names: &[String],
    skills: &dyn SkillOracle,
    rng: &mut dyn RngOracle,
    config: &CombatConfig,
    events: &mut Vec<CombatEvent>,
) -> Result<(), ActionError> {
    if monster.is_asleep() {
        let breakout = config.sleep_breakout_per_intelligence * monster.attributes.intelligence;
        if !rng.chance(breakout) {
            events.push(CombatEvent::SleptThrough {
                side: Side::Monster,
            });
            return Ok(());
        }
        monster.clear_condition(ConditionKind::Sleep);
        events.push(CombatEvent::ConditionLifted {
            side: Side::Monster,
            condition: ConditionKind::Sleep,
        });
    }

    if monster.is_cursed() {
        tracing::debug!("monster cursed, forcing basic attack");
        resolve_attack(monster, player, Side::Monster, rng, config, events);
        return Ok(());
    }

    let pool = skills.monster_skill_pool(skill_names);
    for skill in pool {
        if skill.class != ClassKind::Monster {
            continue;
        }
        if monster.mp.current() < skill.mp_cost {
            continue;
        }
        if !rng.chance(config.monster_skill_chance) {
            continue;
        }
        tracing::debug!(skill = %skill.name, "monster casts");
        return resolve_skill(monster, player, Side::Monster, skill, events);
    }

    resolve_attack(monster, player, Side::Monster, rng, config, events);
    Ok(())
}
