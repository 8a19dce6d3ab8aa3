//! Turns structured combat events into terminal text.

use combat_core::{CombatEvent, Combatant, Side};

/// Names the side from the player's point of view.
fn who(side: Side, monster: &str) -> String {
    match side {
        Side::Player => "You".to_string(),
        Side::Monster => format!("The {monster}"),
    }
}

/// Third-person verb suffix for monster lines ("dodges" vs "dodge").
fn sfx(side: Side) -> &'static str {
    match side {
        Side::Player => "",
        Side::Monster => "s",
    }
}

pub fn describe(event: &CombatEvent, monster: &str) -> String {
    match event {
        CombatEvent::EncounterStarted {
            monster: name,
            level,
        } => {
            format!("A level {level} {name} blocks your path!")
        }
        CombatEvent::FirstTurn { side } => match side {
            Side::Player => "You seize the initiative.".to_string(),
            Side::Monster => format!("The {monster} moves first."),
        },
        CombatEvent::MpRegenerated { side, amount } => {
            format!("{} recover{} {amount:.1} MP.", who(*side, monster), sfx(*side))
        }
        CombatEvent::AttackHit {
            attacker,
            damage,
            critical,
        } => {
            let hit = if *critical { "a critical hit" } else { "a hit" };
            format!(
                "{} land{} {hit} for {damage:.1} damage.",
                who(*attacker, monster),
                sfx(*attacker)
            )
        }
        CombatEvent::AttackDodged { defender } => {
            format!("{} dodge{} the blow.", who(*defender, monster), sfx(*defender))
        }
        CombatEvent::SkillCast { caster, skill } => {
            format!("{} cast{} {skill}.", who(*caster, monster), sfx(*caster))
        }
        CombatEvent::SkillDamage { caster, amount } => match caster {
            Side::Player => format!("The {monster} takes {amount:.1} damage."),
            Side::Monster => format!("You take {amount:.1} damage."),
        },
        CombatEvent::SkillHeal { caster, amount } => {
            format!("{} recover{} {amount:.1} HP.", who(*caster, monster), sfx(*caster))
        }
        CombatEvent::EffectApplied {
            owner,
            effect,
            duration,
        } => {
            format!(
                "{} gain{} {effect} for {duration} turns.",
                who(*owner, monster),
                sfx(*owner)
            )
        }
        CombatEvent::EffectExpired { owner, effect } => {
            format!("{}'s {effect} fades.", who(*owner, monster))
        }
        CombatEvent::ConditionInflicted {
            target,
            condition,
            duration,
        } => {
            format!(
                "{} {} {condition} for {duration} turns.",
                who(*target, monster),
                match target {
                    Side::Player => "are afflicted by",
                    Side::Monster => "is afflicted by",
                }
            )
        }
        CombatEvent::ConditionLifted { side, condition } => {
            format!("{} shake{} off {condition}.", who(*side, monster), sfx(*side))
        }
        CombatEvent::PeriodicDamage {
            source,
            effect,
            amount,
        } => match source {
            Side::Player => format!("{effect} gnaws at the {monster} for {amount:.1} damage."),
            Side::Monster => format!("{effect} gnaws at you for {amount:.1} damage."),
        },
        CombatEvent::PeriodicHeal {
            side,
            effect,
            amount,
        } => {
            format!(
                "{effect} mends {} for {amount:.1} HP.",
                match side {
                    Side::Player => "you".to_string(),
                    Side::Monster => format!("the {monster}"),
                }
            )
        }
        CombatEvent::SleptThrough { side } => match side {
            Side::Player => "You are fast asleep.".to_string(),
            Side::Monster => format!("The {monster} is fast asleep."),
        },
        CombatEvent::ItemUsed { item } => format!("You use the {item}."),
        CombatEvent::FleeAttempt { success } => {
            if *success {
                "You slip away from the fight.".to_string()
            } else {
                "You fail to get away!".to_string()
            }
        }
        CombatEvent::Warning { message } => format!("({message})"),
        CombatEvent::VictoryRewards { rewards } => {
            format!(
                "Victory! You gain {} XP and {} gold.",
                rewards.xp, rewards.gold
            )
        }
        CombatEvent::Defeated => "You have been slain...".to_string(),
        CombatEvent::Fled => "You live to fight another day.".to_string(),
    }
}

/// One-line health readout for the encounter header.
pub fn status_line(combatant: &Combatant) -> String {
    let mut line = format!(
        "{} (Lv {})  HP {:.1}/{:.1}  MP {:.1}/{:.1}",
        combatant.name,
        combatant.level,
        combatant.hp.current(),
        combatant.hp.max(),
        combatant.mp.current(),
        combatant.mp.max()
    );
    for condition in combatant.conditions() {
        line.push_str(&format!("  [{} {}]", condition.kind, condition.remaining));
    }
    for effect in combatant.active_effects() {
        line.push_str(&format!("  [{} {}]", effect.name, effect.remaining));
    }
    line
}
