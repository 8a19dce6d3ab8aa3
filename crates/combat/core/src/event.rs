//! Structured outcome events.
//!
//! The core never prints; it emits these descriptors and a rendering
//! collaborator turns them into text. Only the numeric payloads are
//! load-bearing for tests.

use crate::combatant::ConditionKind;
use crate::encounter::Side;
use crate::monster::VictoryRewards;

/// One observable outcome during an encounter.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    EncounterStarted {
        monster: String,
        level: u32,
    },
    /// Initiative has been rolled; `side` acts first.
    FirstTurn {
        side: Side,
    },
    MpRegenerated {
        side: Side,
        amount: f64,
    },
    AttackHit {
        attacker: Side,
        damage: f64,
        critical: bool,
    },
    AttackDodged {
        defender: Side,
    },
    SkillCast {
        caster: Side,
        skill: String,
    },
    /// Instantaneous skill damage (bypasses armor).
    SkillDamage {
        caster: Side,
        amount: f64,
    },
    /// Instantaneous self-heal from a skill.
    SkillHeal {
        caster: Side,
        amount: f64,
    },
    /// A timed effect landed on `owner`'s active list.
    EffectApplied {
        owner: Side,
        effect: String,
        duration: u32,
    },
    EffectExpired {
        owner: Side,
        effect: String,
    },
    ConditionInflicted {
        target: Side,
        condition: ConditionKind,
        duration: u32,
    },
    ConditionLifted {
        side: Side,
        condition: ConditionKind,
    },
    /// A damage-over-time tick from `source`'s effect hit the opponent.
    PeriodicDamage {
        source: Side,
        effect: String,
        amount: f64,
    },
    PeriodicHeal {
        side: Side,
        effect: String,
        amount: f64,
    },
    /// The side was asleep and failed its breakout roll; the turn is
    /// spent.
    SleptThrough {
        side: Side,
    },
    ItemUsed {
        item: String,
    },
    FleeAttempt {
        success: bool,
    },
    /// A data error degraded to a fallback or an aborted action;
    /// always surfaced, never fatal.
    Warning {
        message: String,
    },
    VictoryRewards {
        rewards: VictoryRewards,
    },
    Defeated,
    Fled,
}
