//! Deterministic turn-based encounter resolution.
//!
//! `combat-core` defines the canonical combat rules (the stat and
//! formula layer, combatant state, effect definitions, the turn
//! scheduler, and the encounter loop) behind pure APIs with no I/O.
//! External collaborators (catalogs, item use, persistence, the UI)
//! plug in through the oracle traits in [`env`]; randomness enters
//! only through [`env::RngOracle`].

pub mod action;
pub mod combatant;
pub mod config;
pub mod effect;
pub mod encounter;
pub mod env;
pub mod event;
pub mod monster;
pub mod stats;

pub use action::{ActionError, PlayerAction};
pub use combatant::{ActiveEffect, Combatant, Condition, ConditionKind, WeaponProfile};
pub use config::CombatConfig;
pub use effect::{ClassKind, EffectKind, EffectSpec, Skill};
pub use encounter::{ActionProvider, EncounterEngine, Outcome, Phase, Side};
pub use env::{ItemOracle, MonsterOracle, PcgRng, RewardSink, RngOracle, SkillOracle};
pub use event::CombatEvent;
pub use monster::{
    MonsterTemplate, Rarity, SpawnedMonster, VictoryRewards, compute_rewards, pick_template,
    resolve_template, spawn_monster,
};
pub use stats::{Attribute, Attributes, ResourceMeter};
