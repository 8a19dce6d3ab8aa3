//! Traits describing the encounter's external collaborators.
//!
//! The core treats catalogs, item use, and result persistence as
//! black boxes behind these traits so the resolver never couples to
//! loaders, save files, or a UI. `combat-content` provides the
//! catalog-backed implementations.

mod rng;

pub use rng::{PcgRng, RngOracle};

use crate::combatant::Combatant;
use crate::effect::Skill;
use crate::monster::{MonsterTemplate, VictoryRewards};

/// Read-only skill/effect catalog (the Effect Registry).
///
/// Lookup must be deterministic: repeated calls with the same name
/// return the same definition, and pool iteration order is stable.
pub trait SkillOracle {
    /// Definition for one skill, if the catalog knows it.
    fn skill(&self, name: &str) -> Option<&Skill>;

    /// Skills from `names` the catalog knows, in catalog order.
    ///
    /// Unknown names are skipped; the monster policy rolls eligibility
    /// against exactly this sequence.
    fn monster_skill_pool(&self, names: &[String]) -> Vec<&Skill>;
}

/// Read-only monster template catalog.
pub trait MonsterOracle {
    fn template(&self, name: &str) -> Option<&MonsterTemplate>;

    /// All templates in catalog order; must be non-empty for spawning.
    fn templates(&self) -> &[MonsterTemplate];
}

/// Item-use collaborator.
///
/// Owns inventory bookkeeping and performs its own state mutation
/// (healing, buffs, unit removal). The core only consumes the boolean
/// result: `true` ends the player's turn, `false` leaves it.
pub trait ItemOracle {
    fn use_in_combat(&mut self, user: &mut Combatant, item: &str) -> bool;
}

/// Persistence collaborator, invoked exactly once per victory after
/// XP and gold have already been applied to the player in memory.
/// Defeat and flee resolutions never reach it.
pub trait RewardSink {
    fn commit_victory(&mut self, player: &Combatant, rewards: &VictoryRewards);
}
