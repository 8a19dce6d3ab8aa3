//! Action resolution.
//!
//! The resolver computes the outcome of one chosen action against the
//! current state: attacks with dodge/crit/armor, skill casts branched
//! by effect kind, delegated item use, flee rolls, and the monster's
//! fixed probability policy.

mod monster_policy;
mod resolve;

pub use monster_policy::monster_take_turn;
pub use resolve::{resolve_attack, resolve_skill};

/// Terminal actions a player can take on their turn.
///
/// Submenu navigation never reaches the core: the front end only
/// submits one of these once the player commits. A failed skill or
/// item attempt returns an error and leaves the turn with the player;
/// a failed flee still consumes it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    Attack,
    CastSkill(String),
    UseItem(String),
    Flee,
}

/// Why an action could not be carried out.
///
/// All of these are reported and non-fatal; for player actions the
/// turn is not consumed, so the player may pick again.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    #[error("it is not the player's turn")]
    NotPlayerTurn,

    #[error("it is not the monster's turn")]
    NotMonsterTurn,

    #[error("the encounter is already resolved")]
    EncounterOver,

    #[error("insufficient MP")]
    InsufficientMp,

    #[error("a curse blocks spellcasting")]
    Cursed,

    #[error("unknown skill `{0}`")]
    UnknownSkill(String),

    #[error("skill `{0}` is not usable by this side")]
    WrongClass(String),

    #[error("item `{0}` could not be used")]
    ItemFailed(String),
}
