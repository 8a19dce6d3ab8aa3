//! Skill and item effect definitions.
//!
//! Effect definitions come from an external catalog and are read-only
//! during combat. A skill always carries the normalized multi-effect
//! shape: the legacy single-effect catalog form is folded into a
//! one-element list at load time (see `combat-content`), so the
//! resolver only ever branches on [`EffectKind`].

mod kind;
mod skill;

pub use kind::EffectKind;
pub use skill::{ClassKind, EffectSpec, Skill};
