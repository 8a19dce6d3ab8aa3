use strum::{Display, EnumString};

use crate::stats::{Attribute, Attributes};

use super::EffectKind;

/// Which side a skill belongs to in the catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ClassKind {
    Player,
    Monster,
}

/// One effect produced by a skill.
///
/// Immutable during combat; the magnitude is resolved against the
/// caster's attributes at cast time.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EffectSpec {
    /// Display name, also the key in a combatant's active-effect list.
    pub name: String,
    pub kind: EffectKind,
    /// Base magnitude before stat scaling.
    pub base: f64,
    /// Remaining turns once applied; 0 for instantaneous kinds.
    pub duration: u32,
    /// Stat the magnitude scales with, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub scaling: Option<Attribute>,
}

impl EffectSpec {
    /// Magnitude of this effect for the given caster.
    ///
    /// ```text
    /// magnitude = base + factor(kind) × scaling_stat
    /// ```
    pub fn magnitude(&self, caster: &Attributes) -> f64 {
        match self.scaling {
            Some(stat) => self.base + self.kind.scaling_factor() * caster.get(stat),
            None => self.base,
        }
    }
}

/// A castable skill: MP cost plus one or more effects.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub name: String,
    pub class: ClassKind,
    pub mp_cost: f64,
    pub effects: Vec<EffectSpec>,
}
