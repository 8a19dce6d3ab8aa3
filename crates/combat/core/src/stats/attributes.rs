//! The five-axis attribute set shared by players and monsters.

use strum::{Display, EnumIter, EnumString};

/// The five core attributes that define a combatant.
///
/// Displayed by their traditional short codes:
/// - **S** (Strength): melee damage scaling
/// - **A** (Agility): dodge, crit, initiative, flee
/// - **I** (Intelligence): spell scaling, sleep breakout
/// - **W** (Will): MP regeneration, mental magic scaling
/// - **L** (Luck): initiative weight
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Attribute {
    #[strum(to_string = "S", serialize = "strength")]
    Strength,
    #[strum(to_string = "A", serialize = "agility")]
    Agility,
    #[strum(to_string = "I", serialize = "intelligence")]
    Intelligence,
    #[strum(to_string = "W", serialize = "will")]
    Will,
    #[strum(to_string = "L", serialize = "luck")]
    Luck,
}

/// Attribute values for one combatant.
///
/// Values are floating-point because monster scaling and tavern-style
/// buffs can land on fractional points; formulas consume them as-is.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Attributes {
    pub strength: f64,
    pub agility: f64,
    pub intelligence: f64,
    pub will: f64,
    pub luck: f64,
}

impl Attributes {
    pub const fn new(
        strength: f64,
        agility: f64,
        intelligence: f64,
        will: f64,
        luck: f64,
    ) -> Self {
        Self {
            strength,
            agility,
            intelligence,
            will,
            luck,
        }
    }

    /// Value of a single attribute axis.
    pub fn get(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Strength => self.strength,
            Attribute::Agility => self.agility,
            Attribute::Intelligence => self.intelligence,
            Attribute::Will => self.will,
            Attribute::Luck => self.luck,
        }
    }
}
