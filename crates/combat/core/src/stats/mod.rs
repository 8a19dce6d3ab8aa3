//! Stat & Formula Layer.
//!
//! Pure functions mapping combatant attributes to derived values:
//! initiative weight, dodge and crit chance, armor reduction, MP
//! regeneration, and weapon damage ranges. No state, no I/O, no
//! randomness; rolls happen in the resolver, against the chances
//! computed here.

pub mod attributes;
pub mod formulas;
pub mod resources;

pub use attributes::{Attribute, Attributes};
pub use formulas::{
    armor_reduction, crit_chance, dodge_chance, first_turn_probability, flee_chance,
    initiative_weight, max_hp, max_mp, mp_regen, reduce_damage, weapon_damage_range,
};
pub use resources::ResourceMeter;
