use strum::{Display, EnumIter, EnumString};

/// The nine effect kinds a skill or item can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EffectKind {
    // ========================================================================
    // Offense
    // ========================================================================
    /// Raises both ends of the weapon damage range while active.
    DamageBonus,
    /// Immediate HP loss on the opponent, bypassing armor.
    DirectDamage,
    /// HP loss on the opponent once per the caster's own turn.
    DamageOverTime,

    // ========================================================================
    // Recovery
    // ========================================================================
    /// Immediate HP restoration on the caster.
    Heal,
    /// HP restoration on the caster once per their own turn.
    HealOverTime,

    // ========================================================================
    // Defense
    // ========================================================================
    /// Temporary percentage armor while active.
    ArmorBonus,
    /// Temporary percentage dodge while active.
    DodgeBonus,

    // ========================================================================
    // Status conditions
    // ========================================================================
    /// Opponent loses actions until broken out of or expired.
    Sleep,
    /// Opponent cannot cast skills while active.
    Curse,
}

impl EffectKind {
    /// Fixed per-kind factor applied to the scaling stat when the
    /// effect magnitude is computed.
    pub fn scaling_factor(&self) -> f64 {
        match self {
            EffectKind::DirectDamage => 1.0,
            EffectKind::DamageOverTime => 0.2,
            _ => 0.5,
        }
    }

    /// Periodic kinds tick once per the owner's turn and decrement on
    /// that path instead of the end-of-cycle decay.
    pub fn is_periodic(&self) -> bool {
        matches!(self, EffectKind::DamageOverTime | EffectKind::HealOverTime)
    }

    /// Instantaneous kinds mutate HP at cast time and are never
    /// stored as active effects.
    pub fn is_instant(&self) -> bool {
        matches!(self, EffectKind::DirectDamage | EffectKind::Heal)
    }
}
