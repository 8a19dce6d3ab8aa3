/// Combat configuration constants and tunable parameters.
///
/// All balance numbers used by the formula layer and the resolver live
/// here so tests and front ends can tweak them without touching the
/// rules themselves. `Default` is the shipped balance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatConfig {
    /// Damage multiplier applied on a critical hit.
    pub crit_multiplier: f64,
    /// Critical-hit chance per point of Agility (player attacks only).
    pub crit_chance_per_agility: f64,
    /// Dodge chance per point of Agility.
    pub dodge_chance_per_agility: f64,
    /// MP restored per point of Will at the start of the owner's turn.
    pub mp_regen_per_will: f64,
    /// Base flee success probability.
    pub flee_base: f64,
    /// Flee probability shift per point of Agility difference.
    pub flee_agility_factor: f64,
    /// Sleep-breakout chance per point of Intelligence.
    pub sleep_breakout_per_intelligence: f64,
    /// Chance that the monster casts an MP-eligible skill when polled.
    pub monster_skill_chance: f64,
    /// Monster HP/MP growth per level above 1.
    pub monster_level_growth: f64,
    /// XP awarded per monster level (before rarity scaling).
    pub xp_per_level: u32,
    /// Gold roll bounds per monster level (before rarity scaling).
    pub gold_per_level: (u32, u32),
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum simultaneous status conditions on one combatant.
    pub const MAX_CONDITIONS: usize = 4;
    /// Maximum secondary scaling stats on one weapon.
    pub const MAX_WEAPON_BONUS_STATS: usize = 4;

    pub fn new() -> Self {
        Self {
            crit_multiplier: 1.5,
            crit_chance_per_agility: 0.02,
            dodge_chance_per_agility: 0.02,
            mp_regen_per_will: 0.3,
            flee_base: 0.5,
            flee_agility_factor: 0.05,
            sleep_breakout_per_intelligence: 0.05,
            monster_skill_chance: 0.5,
            monster_level_growth: 0.1,
            xp_per_level: 10,
            gold_per_level: (2, 6),
        }
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
