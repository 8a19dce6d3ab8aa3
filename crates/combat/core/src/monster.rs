//! Monster templates, spawning, and victory rewards.
//!
//! Templates are static catalog data; a fresh [`Combatant`] is rolled
//! from one at encounter start (random level in range, rarity-scaled
//! resources) and discarded when the encounter ends.

use strum::{Display, EnumString};

use crate::combatant::{Combatant, WeaponProfile};
use crate::config::CombatConfig;
use crate::env::{MonsterOracle, RngOracle};
use crate::stats::{Attributes, ResourceMeter};

/// Rarity tier, scaling resources and rewards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Rarity {
    #[default]
    Normal,
    Rare,
    Boss,
}

impl Rarity {
    pub fn multiplier(&self) -> f64 {
        match self {
            Rarity::Normal => 1.0,
            Rarity::Rare => 1.5,
            Rarity::Boss => 2.5,
        }
    }
}

/// Static monster definition supplied by an external loader.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rarity: Rarity,
    /// Inclusive level roll range for spawned instances.
    pub level_range: (u32, u32),
    pub base_hp: f64,
    pub base_mp: f64,
    /// Natural weapon damage range.
    pub damage: (f64, f64),
    pub attributes: Attributes,
    /// Skill names resolved against the registry, in casting priority
    /// order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<String>,
    pub armor_value: f64,
    /// Relative weight for random encounter selection.
    pub spawn_weight: u32,
}

/// A monster instance ready to fight, with the rarity kept alongside
/// for reward scaling.
#[derive(Clone, Debug, PartialEq)]
pub struct SpawnedMonster {
    pub combatant: Combatant,
    pub rarity: Rarity,
    pub skills: Vec<String>,
}

/// XP and gold granted for a victory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VictoryRewards {
    pub xp: u32,
    pub gold: u32,
}

/// Rolls a combat-ready instance from a template.
///
/// The level is rolled uniformly in the template range; HP and MP are
/// scaled by level growth and the rarity multiplier.
pub fn spawn_monster(
    template: &MonsterTemplate,
    rng: &mut dyn RngOracle,
    config: &CombatConfig,
) -> SpawnedMonster {
    let (lo, hi) = template.level_range;
    let level = rng.range_u32(lo.min(hi).max(1), hi.max(1));

    let scale =
        (1.0 + config.monster_level_growth * (level.saturating_sub(1)) as f64) * template.rarity.multiplier();
    let hp = (template.base_hp * scale).max(1.0);
    let mp = (template.base_mp * scale).max(0.0);

    let weapon = WeaponProfile {
        min: template.damage.0,
        max: template.damage.1,
        scaling: None,
        bonus_stats: Default::default(),
    };

    let combatant = Combatant::new(
        template.name.clone(),
        level,
        ResourceMeter::full(hp),
        ResourceMeter::full(mp),
        template.attributes,
        weapon,
        template.armor_value,
    );

    SpawnedMonster {
        combatant,
        rarity: template.rarity,
        skills: template.skills.clone(),
    }
}

/// Looks up a template by name, degrading to the first catalog entry
/// when the name is unknown. Returns the template and whether the
/// fallback fired (surfaced as a warning event by the caller).
pub fn resolve_template<'a>(
    oracle: &'a dyn MonsterOracle,
    name: &str,
) -> Option<(&'a MonsterTemplate, bool)> {
    if let Some(template) = oracle.template(name) {
        return Some((template, false));
    }
    let fallback = oracle.templates().first()?;
    tracing::warn!(requested = name, fallback = %fallback.name, "unknown monster, substituting first catalog entry");
    Some((fallback, true))
}

/// Spawn-weight-biased random template choice.
pub fn pick_template<'a>(
    oracle: &'a dyn MonsterOracle,
    rng: &mut dyn RngOracle,
) -> Option<&'a MonsterTemplate> {
    let templates = oracle.templates();
    let total: u32 = templates.iter().map(|t| t.spawn_weight.max(1)).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.range_u32(1, total);
    for template in templates {
        let weight = template.spawn_weight.max(1);
        if roll <= weight {
            return Some(template);
        }
        roll -= weight;
    }
    templates.last()
}

/// Victory rewards for a defeated monster.
///
/// Both values are strictly positive: XP scales linearly with level
/// and rarity, gold is rolled per level then rarity-scaled with a
/// floor of 1.
pub fn compute_rewards(
    level: u32,
    rarity: Rarity,
    rng: &mut dyn RngOracle,
    config: &CombatConfig,
) -> VictoryRewards {
    let level = level.max(1);
    let xp = ((config.xp_per_level * level) as f64 * rarity.multiplier()).round() as u32;
    let (gold_lo, gold_hi) = config.gold_per_level;
    let gold_roll = rng.range_u32(gold_lo * level, gold_hi * level);
    let gold = ((gold_roll as f64 * rarity.multiplier()).round() as u32).max(1);
    VictoryRewards {
        xp: xp.max(1),
        gold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;

    fn template(weight: u32) -> MonsterTemplate {
        MonsterTemplate {
            name: format!("mob_{weight}"),
            rarity: Rarity::Normal,
            level_range: (2, 5),
            base_hp: 30.0,
            base_mp: 10.0,
            damage: (2.0, 4.0),
            attributes: Attributes::default(),
            skills: vec![],
            armor_value: 0.0,
            spawn_weight: weight,
        }
    }

    struct Catalog(Vec<MonsterTemplate>);

    impl MonsterOracle for Catalog {
        fn template(&self, name: &str) -> Option<&MonsterTemplate> {
            self.0.iter().find(|t| t.name == name)
        }
        fn templates(&self) -> &[MonsterTemplate] {
            &self.0
        }
    }

    #[test]
    fn spawn_rolls_level_in_range_and_scales_hp() {
        let config = CombatConfig::default();
        let mut rng = PcgRng::new(42);
        let mut template = template(1);
        template.rarity = Rarity::Boss;
        for _ in 0..50 {
            let spawned = spawn_monster(&template, &mut rng, &config);
            let level = spawned.combatant.level;
            assert!((2..=5).contains(&level));
            let expected = 30.0 * (1.0 + 0.1 * (level - 1) as f64) * 2.5;
            assert!((spawned.combatant.hp.max() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn unknown_name_falls_back_to_first_entry() {
        let catalog = Catalog(vec![template(1), template(2)]);
        let (found, fellback) = resolve_template(&catalog, "mob_2").unwrap();
        assert_eq!(found.name, "mob_2");
        assert!(!fellback);

        let (fallback, fellback) = resolve_template(&catalog, "dragon").unwrap();
        assert_eq!(fallback.name, "mob_1");
        assert!(fellback);
    }

    #[test]
    fn weighted_pick_prefers_heavy_entries() {
        let catalog = Catalog(vec![template(1), template(20)]);
        let mut rng = PcgRng::new(7);
        let mut heavy = 0;
        for _ in 0..500 {
            if pick_template(&catalog, &mut rng).unwrap().name == "mob_20" {
                heavy += 1;
            }
        }
        assert!(heavy > 350, "heavy entry picked only {heavy}/500 times");
    }

    #[test]
    fn rewards_are_strictly_positive_and_rarity_scaled() {
        let config = CombatConfig::default();
        let mut rng = PcgRng::new(1);
        let normal = compute_rewards(3, Rarity::Normal, &mut rng, &config);
        assert!(normal.xp > 0 && normal.gold > 0);
        assert_eq!(normal.xp, 30);

        let boss = compute_rewards(3, Rarity::Boss, &mut rng, &config);
        assert_eq!(boss.xp, 75);
    }
}
