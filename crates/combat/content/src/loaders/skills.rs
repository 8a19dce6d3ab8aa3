//! Skill catalog loader.

use std::path::Path;

use combat_core::{Attribute, ClassKind, EffectKind, EffectSpec, Skill};
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::registry::SkillRegistry;

/// Skill catalog structure for RON files.
///
/// Entries come in two shapes. The current form lists effects
/// explicitly:
///
/// ```ron
/// (name: "firebolt", class: player, mp_cost: 4.0,
///  effects: [(name: "firebolt", kind: direct_damage, base: 6.0,
///             duration: 0, scaling: Some(intelligence))])
/// ```
///
/// The shorthand form describes a single effect inline and names it
/// after the skill:
///
/// ```ron
/// (name: "venom", class: player, mp_cost: 3.0,
///  kind: Some(damage_over_time), base: 3.0, duration: 3)
/// ```
#[derive(Debug, Deserialize)]
struct SkillCatalog {
    skills: Vec<RawSkill>,
}

#[derive(Debug, Deserialize)]
struct RawSkill {
    name: String,
    class: ClassKind,
    mp_cost: f64,
    #[serde(default)]
    effects: Vec<EffectSpec>,
    #[serde(default)]
    kind: Option<EffectKind>,
    #[serde(default)]
    base: f64,
    #[serde(default)]
    duration: u32,
    #[serde(default)]
    scaling: Option<Attribute>,
}

impl RawSkill {
    fn normalize(self) -> LoadResult<Skill> {
        let mut effects = self.effects;
        if let Some(kind) = self.kind {
            effects.push(EffectSpec {
                name: self.name.clone(),
                kind,
                base: self.base,
                duration: self.duration,
                scaling: self.scaling,
            });
        }
        if effects.is_empty() {
            anyhow::bail!("skill '{}' defines no effects", self.name);
        }
        for effect in &effects {
            if effect.duration == 0 && !effect.kind.is_instant() {
                anyhow::bail!(
                    "skill '{}': effect '{}' needs a duration",
                    self.name,
                    effect.name
                );
            }
        }
        Ok(Skill {
            name: self.name,
            class: self.class,
            mp_cost: self.mp_cost,
            effects,
        })
    }
}

/// Loader for skill catalogs from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load a skill registry from a RON file.
    pub fn load(path: &Path) -> LoadResult<SkillRegistry> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub(crate) fn parse(content: &str) -> LoadResult<SkillRegistry> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;
        let skills = catalog
            .skills
            .into_iter()
            .map(RawSkill::normalize)
            .collect::<LoadResult<Vec<_>>>()?;
        Ok(SkillRegistry::new(skills))
    }
}
