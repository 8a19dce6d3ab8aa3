//! Catalog-backed oracle implementations.

use combat_core::{MonsterOracle, MonsterTemplate, Skill, SkillOracle};

/// In-memory skill catalog. Catalog order is the casting priority
/// order monsters roll against.
#[derive(Clone, Debug, Default)]
pub struct SkillRegistry {
    skills: Vec<Skill>,
}

impl SkillRegistry {
    /// Builds a registry, keeping the first definition when a name
    /// repeats.
    pub fn new(skills: Vec<Skill>) -> Self {
        let mut deduped: Vec<Skill> = Vec::with_capacity(skills.len());
        for skill in skills {
            if deduped.iter().any(|s| s.name == skill.name) {
                tracing::warn!(skill = %skill.name, "duplicate skill definition ignored");
                continue;
            }
            deduped.push(skill);
        }
        Self { skills: deduped }
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }
}

impl SkillOracle for SkillRegistry {
    fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.iter().find(|s| s.name == name)
    }

    fn monster_skill_pool(&self, names: &[String]) -> Vec<&Skill> {
        self.skills
            .iter()
            .filter(|s| names.iter().any(|n| *n == s.name))
            .collect()
    }
}

/// In-memory monster template catalog.
#[derive(Clone, Debug, Default)]
pub struct MonsterCatalog {
    templates: Vec<MonsterTemplate>,
}

impl MonsterCatalog {
    pub fn new(templates: Vec<MonsterTemplate>) -> Self {
        Self { templates }
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl MonsterOracle for MonsterCatalog {
    fn template(&self, name: &str) -> Option<&MonsterTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    fn templates(&self) -> &[MonsterTemplate] {
        &self.templates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::{ClassKind, EffectKind, EffectSpec};

    fn skill(name: &str) -> Skill {
        Skill {
            name: name.into(),
            class: ClassKind::Player,
            mp_cost: 1.0,
            effects: vec![EffectSpec {
                name: name.into(),
                kind: EffectKind::DirectDamage,
                base: 1.0,
                duration: 0,
                scaling: None,
            }],
        }
    }

    #[test]
    fn duplicate_names_keep_the_first_definition() {
        let mut second = skill("firebolt");
        second.mp_cost = 99.0;
        let registry = SkillRegistry::new(vec![skill("firebolt"), second]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.skill("firebolt").unwrap().mp_cost, 1.0);
    }

    #[test]
    fn pool_preserves_catalog_order_and_skips_unknowns() {
        let registry = SkillRegistry::new(vec![skill("a"), skill("b"), skill("c")]);
        let names = vec!["c".to_string(), "ghost".to_string(), "a".to_string()];
        let pool = registry.monster_skill_pool(&names);
        let pooled: Vec<&str> = pool.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(pooled, vec!["a", "c"]);
    }
}
