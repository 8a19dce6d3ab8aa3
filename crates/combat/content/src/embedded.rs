//! Catalogs compiled into the binary.
//!
//! The data files under `data/` ship inside the crate so a front end
//! works with no external assets; file loaders remain available for
//! overriding any of them.

use crate::items::ItemDefinition;
use crate::loaders::{ItemLoader, LoadResult, MonsterLoader, SkillLoader};
use crate::registry::{MonsterCatalog, SkillRegistry};

const SKILLS: &str = include_str!("../data/skills.ron");
const MONSTERS: &str = include_str!("../data/monsters.ron");
const ITEMS: &str = include_str!("../data/items.ron");

pub fn skill_registry() -> LoadResult<SkillRegistry> {
    SkillLoader::parse(SKILLS)
}

pub fn monster_catalog() -> LoadResult<MonsterCatalog> {
    MonsterLoader::parse(MONSTERS)
}

pub fn item_catalog() -> LoadResult<Vec<ItemDefinition>> {
    ItemLoader::parse(ITEMS)
}
