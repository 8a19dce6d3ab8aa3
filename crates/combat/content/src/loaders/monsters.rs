//! Monster template catalog loader.

use std::path::Path;

use combat_core::MonsterTemplate;
use serde::Deserialize;

use crate::loaders::{LoadResult, read_file};
use crate::registry::MonsterCatalog;

/// Monster catalog structure for RON files.
#[derive(Debug, Deserialize)]
struct RawCatalog {
    monsters: Vec<MonsterTemplate>,
}

/// Loader for monster catalogs from RON files.
pub struct MonsterLoader;

impl MonsterLoader {
    /// Load a monster catalog from a RON file.
    ///
    /// The catalog must be non-empty and every template must carry a
    /// sane level range and damage range.
    pub fn load(path: &Path) -> LoadResult<MonsterCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub(crate) fn parse(content: &str) -> LoadResult<MonsterCatalog> {
        let raw: RawCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse monster catalog RON: {}", e))?;
        if raw.monsters.is_empty() {
            anyhow::bail!("monster catalog is empty");
        }
        for template in &raw.monsters {
            let (lo, hi) = template.level_range;
            if lo == 0 || lo > hi {
                anyhow::bail!("monster '{}': bad level range ({lo}, {hi})", template.name);
            }
            if template.damage.0 > template.damage.1 || template.damage.0 < 0.0 {
                anyhow::bail!("monster '{}': bad damage range", template.name);
            }
            if template.base_hp <= 0.0 {
                anyhow::bail!("monster '{}': non-positive base HP", template.name);
            }
        }
        Ok(MonsterCatalog::new(raw.monsters))
    }
}
