//! Content loaders for reading catalog data from RON files.

pub mod items;
pub mod monsters;
pub mod skills;

pub use items::ItemLoader;
pub use monsters::MonsterLoader;
pub use skills::SkillLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
