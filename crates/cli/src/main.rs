//! Terminal client entry point.
mod menu;
mod render;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use combat_content::{Inventory, ItemLoader, MonsterLoader, SkillLoader, embedded};
use session::Session;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let (skills, monsters, items) = match std::env::var_os("COMBAT_DATA") {
        Some(dir) => {
            let dir = PathBuf::from(dir);
            (
                SkillLoader::load(&dir.join("skills.ron"))?,
                MonsterLoader::load(&dir.join("monsters.ron"))?,
                ItemLoader::load(&dir.join("items.ron"))?,
            )
        }
        None => (
            embedded::skill_registry()?,
            embedded::monster_catalog()?,
            embedded::item_catalog()?,
        ),
    };

    // Starting supplies: a few of each of the cheapest consumables.
    let mut inventory = Inventory::new();
    for (index, item) in items.into_iter().take(3).enumerate() {
        inventory.add(item, 3 - index as u32);
    }

    Session::new(skills, monsters, inventory)?.run()
}
