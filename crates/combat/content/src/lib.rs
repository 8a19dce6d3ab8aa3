//! Data-driven combat content and loaders.
//!
//! This crate houses static catalog data and provides loaders for RON
//! data files:
//! - Skill catalogs (data-driven via RON)
//! - Monster templates (data-driven via RON)
//! - Item catalogs (data-driven via RON)
//!
//! Catalogs back the oracle traits from `combat-core`; content is
//! consumed through those seams and never appears in combat state.
//! A default catalog set is compiled in via [`embedded`].

pub mod embedded;
pub mod items;
pub mod loaders;
pub mod registry;

pub use items::{Inventory, ItemDefinition, ItemKind};
pub use loaders::{ItemLoader, LoadResult, MonsterLoader, SkillLoader};
pub use registry::{MonsterCatalog, SkillRegistry};
