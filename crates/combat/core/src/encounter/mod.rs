//! Encounter loop and turn scheduling.

mod engine;
mod scheduler;

pub use engine::{ActionProvider, EncounterEngine};
pub use scheduler::{CycleStatus, Outcome, Phase, Side, TurnScheduler};
