//! Turn scheduler state machine.
//!
//! `Init → (initiative roll) → PlayerTurn | MonsterTurn → … →
//! Resolved`. The scheduler also owns the cycle boundary: effect
//! decay runs exactly once per full cycle, and only a *terminal*
//! action ever reaches [`TurnScheduler::end_turn`], so replayed menu
//! interactions can never double-apply it.

use strum::Display;

use crate::monster::VictoryRewards;

/// Turn owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Monster,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::Player => Side::Monster,
            Side::Monster => Side::Player,
        }
    }
}

/// Terminal resolution of an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Victory { rewards: VictoryRewards },
    Defeat,
    Flee,
}

/// Scheduler phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Created, initiative not yet rolled.
    Init,
    PlayerTurn,
    MonsterTurn,
    Resolved(Outcome),
}

/// Whether ending a turn completed a full cycle (both sides acted).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleStatus {
    MidCycle,
    CycleComplete,
}

#[derive(Clone, Debug)]
pub struct TurnScheduler {
    phase: Phase,
    turns_in_cycle: u8,
}

impl TurnScheduler {
    pub fn new() -> Self {
        Self {
            phase: Phase::Init,
            turns_in_cycle: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.phase, Phase::Resolved(_))
    }

    /// Side currently holding the turn, if the encounter is live.
    pub fn current_side(&self) -> Option<Side> {
        match self.phase {
            Phase::PlayerTurn => Some(Side::Player),
            Phase::MonsterTurn => Some(Side::Monster),
            _ => None,
        }
    }

    /// Applies the initiative roll. Valid only once, out of `Init`.
    pub fn start(&mut self, first: Side) {
        debug_assert!(matches!(self.phase, Phase::Init));
        self.turns_in_cycle = 0;
        self.phase = match first {
            Side::Player => Phase::PlayerTurn,
            Side::Monster => Phase::MonsterTurn,
        };
    }

    /// Ends the current turn and hands control to the opponent.
    ///
    /// Returns `CycleComplete` when this was the second turn of the
    /// cycle, i.e. the single point where cycle-wide decay is due.
    pub fn end_turn(&mut self) -> CycleStatus {
        let next = match self.phase {
            Phase::PlayerTurn => Phase::MonsterTurn,
            Phase::MonsterTurn => Phase::PlayerTurn,
            _ => return CycleStatus::MidCycle,
        };
        self.phase = next;
        self.turns_in_cycle += 1;
        if self.turns_in_cycle >= 2 {
            self.turns_in_cycle = 0;
            CycleStatus::CycleComplete
        } else {
            CycleStatus::MidCycle
        }
    }

    /// Locks in a terminal outcome; further transitions are no-ops.
    pub fn resolve(&mut self, outcome: Outcome) {
        if !self.is_resolved() {
            self.phase = Phase::Resolved(outcome);
        }
    }
}

impl Default for TurnScheduler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turns_alternate_after_initiative() {
        let mut scheduler = TurnScheduler::new();
        scheduler.start(Side::Monster);
        assert_eq!(scheduler.current_side(), Some(Side::Monster));
        scheduler.end_turn();
        assert_eq!(scheduler.current_side(), Some(Side::Player));
        scheduler.end_turn();
        assert_eq!(scheduler.current_side(), Some(Side::Monster));
    }

    #[test]
    fn cycle_completes_every_second_turn() {
        let mut scheduler = TurnScheduler::new();
        scheduler.start(Side::Player);
        assert_eq!(scheduler.end_turn(), CycleStatus::MidCycle);
        assert_eq!(scheduler.end_turn(), CycleStatus::CycleComplete);
        assert_eq!(scheduler.end_turn(), CycleStatus::MidCycle);
        assert_eq!(scheduler.end_turn(), CycleStatus::CycleComplete);
    }

    #[test]
    fn resolution_is_sticky() {
        let mut scheduler = TurnScheduler::new();
        scheduler.start(Side::Player);
        scheduler.resolve(Outcome::Flee);
        scheduler.resolve(Outcome::Defeat);
        assert_eq!(scheduler.phase(), Phase::Resolved(Outcome::Flee));
        assert_eq!(scheduler.end_turn(), CycleStatus::MidCycle);
        assert_eq!(scheduler.phase(), Phase::Resolved(Outcome::Flee));
    }
}
