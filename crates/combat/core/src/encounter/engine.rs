//! The encounter loop.
//!
//! One [`EncounterEngine`] owns the full context of a single
//! encounter: the player (borrowed from the long-lived session), a
//! fresh monster instance, the oracle seams, and the scheduler. The
//! API is step-wise (the player's action selection is a suspension
//! point that lives outside the core) with a blocking [`run`]
//! convenience on top.
//!
//! [`run`]: EncounterEngine::run

use crate::action::{monster_take_turn, resolve_attack, resolve_skill, ActionError, PlayerAction};
use crate::combatant::{Combatant, ConditionKind};
use crate::config::CombatConfig;
use crate::effect::{ClassKind, EffectKind};
use crate::env::{ItemOracle, RewardSink, RngOracle, SkillOracle};
use crate::event::CombatEvent;
use crate::monster::{compute_rewards, Rarity, SpawnedMonster};
use crate::stats;

use super::scheduler::{CycleStatus, Outcome, Phase, Side, TurnScheduler};

/// Supplies the player's next action; the blocking suspension point
/// of the loop. Front ends implement this over their menu stack,
/// tests over scripted sequences.
pub trait ActionProvider {
    fn next_action(&mut self, player: &Combatant, monster: &Combatant) -> PlayerAction;
}

/// Drives one encounter from initiative roll to resolution.
pub struct EncounterEngine<'a> {
    player: &'a mut Combatant,
    monster: Combatant,
    monster_skills: Vec<String>,
    rarity: Rarity,
    skills: &'a dyn SkillOracle,
    items: &'a mut dyn ItemOracle,
    rewards: &'a mut dyn RewardSink,
    rng: &'a mut dyn RngOracle,
    config: CombatConfig,
    scheduler: TurnScheduler,
    events: Vec<CombatEvent>,
}

impl<'a> EncounterEngine<'a> {
    pub fn new(
        player: &'a mut Combatant,
        monster: SpawnedMonster,
        skills: &'a dyn SkillOracle,
        items: &'a mut dyn ItemOracle,
        rewards: &'a mut dyn RewardSink,
        rng: &'a mut dyn RngOracle,
        config: CombatConfig,
    ) -> Self {
        Self {
            player,
            monster: monster.combatant,
            monster_skills: monster.skills,
            rarity: monster.rarity,
            skills,
            items,
            rewards,
            rng,
            config,
            scheduler: TurnScheduler::new(),
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.scheduler.phase()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.scheduler.phase() {
            Phase::Resolved(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn player(&self) -> &Combatant {
        self.player
    }

    pub fn monster(&self) -> &Combatant {
        &self.monster
    }

    /// Events emitted since the last drain, in order.
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Rolls initiative and opens the first turn. Idempotent: calling
    /// it on an already-started encounter does nothing.
    pub fn begin(&mut self) {
        if !matches!(self.scheduler.phase(), Phase::Init) {
            return;
        }

        // Temporary combat modifiers reset at encounter start.
        self.player.reset_combat_state();
        self.monster.reset_combat_state();

        self.events.push(CombatEvent::EncounterStarted {
            monster: self.monster.name.clone(),
            level: self.monster.level,
        });

        let own = stats::initiative_weight(&self.player.attributes);
        let opponent = stats::initiative_weight(&self.monster.attributes);
        let p = stats::first_turn_probability(own, opponent);
        let first = if self.rng.chance(p) {
            Side::Player
        } else {
            Side::Monster
        };
        tracing::debug!(player_weight = own, monster_weight = opponent, %first, "initiative rolled");

        self.events.push(CombatEvent::FirstTurn { side: first });
        self.scheduler.start(first);
        self.open_turn(first);
    }

    /// Executes one terminal player action.
    ///
    /// `Err` means the action failed before mutating anything (bad
    /// skill name, insufficient MP, curse, failed item use): the
    /// player keeps the turn and may choose again. `Ok` means the
    /// turn was consumed, including by a failed flee attempt.
    pub fn player_action(&mut self, action: PlayerAction) -> Result<(), ActionError> {
        match self.scheduler.phase() {
            Phase::PlayerTurn => {}
            Phase::Resolved(_) => return Err(ActionError::EncounterOver),
            _ => return Err(ActionError::NotPlayerTurn),
        }

        match action {
            PlayerAction::Attack => {
                resolve_attack(
                    self.player,
                    &mut self.monster,
                    Side::Player,
                    self.rng,
                    &self.config,
                    &mut self.events,
                );
            }
            PlayerAction::CastSkill(name) => {
                let skills = self.skills;
                let skill = skills
                    .skill(&name)
                    .ok_or_else(|| ActionError::UnknownSkill(name.clone()))?;
                if skill.class != ClassKind::Player {
                    return Err(ActionError::WrongClass(name));
                }
                resolve_skill(
                    self.player,
                    &mut self.monster,
                    Side::Player,
                    skill,
                    &mut self.events,
                )?;
            }
            PlayerAction::UseItem(name) => {
                if !self.items.use_in_combat(self.player, &name) {
                    return Err(ActionError::ItemFailed(name));
                }
                self.events.push(CombatEvent::ItemUsed { item: name });
            }
            PlayerAction::Flee => {
                let p = stats::flee_chance(
                    self.player.attributes.agility,
                    self.monster.attributes.agility,
                    &self.config,
                );
                let success = self.rng.chance(p);
                self.events.push(CombatEvent::FleeAttempt { success });
                if success {
                    self.events.push(CombatEvent::Fled);
                    self.scheduler.resolve(Outcome::Flee);
                    return Ok(());
                }
                // A failed flee still consumes the turn.
            }
        }

        self.check_terminal();
        if !self.scheduler.is_resolved() {
            self.advance();
        }
        Ok(())
    }

    /// Runs the monster's turn. Always consumes one scheduler step,
    /// whether or not the monster could act; skill resolution errors
    /// are contained here and degrade to a visible warning.
    pub fn monster_turn(&mut self) -> Result<(), ActionError> {
        match self.scheduler.phase() {
            Phase::MonsterTurn => {}
            Phase::Resolved(_) => return Err(ActionError::EncounterOver),
            _ => return Err(ActionError::NotMonsterTurn),
        }

        if let Err(error) = monster_take_turn(
            &mut self.monster,
            self.player,
            &self.monster_skills,
            self.skills,
            self.rng,
            &self.config,
            &mut self.events,
        ) {
            tracing::warn!(%error, "monster action failed, turn forfeited");
            self.events.push(CombatEvent::Warning {
                message: format!("the {} falters: {error}", self.monster.name),
            });
        }

        self.check_terminal();
        if !self.scheduler.is_resolved() {
            self.advance();
        }
        Ok(())
    }

    /// Drives the encounter to resolution, pulling player actions
    /// from `provider`. Blocks for as long as the provider does;
    /// rejected actions are surfaced as warnings and re-requested.
    pub fn run(&mut self, provider: &mut dyn ActionProvider) -> Outcome {
        loop {
            match self.scheduler.phase() {
                Phase::Init => self.begin(),
                Phase::PlayerTurn => {
                    let action = provider.next_action(self.player, &self.monster);
                    if let Err(error) = self.player_action(action) {
                        self.events.push(CombatEvent::Warning {
                            message: error.to_string(),
                        });
                    }
                }
                Phase::MonsterTurn => {
                    // Phase is checked right above; the call cannot be
                    // out of turn.
                    let _ = self.monster_turn();
                }
                Phase::Resolved(outcome) => return outcome,
            }
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Ends the current turn and walks the scheduler forward until a
    /// side can actually act (or the encounter resolves). A sleeping
    /// player who fails the breakout roll spends their turn inside
    /// this loop.
    fn advance(&mut self) {
        loop {
            if let CycleStatus::CycleComplete = self.scheduler.end_turn() {
                self.cycle_decay();
            }
            if self.scheduler.is_resolved() {
                return;
            }
            let Some(side) = self.scheduler.current_side() else {
                return;
            };
            self.open_turn(side);
            if self.scheduler.is_resolved() {
                return;
            }

            // The monster's sleep gate lives in its policy (the turn
            // is an explicit scheduler step either way); the player's
            // is handled here so the front end is never prompted for
            // a turn that cannot happen.
            if side == Side::Player && self.player.is_asleep() {
                let breakout = self.config.sleep_breakout_per_intelligence
                    * self.player.attributes.intelligence;
                if self.rng.chance(breakout) {
                    self.player.clear_condition(ConditionKind::Sleep);
                    self.events.push(CombatEvent::ConditionLifted {
                        side: Side::Player,
                        condition: ConditionKind::Sleep,
                    });
                } else {
                    self.events.push(CombatEvent::SleptThrough { side: Side::Player });
                    continue;
                }
            }
            return;
        }
    }

    /// Start-of-turn upkeep for `side`: MP regeneration, then the
    /// first periodic effect in the owner's list ticks and
    /// self-decrements. Runs exactly once per turn; repeated menu
    /// interactions never re-enter it.
    fn open_turn(&mut self, side: Side) {
        let Self {
            player,
            monster,
            config,
            events,
            ..
        } = self;
        let (owner, opponent) = match side {
            Side::Player => (&mut **player, &mut *monster),
            Side::Monster => (&mut *monster, &mut **player),
        };

        let regen = stats::mp_regen(&owner.attributes, config);
        if regen > 0.0 && owner.mp.current() < owner.mp.max() {
            owner.regen_mp(regen);
            events.push(CombatEvent::MpRegenerated {
                side,
                amount: regen,
            });
        }

        // First-match-only periodic tick: additional DOT/HOT entries
        // wait until the one ahead of them expires.
        if let Some(effect) = owner.first_periodic_effect().cloned() {
            match effect.kind {
                EffectKind::DamageOverTime => {
                    opponent.apply_damage(effect.magnitude);
                    events.push(CombatEvent::PeriodicDamage {
                        source: side,
                        effect: effect.name.clone(),
                        amount: effect.magnitude,
                    });
                }
                EffectKind::HealOverTime => {
                    owner.apply_heal(effect.magnitude);
                    events.push(CombatEvent::PeriodicHeal {
                        side,
                        effect: effect.name.clone(),
                        amount: effect.magnitude,
                    });
                }
                _ => {}
            }
            if owner.decrement_effect(&effect.name) {
                events.push(CombatEvent::EffectExpired {
                    owner: side,
                    effect: effect.name,
                });
            }
        }

        self.check_terminal();
    }

    /// End-of-cycle decay for both sides: every non-periodic effect
    /// and every status condition loses one turn.
    fn cycle_decay(&mut self) {
        for side in [Side::Player, Side::Monster] {
            let report = match side {
                Side::Player => self.player.decrement_effects(),
                Side::Monster => self.monster.decrement_effects(),
            };
            for effect in report.expired_effects {
                self.events.push(CombatEvent::EffectExpired {
                    owner: side,
                    effect,
                });
            }
            for condition in report.lifted_conditions {
                self.events.push(CombatEvent::ConditionLifted { side, condition });
            }
        }
    }

    /// Terminal condition check, run after every HP mutation. Victory
    /// applies rewards in memory and commits them to the persistence
    /// collaborator exactly once.
    fn check_terminal(&mut self) {
        if self.scheduler.is_resolved() {
            return;
        }
        if !self.monster.is_alive() {
            let rewards = compute_rewards(self.monster.level, self.rarity, self.rng, &self.config);
            self.player.xp += rewards.xp;
            self.player.gold += rewards.gold;
            self.events.push(CombatEvent::VictoryRewards { rewards });
            self.rewards.commit_victory(self.player, &rewards);
            self.scheduler.resolve(Outcome::Victory { rewards });
            return;
        }
        if !self.player.is_alive() {
            self.events.push(CombatEvent::Defeated);
            self.scheduler.resolve(Outcome::Defeat);
        }
    }
}
