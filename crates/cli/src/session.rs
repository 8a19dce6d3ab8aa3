//! One play session: a hero and a chain of encounters.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use combat_content::{Inventory, MonsterCatalog, SkillRegistry};
use combat_core::{
    Attributes, CombatConfig, Combatant, EncounterEngine, ItemOracle, Outcome, PcgRng, Phase,
    ResourceMeter, RewardSink, VictoryRewards, WeaponProfile, pick_template, spawn_monster, stats,
};

use crate::{menu, render};

/// Inventory handle shared between the engine's item oracle and the
/// item submenu.
#[derive(Clone)]
pub struct SharedInventory(Rc<RefCell<Inventory>>);

impl SharedInventory {
    pub fn new(inventory: Inventory) -> Self {
        Self(Rc::new(RefCell::new(inventory)))
    }

    pub fn handle(&self) -> Rc<RefCell<Inventory>> {
        Rc::clone(&self.0)
    }
}

impl ItemOracle for SharedInventory {
    fn use_in_combat(&mut self, user: &mut Combatant, item: &str) -> bool {
        self.0.borrow_mut().use_in_combat(user, item)
    }
}

/// Session-scoped victory tally standing in for a save file.
#[derive(Debug, Default)]
pub struct SessionLedger {
    pub victories: u32,
    pub xp_earned: u32,
    pub gold_earned: u32,
}

impl RewardSink for SessionLedger {
    fn commit_victory(&mut self, player: &Combatant, rewards: &VictoryRewards) {
        self.victories += 1;
        self.xp_earned += rewards.xp;
        self.gold_earned += rewards.gold;
        tracing::info!(
            player = %player.name,
            xp = rewards.xp,
            gold = rewards.gold,
            victories = self.victories,
            "victory recorded"
        );
    }
}

pub struct Session {
    player: Combatant,
    skills: SkillRegistry,
    monsters: MonsterCatalog,
    inventory: SharedInventory,
    ledger: SessionLedger,
    rng: PcgRng,
    config: CombatConfig,
}

impl Session {
    pub fn new(
        skills: SkillRegistry,
        monsters: MonsterCatalog,
        inventory: Inventory,
    ) -> Result<Self> {
        if monsters.is_empty() {
            anyhow::bail!("monster catalog is empty");
        }

        let name = menu::prompt("Name your hero: ")?;
        let name = if name.is_empty() { "Adventurer".to_string() } else { name };

        let level = 1;
        let attributes = Attributes {
            strength: 6.0,
            agility: 5.0,
            intelligence: 5.0,
            will: 4.0,
            luck: 3.0,
        };
        let weapon = WeaponProfile {
            min: 3.0,
            max: 6.0,
            scaling: Some(combat_core::Attribute::Strength),
            bonus_stats: Default::default(),
        };
        let player = Combatant::new(
            name,
            level,
            ResourceMeter::full(stats::max_hp(level, &attributes)),
            ResourceMeter::full(stats::max_mp(level, &attributes)),
            attributes,
            weapon,
            5.0,
        );

        Ok(Self {
            player,
            skills,
            monsters,
            inventory: SharedInventory::new(inventory),
            ledger: SessionLedger::default(),
            rng: PcgRng::from_entropy(),
            config: CombatConfig::default(),
        })
    }

    pub fn run(mut self) -> Result<()> {
        println!("\nWelcome, {}. The dungeon awaits.", self.player.name);
        loop {
            match self.encounter()? {
                Outcome::Defeat => break,
                Outcome::Victory { .. } | Outcome::Flee => {
                    if !menu::confirm("\nVenture deeper? (y/n) ")? {
                        break;
                    }
                }
            }
        }
        println!(
            "\n{} retires with {} XP, {} gold and {} victories.",
            self.player.name, self.player.xp, self.player.gold, self.ledger.victories
        );
        Ok(())
    }

    fn encounter(&mut self) -> Result<Outcome> {
        let template = pick_template(&self.monsters, &mut self.rng)
            .ok_or_else(|| anyhow::anyhow!("monster catalog is empty"))?;
        let spawned = spawn_monster(template, &mut self.rng, &self.config);
        let monster_name = spawned.combatant.name.clone();
        tracing::debug!(monster = %monster_name, level = spawned.combatant.level, "encounter rolled");

        let bag = self.inventory.handle();
        let mut engine = EncounterEngine::new(
            &mut self.player,
            spawned,
            &self.skills,
            &mut self.inventory,
            &mut self.ledger,
            &mut self.rng,
            self.config.clone(),
        );
        engine.begin();

        loop {
            for event in engine.drain_events() {
                println!("{}", render::describe(&event, &monster_name));
            }
            match engine.phase() {
                Phase::Init => engine.begin(),
                Phase::PlayerTurn => {
                    let action = menu::player_turn(
                        engine.player(),
                        engine.monster(),
                        &self.skills,
                        &bag.borrow(),
                    )?;
                    if let Err(error) = engine.player_action(action) {
                        println!("({error})");
                    }
                }
                Phase::MonsterTurn => {
                    // Phase was just checked; the call cannot be out
                    // of turn.
                    let _ = engine.monster_turn();
                }
                Phase::Resolved(outcome) => return Ok(outcome),
            }
        }
    }
}
