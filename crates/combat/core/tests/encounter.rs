//! End-to-end encounter scenarios.

use combat_core::{
    ActionError, ActionProvider, Attributes, ClassKind, Combatant, CombatConfig, CombatEvent,
    EffectKind, EffectSpec, EncounterEngine, ItemOracle, Outcome, PcgRng, Phase, PlayerAction,
    Rarity, ResourceMeter, RewardSink, Side, Skill, SkillOracle, SpawnedMonster, VictoryRewards,
    WeaponProfile,
};

// ============================================================================
// Test doubles
// ============================================================================

struct Registry(Vec<Skill>);

impl SkillOracle for Registry {
    fn skill(&self, name: &str) -> Option<&Skill> {
        self.0.iter().find(|s| s.name == name)
    }
    fn monster_skill_pool(&self, names: &[String]) -> Vec<&Skill> {
        self.0
            .iter()
            .filter(|s| names.iter().any(|n| *n == s.name))
            .collect()
    }
}

struct NoItems;

impl ItemOracle for NoItems {
    fn use_in_combat(&mut self, _user: &mut Combatant, _item: &str) -> bool {
        false
    }
}

/// Heals a fixed amount and always succeeds.
struct HealingItems(f64);

impl ItemOracle for HealingItems {
    fn use_in_combat(&mut self, user: &mut Combatant, _item: &str) -> bool {
        user.apply_heal(self.0);
        true
    }
}

#[derive(Default)]
struct CountingSink {
    commits: u32,
    last: Option<VictoryRewards>,
}

impl RewardSink for CountingSink {
    fn commit_victory(&mut self, _player: &Combatant, rewards: &VictoryRewards) {
        self.commits += 1;
        self.last = Some(*rewards);
    }
}

struct Script(Vec<PlayerAction>);

impl ActionProvider for Script {
    fn next_action(&mut self, _player: &Combatant, _monster: &Combatant) -> PlayerAction {
        if self.0.is_empty() {
            PlayerAction::Attack
        } else {
            self.0.remove(0)
        }
    }
}

fn combatant(name: &str, hp: f64, mp: f64, attrs: Attributes, weapon: (f64, f64)) -> Combatant {
    Combatant::new(
        name,
        1,
        ResourceMeter::full(hp),
        ResourceMeter::full(mp),
        attrs,
        WeaponProfile {
            min: weapon.0,
            max: weapon.1,
            ..WeaponProfile::default()
        },
        0.0,
    )
}

fn spawned(monster: Combatant) -> SpawnedMonster {
    SpawnedMonster {
        combatant: monster,
        rarity: Rarity::Normal,
        skills: vec![],
    }
}

/// Player with enough Luck that the initiative roll always lands on
/// them (weight ratio 1.0), without touching Agility-driven formulas.
fn lucky_attrs() -> Attributes {
    Attributes {
        luck: 200.0,
        ..Attributes::default()
    }
}

// ============================================================================
// Scenario A: zero-weight initiative resolves by fair coin
// ============================================================================

#[test]
fn scenario_a_zero_weights_split_initiative_evenly() {
    let registry = Registry(vec![]);
    let mut rng = PcgRng::new(0xA);
    let mut player_first = 0u32;

    for _ in 0..1000 {
        let mut player = combatant("hero", 10.0, 0.0, Attributes::default(), (0.0, 0.0));
        let monster = combatant("slime", 10.0, 0.0, Attributes::default(), (0.0, 0.0));
        let mut items = NoItems;
        let mut sink = CountingSink::default();
        let mut engine = EncounterEngine::new(
            &mut player,
            spawned(monster),
            &registry,
            &mut items,
            &mut sink,
            &mut rng,
            CombatConfig::default(),
        );
        engine.begin();
        let first = engine
            .drain_events()
            .into_iter()
            .find_map(|e| match e {
                CombatEvent::FirstTurn { side } => Some(side),
                _ => None,
            })
            .expect("initiative event");
        if first == Side::Player {
            player_first += 1;
        }
    }

    // Fair coin over 1000 trials; 5σ ≈ 79.
    assert!(
        (421..=579).contains(&player_first),
        "player went first {player_first}/1000 times"
    );
}

// ============================================================================
// Scenario B: attack damage lands in the band matching the crit flag
// ============================================================================

#[test]
fn scenario_b_attack_damage_matches_the_rolled_crit_band() {
    let registry = Registry(vec![]);
    let mut rng = PcgRng::new(0xB);
    let mut saw_crit = false;
    let mut saw_normal = false;

    for _ in 0..300 {
        // Agility 10 → 20% crit chance, and initiative-dominant with
        // the luck boost; the monster cannot dodge (0 Agility) and
        // deals no damage.
        let mut player = combatant(
            "hero",
            100.0,
            0.0,
            Attributes {
                agility: 10.0,
                luck: 200.0,
                ..Attributes::default()
            },
            (5.0, 10.0),
        );
        let monster = combatant("slime", 1000.0, 0.0, Attributes::default(), (0.0, 0.0));
        let mut items = NoItems;
        let mut sink = CountingSink::default();
        let mut engine = EncounterEngine::new(
            &mut player,
            spawned(monster),
            &registry,
            &mut items,
            &mut sink,
            &mut rng,
            CombatConfig::default(),
        );
        engine.begin();
        assert_eq!(engine.phase(), Phase::PlayerTurn);

        let hp_before = engine.monster().hp.current();
        engine.player_action(PlayerAction::Attack).unwrap();
        let lost = hp_before - engine.monster().hp.current();

        let critical = engine
            .events()
            .iter()
            .find_map(|e| match e {
                CombatEvent::AttackHit { critical, .. } => Some(*critical),
                _ => None,
            })
            .expect("attack event");

        if critical {
            saw_crit = true;
            assert!(
                (7.5..=15.0).contains(&lost),
                "crit damage {lost} outside [7.5, 15]"
            );
        } else {
            saw_normal = true;
            assert!(
                (5.0..=10.0).contains(&lost),
                "damage {lost} outside [5, 10]"
            );
        }
    }

    assert!(saw_crit && saw_normal, "both bands should occur over 300 trials");
}

// ============================================================================
// Scenario C: lethal direct damage resolves Victory with rewards
// ============================================================================

#[test]
fn scenario_c_direct_damage_kill_commits_rewards_exactly_once() {
    let registry = Registry(vec![Skill {
        name: "smite".into(),
        class: ClassKind::Player,
        mp_cost: 3.0,
        effects: vec![EffectSpec {
            name: "smite".into(),
            kind: EffectKind::DirectDamage,
            base: 12.0,
            duration: 0,
            scaling: None,
        }],
    }]);
    let mut rng = PcgRng::new(0xC);
    let mut player = combatant("hero", 50.0, 10.0, lucky_attrs(), (1.0, 2.0));
    let monster = combatant("slime", 10.0, 0.0, Attributes::default(), (0.0, 0.0));
    let mut items = NoItems;
    let mut sink = CountingSink::default();
    let mut engine = EncounterEngine::new(
        &mut player,
        spawned(monster),
        &registry,
        &mut items,
        &mut sink,
        &mut rng,
        CombatConfig::default(),
    );
    engine.begin();
    assert_eq!(engine.phase(), Phase::PlayerTurn);

    engine
        .player_action(PlayerAction::CastSkill("smite".into()))
        .unwrap();

    let Some(Outcome::Victory { rewards }) = engine.outcome() else {
        panic!("expected victory, got {:?}", engine.phase());
    };
    assert!(rewards.xp > 0 && rewards.gold > 0);
    assert_eq!(sink.commits, 1);
    assert_eq!(sink.last, Some(rewards));
    assert_eq!(player.xp, rewards.xp);
    assert_eq!(player.gold, rewards.gold);
}

// ============================================================================
// Scenario D: a doomed player resolves Defeat without persistence
// ============================================================================

#[test]
fn scenario_d_defeat_never_touches_the_reward_sink() {
    let registry = Registry(vec![]);
    let mut rng = PcgRng::new(0xD);
    let mut player = combatant("hero", 50.0, 0.0, Attributes::default(), (0.0, 0.0));
    // Leave the player at 1 HP; any positive monster damage is lethal.
    player.apply_damage(49.0);
    let monster = combatant("ogre", 1000.0, 0.0, Attributes::default(), (5.0, 8.0));
    let mut items = NoItems;
    let mut sink = CountingSink::default();
    let mut engine = EncounterEngine::new(
        &mut player,
        spawned(monster),
        &registry,
        &mut items,
        &mut sink,
        &mut rng,
        CombatConfig::default(),
    );

    let outcome = engine.run(&mut Script(vec![]));
    assert_eq!(outcome, Outcome::Defeat);
    assert_eq!(sink.commits, 0);
}

// ============================================================================
// Turn consumption and decay idempotence
// ============================================================================

#[test]
fn failed_skill_attempts_keep_the_turn_and_mutate_nothing() {
    let registry = Registry(vec![Skill {
        name: "smite".into(),
        class: ClassKind::Player,
        mp_cost: 30.0,
        effects: vec![],
    }]);
    let mut rng = PcgRng::new(21);
    let mut player = combatant("hero", 50.0, 5.0, lucky_attrs(), (1.0, 2.0));
    let monster = combatant("slime", 40.0, 0.0, Attributes::default(), (0.0, 0.0));
    let mut items = NoItems;
    let mut sink = CountingSink::default();
    let mut engine = EncounterEngine::new(
        &mut player,
        spawned(monster),
        &registry,
        &mut items,
        &mut sink,
        &mut rng,
        CombatConfig::default(),
    );
    engine.begin();
    engine.drain_events();

    // Insufficient MP, unknown skill, failed item: none consume the
    // turn or mutate combat state.
    assert_eq!(
        engine.player_action(PlayerAction::CastSkill("smite".into())),
        Err(ActionError::InsufficientMp)
    );
    assert_eq!(
        engine.player_action(PlayerAction::CastSkill("fireball".into())),
        Err(ActionError::UnknownSkill("fireball".into()))
    );
    assert_eq!(
        engine.player_action(PlayerAction::UseItem("potion".into())),
        Err(ActionError::ItemFailed("potion".into()))
    );

    assert_eq!(engine.phase(), Phase::PlayerTurn);
    assert_eq!(engine.player().hp.current(), 50.0);
    assert_eq!(engine.player().mp.current(), 5.0);
    assert_eq!(engine.monster().hp.current(), 40.0);
    assert!(engine.player().active_effects().is_empty());
    assert!(engine.events().is_empty());
}

#[test]
fn a_three_turn_effect_survives_exactly_three_full_cycles() {
    let registry = Registry(vec![Skill {
        name: "guard".into(),
        class: ClassKind::Player,
        mp_cost: 1.0,
        effects: vec![EffectSpec {
            name: "guard".into(),
            kind: EffectKind::ArmorBonus,
            base: 20.0,
            duration: 3,
            scaling: None,
        }]
    }]);
    let mut rng = PcgRng::new(33);
    let mut player = combatant("hero", 500.0, 10.0, lucky_attrs(), (0.0, 0.0));
    let monster = combatant("slime", 1000.0, 0.0, Attributes::default(), (0.0, 0.0));
    let mut items = NoItems;
    let mut sink = CountingSink::default();
    let mut engine = EncounterEngine::new(
        &mut player,
        spawned(monster),
        &registry,
        &mut items,
        &mut sink,
        &mut rng,
        CombatConfig::default(),
    );
    engine.begin();
    assert_eq!(engine.phase(), Phase::PlayerTurn);

    engine
        .player_action(PlayerAction::CastSkill("guard".into()))
        .unwrap();
    assert_eq!(engine.player().armor_bonus, 20.0);

    // Cycle 1 completes with the monster's turn; two more player
    // attacks + monster turns finish cycles 2 and 3.
    engine.monster_turn().unwrap();
    assert!(engine.player().has_effect("guard"), "alive after cycle 1");

    engine.player_action(PlayerAction::Attack).unwrap();
    engine.monster_turn().unwrap();
    assert!(engine.player().has_effect("guard"), "alive after cycle 2");

    engine.player_action(PlayerAction::Attack).unwrap();
    engine.monster_turn().unwrap();
    assert!(!engine.player().has_effect("guard"), "expired after cycle 3");
    assert_eq!(engine.player().armor_bonus, 0.0);

    let expiries = engine
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, CombatEvent::EffectExpired { .. }))
        .count();
    assert_eq!(expiries, 1);
}

// ============================================================================
// Flee semantics
// ============================================================================

#[test]
fn hopeless_flee_fails_and_consumes_the_turn() {
    let registry = Registry(vec![]);
    let mut rng = PcgRng::new(55);
    // Monster outruns the player by 10 Agility: p = 0.5 − 0.5 = 0.
    let mut player = combatant("hero", 50.0, 0.0, lucky_attrs(), (1.0, 2.0));
    let monster = combatant(
        "wolf",
        100.0,
        0.0,
        Attributes {
            agility: 10.0,
            ..Attributes::default()
        },
        (0.0, 0.0),
    );
    let mut items = NoItems;
    let mut sink = CountingSink::default();
    let mut engine = EncounterEngine::new(
        &mut player,
        spawned(monster),
        &registry,
        &mut items,
        &mut sink,
        &mut rng,
        CombatConfig::default(),
    );
    engine.begin();
    if engine.phase() == Phase::MonsterTurn {
        engine.monster_turn().unwrap();
    }
    assert_eq!(engine.phase(), Phase::PlayerTurn);

    engine.player_action(PlayerAction::Flee).unwrap();
    assert!(engine
        .events()
        .iter()
        .any(|e| matches!(e, CombatEvent::FleeAttempt { success: false })));
    assert_eq!(engine.phase(), Phase::MonsterTurn);
}

#[test]
fn certain_flee_resolves_without_persistence() {
    let registry = Registry(vec![]);
    let mut rng = PcgRng::new(56);
    // Player outruns the monster by 10 Agility: p = 1.0.
    let mut player = combatant(
        "hero",
        50.0,
        0.0,
        Attributes {
            agility: 10.0,
            luck: 200.0,
            ..Attributes::default()
        },
        (1.0, 2.0),
    );
    let monster = combatant("slug", 100.0, 0.0, Attributes::default(), (0.0, 0.0));
    let mut items = NoItems;
    let mut sink = CountingSink::default();
    let mut engine = EncounterEngine::new(
        &mut player,
        spawned(monster),
        &registry,
        &mut items,
        &mut sink,
        &mut rng,
        CombatConfig::default(),
    );
    engine.begin();
    engine.player_action(PlayerAction::Flee).unwrap();
    assert_eq!(engine.outcome(), Some(Outcome::Flee));
    assert_eq!(sink.commits, 0);
}

// ============================================================================
// Items and periodic effects through the loop
// ============================================================================

#[test]
fn successful_item_use_consumes_the_turn() {
    let registry = Registry(vec![]);
    let mut rng = PcgRng::new(77);
    let mut player = combatant("hero", 50.0, 0.0, lucky_attrs(), (1.0, 2.0));
    player.apply_damage(30.0);
    let monster = combatant("slime", 100.0, 0.0, Attributes::default(), (0.0, 0.0));
    let mut items = HealingItems(25.0);
    let mut sink = CountingSink::default();
    let mut engine = EncounterEngine::new(
        &mut player,
        spawned(monster),
        &registry,
        &mut items,
        &mut sink,
        &mut rng,
        CombatConfig::default(),
    );
    engine.begin();
    engine
        .player_action(PlayerAction::UseItem("potion".into()))
        .unwrap();
    assert_eq!(engine.phase(), Phase::MonsterTurn);
    assert_eq!(engine.player().hp.current(), 45.0);
}

#[test]
fn player_dot_ticks_on_player_turns_until_exhausted() {
    let registry = Registry(vec![Skill {
        name: "venom".into(),
        class: ClassKind::Player,
        mp_cost: 2.0,
        effects: vec![EffectSpec {
            name: "venom".into(),
            kind: EffectKind::DamageOverTime,
            base: 4.0,
            duration: 2,
            scaling: None,
        }],
    }]);
    let mut rng = PcgRng::new(88);
    let mut player = combatant("hero", 500.0, 10.0, lucky_attrs(), (0.0, 0.0));
    let monster = combatant("slime", 100.0, 0.0, Attributes::default(), (0.0, 0.0));
    let mut items = NoItems;
    let mut sink = CountingSink::default();
    let mut engine = EncounterEngine::new(
        &mut player,
        spawned(monster),
        &registry,
        &mut items,
        &mut sink,
        &mut rng,
        CombatConfig::default(),
    );
    engine.begin();

    // Cast on turn 1: no tick at cast time.
    engine
        .player_action(PlayerAction::CastSkill("venom".into()))
        .unwrap();
    assert_eq!(engine.monster().hp.current(), 100.0);
    engine.monster_turn().unwrap();

    // Tick 1 fires when the player's next turn opens.
    assert_eq!(engine.phase(), Phase::PlayerTurn);
    assert_eq!(engine.monster().hp.current(), 96.0);
    engine.player_action(PlayerAction::Attack).unwrap();
    engine.monster_turn().unwrap();

    // Tick 2 exhausts the effect.
    assert_eq!(engine.monster().hp.current(), 92.0);
    assert!(!engine.player().has_effect("venom"));

    // No further ticks on later turns.
    engine.player_action(PlayerAction::Attack).unwrap();
    engine.monster_turn().unwrap();
    assert_eq!(engine.monster().hp.current(), 92.0);
}

#[test]
fn only_the_first_periodic_effect_ticks_each_turn() {
    let registry = Registry(vec![
        Skill {
            name: "venom".into(),
            class: ClassKind::Player,
            mp_cost: 1.0,
            effects: vec![EffectSpec {
                name: "venom".into(),
                kind: EffectKind::DamageOverTime,
                base: 4.0,
                duration: 3,
                scaling: None,
            }],
        },
        Skill {
            name: "fester".into(),
            class: ClassKind::Player,
            mp_cost: 1.0,
            effects: vec![EffectSpec {
                name: "fester".into(),
                kind: EffectKind::DamageOverTime,
                base: 9.0,
                duration: 3,
                scaling: None,
            }],
        },
    ]);
    let mut rng = PcgRng::new(99);
    let mut player = combatant("hero", 500.0, 20.0, lucky_attrs(), (0.0, 0.0));
    let monster = combatant("slime", 100.0, 0.0, Attributes::default(), (0.0, 0.0));
    let mut items = NoItems;
    let mut sink = CountingSink::default();
    let mut engine = EncounterEngine::new(
        &mut player,
        spawned(monster),
        &registry,
        &mut items,
        &mut sink,
        &mut rng,
        CombatConfig::default(),
    );
    engine.begin();

    engine
        .player_action(PlayerAction::CastSkill("venom".into()))
        .unwrap();
    engine.monster_turn().unwrap();
    engine
        .player_action(PlayerAction::CastSkill("fester".into()))
        .unwrap();
    engine.monster_turn().unwrap();

    // Two DOTs active, but only "venom" (first in the list) has been
    // ticking: 4.0 on each of the two player turn openings.
    assert_eq!(engine.monster().hp.current(), 92.0);
    assert!(engine.player().has_effect("fester"));
}
