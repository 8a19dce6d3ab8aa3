//! Blocking stdin menus.
//!
//! Submenus are non-committal: backing out of the skill or item list
//! returns to the action menu without touching the encounter, and
//! unrecognized input re-prompts.

use std::io::{self, Write};

use anyhow::Result;
use combat_content::{Inventory, SkillRegistry};
use combat_core::{ClassKind, Combatant, PlayerAction};

use crate::render;

pub fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().read_line(&mut line)? == 0 {
        anyhow::bail!("input closed");
    }
    Ok(line.trim().to_string())
}

pub fn confirm(label: &str) -> Result<bool> {
    loop {
        match prompt(label)?.to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => println!("Please answer y or n."),
        }
    }
}

/// Runs the action menu until the player commits to a terminal action.
pub fn player_turn(
    player: &Combatant,
    monster: &Combatant,
    skills: &SkillRegistry,
    inventory: &Inventory,
) -> Result<PlayerAction> {
    loop {
        println!();
        println!("  {}", render::status_line(monster));
        println!("  {}", render::status_line(player));
        println!("  [1] Attack  [2] Skill  [3] Item  [4] Flee  [5] Status");
        match prompt("> ")?.as_str() {
            "1" => return Ok(PlayerAction::Attack),
            "2" => {
                if let Some(name) = skill_menu(player, skills)? {
                    return Ok(PlayerAction::CastSkill(name));
                }
            }
            "3" => {
                if let Some(name) = item_menu(inventory)? {
                    return Ok(PlayerAction::UseItem(name));
                }
            }
            "4" => return Ok(PlayerAction::Flee),
            "5" => print_status(player, monster),
            other => println!("No such option: {other}"),
        }
    }
}

/// Numbered pick from `entries`; 0 backs out. Re-prompts on anything
/// that is not a number in range.
fn pick(entries: &[String]) -> Result<Option<usize>> {
    if entries.is_empty() {
        println!("  (nothing available)");
        return Ok(None);
    }
    for (index, entry) in entries.iter().enumerate() {
        println!("  [{}] {entry}", index + 1);
    }
    println!("  [0] Back");
    loop {
        let input = prompt("> ")?;
        match input.parse::<usize>() {
            Ok(0) => return Ok(None),
            Ok(n) if n <= entries.len() => return Ok(Some(n - 1)),
            _ => println!("Pick a number between 0 and {}.", entries.len()),
        }
    }
}

fn skill_menu(player: &Combatant, skills: &SkillRegistry) -> Result<Option<String>> {
    let castable: Vec<_> = skills
        .skills()
        .iter()
        .filter(|s| s.class == ClassKind::Player)
        .collect();
    let entries: Vec<String> = castable
        .iter()
        .map(|s| {
            let note = if player.mp.current() < s.mp_cost {
                "  (not enough MP)"
            } else {
                ""
            };
            format!("{} ({:.0} MP){note}", s.name, s.mp_cost)
        })
        .collect();
    Ok(pick(&entries)?.map(|i| castable[i].name.clone()))
}

fn item_menu(inventory: &Inventory) -> Result<Option<String>> {
    let stocked: Vec<_> = inventory.stocked().collect();
    let entries: Vec<String> = stocked
        .iter()
        .map(|(item, count)| format!("{} x{count}  {}", item.name, item.description))
        .collect();
    Ok(pick(&entries)?.map(|i| stocked[i].0.name.clone()))
}

fn print_status(player: &Combatant, monster: &Combatant) {
    let a = &player.attributes;
    println!("  --- {} ---", player.name);
    println!(
        "  STR {:.0}  AGI {:.0}  INT {:.0}  WIL {:.0}  LCK {:.0}",
        a.strength, a.agility, a.intelligence, a.will, a.luck
    );
    println!(
        "  Weapon {:.0}-{:.0}  Armor {:.0}%  XP {}  Gold {}",
        player.weapon.min,
        player.weapon.max,
        player.armor_value + player.armor_bonus,
        player.xp,
        player.gold
    );
    println!("  --- {} ---", monster.name);
    println!("  {}", render::status_line(monster));
}
