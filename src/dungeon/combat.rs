//! Turn-based combat between the player and one spawned enemy.
//!
//! Each call to [`Encounter::take_turn`] resolves exactly one player choice
//! plus any enemy response it provokes. Once either side drops to zero
//! health, or the player escapes, the encounter is finished and refuses
//! further turns.

use log::{debug, info};

use super::dice::Dice;
use super::errors::DungeonError;
use super::inventory::Inventory;
use super::types::{Enemy, Item, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatAction {
    Attack,
    UsePotion,
    Escape,
}

/// Tunables for damage, healing and escape.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatRules {
    /// Player bonus damage is drawn from `0..player_attack_variance`.
    pub player_attack_variance: u32,
    /// Enemy bonus damage is drawn from `0..enemy_attack_variance`.
    pub enemy_attack_variance: u32,
    pub potion_item: String,
    pub potion_heal: i32,
    pub escape_chance: f64,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            player_attack_variance: 10,
            enemy_attack_variance: 5,
            potion_item: "potion".to_string(),
            potion_heal: 30,
            escape_chance: 0.5,
        }
    }
}

/// Something that happened during one turn, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatEvent {
    PlayerHit { damage: i32 },
    EnemyHit { damage: i32 },
    PotionUsed { healed: i32 },
    NoPotion,
    EscapeFailed,
    Escaped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CombatStatus {
    Ongoing,
    /// Loot (if any) has already been moved into the inventory.
    EnemyDefeated { loot: Option<Item> },
    PlayerDefeated,
    Escaped,
}

impl CombatStatus {
    pub fn is_over(&self) -> bool {
        !matches!(self, CombatStatus::Ongoing)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    pub enemy_name: String,
    pub events: Vec<CombatEvent>,
    pub status: CombatStatus,
    pub player_health: i32,
    pub enemy_health: i32,
}

#[derive(Debug, Clone)]
pub struct Encounter {
    enemy: Enemy,
    turns: u32,
    status: CombatStatus,
}

impl Encounter {
    pub fn new(enemy: Enemy) -> Self {
        Self {
            enemy,
            turns: 0,
            status: CombatStatus::Ongoing,
        }
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn status(&self) -> &CombatStatus {
        &self.status
    }

    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    fn enemy_strike(&self, player: &mut Player, rules: &CombatRules, dice: &mut dyn Dice) -> i32 {
        let damage = self.enemy.attack_power + dice.roll_below(rules.enemy_attack_variance) as i32;
        player.take_damage(damage);
        damage
    }

    /// Resolve one player choice.
    pub fn take_turn(
        &mut self,
        action: CombatAction,
        player: &mut Player,
        inventory: &mut Inventory,
        rules: &CombatRules,
        dice: &mut dyn Dice,
    ) -> Result<TurnReport, DungeonError> {
        match self.status {
            CombatStatus::Ongoing => {}
            CombatStatus::PlayerDefeated => return Err(DungeonError::PlayerDefeated),
            _ => return Err(DungeonError::NoActiveEncounter),
        }
        self.turns += 1;
        let mut events = Vec::new();

        match action {
            CombatAction::Attack => {
                let damage =
                    player.attack_power + dice.roll_below(rules.player_attack_variance) as i32;
                self.enemy.take_damage(damage);
                events.push(CombatEvent::PlayerHit { damage });
                if self.enemy.is_alive() {
                    let damage = self.enemy_strike(player, rules, dice);
                    events.push(CombatEvent::EnemyHit { damage });
                }
            }
            CombatAction::UsePotion => {
                if inventory.remove(&rules.potion_item).is_some() {
                    let healed = player.heal(rules.potion_heal);
                    events.push(CombatEvent::PotionUsed { healed });
                } else {
                    events.push(CombatEvent::NoPotion);
                }
            }
            CombatAction::Escape => {
                if dice.chance(rules.escape_chance) {
                    events.push(CombatEvent::Escaped);
                    self.status = CombatStatus::Escaped;
                } else {
                    events.push(CombatEvent::EscapeFailed);
                    let damage = self.enemy_strike(player, rules, dice);
                    events.push(CombatEvent::EnemyHit { damage });
                }
            }
        }

        if !player.is_alive() {
            info!("Player defeated by {} after {} turns", self.enemy.name, self.turns);
            self.status = CombatStatus::PlayerDefeated;
        } else if !self.enemy.is_alive() {
            let loot = self.enemy.take_loot();
            if let Some(item) = &loot {
                inventory.insert(item.clone());
            }
            debug!(
                "{} defeated after {} turns, loot: {:?}",
                self.enemy.name,
                self.turns,
                loot.as_ref().map(|i| i.name.as_str())
            );
            self.status = CombatStatus::EnemyDefeated { loot };
        }

        Ok(TurnReport {
            enemy_name: self.enemy.name.clone(),
            events,
            status: self.status.clone(),
            player_health: player.health,
            enemy_health: self.enemy.health,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::dice::ScriptedDice;
    use crate::dungeon::types::EnemyTemplate;

    fn skeleton() -> Enemy {
        EnemyTemplate::new("Skeleton", 30, 10, Some(Item::new("bone", "b", 15)), 1).spawn()
    }

    #[test]
    fn attack_provokes_retaliation_while_enemy_lives() {
        let mut encounter = Encounter::new(skeleton());
        let mut player = Player::new(100, 15);
        let mut inv = Inventory::new();
        let mut dice = ScriptedDice::new().with_rolls([4, 2]);
        let report = encounter
            .take_turn(CombatAction::Attack, &mut player, &mut inv, &CombatRules::default(), &mut dice)
            .expect("turn");
        assert_eq!(
            report.events,
            vec![
                CombatEvent::PlayerHit { damage: 19 },
                CombatEvent::EnemyHit { damage: 12 }
            ]
        );
        assert_eq!(report.enemy_health, 11);
        assert_eq!(report.player_health, 88);
        assert_eq!(report.status, CombatStatus::Ongoing);
    }

    #[test]
    fn killing_blow_skips_retaliation_and_drops_loot() {
        let mut enemy = skeleton();
        enemy.health = 10;
        let mut encounter = Encounter::new(enemy);
        let mut player = Player::new(100, 15);
        let mut inv = Inventory::new();
        let report = encounter
            .take_turn(
                CombatAction::Attack,
                &mut player,
                &mut inv,
                &CombatRules::default(),
                &mut ScriptedDice::new(),
            )
            .expect("turn");
        assert_eq!(report.events, vec![CombatEvent::PlayerHit { damage: 15 }]);
        assert_eq!(player.health, 100);
        assert!(inv.contains("bone"));
        assert!(matches!(report.status, CombatStatus::EnemyDefeated { loot: Some(_) }));
        assert!(matches!(
            encounter.take_turn(
                CombatAction::Attack,
                &mut player,
                &mut inv,
                &CombatRules::default(),
                &mut ScriptedDice::new()
            ),
            Err(DungeonError::NoActiveEncounter)
        ));
    }

    #[test]
    fn potion_heals_without_enemy_turn() {
        let mut encounter = Encounter::new(skeleton());
        let mut player = Player::new(100, 15);
        player.take_damage(50);
        let mut inv: Inventory = [Item::new("potion", "p", 15)].into_iter().collect();
        let rules = CombatRules::default();
        let report = encounter
            .take_turn(CombatAction::UsePotion, &mut player, &mut inv, &rules, &mut ScriptedDice::new())
            .expect("turn");
        assert_eq!(report.events, vec![CombatEvent::PotionUsed { healed: 30 }]);
        assert_eq!(player.health, 80);
        assert!(!inv.contains("potion"));

        // No potion left: wasted turn, still no enemy attack.
        let report = encounter
            .take_turn(CombatAction::UsePotion, &mut player, &mut inv, &rules, &mut ScriptedDice::new())
            .expect("turn");
        assert_eq!(report.events, vec![CombatEvent::NoPotion]);
        assert_eq!(player.health, 80);
        assert_eq!(encounter.turns(), 2);
    }

    #[test]
    fn failed_escape_gives_enemy_free_attack() {
        let mut encounter = Encounter::new(skeleton());
        let mut player = Player::new(100, 15);
        let mut inv = Inventory::new();
        let rules = CombatRules::default();
        let mut dice = ScriptedDice::new().with_chances([false, true]).with_rolls([3]);
        let report = encounter
            .take_turn(CombatAction::Escape, &mut player, &mut inv, &rules, &mut dice)
            .expect("turn");
        assert_eq!(
            report.events,
            vec![CombatEvent::EscapeFailed, CombatEvent::EnemyHit { damage: 13 }]
        );
        let report = encounter
            .take_turn(CombatAction::Escape, &mut player, &mut inv, &rules, &mut dice)
            .expect("turn");
        assert_eq!(report.status, CombatStatus::Escaped);
        assert!(inv.is_empty());
        assert_eq!(encounter.enemy().health, 30);
    }

    #[test]
    fn defeat_stops_further_exchanges() {
        let mut encounter = Encounter::new(skeleton());
        let mut player = Player::new(100, 15);
        player.health = 5;
        let mut inv = Inventory::new();
        let rules = CombatRules::default();
        let report = encounter
            .take_turn(CombatAction::Attack, &mut player, &mut inv, &rules, &mut ScriptedDice::new())
            .expect("turn");
        assert_eq!(report.status, CombatStatus::PlayerDefeated);
        assert_eq!(player.health, -5);
        let enemy_health = encounter.enemy().health;

        let err = encounter
            .take_turn(CombatAction::Attack, &mut player, &mut inv, &rules, &mut ScriptedDice::new())
            .unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(player.health, -5);
        assert_eq!(encounter.enemy().health, enemy_health);
    }
}
