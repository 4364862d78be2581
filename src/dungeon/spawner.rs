//! Enemy pool gated by puzzle progress.

use log::debug;
use serde::{Deserialize, Serialize};

use super::dice::Dice;
use super::errors::DungeonError;
use super::types::{Enemy, EnemyTemplate};

/// Which eligible template an encounter uses.
///
/// A template is eligible when its difficulty is at most `progress + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnPolicy {
    /// First eligible template in ascending difficulty order.
    #[default]
    Easiest,
    /// Last eligible template, so encounters harden as puzzles fall.
    Hardest,
}

#[derive(Debug, Clone)]
pub struct EnemySpawner {
    /// Ascending by difficulty; ties keep catalog order.
    pool: Vec<EnemyTemplate>,
    encounter_chance: f64,
    policy: SpawnPolicy,
}

impl EnemySpawner {
    pub fn new(
        templates: &[EnemyTemplate],
        encounter_chance: f64,
        policy: SpawnPolicy,
    ) -> Result<Self, DungeonError> {
        if templates.is_empty() {
            return Err(DungeonError::InvalidWorld("enemy pool is empty".into()));
        }
        let mut pool = templates.to_vec();
        pool.sort_by_key(|t| t.difficulty);
        Ok(Self {
            pool,
            encounter_chance,
            policy,
        })
    }

    pub fn templates(&self) -> &[EnemyTemplate] {
        &self.pool
    }

    /// Lowest-difficulty template, used when nothing is eligible.
    pub fn default_template(&self) -> &EnemyTemplate {
        &self.pool[0]
    }

    /// Fresh enemy for the given progress (completed puzzle count).
    pub fn select_encounter(&self, progress: u32) -> Enemy {
        let ceiling = progress.saturating_add(1);
        let mut eligible = self.pool.iter().filter(|t| t.difficulty <= ceiling);
        let chosen = match self.policy {
            SpawnPolicy::Easiest => eligible.next(),
            SpawnPolicy::Hardest => eligible.last(),
        };
        chosen.unwrap_or_else(|| self.default_template()).spawn()
    }

    /// Roll the encounter trigger; spawns only on success.
    pub fn roll_encounter(&self, progress: u32, dice: &mut dyn Dice) -> Option<Enemy> {
        if !dice.chance(self.encounter_chance) {
            return None;
        }
        let enemy = self.select_encounter(progress);
        debug!(
            "Encounter triggered: {} (difficulty {}, progress {})",
            enemy.name, enemy.difficulty, progress
        );
        Some(enemy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::dice::ScriptedDice;
    use crate::dungeon::world::WorldCatalog;

    fn spawner(policy: SpawnPolicy) -> EnemySpawner {
        EnemySpawner::new(&WorldCatalog::default().enemies, 0.3, policy).expect("spawner")
    }

    #[test]
    fn easiest_policy_takes_first_eligible() {
        let spawner = spawner(SpawnPolicy::Easiest);
        for progress in 0..5 {
            assert_eq!(spawner.select_encounter(progress).name, "Skeleton");
        }
    }

    #[test]
    fn hardest_policy_tracks_progress() {
        let spawner = spawner(SpawnPolicy::Hardest);
        let names: Vec<String> = (0..5).map(|p| spawner.select_encounter(p).name).collect();
        assert_eq!(
            names,
            vec!["Skeleton", "Ghost", "Goblin", "Dark Wizard", "Dark Wizard"]
        );
    }

    #[test]
    fn falls_back_to_lowest_template_when_none_eligible() {
        let templates = vec![
            EnemyTemplate::new("Dragon", 200, 40, None, 9),
            EnemyTemplate::new("Wyvern", 120, 25, None, 6),
        ];
        let spawner = EnemySpawner::new(&templates, 1.0, SpawnPolicy::Easiest).expect("spawner");
        assert_eq!(spawner.select_encounter(0).name, "Wyvern");
    }

    #[test]
    fn encounters_are_fresh_copies() {
        let spawner = spawner(SpawnPolicy::Easiest);
        let mut first = spawner.select_encounter(0);
        first.take_damage(100);
        first.take_loot();
        let second = spawner.select_encounter(0);
        assert_eq!(second.health, second.max_health);
        assert!(second.loot.is_some());
        assert_eq!(spawner.default_template().max_health, 30);
    }

    #[test]
    fn trigger_respects_dice() {
        let spawner = spawner(SpawnPolicy::Easiest);
        let mut dice = ScriptedDice::new().with_chances([false, true]);
        assert!(spawner.roll_encounter(0, &mut dice).is_none());
        assert!(spawner.roll_encounter(0, &mut dice).is_some());
    }

    #[test]
    fn empty_pool_rejected() {
        assert!(EnemySpawner::new(&[], 0.3, SpawnPolicy::Easiest).is_err());
    }
}
