use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A collectible item. `name` is the key within any single collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub description: String,
    pub value: u32,
}

impl Item {
    pub fn new(name: impl Into<String>, description: impl Into<String>, value: u32) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value,
        }
    }
}

/// Immutable enemy definition held by the spawner pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    pub max_health: i32,
    pub attack_power: i32,
    #[serde(default)]
    pub loot: Option<Item>,
    pub difficulty: u32,
}

impl EnemyTemplate {
    pub fn new(
        name: impl Into<String>,
        max_health: i32,
        attack_power: i32,
        loot: Option<Item>,
        difficulty: u32,
    ) -> Self {
        Self {
            name: name.into(),
            max_health,
            attack_power,
            loot,
            difficulty,
        }
    }

    /// Build a fresh, full-health instance. The template is never touched by combat.
    pub fn spawn(&self) -> Enemy {
        Enemy {
            name: self.name.clone(),
            health: self.max_health,
            max_health: self.max_health,
            attack_power: self.attack_power,
            loot: self.loot.clone(),
            difficulty: self.difficulty,
        }
    }
}

/// A spawned enemy engaged in one encounter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enemy {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub attack_power: i32,
    pub loot: Option<Item>,
    pub difficulty: u32,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.health -= damage;
    }

    /// Hand the loot over; a defeated enemy drops it exactly once.
    pub fn take_loot(&mut self) -> Option<Item> {
        self.loot.take()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub health: i32,
    pub max_health: i32,
    pub attack_power: i32,
}

impl Player {
    pub fn new(max_health: i32, attack_power: i32) -> Self {
        Self {
            health: max_health,
            max_health,
            attack_power,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn take_damage(&mut self, damage: i32) {
        self.health -= damage;
    }

    /// Heal up to max health; returns the amount actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount).min(self.max_health);
        self.health - before
    }
}

/// A riddle gated behind an item-value threshold.
///
/// `kind` is the puzzle's unique type (e.g. `LIGHT_RITUAL`) and keys the
/// ledger's rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Puzzle {
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: u32,
    pub question: String,
    pub answer: String,
}

impl Puzzle {
    /// Case-insensitive exact match; surrounding whitespace is ignored.
    pub fn answer_matches(&self, attempt: &str) -> bool {
        attempt.trim().to_lowercase() == self.answer.trim().to_lowercase()
    }
}

/// One high-score table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub player_name: String,
    pub score: u32,
    pub time_taken_secs: u64,
}

impl Score {
    pub fn new(player_name: impl Into<String>, score: u32, time_taken_secs: u64) -> Self {
        Self {
            player_name: player_name.into(),
            score,
            time_taken_secs,
        }
    }

    /// Ranking order: higher score first, then faster time.
    pub fn rank_cmp(&self, other: &Score) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then(self.time_taken_secs.cmp(&other.time_taken_secs))
    }
}
