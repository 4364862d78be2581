//! Puzzle ledger: difficulty-ordered puzzle queue plus per-type gate rules.
//!
//! A solve attempt passes through the item gate before the answer is even
//! compared. Holding every required item makes the value threshold binding
//! on those items. With items missing, the alternative solution (total
//! inventory value at the threshold and a keyword-matching item) still lets
//! the attempt through.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use super::errors::DungeonError;
use super::inventory::Inventory;
use super::types::{Item, Puzzle};
use crate::logutil::escape_log;

/// Catalog form of a puzzle and its gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSeed {
    #[serde(rename = "type")]
    pub kind: String,
    pub difficulty: u32,
    pub question: String,
    pub answer: String,
    pub threshold: u32,
    pub required_items: Vec<Item>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub hint: String,
}

/// Gate attached to one puzzle type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleRule {
    pub required_items: Vec<Item>,
    pub threshold: u32,
    pub keywords: Vec<String>,
    pub hint: String,
}

impl PuzzleRule {
    fn required_names(&self) -> impl Iterator<Item = &str> {
        self.required_items.iter().map(|item| item.name.as_str())
    }
}

/// Result of a correct answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedPuzzle {
    pub kind: String,
    pub difficulty: u32,
    pub points: u32,
    /// True when the attempt got through via keywords rather than the exact items.
    pub via_alternative: bool,
}

#[derive(Debug, Clone)]
pub struct PuzzleLedger {
    /// Ascending by difficulty; ties keep catalog order.
    queue: Vec<Puzzle>,
    rules: HashMap<String, PuzzleRule>,
    completed: BTreeSet<String>,
    total: usize,
    points_per_difficulty: u32,
}

impl PuzzleLedger {
    pub fn new(seeds: &[PuzzleSeed], points_per_difficulty: u32) -> Self {
        let mut queue: Vec<Puzzle> = seeds
            .iter()
            .map(|seed| Puzzle {
                kind: seed.kind.clone(),
                difficulty: seed.difficulty,
                question: seed.question.clone(),
                answer: seed.answer.clone(),
            })
            .collect();
        queue.sort_by_key(|p| p.difficulty);

        let rules = seeds
            .iter()
            .map(|seed| {
                (
                    seed.kind.clone(),
                    PuzzleRule {
                        required_items: seed.required_items.clone(),
                        threshold: seed.threshold,
                        keywords: seed.keywords.clone(),
                        hint: seed.hint.clone(),
                    },
                )
            })
            .collect();

        Self {
            total: queue.len(),
            queue,
            rules,
            completed: BTreeSet::new(),
            points_per_difficulty,
        }
    }

    /// The puzzle that must be solved next (lowest difficulty).
    pub fn current(&self) -> Option<&Puzzle> {
        self.queue.first()
    }

    pub fn rule(&self, kind: &str) -> Option<&PuzzleRule> {
        self.rules.get(kind)
    }

    /// The current puzzle together with its hint text.
    pub fn hint(&self) -> Option<(&Puzzle, &str)> {
        let puzzle = self.current()?;
        let hint = self.rules.get(&puzzle.kind).map_or("", |rule| rule.hint.as_str());
        Some((puzzle, hint))
    }

    pub fn remaining(&self) -> impl Iterator<Item = &Puzzle> {
        self.queue.iter()
    }

    pub fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    pub fn is_completed(&self, kind: &str) -> bool {
        self.completed.contains(kind)
    }

    /// Count of solved puzzles, used to gate enemy difficulty.
    pub fn progress(&self) -> u32 {
        self.completed.len() as u32
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn all_solved(&self) -> bool {
        self.queue.is_empty()
    }

    /// Every item named by any puzzle's requirement list, deduplicated.
    pub fn all_required_names(&self) -> BTreeSet<&str> {
        self.rules
            .values()
            .flat_map(|rule| rule.required_names())
            .collect()
    }

    /// Keyword-based secondary unlock path.
    pub fn alternative_solution(&self, kind: &str, inventory: &Inventory) -> bool {
        let Some(rule) = self.rules.get(kind) else {
            return false;
        };
        inventory.total_value() >= rule.threshold
            && inventory.iter().any(|item| {
                rule.keywords
                    .iter()
                    .any(|keyword| item.name.contains(keyword.as_str()))
            })
    }

    /// Check the item gate for the current puzzle without consuming an answer.
    ///
    /// Returns whether the alternative path was needed.
    pub fn check_gate(&self, inventory: &Inventory) -> Result<bool, DungeonError> {
        let puzzle = self.current().ok_or(DungeonError::NoPuzzlesRemaining)?;
        let Some(rule) = self.rules.get(&puzzle.kind) else {
            // A puzzle without a rule has no item gate.
            return Ok(false);
        };

        let current = inventory.value_of(rule.required_names());
        let missing: Vec<String> = rule
            .required_names()
            .filter(|name| !inventory.contains(name))
            .map(str::to_string)
            .collect();

        if missing.is_empty() {
            if current < rule.threshold {
                return Err(DungeonError::InsufficientValue {
                    current,
                    required: rule.threshold,
                    shortfall: rule.threshold - current,
                });
            }
            return Ok(false);
        }

        if self.alternative_solution(&puzzle.kind, inventory) {
            debug!(
                "Alternative solution admits {} without {}",
                puzzle.kind,
                missing.join(", ")
            );
            return Ok(true);
        }

        if current < rule.threshold {
            return Err(DungeonError::InsufficientValue {
                current,
                required: rule.threshold,
                shortfall: rule.threshold - current,
            });
        }
        Err(DungeonError::MissingRequiredItems(missing))
    }

    /// Run the item gate, then compare the answer.
    ///
    /// A wrong answer leaves the puzzle in place with no penalty.
    pub fn attempt(
        &mut self,
        inventory: &Inventory,
        answer: &str,
    ) -> Result<SolvedPuzzle, DungeonError> {
        let via_alternative = self.check_gate(inventory)?;
        let puzzle = self.current().ok_or(DungeonError::NoPuzzlesRemaining)?;
        if !puzzle.answer_matches(answer) {
            debug!(
                "Wrong answer for {}: '{}'",
                puzzle.kind,
                escape_log(answer)
            );
            return Err(DungeonError::WrongAnswer);
        }

        let puzzle = self.queue.remove(0);
        let points = self.points_per_difficulty.saturating_mul(puzzle.difficulty);
        self.completed.insert(puzzle.kind.clone());
        info!(
            "Puzzle {} solved for {} points ({} of {})",
            puzzle.kind,
            points,
            self.completed.len(),
            self.total
        );
        Ok(SolvedPuzzle {
            kind: puzzle.kind,
            difficulty: puzzle.difficulty,
            points,
            via_alternative,
        })
    }
}
