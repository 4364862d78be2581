//! Injectable randomness.
//!
//! Attack variance, encounter triggers, escape attempts and the world item
//! shuffle all draw from a [`Dice`]. Sessions own their dice, so parallel
//! simulated sessions never share state. Tests swap in [`ScriptedDice`] to
//! replay exact sequences.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

use super::types::Item;

pub trait Dice {
    /// Uniform integer in `0..upper`; always 0 when `upper` is 0.
    fn roll_below(&mut self, upper: u32) -> u32;

    /// True with the given probability (clamped to `[0, 1]`).
    fn chance(&mut self, probability: f64) -> bool;

    /// Put the world item pool in dealing order.
    fn shuffle_items(&mut self, items: &mut [Item]);
}

/// Dice backed by a seedable PRNG.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: StdRng,
}

impl SeededDice {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Dice for SeededDice {
    fn roll_below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability.clamp(0.0, 1.0))
    }

    fn shuffle_items(&mut self, items: &mut [Item]) {
        items.shuffle(&mut self.rng);
    }
}

/// Dice that replay pre-recorded outcomes.
///
/// Rolls are reduced modulo `upper`; once a queue runs dry rolls return 0
/// and chances return false. The item pool keeps catalog order unless a
/// shuffle seed is given.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    chances: VecDeque<bool>,
    shuffle_rng: Option<StdRng>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rolls(mut self, rolls: impl IntoIterator<Item = u32>) -> Self {
        self.rolls.extend(rolls);
        self
    }

    pub fn with_chances(mut self, chances: impl IntoIterator<Item = bool>) -> Self {
        self.chances.extend(chances);
        self
    }

    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_rng = Some(StdRng::seed_from_u64(seed));
        self
    }

    pub fn push_roll(&mut self, roll: u32) {
        self.rolls.push_back(roll);
    }

    pub fn push_chance(&mut self, outcome: bool) {
        self.chances.push_back(outcome);
    }
}

impl Dice for ScriptedDice {
    fn roll_below(&mut self, upper: u32) -> u32 {
        if upper == 0 {
            return 0;
        }
        self.rolls.pop_front().map_or(0, |r| r % upper)
    }

    fn chance(&mut self, _probability: f64) -> bool {
        self.chances.pop_front().unwrap_or(false)
    }

    fn shuffle_items(&mut self, items: &mut [Item]) {
        if let Some(rng) = self.shuffle_rng.as_mut() {
            items.shuffle(rng);
        }
    }
}
