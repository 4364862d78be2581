//! # Dungeon Puzzler - a turn-based dungeon puzzle adventure engine
//!
//! A single player walks a fixed graph of rooms, collects items, solves a
//! sequence of puzzles gated by item-value thresholds, fights randomly
//! triggered enemies, and earns a score ranked against saved high scores.
//!
//! ## Features
//!
//! - **Data-driven world**: rooms, corridors, items, enemies and puzzles come from a
//!   [`dungeon::WorldCatalog`] (built-in reference dungeon or a JSON file).
//! - **Back/forward navigation**: browser-style movement history over visited rooms.
//! - **Puzzle gates**: value thresholds on required items, plus a keyword-based
//!   alternative solution.
//! - **Turn-based combat**: attack, potion and escape against progress-gated enemies.
//! - **High scores**: a bounded, stably ranked table persisted as comma-separated lines.
//! - **Deterministic tests**: all randomness flows through an injectable [`dungeon::Dice`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dungeon_puzzler::config::GameConfig;
//! use dungeon_puzzler::dungeon::{
//!     Command, Game, MemoryScoreStore, SeededDice, WorldCatalog,
//! };
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut game = Game::new(
//!         &WorldCatalog::default(),
//!         &GameConfig::default(),
//!         10,
//!         Box::new(SeededDice::new(42)),
//!         Box::new(MemoryScoreStore::new()),
//!     )?;
//!     let outcome = game.execute(Command::Move("north".into()))?;
//!     println!("{:?}", outcome);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`dungeon`] - world data, session components and the [`dungeon::Game`] orchestrator
//! - [`config`] - TOML configuration and defaults
//! - [`validation`] - player-name validation for the score table
//! - [`logutil`] - log-line escaping and clock formatting

pub mod config;
pub mod dungeon;
pub mod logutil;
pub mod validation;
