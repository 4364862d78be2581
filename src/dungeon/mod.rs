//! Dungeon engine: world data, per-session components and the orchestrator
//! that ties them together one command at a time.

pub mod combat;
pub mod commands;
pub mod dice;
pub mod errors;
pub mod game;
pub mod history;
pub mod inventory;
pub mod puzzle;
pub mod render;
pub mod scoreboard;
pub mod search;
pub mod spawner;
pub mod storage;
pub mod types;
pub mod world;

pub use combat::{CombatAction, CombatEvent, CombatRules, CombatStatus, Encounter, TurnReport};
pub use commands::{parse_command, Command, ParsedInput, HELP_TEXT};
pub use dice::{Dice, ScriptedDice, SeededDice};
pub use errors::DungeonError;
pub use game::{CommandOutcome, FinalScore, Game, RoomView, SessionState, StatusReport};
pub use history::{HistoryDirection, MovementHistory};
pub use inventory::Inventory;
pub use puzzle::{PuzzleLedger, PuzzleRule, PuzzleSeed, SolvedPuzzle};
pub use scoreboard::{ScoreBoard, DEFAULT_CAPACITY};
pub use search::ItemIndex;
pub use spawner::{EnemySpawner, SpawnPolicy};
pub use storage::{CsvScoreStore, MemoryScoreStore, ScoreStore};
pub use types::{Enemy, EnemyTemplate, Item, Player, Puzzle, Score};
pub use world::{CorridorSeed, Room, RoomGraph, RoomId, RoomSeed, WorldCatalog};
