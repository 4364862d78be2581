//! Test utilities & fixtures shared by the integration tests.

use dungeon_puzzler::config::GameConfig;
use dungeon_puzzler::dungeon::{Game, MemoryScoreStore, ScoreStore, ScriptedDice, WorldCatalog};

/// Dice that deal the reference item pool in catalog order:
/// Entrance gets torch/crystal/orb, Hallway book/scroll/relic, Library
/// amulet/wand/crown, Treasury potion/gem/ring, Laboratory key/map/compass.
/// Rolls are 0 and encounter checks fail unless outcomes are queued.
pub fn unshuffled_dice() -> ScriptedDice {
    ScriptedDice::new()
}

#[allow(dead_code)]
pub fn reference_game_with(dice: ScriptedDice, store: Box<dyn ScoreStore>) -> Game {
    Game::new(
        &WorldCatalog::default(),
        &GameConfig::default(),
        10,
        Box::new(dice),
        store,
    )
    .expect("reference game")
}

#[allow(dead_code)]
pub fn reference_game() -> Game {
    reference_game_with(unshuffled_dice(), Box::new(MemoryScoreStore::new()))
}
