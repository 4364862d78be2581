use thiserror::Error;

use crate::dungeon::history::HistoryDirection;
use crate::validation::NameError;

/// Errors that can arise while playing a dungeon session.
///
/// Everything except [`DungeonError::PlayerDefeated`] is recoverable: the
/// session simply waits for the next command.
#[derive(Debug, Error)]
pub enum DungeonError {
    /// No exit in the requested direction from the current room.
    #[error("you can't go {direction} from the {room}")]
    InvalidDirection { room: String, direction: String },

    /// Take/drop of an item that is not in the room or inventory.
    #[error("there's no {0} here")]
    ItemNotFound(String),

    /// Combined value of the held required items is below the threshold.
    #[error("your items aren't powerful enough ({current}/{required}, short by {shortfall})")]
    InsufficientValue {
        current: u32,
        required: u32,
        shortfall: u32,
    },

    /// Required items absent and no alternative solution applies.
    #[error("missing required items: {}", .0.join(", "))]
    MissingRequiredItems(Vec<String>),

    /// The answer did not match; the puzzle stays open.
    #[error("incorrect answer")]
    WrongAnswer,

    /// Every puzzle has already been solved.
    #[error("no more puzzles to solve")]
    NoPuzzlesRemaining,

    /// Back/forward at either end of the movement history.
    #[error("you can't go {0} any further")]
    HistoryBoundary(HistoryDirection),

    /// A non-combat action was attempted during an encounter.
    #[error("you are in combat")]
    InCombat,

    /// A combat action was attempted with no live encounter.
    #[error("there is nothing to fight")]
    NoActiveEncounter,

    /// The player has been defeated; the session is over.
    #[error("you have been defeated")]
    PlayerDefeated,

    /// The session has already been won and recorded.
    #[error("the session is over")]
    SessionOver,

    /// A win was recorded before the win condition was met.
    #[error("the game has not been won yet")]
    GameNotWon,

    /// The score file exists but could not be read.
    #[error("failed to read scores: {0}")]
    PersistenceRead(#[source] std::io::Error),

    /// The score file could not be written.
    #[error("failed to save scores: {0}")]
    PersistenceWrite(#[source] std::io::Error),

    /// The world catalog is internally inconsistent.
    #[error("invalid world: {0}")]
    InvalidWorld(String),

    /// Wrapper around world catalog parse errors.
    #[error("catalog error: {0}")]
    Catalog(#[from] serde_json::Error),

    /// Player name rejected before it reaches the score table.
    #[error("invalid player name: {0}")]
    InvalidPlayerName(#[from] NameError),
}

impl DungeonError {
    /// True only for errors that end the session.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DungeonError::PlayerDefeated)
    }
}
