//! Command values consumed by the game, and a parser for typed input.
//!
//! The engine only ever sees [`Command`]; `help` and `quit` are handled by
//! whatever front end reads the input.

use super::combat::CombatAction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation
    Move(String),
    GoBack,
    GoForward,

    // Items and puzzles
    TakeItem(String),
    DropItem(String),
    SolvePuzzle(String),
    ShowHint,
    SearchRange { min: u32, max: u32 },

    Status,
    Look,
    Inventory,
    Scores,

    // Combat
    Combat(CombatAction),
}

impl Command {
    /// Commands that never change session state.
    pub fn is_read_only(&self) -> bool {
        matches!(
            self,
            Command::ShowHint
                | Command::SearchRange { .. }
                | Command::Status
                | Command::Look
                | Command::Inventory
                | Command::Scores
        )
    }
}

/// Outcome of parsing one line of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedInput {
    Command(Command),
    Help,
    Quit,
    /// Unrecognised or malformed input, with a usage message.
    Invalid(String),
}

fn direction_alias(word: &str) -> Option<&'static str> {
    match word {
        "n" | "north" => Some("north"),
        "s" | "south" => Some("south"),
        "e" | "east" => Some("east"),
        "w" | "west" => Some("west"),
        _ => None,
    }
}

/// Parse a line such as `go north`, `take torch` or `search 10 30`.
pub fn parse_command(input: &str) -> ParsedInput {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();
    let Some((&verb, args)) = parts.split_first() else {
        return ParsedInput::Invalid("Type 'help' for a list of commands.".to_string());
    };
    let rest = args.join(" ");

    let command = match verb {
        "go" | "move" => match args {
            [dir] => Command::Move(
                direction_alias(dir).map_or_else(|| dir.to_string(), str::to_string),
            ),
            _ => return ParsedInput::Invalid("Usage: go <direction>".to_string()),
        },
        "back" => Command::GoBack,
        "forward" => Command::GoForward,
        "take" | "get" if !rest.is_empty() => Command::TakeItem(rest),
        "drop" if !rest.is_empty() => Command::DropItem(rest),
        "take" | "get" => return ParsedInput::Invalid("Usage: take <item>".to_string()),
        "drop" => return ParsedInput::Invalid("Usage: drop <item>".to_string()),
        "solve" | "answer" => Command::SolvePuzzle(rest),
        "hint" => Command::ShowHint,
        "search" => match args {
            [min, max] => match (min.parse(), max.parse()) {
                (Ok(min), Ok(max)) => Command::SearchRange { min, max },
                _ => return ParsedInput::Invalid("Values must be whole numbers.".to_string()),
            },
            _ => return ParsedInput::Invalid("Usage: search <min> <max>".to_string()),
        },
        "status" => Command::Status,
        "look" | "l" => Command::Look,
        "inventory" | "inv" | "i" => Command::Inventory,
        "scores" => Command::Scores,
        "attack" | "1" => Command::Combat(CombatAction::Attack),
        "potion" | "heal" | "2" => Command::Combat(CombatAction::UsePotion),
        "run" | "escape" | "flee" | "3" => Command::Combat(CombatAction::Escape),
        "help" | "?" => return ParsedInput::Help,
        "quit" | "exit" => return ParsedInput::Quit,
        other => match direction_alias(other) {
            Some(dir) if args.is_empty() => Command::Move(dir.to_string()),
            _ => return ParsedInput::Invalid(format!("I don't understand '{}'.", input)),
        },
    };
    ParsedInput::Command(command)
}

pub const HELP_TEXT: &str = "\
Available commands:
  go <direction>    - Move (north, south, east, west; n/s/e/w also work)
  back / forward    - Retrace your path
  look              - Look around the current room
  inventory         - Show your inventory
  take <item>       - Take an item from the room
  drop <item>       - Drop an item from your inventory
  solve <answer>    - Try to solve the current puzzle
  hint              - Show a hint for the current puzzle
  search <min> <max>- List items worth between min and max points
  status            - Show game progress
  scores            - Show high scores
  attack / potion / run (or 1 / 2 / 3) - Combat choices
  help              - Show this help message
  quit              - Leave the dungeon";
