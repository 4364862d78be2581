//! Session orchestrator.
//!
//! [`Game`] owns every per-session component and applies one [`Command`]
//! at a time. It enforces the session state machine:
//!
//! - `Exploring`: every non-combat command is accepted.
//! - `InCombat`: only combat and read-only commands are accepted.
//! - `Won` / `Defeated`: only read-only commands are accepted.
//!
//! Wall-clock time is not tracked here; callers pass the elapsed duration
//! into the timing queries and [`Game::record_win`].

use log::{debug, info, warn};
use std::time::Duration;

use super::combat::{CombatAction, CombatRules, CombatStatus, Encounter, TurnReport};
use super::commands::Command;
use super::dice::Dice;
use super::errors::DungeonError;
use super::history::{HistoryDirection, MovementHistory};
use super::inventory::Inventory;
use super::puzzle::{PuzzleLedger, SolvedPuzzle};
use super::scoreboard::ScoreBoard;
use super::search::ItemIndex;
use super::spawner::EnemySpawner;
use super::storage::ScoreStore;
use super::types::{Enemy, Item, Player, Score};
use super::world::{Room, RoomGraph, RoomId, WorldCatalog};
use crate::config::GameConfig;
use crate::logutil::escape_log;
use crate::validation::validate_player_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Exploring,
    InCombat,
    Won,
    Defeated,
}

/// Snapshot of a room for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomView {
    pub name: String,
    pub description: String,
    pub note: Option<String>,
    pub exits: Vec<String>,
    pub items: Vec<Item>,
}

impl RoomView {
    fn of(room: &Room) -> Self {
        Self {
            name: room.name.clone(),
            description: room.description.clone(),
            note: room.note.clone(),
            exits: room.exit_labels().map(str::to_string).collect(),
            items: room.items().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Distinct puzzle-required items currently held.
    pub required_items_held: usize,
    pub required_items_total: usize,
    pub puzzles_solved: usize,
    pub puzzles_total: usize,
    pub score: u32,
    pub health: i32,
    pub max_health: i32,
    pub inventory: Vec<Item>,
    pub inventory_value: u32,
    /// Unsolved puzzle types in the order they must be attempted.
    pub unsolved: Vec<String>,
    /// Question of the puzzle at the front of the queue.
    pub current_question: Option<String>,
    pub state: SessionState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Moved {
        room: RoomView,
        /// Enemy that ambushed the player on arrival, if any.
        encounter: Option<Enemy>,
    },
    Retraced {
        direction: HistoryDirection,
        room: RoomView,
    },
    Taken {
        item: Item,
        score: u32,
    },
    Dropped {
        item: Item,
    },
    Solved {
        puzzle: SolvedPuzzle,
        score: u32,
    },
    /// The puzzle that must be solved next, with its question and hint.
    Hint {
        kind: String,
        question: String,
        hint: String,
    },
    SearchResults {
        min: u32,
        max: u32,
        items: Vec<Item>,
    },
    Status(StatusReport),
    Look(RoomView),
    Inventory {
        items: Vec<Item>,
        total_value: u32,
    },
    Scores(Vec<Score>),
    Combat(TurnReport),
}

/// Score breakdown produced when a win is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalScore {
    pub player_name: String,
    pub base: u32,
    pub time_bonus: u32,
    pub total: u32,
    pub time_taken_secs: u64,
    /// Zero-based position on the high-score table, if it made the cut.
    pub rank: Option<usize>,
}

pub struct Game {
    graph: RoomGraph,
    current: RoomId,
    history: MovementHistory<RoomId>,
    inventory: Inventory,
    player: Player,
    ledger: PuzzleLedger,
    spawner: EnemySpawner,
    rules: CombatRules,
    encounter: Option<Encounter>,
    score: u32,
    board: ScoreBoard,
    store: Box<dyn ScoreStore>,
    dice: Box<dyn Dice>,
    time_limit: Duration,
    time_bonus_per_minute: u32,
    state: SessionState,
    win_recorded: bool,
}

impl Game {
    /// Build a fresh session: deal the world, load the high-score table.
    ///
    /// An unreadable score file is logged and treated as an empty table.
    pub fn new(
        catalog: &WorldCatalog,
        config: &GameConfig,
        score_capacity: usize,
        mut dice: Box<dyn Dice>,
        store: Box<dyn ScoreStore>,
    ) -> Result<Self, DungeonError> {
        let (graph, start) = catalog.build_rooms(dice.as_mut())?;
        let spawner =
            EnemySpawner::new(&catalog.enemies, config.encounter_chance, config.spawn_policy)?;
        let ledger = PuzzleLedger::new(&catalog.puzzles, config.points_per_difficulty);

        let loaded = match store.load() {
            Ok(scores) => scores,
            Err(e) => {
                warn!("Starting with an empty score table: {}", e);
                Vec::new()
            }
        };
        let board = ScoreBoard::from_entries(loaded, score_capacity);

        let mut history = MovementHistory::new();
        history.record(start);
        debug!(
            "New session in {} ({} rooms, {} puzzles)",
            graph.room(start).name,
            graph.len(),
            ledger.total()
        );

        Ok(Self {
            graph,
            current: start,
            history,
            inventory: Inventory::new(),
            player: Player::new(config.player_max_health, config.player_attack),
            ledger,
            spawner,
            rules: config.combat_rules(),
            encounter: None,
            score: 0,
            board,
            store,
            dice,
            time_limit: Duration::from_secs(config.time_limit_secs),
            time_bonus_per_minute: config.time_bonus_per_minute,
            state: SessionState::Exploring,
            win_recorded: false,
        })
    }

    /// Apply one command.
    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome, DungeonError> {
        if !command.is_read_only() {
            self.ensure_can_act(&command)?;
        }

        let outcome = match command {
            Command::Move(direction) => self.move_to(&direction)?,
            Command::GoBack => self.retrace(HistoryDirection::Back)?,
            Command::GoForward => self.retrace(HistoryDirection::Forward)?,
            Command::TakeItem(name) => self.take_item(&name)?,
            Command::DropItem(name) => self.drop_item(&name)?,
            Command::SolvePuzzle(answer) => self.solve(&answer)?,
            Command::ShowHint => {
                let (puzzle, hint) = self.ledger.hint().ok_or(DungeonError::NoPuzzlesRemaining)?;
                CommandOutcome::Hint {
                    kind: puzzle.kind.clone(),
                    question: puzzle.question.clone(),
                    hint: hint.to_string(),
                }
            }
            Command::SearchRange { min, max } => CommandOutcome::SearchResults {
                min,
                max,
                items: self.search(min, max),
            },
            Command::Status => CommandOutcome::Status(self.status()),
            Command::Look => CommandOutcome::Look(self.look()),
            Command::Inventory => CommandOutcome::Inventory {
                items: self.inventory.iter().cloned().collect(),
                total_value: self.inventory.total_value(),
            },
            Command::Scores => CommandOutcome::Scores(self.board.entries().to_vec()),
            Command::Combat(action) => CommandOutcome::Combat(self.fight(action)?),
        };

        self.update_win_state();
        Ok(outcome)
    }

    fn ensure_can_act(&self, command: &Command) -> Result<(), DungeonError> {
        let is_combat = matches!(command, Command::Combat(_));
        match self.state {
            SessionState::Defeated => Err(DungeonError::PlayerDefeated),
            SessionState::Won => Err(DungeonError::SessionOver),
            SessionState::InCombat if !is_combat => Err(DungeonError::InCombat),
            SessionState::Exploring if is_combat => Err(DungeonError::NoActiveEncounter),
            _ => Ok(()),
        }
    }

    fn move_to(&mut self, direction: &str) -> Result<CommandOutcome, DungeonError> {
        let destination = self.graph.exit(self.current, direction).ok_or_else(|| {
            DungeonError::InvalidDirection {
                room: self.graph.room(self.current).name.clone(),
                direction: direction.to_string(),
            }
        })?;
        debug!(
            "{} -> {} via '{}'",
            self.graph.room(self.current).name,
            self.graph.room(destination).name,
            escape_log(direction)
        );
        self.current = destination;
        self.history.record(destination);

        let sighted = self
            .spawner
            .roll_encounter(self.ledger.progress(), self.dice.as_mut())
            .map(|enemy| {
                let sighted = enemy.clone();
                self.encounter = Some(Encounter::new(enemy));
                self.state = SessionState::InCombat;
                sighted
            });

        Ok(CommandOutcome::Moved {
            room: self.look(),
            encounter: sighted,
        })
    }

    fn retrace(&mut self, direction: HistoryDirection) -> Result<CommandOutcome, DungeonError> {
        let step = match direction {
            HistoryDirection::Back => self.history.back(),
            HistoryDirection::Forward => self.history.forward(),
        };
        let room = *step.ok_or(DungeonError::HistoryBoundary(direction))?;
        self.current = room;
        debug!("Went {} to {}", direction, self.graph.room(room).name);
        Ok(CommandOutcome::Retraced {
            direction,
            room: self.look(),
        })
    }

    fn take_item(&mut self, name: &str) -> Result<CommandOutcome, DungeonError> {
        let room = self.graph.room_mut(self.current);
        let item = room
            .take_item(name)
            .ok_or_else(|| DungeonError::ItemNotFound(name.to_string()))?;
        if let Some(displaced) = self.inventory.insert(item.clone()) {
            room.add_item(displaced);
        }
        self.score = self.score.saturating_add(item.value);
        debug!("Took {} (+{}, score {})", escape_log(name), item.value, self.score);
        Ok(CommandOutcome::Taken {
            item,
            score: self.score,
        })
    }

    fn drop_item(&mut self, name: &str) -> Result<CommandOutcome, DungeonError> {
        let item = self
            .inventory
            .remove(name)
            .ok_or_else(|| DungeonError::ItemNotFound(name.to_string()))?;
        if let Some(displaced) = self.graph.room_mut(self.current).add_item(item.clone()) {
            self.inventory.insert(displaced);
        }
        debug!("Dropped {}", escape_log(name));
        Ok(CommandOutcome::Dropped { item })
    }

    fn solve(&mut self, answer: &str) -> Result<CommandOutcome, DungeonError> {
        let puzzle = self.ledger.attempt(&self.inventory, answer)?;
        self.score = self.score.saturating_add(puzzle.points);
        Ok(CommandOutcome::Solved {
            puzzle,
            score: self.score,
        })
    }

    fn fight(&mut self, action: CombatAction) -> Result<TurnReport, DungeonError> {
        let encounter = self
            .encounter
            .as_mut()
            .ok_or(DungeonError::NoActiveEncounter)?;
        let report = encounter.take_turn(
            action,
            &mut self.player,
            &mut self.inventory,
            &self.rules,
            self.dice.as_mut(),
        )?;

        match &report.status {
            CombatStatus::Ongoing => {}
            CombatStatus::EnemyDefeated { loot } => {
                if let Some(item) = loot {
                    self.score = self.score.saturating_add(item.value);
                }
                self.encounter = None;
                self.state = SessionState::Exploring;
            }
            CombatStatus::Escaped => {
                debug!("Escaped from {}", report.enemy_name);
                self.encounter = None;
                self.state = SessionState::Exploring;
            }
            CombatStatus::PlayerDefeated => {
                info!("Session lost with score {}", self.score);
                self.encounter = None;
                self.state = SessionState::Defeated;
            }
        }
        Ok(report)
    }

    /// Every puzzle solved and every required item in hand.
    pub fn is_won(&self) -> bool {
        self.ledger.all_solved()
            && self
                .ledger
                .all_required_names()
                .into_iter()
                .all(|name| self.inventory.contains(name))
    }

    fn update_win_state(&mut self) {
        if self.state == SessionState::Exploring && self.is_won() {
            info!("All puzzles solved with score {}", self.score);
            self.state = SessionState::Won;
        }
    }

    pub fn look(&self) -> RoomView {
        RoomView::of(self.graph.room(self.current))
    }

    pub fn search(&self, min: u32, max: u32) -> Vec<Item> {
        ItemIndex::build(&self.graph, &self.inventory).find_in_range(min, max)
    }

    pub fn status(&self) -> StatusReport {
        let required = self.ledger.all_required_names();
        StatusReport {
            required_items_held: required
                .iter()
                .filter(|name| self.inventory.contains(name))
                .count(),
            required_items_total: required.len(),
            puzzles_solved: self.ledger.completed().len(),
            puzzles_total: self.ledger.total(),
            score: self.score,
            health: self.player.health,
            max_health: self.player.max_health,
            inventory: self.inventory.iter().cloned().collect(),
            inventory_value: self.inventory.total_value(),
            unsolved: self.ledger.remaining().map(|p| p.kind.clone()).collect(),
            current_question: self.ledger.current().map(|p| p.question.clone()),
            state: self.state,
        }
    }

    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    pub fn is_session_expired(&self, elapsed: Duration) -> bool {
        elapsed >= self.time_limit
    }

    pub fn remaining_time(&self, elapsed: Duration) -> Duration {
        self.time_limit.saturating_sub(elapsed)
    }

    /// Bonus for every full minute left on the clock.
    pub fn time_bonus(&self, elapsed: Duration) -> u32 {
        let minutes = self.remaining_time(elapsed).as_secs() / 60;
        (minutes as u32).saturating_mul(self.time_bonus_per_minute)
    }

    /// Rank a won session on the high-score table and persist the table.
    ///
    /// A failed save is logged; the ranking still stands for this process.
    pub fn record_win(
        &mut self,
        player_name: &str,
        elapsed: Duration,
    ) -> Result<FinalScore, DungeonError> {
        if self.win_recorded {
            return Err(DungeonError::SessionOver);
        }
        if self.state != SessionState::Won {
            return Err(DungeonError::GameNotWon);
        }
        let player_name = validate_player_name(player_name)?;

        let time_bonus = self.time_bonus(elapsed);
        let total = self.score.saturating_add(time_bonus);
        let time_taken_secs = elapsed.as_secs();
        let rank = self
            .board
            .insert(Score::new(player_name.clone(), total, time_taken_secs));
        self.win_recorded = true;

        if rank.is_some() {
            if let Err(e) = self.store.save(self.board.entries()) {
                warn!("High score not persisted: {}", e);
            }
        }
        info!(
            "{} won with {} points ({} + {} bonus) in {}s, rank {:?}",
            escape_log(&player_name),
            total,
            self.score,
            time_bonus,
            time_taken_secs,
            rank.map(|r| r + 1)
        );

        Ok(FinalScore {
            player_name,
            base: self.score,
            time_bonus,
            total,
            time_taken_secs,
            rank,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn current_room(&self) -> &Room {
        self.graph.room(self.current)
    }

    pub fn graph(&self) -> &RoomGraph {
        &self.graph
    }

    pub fn history(&self) -> &MovementHistory<RoomId> {
        &self.history
    }

    pub fn ledger(&self) -> &PuzzleLedger {
        &self.ledger
    }

    pub fn encounter(&self) -> Option<&Encounter> {
        self.encounter.as_ref()
    }

    pub fn scoreboard(&self) -> &ScoreBoard {
        &self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dungeon::dice::ScriptedDice;
    use crate::dungeon::storage::MemoryScoreStore;

    /// Rolls that leave the item pool in catalog order, so the reference
    /// world deals torch/crystal/orb to the Entrance and so on.
    fn unshuffled() -> ScriptedDice {
        ScriptedDice::new()
    }

    fn game_with(dice: ScriptedDice, config: GameConfig) -> Game {
        Game::new(
            &WorldCatalog::default(),
            &config,
            10,
            Box::new(dice),
            Box::new(MemoryScoreStore::new()),
        )
        .expect("game")
    }

    fn game() -> Game {
        game_with(unshuffled(), GameConfig::default())
    }

    fn go(game: &mut Game, dir: &str) -> Result<CommandOutcome, DungeonError> {
        game.execute(Command::Move(dir.to_string()))
    }

    fn take(game: &mut Game, name: &str) {
        game.execute(Command::TakeItem(name.to_string()))
            .unwrap_or_else(|e| panic!("take {name}: {e}"));
    }

    #[test]
    fn move_then_back_returns_to_entrance() {
        let mut game = game();
        assert_eq!(game.current_room().name, "Entrance");
        go(&mut game, "north").expect("move");
        assert_eq!(game.current_room().name, "Hallway");

        let outcome = game.execute(Command::GoBack).expect("back");
        assert!(matches!(
            outcome,
            CommandOutcome::Retraced { direction: HistoryDirection::Back, ref room } if room.name == "Entrance"
        ));
        assert!(matches!(
            game.execute(Command::GoBack),
            Err(DungeonError::HistoryBoundary(HistoryDirection::Back))
        ));
        game.execute(Command::GoForward).expect("forward");
        assert_eq!(game.current_room().name, "Hallway");
        assert!(matches!(
            game.execute(Command::GoForward),
            Err(DungeonError::HistoryBoundary(HistoryDirection::Forward))
        ));
    }

    #[test]
    fn invalid_direction_leaves_state_alone() {
        let mut game = game();
        let err = go(&mut game, "south").unwrap_err();
        assert!(matches!(err, DungeonError::InvalidDirection { ref room, .. } if room == "Entrance"));
        assert_eq!(game.current_room().name, "Entrance");
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn take_scores_item_value_and_drop_does_not_refund() {
        let mut game = game();
        let outcome = game.execute(Command::TakeItem("torch".into())).expect("take");
        assert!(matches!(outcome, CommandOutcome::Taken { score: 10, .. }));
        assert_eq!(game.inventory().len(), 1);
        assert!(!game.current_room().has_item("torch"));
        assert!(matches!(
            game.execute(Command::TakeItem("torch".into())),
            Err(DungeonError::ItemNotFound(_))
        ));

        game.execute(Command::DropItem("torch".into())).expect("drop");
        assert!(game.current_room().has_item("torch"));
        assert!(game.inventory().is_empty());
        assert_eq!(game.score(), 10);
        assert!(matches!(
            game.execute(Command::DropItem("torch".into())),
            Err(DungeonError::ItemNotFound(_))
        ));
    }

    #[test]
    fn light_ritual_with_only_torch_is_short_by_fifteen() {
        let mut game = game();
        take(&mut game, "torch");
        let err = game
            .execute(Command::SolvePuzzle("torch and crystal".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            DungeonError::InsufficientValue { current: 10, shortfall: 15, .. }
        ));
    }

    #[test]
    fn full_run_wins_and_records_score() {
        let mut game = game();
        for item in ["torch", "crystal", "orb"] {
            take(&mut game, item);
        }
        game.execute(Command::SolvePuzzle("Torch and Crystal".into())).expect("light");
        go(&mut game, "north").expect("hallway");
        take(&mut game, "book");
        take(&mut game, "scroll");
        game.execute(Command::SolvePuzzle("book and scroll".into())).expect("text");
        go(&mut game, "east").expect("library");
        take(&mut game, "amulet");
        assert_eq!(game.state(), SessionState::Exploring);
        take(&mut game, "wand");
        let outcome = game
            .execute(Command::SolvePuzzle("amulet and wand".into()))
            .expect("portal");
        assert!(matches!(outcome, CommandOutcome::Solved { score: 465, .. }));
        assert_eq!(game.state(), SessionState::Won);

        assert!(matches!(go(&mut game, "south"), Err(DungeonError::SessionOver)));
        assert!(game.execute(Command::Status).is_ok());

        let final_score = game
            .record_win("  alice ", Duration::from_secs(120))
            .expect("record");
        assert_eq!(final_score.player_name, "alice");
        assert_eq!(final_score.time_bonus, 150);
        assert_eq!(final_score.total, 615);
        assert_eq!(final_score.rank, Some(0));
        assert_eq!(game.scoreboard().entries()[0], Score::new("alice", 615, 120));
        assert!(matches!(
            game.record_win("alice", Duration::from_secs(120)),
            Err(DungeonError::SessionOver)
        ));
    }

    #[test]
    fn record_win_requires_a_win_and_a_valid_name() {
        let mut game = game();
        assert!(matches!(
            game.record_win("bob", Duration::ZERO),
            Err(DungeonError::GameNotWon)
        ));
    }

    #[test]
    fn encounter_locks_out_exploration_until_resolved() {
        let mut game = game_with(unshuffled().with_chances([true]), GameConfig::default());
        let outcome = go(&mut game, "north").expect("move");
        match outcome {
            CommandOutcome::Moved { encounter: Some(enemy), .. } => assert_eq!(enemy.name, "Skeleton"),
            other => panic!("expected an ambush, got {other:?}"),
        }
        assert_eq!(game.state(), SessionState::InCombat);
        assert!(matches!(go(&mut game, "south"), Err(DungeonError::InCombat)));
        assert!(matches!(
            game.execute(Command::TakeItem("book".into())),
            Err(DungeonError::InCombat)
        ));
        assert!(game.execute(Command::Look).is_ok());

        let attack = || Command::Combat(CombatAction::Attack);
        let report = match game.execute(attack()).expect("first blow") {
            CommandOutcome::Combat(report) => report,
            other => panic!("unexpected {other:?}"),
        };
        assert_eq!(report.enemy_health, 15);
        assert_eq!(game.player().health, 90);

        game.execute(attack()).expect("second blow");
        assert_eq!(game.state(), SessionState::Exploring);
        assert!(game.inventory().contains("bone"));
        assert_eq!(game.score(), 15);
        assert!(game.encounter().is_none());
        assert!(matches!(
            game.execute(attack()),
            Err(DungeonError::NoActiveEncounter)
        ));
    }

    #[test]
    fn escape_ends_encounter_without_loot() {
        let mut game = game_with(unshuffled().with_chances([true, true]), GameConfig::default());
        go(&mut game, "north").expect("move");
        game.execute(Command::Combat(CombatAction::Escape)).expect("escape");
        assert_eq!(game.state(), SessionState::Exploring);
        assert!(game.inventory().is_empty());
        go(&mut game, "south").expect("free to move again");
    }

    #[test]
    fn defeat_ends_the_session() {
        let config = GameConfig {
            player_max_health: 5,
            ..GameConfig::default()
        };
        let mut game = game_with(unshuffled().with_chances([true]), config);
        go(&mut game, "north").expect("move");
        let outcome = game
            .execute(Command::Combat(CombatAction::Attack))
            .expect("turn");
        assert!(matches!(
            outcome,
            CommandOutcome::Combat(TurnReport { status: CombatStatus::PlayerDefeated, .. })
        ));
        assert_eq!(game.state(), SessionState::Defeated);
        let err = go(&mut game, "south").unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(
            game.execute(Command::Combat(CombatAction::Attack)),
            Err(DungeonError::PlayerDefeated)
        ));
        assert!(game.execute(Command::Inventory).is_ok());
    }

    #[test]
    fn search_spans_rooms_and_inventory() {
        let mut game = game();
        take(&mut game, "orb");
        let names: Vec<String> = game.search(30, 35).into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["wand", "orb", "amulet", "crown"]);
        assert!(game.search(50, 10).is_empty());
    }

    #[test]
    fn status_tracks_progress() {
        let mut game = game();
        take(&mut game, "torch");
        take(&mut game, "crystal");
        let status = game.status();
        assert_eq!(status.required_items_held, 2);
        assert_eq!(status.required_items_total, 6);
        assert_eq!(status.puzzles_solved, 0);
        assert_eq!(status.puzzles_total, 3);
        assert_eq!(status.inventory_value, 30);
        assert_eq!(status.unsolved, vec!["LIGHT_RITUAL", "ANCIENT_TEXT", "PORTAL"]);
    }

    #[test]
    fn timing_queries() {
        let game = game();
        assert!(!game.is_session_expired(Duration::from_secs(299)));
        assert!(game.is_session_expired(Duration::from_secs(300)));
        assert_eq!(game.time_bonus(Duration::ZERO), 250);
        assert_eq!(game.time_bonus(Duration::from_secs(241)), 0);
        assert_eq!(game.remaining_time(Duration::from_secs(400)), Duration::ZERO);
    }

    #[test]
    fn unreadable_score_table_starts_empty() {
        struct Broken;
        impl ScoreStore for Broken {
            fn load(&self) -> Result<Vec<Score>, DungeonError> {
                Err(DungeonError::PersistenceRead(std::io::Error::other("corrupt")))
            }
            fn save(&mut self, _: &[Score]) -> Result<(), DungeonError> {
                Err(DungeonError::PersistenceWrite(std::io::Error::other("read-only")))
            }
        }
        let game = Game::new(
            &WorldCatalog::default(),
            &GameConfig::default(),
            10,
            Box::new(unshuffled()),
            Box::new(Broken),
        )
        .expect("game");
        assert!(game.scoreboard().is_empty());
    }
}
