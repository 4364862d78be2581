//! Room graph and the static world catalog.
//!
//! The catalog is plain data (JSON on disk, or the built-in reference
//! world) so changing rooms, items, enemies or puzzles never touches
//! engine logic. [`WorldCatalog::build_rooms`] turns it into a
//! [`RoomGraph`] and deals the shuffled item pool into the rooms.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use super::dice::Dice;
use super::errors::DungeonError;
use super::puzzle::PuzzleSeed;
use super::types::{EnemyTemplate, Item};

/// Index of a room inside its [`RoomGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(usize);

#[derive(Debug, Clone)]
pub struct Room {
    pub name: String,
    pub description: String,
    /// Flavour line shown when the player looks around.
    pub note: Option<String>,
    exits: BTreeMap<String, RoomId>,
    items: BTreeMap<String, Item>,
}

impl Room {
    fn new(name: &str, description: &str, note: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            note,
            exits: BTreeMap::new(),
            items: BTreeMap::new(),
        }
    }

    /// Place an item, returning any item of the same name it displaced.
    pub fn add_item(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.name.clone(), item)
    }

    pub fn take_item(&mut self, name: &str) -> Option<Item> {
        self.items.remove(name)
    }

    pub fn has_item(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Exit labels in sorted order.
    pub fn exit_labels(&self) -> impl Iterator<Item = &str> {
        self.exits.keys().map(String::as_str)
    }
}

/// Directed exit map over a fixed set of rooms.
#[derive(Debug, Clone, Default)]
pub struct RoomGraph {
    rooms: Vec<Room>,
}

impl RoomGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_room(&mut self, name: &str, description: &str, note: Option<String>) -> RoomId {
        self.rooms.push(Room::new(name, description, note));
        RoomId(self.rooms.len() - 1)
    }

    /// One-directional edge; call twice for a two-way corridor.
    pub fn connect(&mut self, from: RoomId, direction: &str, to: RoomId) {
        self.rooms[from.0].exits.insert(direction.to_string(), to);
    }

    /// Destination through `direction`, or `None` when there is no such exit.
    pub fn exit(&self, from: RoomId, direction: &str) -> Option<RoomId> {
        self.rooms[from.0].exits.get(direction).copied()
    }

    pub fn room(&self, id: RoomId) -> &Room {
        &self.rooms[id.0]
    }

    pub fn room_mut(&mut self, id: RoomId) -> &mut Room {
        &mut self.rooms[id.0]
    }

    pub fn find(&self, name: &str) -> Option<RoomId> {
        self.rooms.iter().position(|r| r.name == name).map(RoomId)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.iter()
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSeed {
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A two-way corridor: `from --direction--> to` and `to --back--> from`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorridorSeed {
    pub from: String,
    pub direction: String,
    pub to: String,
    pub back: String,
}

fn default_items_per_room() -> usize {
    3
}

/// Static description of a dungeon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldCatalog {
    pub start_room: String,
    pub rooms: Vec<RoomSeed>,
    pub corridors: Vec<CorridorSeed>,
    pub items: Vec<Item>,
    #[serde(default = "default_items_per_room")]
    pub items_per_room: usize,
    pub enemies: Vec<EnemyTemplate>,
    pub puzzles: Vec<PuzzleSeed>,
}

impl WorldCatalog {
    /// Load a catalog from a JSON file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DungeonError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| {
            DungeonError::InvalidWorld(format!("failed to read {}: {}", path.display(), e))
        })?;
        let catalog: WorldCatalog = serde_json::from_str(&contents)?;
        catalog.validate()?;
        debug!(
            "Loaded world catalog from {} ({} rooms, {} items, {} puzzles)",
            path.display(),
            catalog.rooms.len(),
            catalog.items.len(),
            catalog.puzzles.len()
        );
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), DungeonError> {
        let mut names = HashSet::new();
        for room in &self.rooms {
            if !names.insert(room.name.as_str()) {
                return Err(DungeonError::InvalidWorld(format!(
                    "duplicate room {}",
                    room.name
                )));
            }
        }
        if !names.contains(self.start_room.as_str()) {
            return Err(DungeonError::InvalidWorld(format!(
                "unknown start room {}",
                self.start_room
            )));
        }
        for corridor in &self.corridors {
            for end in [&corridor.from, &corridor.to] {
                if !names.contains(end.as_str()) {
                    return Err(DungeonError::InvalidWorld(format!(
                        "corridor references unknown room {}",
                        end
                    )));
                }
            }
        }
        if self.enemies.is_empty() {
            return Err(DungeonError::InvalidWorld("enemy pool is empty".into()));
        }
        let mut kinds = HashSet::new();
        for puzzle in &self.puzzles {
            if !kinds.insert(puzzle.kind.as_str()) {
                return Err(DungeonError::InvalidWorld(format!(
                    "duplicate puzzle type {}",
                    puzzle.kind
                )));
            }
            // An empty keyword is a substring of every item name.
            if puzzle.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(DungeonError::InvalidWorld(format!(
                    "puzzle {} has an empty keyword",
                    puzzle.kind
                )));
            }
        }
        Ok(())
    }

    /// Create the rooms, wire the corridors and deal the shuffled item pool.
    ///
    /// Items are dealt `items_per_room` at a time in catalog room order;
    /// leftovers (if the pool is larger than the slots) are not placed.
    pub fn build_rooms(&self, dice: &mut dyn Dice) -> Result<(RoomGraph, RoomId), DungeonError> {
        self.validate()?;
        let mut graph = RoomGraph::new();
        for seed in &self.rooms {
            graph.add_room(&seed.name, &seed.description, seed.note.clone());
        }
        for corridor in &self.corridors {
            let (from, to) = match (graph.find(&corridor.from), graph.find(&corridor.to)) {
                (Some(from), Some(to)) => (from, to),
                _ => {
                    return Err(DungeonError::InvalidWorld(format!(
                        "corridor {} -> {} has an unknown end",
                        corridor.from, corridor.to
                    )))
                }
            };
            graph.connect(from, &corridor.direction, to);
            graph.connect(to, &corridor.back, from);
        }

        let mut pool = self.items.clone();
        dice.shuffle_items(&mut pool);
        let mut pool = pool.into_iter();
        for idx in 0..graph.len() {
            for item in pool.by_ref().take(self.items_per_room) {
                graph.room_mut(RoomId(idx)).add_item(item);
            }
        }

        let start = graph.find(&self.start_room).ok_or_else(|| {
            DungeonError::InvalidWorld(format!("unknown start room {}", self.start_room))
        })?;
        Ok((graph, start))
    }
}

fn room(name: &str, description: &str, note: Option<&str>) -> RoomSeed {
    RoomSeed {
        name: name.to_string(),
        description: description.to_string(),
        note: note.map(str::to_string),
    }
}

fn corridor(from: &str, direction: &str, to: &str, back: &str) -> CorridorSeed {
    CorridorSeed {
        from: from.to_string(),
        direction: direction.to_string(),
        to: to.to_string(),
        back: back.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn puzzle(
    kind: &str,
    difficulty: u32,
    question: &str,
    answer: &str,
    threshold: u32,
    required: [(&str, &str, u32); 2],
    keywords: [&str; 3],
    hint: &str,
) -> PuzzleSeed {
    PuzzleSeed {
        kind: kind.to_string(),
        difficulty,
        question: question.to_string(),
        answer: answer.to_string(),
        threshold,
        required_items: required
            .iter()
            .map(|(name, desc, value)| Item::new(*name, *desc, *value))
            .collect(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        hint: hint.to_string(),
    }
}

impl Default for WorldCatalog {
    /// The reference six-room dungeon.
    fn default() -> Self {
        WorldCatalog {
            start_room: "Entrance".to_string(),
            rooms: vec![
                room("Entrance", "A dimly lit entrance to an ancient dungeon.", None),
                room("Hallway", "A long, dark hallway with torches on the walls.", None),
                room(
                    "Library",
                    "An old library filled with dusty books.",
                    Some("Scattered notes mention combining texts for knowledge..."),
                ),
                room("Treasury", "A room that once held valuable treasures.", None),
                room(
                    "Laboratory",
                    "A mysterious room with ancient equipment.",
                    Some("Ancient runes suggest magical items here might help with rituals..."),
                ),
                room("Crypt", "A spooky crypt with mysterious symbols.", None),
            ],
            corridors: vec![
                corridor("Entrance", "north", "Hallway", "south"),
                corridor("Hallway", "east", "Library", "west"),
                corridor("Hallway", "west", "Treasury", "east"),
                corridor("Library", "north", "Laboratory", "south"),
                corridor("Treasury", "north", "Crypt", "south"),
            ],
            items: vec![
                Item::new("torch", "A burning torch", 10),
                Item::new("crystal", "A glowing crystal", 20),
                Item::new("orb", "A mystical orb", 30),
                Item::new("book", "An ancient spellbook", 15),
                Item::new("scroll", "A mysterious scroll", 25),
                Item::new("relic", "An ancient relic", 40),
                Item::new("amulet", "A magical amulet", 35),
                Item::new("wand", "A powerful wand", 30),
                Item::new("crown", "A golden crown", 35),
                Item::new("potion", "A healing potion", 15),
                Item::new("gem", "A power-enhancing gem", 20),
                Item::new("ring", "A magic ring", 25),
                Item::new("key", "A rusty key", 5),
                Item::new("map", "A torn map", 5),
                Item::new("compass", "A broken compass", 5),
            ],
            items_per_room: default_items_per_room(),
            enemies: vec![
                EnemyTemplate::new(
                    "Skeleton",
                    30,
                    10,
                    Some(Item::new("bone", "A mysterious glowing bone", 15)),
                    1,
                ),
                EnemyTemplate::new(
                    "Ghost",
                    20,
                    15,
                    Some(Item::new("ectoplasm", "A ghostly substance", 20)),
                    2,
                ),
                EnemyTemplate::new(
                    "Goblin",
                    40,
                    8,
                    Some(Item::new("gold_coin", "A shiny gold coin", 25)),
                    3,
                ),
                EnemyTemplate::new(
                    "Dark Wizard",
                    50,
                    12,
                    Some(Item::new("spell_scroll", "A powerful magic scroll", 30)),
                    4,
                ),
            ],
            puzzles: vec![
                puzzle(
                    "LIGHT_RITUAL",
                    1,
                    "The room is pitch black. You need items worth at least 25 points for the light ritual.",
                    "torch and crystal",
                    25,
                    [("torch", "A burning torch", 5), ("crystal", "A glowing crystal", 20)],
                    ["torch", "crystal", "orb"],
                    "The darkness might be dispelled by combining a light source with a magical focus...",
                ),
                puzzle(
                    "ANCIENT_TEXT",
                    2,
                    "Ancient text needs powerful items (35+ points combined) to decipher.",
                    "book and scroll",
                    35,
                    [("book", "An ancient spellbook", 15), ("scroll", "A mysterious scroll", 12)],
                    ["book", "scroll", "relic"],
                    "Knowledge often comes from combining different sources of information...",
                ),
                puzzle(
                    "PORTAL",
                    3,
                    "Portal requires your most powerful items (60+ points combined).",
                    "amulet and wand",
                    60,
                    [("amulet", "A magical amulet", 30), ("wand", "A wooden wand", 15)],
                    ["amulet", "wand", "crown"],
                    "Magical portals usually require both a focus and a channeling item...",
                ),
            ],
        }
    }
}
