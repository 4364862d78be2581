/// Player inventory for the dungeon session
use std::collections::BTreeMap;

use super::types::Item;

/// Items held by the player, keyed by name.
///
/// Ordered by name so listings and snapshots are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    items: BTreeMap<String, Item>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, returning any previous item with the same name.
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.name.clone(), item)
    }

    pub fn remove(&mut self, name: &str) -> Option<Item> {
        self.items.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Item> {
        self.items.get(name)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    /// Sum of every held item's value, capped at `u32::MAX`.
    pub fn total_value(&self) -> u32 {
        self.items
            .values()
            .map(|item| item.value)
            .fold(0, u32::saturating_add)
    }

    /// Sum of the values of the named items that are actually held.
    pub fn value_of<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> u32 {
        names
            .into_iter()
            .filter_map(|name| self.items.get(name))
            .map(|item| item.value)
            .fold(0, u32::saturating_add)
    }
}

impl FromIterator<Item> for Inventory {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        let mut inventory = Inventory::new();
        for item in iter {
            inventory.insert(item);
        }
        inventory
    }
}
