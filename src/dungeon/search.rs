//! Value-range query over every live item.

use super::inventory::Inventory;
use super::types::Item;
use super::world::RoomGraph;

/// Items from all rooms plus the inventory, sorted ascending by value.
///
/// Built fresh per query so it always reflects live state.
#[derive(Debug, Clone, Default)]
pub struct ItemIndex {
    sorted: Vec<Item>,
}

impl ItemIndex {
    pub fn build(graph: &RoomGraph, inventory: &Inventory) -> Self {
        let items = graph
            .rooms()
            .flat_map(|room| room.items())
            .chain(inventory.iter())
            .cloned()
            .collect();
        Self::from_items(items)
    }

    pub fn from_items(mut items: Vec<Item>) -> Self {
        items.sort_by_key(|item| item.value);
        Self { sorted: items }
    }

    pub fn items(&self) -> &[Item] {
        &self.sorted
    }

    /// All items with `min <= value <= max`, ascending by value.
    ///
    /// Empty when `min > max`.
    pub fn find_in_range(&self, min: u32, max: u32) -> Vec<Item> {
        let low = self.sorted.partition_point(|item| item.value < min);
        let high = self.sorted.partition_point(|item| item.value <= max);
        if low >= high {
            return Vec::new();
        }
        self.sorted[low..high]
            .iter()
            .filter(|item| item.value >= min && item.value <= max)
            .cloned()
            .collect()
    }
}
