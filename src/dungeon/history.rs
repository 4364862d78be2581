//! Browser-style back/forward log of visited rooms.
//!
//! Nodes live in an arena and link to each other by index, so the list is
//! doubly linked without shared ownership. `record` attaches a new node
//! after the current one and overwrites only that node's forward link:
//! any previously recorded forward chain stays in the arena (and in
//! [`MovementHistory::len`]) but can no longer be reached.

use std::fmt;

/// Which way a history step was attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryDirection {
    Back,
    Forward,
}

impl fmt::Display for HistoryDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryDirection::Back => write!(f, "back"),
            HistoryDirection::Forward => write!(f, "forward"),
        }
    }
}

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<usize>,
    next: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct MovementHistory<T> {
    nodes: Vec<Node<T>>,
    current: Option<usize>,
}

impl<T> Default for MovementHistory<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MovementHistory<T> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            current: None,
        }
    }

    /// Append `value` after the current position and make it current.
    pub fn record(&mut self, value: T) {
        let idx = self.nodes.len();
        self.nodes.push(Node {
            value,
            prev: self.current,
            next: None,
        });
        if let Some(current) = self.current {
            self.nodes[current].next = Some(idx);
        }
        self.current = Some(idx);
    }

    /// Step toward the start. `None` at the head (or when empty).
    pub fn back(&mut self) -> Option<&T> {
        let prev = self.nodes[self.current?].prev?;
        self.current = Some(prev);
        Some(&self.nodes[prev].value)
    }

    /// Step toward the tail. `None` at the tail (or when empty).
    pub fn forward(&mut self) -> Option<&T> {
        let next = self.nodes[self.current?].next?;
        self.current = Some(next);
        Some(&self.nodes[next].value)
    }

    pub fn current(&self) -> Option<&T> {
        self.current.map(|idx| &self.nodes[idx].value)
    }

    pub fn can_go_back(&self) -> bool {
        self.current.is_some_and(|idx| self.nodes[idx].prev.is_some())
    }

    pub fn can_go_forward(&self) -> bool {
        self.current.is_some_and(|idx| self.nodes[idx].next.is_some())
    }

    /// Total nodes ever recorded, including unreachable stale branches.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
