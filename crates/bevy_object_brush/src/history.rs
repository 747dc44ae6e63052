use std::collections::VecDeque;

use bevy::prelude::*;

/// One undoable brush creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub entity: Entity,
    pub label: String,
}

/// Undo stack of instances created by the brush.
///
/// Holds at most `capacity` entries; the oldest are dropped first.
#[derive(Resource, Debug, Clone)]
pub struct BrushHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for BrushHistory {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl BrushHistory {
    pub const DEFAULT_CAPACITY: usize = 1024;

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn record(&mut self, entity: Entity, label: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            entity,
            label: label.into(),
        });
    }

    /// Removes and returns the most recent entry.
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop_back()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_most_recent_first() {
        let mut world = World::new();
        let mut history = BrushHistory::default();
        history.record(world.spawn_empty().id(), "Created rock with brush");
        history.record(world.spawn_empty().id(), "Created tree with brush");

        assert_eq!(history.pop().unwrap().label, "Created tree with brush");
        assert_eq!(history.pop().unwrap().label, "Created rock with brush");
        assert!(history.pop().is_none());
    }

    #[test]
    fn drops_oldest_when_full() {
        let mut world = World::new();
        let mut history = BrushHistory::with_capacity(2);
        for i in 1..=3 {
            history.record(world.spawn_empty().id(), format!("#{i}"));
        }
        assert_eq!(history.len(), 2);
        let labels: Vec<_> = history.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, ["#2", "#3"]);
    }
}
