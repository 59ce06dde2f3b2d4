use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::model::content::SelectableTarget;

/// Toggled selection over selectable words or image areas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Ids of the selectables that should end up selected.
    targets: BTreeSet<usize>,
    /// Group (sentence) of each selectable, by id.
    groups: Vec<usize>,
    group_count: usize,
    selected: BTreeSet<usize>,
}

impl SelectionState {
    #[must_use]
    pub fn new(selectables: &[SelectableTarget], group_count: usize) -> Self {
        Self {
            targets: selectables
                .iter()
                .filter(|t| t.is_target)
                .map(|t| t.id)
                .collect(),
            groups: selectables.iter().map(|t| t.group).collect(),
            group_count,
            selected: BTreeSet::new(),
        }
    }

    /// Add the selectable to the selection, or remove it if already there.
    pub fn toggle(&mut self, id: usize) -> bool {
        if id >= self.groups.len() {
            return false;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        true
    }

    #[must_use]
    pub fn selected(&self) -> &BTreeSet<usize> {
        &self.selected
    }

    #[must_use]
    pub fn targets(&self) -> &BTreeSet<usize> {
        &self.targets
    }

    #[must_use]
    pub fn is_selected(&self, id: usize) -> bool {
        self.selected.contains(&id)
    }

    /// Group of the selectable with this id.
    #[must_use]
    pub fn group_of(&self, id: usize) -> Option<usize> {
        self.groups.get(id).copied()
    }

    #[must_use]
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    pub(crate) fn answered(&self) -> Vec<bool> {
        let mut answered = vec![false; self.group_count];
        for &id in &self.selected {
            if let Some(slot) = answered.get_mut(self.groups[id]) {
                *slot = true;
            }
        }
        answered
    }
}
