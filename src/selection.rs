use std::collections::HashSet;

use tracing::trace;

/// Selected record identifiers, in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: Vec<String>,
    // Membership index over `ids`.
    index: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects `id` if absent, deselects it otherwise. Returns whether `id` is
    /// selected afterwards.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.index.remove(id) {
            self.ids.retain(|s| s != id);
            trace!("Deselected {id}");
            false
        } else {
            self.index.insert(id.to_string());
            self.ids.push(id.to_string());
            trace!("Selected {id}");
            true
        }
    }

    /// Any selection clears everything; an empty selection takes all `ids`.
    pub fn toggle_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = String>,
    {
        if self.ids.is_empty() {
            for id in ids {
                if self.index.insert(id.clone()) {
                    self.ids.push(id);
                }
            }
            trace!("Selected all {} items", self.ids.len());
        } else {
            trace!("Cleared selection of {} items", self.ids.len());
            self.ids.clear();
            self.index.clear();
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
