//! Positional reorder state - an ordered list of definitions.
//!
//! Position is the index in the list; there are no gaps. Lookups by id and
//! all mutations keep ids unique.

use tracing::{debug, info};

use crm_model::{Definition, DefinitionId};

use crate::error::{Result, StateError};

/// Ordered, id-unique list of one kind of definition.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedList<D> {
    items: Vec<D>,
}

impl<D> Default for OrderedList<D> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<D: Definition> OrderedList<D> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from seed data, keeping the first occurrence of each id.
    pub fn from_items(items: impl IntoIterator<Item = D>) -> Self {
        let mut list = Self::new();
        for item in items {
            if let Err(error) = list.add(item) {
                debug!(%error, "skipping duplicate seed entry");
            }
        }
        list
    }

    pub fn items(&self) -> &[D] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, D> {
        self.items.iter()
    }

    pub fn ids(&self) -> Vec<&DefinitionId> {
        self.items.iter().map(Definition::id).collect()
    }

    pub fn get(&self, id: &str) -> Option<&D> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Append a definition.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::DuplicateId`] if the id is already present; the
    /// list is left unchanged.
    pub fn add(&mut self, item: D) -> Result<()> {
        if self.contains(item.id().as_str()) {
            return Err(StateError::DuplicateId {
                kind: D::KIND,
                id: item.id().clone(),
            });
        }
        info!(kind = %D::KIND, id = %item.id(), "definition added");
        self.items.push(item);
        Ok(())
    }

    /// Merge `patch` into the definition with `id`. Returns false if absent.
    pub fn update(&mut self, id: &str, patch: D::Patch) -> bool {
        let Some(item) = self.items.iter_mut().find(|item| item.id() == id) else {
            debug!(kind = %D::KIND, id, "update ignored, unknown id");
            return false;
        };
        item.apply(patch);
        info!(kind = %D::KIND, id, "definition updated");
        true
    }

    /// Remove the definition with `id`; later entries shift up by one.
    pub fn remove(&mut self, id: &str) -> Option<D> {
        let Some(index) = self.position(id) else {
            debug!(kind = %D::KIND, id, "remove ignored, unknown id");
            return None;
        };
        info!(kind = %D::KIND, id, index, "definition removed");
        Some(self.items.remove(index))
    }

    /// Move the entry at `from` to `to`, shifting the entries in between.
    ///
    /// Returns false without mutating if either index is out of range or
    /// `from == to`.
    pub fn move_to(&mut self, from: usize, to: usize) -> bool {
        let len = self.items.len();
        if from >= len || to >= len {
            debug!(kind = %D::KIND, from, to, len, "move ignored, index out of range");
            return false;
        }
        if from == to {
            return false;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        info!(kind = %D::KIND, from, to, "definition moved");
        true
    }

    /// Keyboard "move up": swap with the previous entry.
    pub fn move_up(&mut self, index: usize) -> bool {
        match index.checked_sub(1) {
            Some(to) => self.move_to(index, to),
            None => false,
        }
    }

    /// Keyboard "move down": swap with the next entry.
    pub fn move_down(&mut self, index: usize) -> bool {
        self.move_to(index, index.saturating_add(1))
    }
}

impl<'a, D> IntoIterator for &'a OrderedList<D> {
    type Item = &'a D;
    type IntoIter = std::slice::Iter<'a, D>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_model::{LeadStage, LeadStagePatch};

    fn stage(id: &'static str, label: &str) -> LeadStage {
        LeadStage {
            id: DefinitionId::from_static(id),
            label: label.to_string(),
            color: "#64748b".to_string(),
            description: String::new(),
        }
    }

    fn stages() -> OrderedList<LeadStage> {
        OrderedList::from_items([
            stage("new", "New"),
            stage("contacted", "Contacted"),
            stage("qualified", "Qualified"),
            stage("converted", "Converted"),
        ])
    }

    fn labels(list: &OrderedList<LeadStage>) -> Vec<&str> {
        list.iter().map(|s| s.label.as_str()).collect()
    }

    #[test]
    fn move_to_shifts_intervening_entries() {
        let mut list = stages();
        assert!(list.move_to(3, 1));
        assert_eq!(labels(&list), vec!["New", "Converted", "Contacted", "Qualified"]);
        assert!(list.move_to(0, 3));
        assert_eq!(labels(&list), vec!["Converted", "Contacted", "Qualified", "New"]);
    }

    #[test]
    fn out_of_range_moves_are_rejected() {
        let mut list = stages();
        assert!(!list.move_to(4, 0));
        assert!(!list.move_to(0, 4));
        assert!(!list.move_to(2, 2));
        assert_eq!(list, stages());
    }

    #[test]
    fn keyboard_moves_stop_at_edges() {
        let mut list = stages();
        assert!(!list.move_up(0));
        assert!(!list.move_down(3));
        assert!(list.move_down(0));
        assert_eq!(labels(&list), vec!["Contacted", "New", "Qualified", "Converted"]);
        assert!(list.move_up(1));
        assert_eq!(list, stages());
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let mut list = stages();
        let err = list.add(stage("new", "Fresh")).unwrap_err();
        assert!(matches!(err, StateError::DuplicateId { .. }));
        assert_eq!(list, stages());
    }

    #[test]
    fn update_and_remove_unknown_ids_are_no_ops() {
        let mut list = stages();
        let patch = LeadStagePatch {
            label: Some("Ghost".to_string()),
            ..Default::default()
        };
        assert!(!list.update("missing", patch));
        assert!(list.remove("missing").is_none());
        assert_eq!(list, stages());
    }

    #[test]
    fn remove_shifts_positions_down() {
        let mut list = stages();
        let removed = list.remove("contacted").unwrap();
        assert_eq!(removed.label, "Contacted");
        assert_eq!(list.position("qualified"), Some(1));
        assert_eq!(list.position("converted"), Some(2));
    }
}
