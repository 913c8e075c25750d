//! The ordered set of currently-selected element ids.

use serde::{Deserialize, Serialize};

use crate::ElementId;

/// Ordered, duplicate-free set of selected element ids.
///
/// The store keeps it consistent with the element list: restoring a history
/// entry filters the selection through [`Selection::retain`], and deletion
/// empties it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: Vec<ElementId>,
}

impl Selection {
    /// Create an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from ids, dropping duplicates but keeping order.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = ElementId>) -> Self {
        let mut selection = Self::new();
        for id in ids {
            if !selection.contains(id) {
                selection.ids.push(id);
            }
        }
        selection
    }

    /// Select an element.
    ///
    /// Non-additive selection replaces the set with `{id}`; additive selection
    /// toggles `id` in or out of the current set.
    pub fn select(&mut self, id: ElementId, additive: bool) {
        if !additive {
            self.ids.clear();
            self.ids.push(id);
        } else if let Some(pos) = self.ids.iter().position(|&s| s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id);
        }
    }

    /// Empty the set.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Keep only the ids for which `keep` returns true.
    ///
    /// Returns true if anything was removed.
    pub fn retain(&mut self, mut keep: impl FnMut(ElementId) -> bool) -> bool {
        let before = self.ids.len();
        self.ids.retain(|&id| keep(id));
        self.ids.len() != before
    }

    /// Check membership.
    #[must_use]
    pub fn contains(&self, id: ElementId) -> bool {
        self.ids.contains(&id)
    }

    /// Selected ids in selection order.
    #[must_use]
    pub fn ids(&self) -> &[ElementId] {
        &self.ids
    }

    /// Number of selected ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_additive_replaces() {
        let (a, b) = (ElementId::new(), ElementId::new());
        let mut sel = Selection::new();
        sel.select(a, false);
        sel.select(b, false);
        assert_eq!(sel.ids(), &[b]);
    }

    #[test]
    fn test_additive_toggles() {
        let (a, b) = (ElementId::new(), ElementId::new());
        let mut sel = Selection::new();
        sel.select(a, true);
        sel.select(b, true);
        assert_eq!(sel.ids(), &[a, b]);
        sel.select(a, true);
        assert_eq!(sel.ids(), &[b]);
    }

    #[test]
    fn test_reselect_same_id_is_stable() {
        let a = ElementId::new();
        let mut sel = Selection::new();
        sel.select(a, false);
        sel.select(a, false);
        assert_eq!(sel.len(), 1);
    }

    #[test]
    fn test_retain_reports_removal() {
        let (a, b) = (ElementId::new(), ElementId::new());
        let mut sel = Selection::from_ids([a, b, a]);
        assert_eq!(sel.len(), 2);
        assert!(!sel.retain(|_| true));
        assert!(sel.retain(|id| id != a));
        assert_eq!(sel.ids(), &[b]);
    }
}
