//! Selection, hover and focus tracking.
//!
//! Ids held here are not validated against the store. Stale ids are tolerated
//! and filtered out by readers such as [`Selection::live_ids`].

use crate::component::ComponentId;
use crate::tree::ComponentTree;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    /// Selected ids in the order they were selected
    selected_ids: Vec<ComponentId>,
    hovered_id: Option<ComponentId>,
    focused_id: Option<ComponentId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_ids(&self) -> &[ComponentId] {
        &self.selected_ids
    }

    pub fn hovered_id(&self) -> Option<&ComponentId> {
        self.hovered_id.as_ref()
    }

    pub fn focused_id(&self) -> Option<&ComponentId> {
        self.focused_id.as_ref()
    }

    pub fn is_selected(&self, id: &ComponentId) -> bool {
        self.selected_ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected_ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected_ids.len()
    }

    /// Replace the selection with `id`, or clear it for `None`.
    pub fn select(&mut self, id: Option<ComponentId>) {
        self.selected_ids.clear();
        self.selected_ids.extend(id);
    }

    /// Toggle membership of `id` without disturbing the rest.
    pub fn toggle(&mut self, id: ComponentId) {
        if let Some(pos) = self.selected_ids.iter().position(|s| *s == id) {
            self.selected_ids.remove(pos);
        } else {
            self.selected_ids.push(id);
        }
    }

    /// Replace the selection wholesale, keeping the given order. Repeated ids
    /// keep their first occurrence.
    pub fn select_many(&mut self, ids: Vec<ComponentId>) {
        let mut seen = HashSet::new();
        self.selected_ids = ids.into_iter().filter(|id| seen.insert(id.clone())).collect();
    }

    pub fn clear(&mut self) {
        self.selected_ids.clear();
    }

    pub fn set_hovered(&mut self, id: Option<ComponentId>) {
        self.hovered_id = id;
    }

    pub fn set_focused(&mut self, id: Option<ComponentId>) {
        self.focused_id = id;
    }

    /// Forget every id in `removed`, including hover and focus.
    pub fn forget(&mut self, removed: &[ComponentId]) {
        let removed: HashSet<&ComponentId> = removed.iter().collect();
        self.selected_ids.retain(|id| !removed.contains(id));
        if self.hovered_id.as_ref().is_some_and(|id| removed.contains(id)) {
            self.hovered_id = None;
        }
        if self.focused_id.as_ref().is_some_and(|id| removed.contains(id)) {
            self.focused_id = None;
        }
    }

    /// Drop every id the tree no longer contains.
    pub fn prune(&mut self, tree: &ComponentTree) {
        self.selected_ids.retain(|id| tree.contains(id));
        if self.hovered_id.as_ref().is_some_and(|id| !tree.contains(id)) {
            self.hovered_id = None;
        }
        if self.focused_id.as_ref().is_some_and(|id| !tree.contains(id)) {
            self.focused_id = None;
        }
    }

    /// Selected ids that still exist, in selection order
    pub fn live_ids<'a>(&'a self, tree: &'a ComponentTree) -> impl Iterator<Item = &'a ComponentId> {
        self.selected_ids.iter().filter(move |id| tree.contains(id))
    }

    /// Live selected ids with any id whose ancestor is also selected removed.
    /// This is the set of subtree roots that covers the whole selection.
    pub fn topmost_ids(&self, tree: &ComponentTree) -> Vec<ComponentId> {
        let live: HashSet<&ComponentId> = self.live_ids(tree).collect();
        self.live_ids(tree)
            .filter(|id| !tree.ancestors(id).iter().any(|a| live.contains(a)))
            .cloned()
            .collect()
    }
}
