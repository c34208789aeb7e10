//! # Component Tree Store
//!
//! Normalized arena of component instances.
//!
//! ## Structure
//!
//! ```text
//! byId    : id → ComponentInstance   (the arena)
//! allIds  : every id, insertion order
//! rootIds : ids with parentId = None, page order
//! ```
//!
//! Parent/child links are stored twice (`parentId` on the child, `childIds`
//! on the parent) and every write keeps both sides in step.
//!
//! ## Semantics
//!
//! ### Insert
//! - Appends to the parent's `childIds`, or to `rootIds` for a root
//! - Fails if the parent does not exist
//!
//! ### Remove
//! - Removes the node and all descendants
//! - Detaches the node from its parent (or the root list)
//!
//! ### Move
//! - Detach + reattach + position overwrite
//! - Fails if the target parent is missing
//! - Fails if it would create a cycle
//!
//! Every operation validates before writing: an `Err` leaves the store
//! untouched.

use crate::component::{ComponentId, ComponentInstance, ComponentPatch, Position};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TreeError {
    #[error("Component not found: {0}")]
    NotFound(ComponentId),

    #[error("Parent not found: {0}")]
    ParentNotFound(ComponentId),

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Tree invariant violated: {0}")]
    InvariantViolation(String),
}

/// Normalized component store
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentTree {
    by_id: HashMap<ComponentId, ComponentInstance>,
    all_ids: Vec<ComponentId>,
    root_ids: Vec<ComponentId>,
}

/// Detached deep copy of a component and its descendants.
///
/// Components are kept in preorder with the subtree root first. Ids are the
/// ones the components had when captured; they are remapped on every graft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtree {
    components: Vec<ComponentInstance>,
}

impl Subtree {
    /// The captured top-level component, `None` for an empty subtree
    pub fn root(&self) -> Option<&ComponentInstance> {
        self.components.first()
    }

    pub fn components(&self) -> &[ComponentInstance] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ComponentTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &ComponentId) -> Option<&ComponentInstance> {
        self.by_id.get(id)
    }

    pub fn contains(&self, id: &ComponentId) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn by_id(&self) -> &HashMap<ComponentId, ComponentInstance> {
        &self.by_id
    }

    pub fn all_ids(&self) -> &[ComponentId] {
        &self.all_ids
    }

    pub fn root_ids(&self) -> &[ComponentId] {
        &self.root_ids
    }

    /// Components in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &ComponentInstance> {
        self.all_ids.iter().filter_map(|id| self.by_id.get(id))
    }

    pub fn roots(&self) -> impl Iterator<Item = &ComponentInstance> {
        self.root_ids.iter().filter_map(|id| self.by_id.get(id))
    }

    /// Direct children of `id`, in order. Empty for unknown ids.
    pub fn children(&self, id: &ComponentId) -> Vec<&ComponentInstance> {
        self.by_id
            .get(id)
            .map(|c| {
                c.child_ids
                    .iter()
                    .filter_map(|child| self.by_id.get(child))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Parent chain of `id`, nearest first.
    pub fn ancestors(&self, id: &ComponentId) -> Vec<ComponentId> {
        let mut chain = Vec::new();
        let mut current = self.by_id.get(id).and_then(|c| c.parent_id.clone());

        while let Some(parent) = current {
            // A corrupt store could loop forever; never walk more steps than nodes.
            if chain.len() > self.by_id.len() {
                break;
            }
            current = self.by_id.get(&parent).and_then(|c| c.parent_id.clone());
            chain.push(parent);
        }

        chain
    }

    /// True if `ancestor` is a strict ancestor of `id`.
    pub fn is_ancestor(&self, ancestor: &ComponentId, id: &ComponentId) -> bool {
        self.ancestors(id).iter().any(|a| a == ancestor)
    }

    pub fn depth(&self, id: &ComponentId) -> Option<usize> {
        self.by_id.get(id).map(|_| self.ancestors(id).len())
    }

    /// All descendants of `id` in preorder, excluding `id` itself.
    pub fn descendants(&self, id: &ComponentId) -> Vec<ComponentId> {
        let mut ids = self.subtree_ids(id);
        if !ids.is_empty() {
            ids.remove(0);
        }
        ids
    }

    /// `id` followed by its descendants in preorder. Empty for unknown ids.
    pub fn subtree_ids(&self, id: &ComponentId) -> Vec<ComponentId> {
        let mut out = Vec::new();
        if !self.by_id.contains_key(id) {
            return out;
        }

        let mut seen = HashSet::new();
        let mut stack = vec![id.clone()];
        while let Some(next) = stack.pop() {
            if !seen.insert(next.clone()) {
                continue;
            }
            if let Some(component) = self.by_id.get(&next) {
                stack.extend(component.child_ids.iter().rev().cloned());
                out.push(next);
            }
        }

        out
    }

    /// Insert a detached component under `parent` (or as a root).
    pub fn insert(
        &mut self,
        mut component: ComponentInstance,
        parent: Option<&ComponentId>,
    ) -> Result<(), TreeError> {
        if self.by_id.contains_key(&component.id) {
            return Err(TreeError::InvariantViolation(format!(
                "duplicate component id {}",
                component.id
            )));
        }
        if let Some(parent_id) = parent {
            if !self.by_id.contains_key(parent_id) {
                return Err(TreeError::ParentNotFound(parent_id.clone()));
            }
        }

        let id = component.id.clone();
        component.parent_id = parent.cloned();
        component.child_ids.clear();

        self.attach(&id, parent, None);
        self.all_ids.push(id.clone());
        self.by_id.insert(id, component);
        Ok(())
    }

    /// Shallow-merge `patch` into the component. Returns whether anything
    /// was applied.
    pub fn update(
        &mut self,
        id: &ComponentId,
        patch: ComponentPatch,
        now: DateTime<Utc>,
    ) -> Result<bool, TreeError> {
        let component = self
            .by_id
            .get_mut(id)
            .ok_or_else(|| TreeError::NotFound(id.clone()))?;
        Ok(component.apply_patch(patch, now))
    }

    /// Remove `id` and its whole subtree. Returns the removed ids in preorder.
    pub fn remove(&mut self, id: &ComponentId) -> Result<Vec<ComponentId>, TreeError> {
        let parent = self
            .by_id
            .get(id)
            .ok_or_else(|| TreeError::NotFound(id.clone()))?
            .parent_id
            .clone();

        let removed = self.subtree_ids(id);
        self.detach(id, parent.as_ref());

        let removed_set: HashSet<&ComponentId> = removed.iter().collect();
        for gone in &removed {
            self.by_id.remove(gone);
        }
        self.all_ids.retain(|existing| !removed_set.contains(existing));
        self.root_ids.retain(|existing| !removed_set.contains(existing));

        Ok(removed)
    }

    /// Reparent `id` under `new_parent` (or to the root list) at `index`
    /// (appended when `None`, clamped when out of range).
    pub fn move_to(
        &mut self,
        id: &ComponentId,
        new_parent: Option<&ComponentId>,
        position: Position,
        index: Option<usize>,
        now: DateTime<Utc>,
    ) -> Result<(), TreeError> {
        let old_parent = self
            .by_id
            .get(id)
            .ok_or_else(|| TreeError::NotFound(id.clone()))?
            .parent_id
            .clone();

        if let Some(parent_id) = new_parent {
            if !self.by_id.contains_key(parent_id) {
                return Err(TreeError::ParentNotFound(parent_id.clone()));
            }
            if parent_id == id || self.is_ancestor(id, parent_id) {
                return Err(TreeError::CycleDetected);
            }
        }

        self.detach(id, old_parent.as_ref());
        self.attach(id, new_parent, index);

        if let Some(component) = self.by_id.get_mut(id) {
            component.parent_id = new_parent.cloned();
            component.position = position;
            component.updated_at = now;
        }

        Ok(())
    }

    /// Deep copy of `id` and its descendants.
    pub fn extract_subtree(&self, id: &ComponentId) -> Result<Subtree, TreeError> {
        if !self.by_id.contains_key(id) {
            return Err(TreeError::NotFound(id.clone()));
        }

        let components = self
            .subtree_ids(id)
            .iter()
            .filter_map(|member| self.by_id.get(member).cloned())
            .collect();

        Ok(Subtree { components })
    }

    /// Insert a fresh copy of `subtree` under `parent` (or as a root).
    ///
    /// `new_ids` supplies one unused id per subtree member, in the subtree's
    /// preorder. Internal parent/child links are remapped onto the new ids and
    /// `adjust_root` may patch the top-level clone before insertion. Returns
    /// the id of the new top-level component.
    pub fn graft(
        &mut self,
        subtree: &Subtree,
        parent: Option<&ComponentId>,
        new_ids: &[ComponentId],
        now: DateTime<Utc>,
        adjust_root: impl FnOnce(&mut ComponentInstance),
    ) -> Result<ComponentId, TreeError> {
        if subtree.is_empty() {
            return Err(TreeError::InvariantViolation("empty subtree".to_string()));
        }
        if new_ids.len() != subtree.len() {
            return Err(TreeError::InvariantViolation(format!(
                "expected {} ids for subtree, got {}",
                subtree.len(),
                new_ids.len()
            )));
        }
        if let Some(parent_id) = parent {
            if !self.by_id.contains_key(parent_id) {
                return Err(TreeError::ParentNotFound(parent_id.clone()));
            }
        }
        if let Some(taken) = new_ids.iter().find(|id| self.by_id.contains_key(*id)) {
            return Err(TreeError::InvariantViolation(format!(
                "duplicate component id {}",
                taken
            )));
        }

        let remap: HashMap<&ComponentId, &ComponentId> = subtree
            .components
            .iter()
            .map(|c| &c.id)
            .zip(new_ids.iter())
            .collect();

        let mut clones: Vec<ComponentInstance> = subtree
            .components
            .iter()
            .zip(new_ids.iter())
            .map(|(original, new_id)| {
                let mut clone = original.clone();
                clone.id = new_id.clone();
                clone.parent_id = original
                    .parent_id
                    .as_ref()
                    .and_then(|p| remap.get(p))
                    .map(|p| (*p).clone());
                clone.child_ids = original
                    .child_ids
                    .iter()
                    .filter_map(|child| remap.get(child).map(|c| (*c).clone()))
                    .collect();
                clone.created_at = now;
                clone.updated_at = now;
                clone
            })
            .collect();

        let root_id = clones[0].id.clone();
        clones[0].parent_id = parent.cloned();
        adjust_root(&mut clones[0]);

        self.attach(&root_id, parent, None);
        for clone in clones {
            self.all_ids.push(clone.id.clone());
            self.by_id.insert(clone.id.clone(), clone);
        }

        Ok(root_id)
    }

    /// Clamp loaded sizes the same way writes do.
    pub(crate) fn normalized(mut self) -> Self {
        for component in self.by_id.values_mut() {
            component.size = component.size.clamped();
        }
        self
    }

    /// Check every structural invariant, reporting the first violation.
    pub fn verify(&self) -> Result<(), TreeError> {
        let violation = |msg: String| Err(TreeError::InvariantViolation(msg));

        if self.all_ids.len() != self.by_id.len() {
            return violation(format!(
                "allIds has {} entries but store has {}",
                self.all_ids.len(),
                self.by_id.len()
            ));
        }
        let mut listed = HashSet::new();
        for id in &self.all_ids {
            if !self.by_id.contains_key(id) || !listed.insert(id) {
                return violation(format!("allIds entry {} is dangling or repeated", id));
            }
        }

        for (id, component) in &self.by_id {
            if &component.id != id {
                return violation(format!("component stored under {} has id {}", id, component.id));
            }

            let mut seen_children = HashSet::new();
            for child_id in &component.child_ids {
                if !seen_children.insert(child_id) {
                    return violation(format!("{} lists child {} twice", id, child_id));
                }
                match self.by_id.get(child_id) {
                    None => return violation(format!("{} has dangling child {}", id, child_id)),
                    Some(child) if child.parent_id.as_ref() != Some(id) => {
                        return violation(format!(
                            "child {} of {} points at parent {:?}",
                            child_id, id, child.parent_id
                        ))
                    }
                    Some(_) => {}
                }
            }

            let root_entries = self.root_ids.iter().filter(|r| *r == id).count();
            match &component.parent_id {
                None if root_entries != 1 => {
                    return violation(format!(
                        "root {} appears {} times in rootIds",
                        id, root_entries
                    ))
                }
                Some(parent_id) => {
                    if root_entries != 0 {
                        return violation(format!("child {} also listed in rootIds", id));
                    }
                    let listed_by_parent = self
                        .by_id
                        .get(parent_id)
                        .map(|p| p.child_ids.contains(id))
                        .unwrap_or(false);
                    if !listed_by_parent {
                        return violation(format!(
                            "{} claims parent {} which does not list it",
                            id, parent_id
                        ));
                    }
                }
                None => {}
            }
        }

        for root in &self.root_ids {
            if !self.by_id.contains_key(root) {
                return violation(format!("rootIds entry {} is dangling", root));
            }
        }

        // With both link directions consistent, anything unreachable from the
        // roots sits on a cycle.
        let reachable: usize = self
            .root_ids
            .iter()
            .map(|root| self.subtree_ids(root).len())
            .sum();
        if reachable != self.by_id.len() {
            return violation(format!(
                "{} components unreachable from roots (cycle)",
                self.by_id.len() - reachable
            ));
        }

        Ok(())
    }

    fn attach(&mut self, id: &ComponentId, parent: Option<&ComponentId>, index: Option<usize>) {
        let siblings = match parent {
            Some(parent_id) => match self.by_id.get_mut(parent_id) {
                Some(p) => &mut p.child_ids,
                None => return,
            },
            None => &mut self.root_ids,
        };

        match index {
            Some(i) => siblings.insert(i.min(siblings.len()), id.clone()),
            None => siblings.push(id.clone()),
        }
    }

    fn detach(&mut self, id: &ComponentId, parent: Option<&ComponentId>) {
        match parent {
            Some(parent_id) => {
                if let Some(p) = self.by_id.get_mut(parent_id) {
                    p.child_ids.retain(|child| child != id);
                }
            }
            None => self.root_ids.retain(|root| root != id),
        }
    }
}
