//! # Editor State Container
//!
//! `Editor` owns every state slice of one open page-builder document and
//! exposes the fixed operation surface the canvas, property editor and
//! shortcut dispatcher drive.
//!
//! ## Mutation Pipeline
//!
//! ```text
//! snapshot (tree + selection) → validate + mutate → record snapshot → verify
//! ```
//!
//! A rejected operation returns `Err` with the state untouched and nothing
//! recorded in history.

use crate::clipboard::{Clipboard, ClipboardOperation};
use crate::component::{
    ComponentId, ComponentInstance, ComponentPatch, NewComponent, Position,
};
use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::id_generator::{get_document_seed, IdGenerator};
use crate::pages::{PageId, WorkflowPages};
use crate::panels::{Preferences, PropertiesPanel};
use crate::preview::Preview;
use crate::selection::Selection;
use crate::tree::{ComponentTree, Subtree, TreeError};
use crate::undo_stack::UndoStack;
use crate::viewport::{Grid, Viewport};
use chrono::Utc;
use tracing::{debug, error, instrument, warn};

/// The history-tracked slices
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub tree: ComponentTree,
    pub selection: Selection,
}

/// What the property editor should show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyTarget<'a> {
    None,
    Single(&'a ComponentInstance),
    /// More than one live component selected
    Multiple(usize),
}

#[derive(Debug)]
pub struct Editor {
    name: String,
    config: EditorConfig,
    ids: IdGenerator,

    pub(crate) tree: ComponentTree,
    pub(crate) selection: Selection,
    clipboard: Clipboard,
    pub(crate) history: UndoStack<Snapshot>,

    pub(crate) viewport: Viewport,
    pub(crate) grid: Grid,
    pub(crate) preview: Preview,
    pub(crate) pages: WorkflowPages,
    pub(crate) panel: PropertiesPanel,
    pub(crate) preferences: Preferences,
}

impl Editor {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_config(name, EditorConfig::default())
    }

    pub fn with_config(name: impl Into<String>, config: EditorConfig) -> Self {
        let name = name.into();
        let seed = config
            .id_seed
            .clone()
            .unwrap_or_else(|| get_document_seed(&name));

        Self {
            ids: IdGenerator::from_seed(seed),
            history: UndoStack::with_max_levels(config.history_limit),
            name,
            config,
            tree: ComponentTree::new(),
            selection: Selection::new(),
            clipboard: Clipboard::new(),
            viewport: Viewport::default(),
            grid: Grid::default(),
            preview: Preview::default(),
            pages: WorkflowPages::default(),
            panel: PropertiesPanel::default(),
            preferences: Preferences::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn history(&self) -> &UndoStack<Snapshot> {
        &self.history
    }

    pub fn component(&self, id: &ComponentId) -> Option<&ComponentInstance> {
        self.tree.get(id)
    }

    /// Deep copy of the history-tracked slices
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tree: self.tree.clone(),
            selection: self.selection.clone(),
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.tree = snapshot.tree;
        self.selection = snapshot.selection;
    }

    /// Run a structural mutation as one undoable step.
    fn commit<T>(
        &mut self,
        description: &str,
        mutate: impl FnOnce(&mut Self) -> Result<T, EditorError>,
    ) -> Result<T, EditorError> {
        let before = self.snapshot();

        match mutate(self) {
            Ok(out) => {
                self.history.record(before, description);
                self.check_invariants(description);
                Ok(out)
            }
            Err(e) => {
                // Multi-step mutations can fail midway; callers never see
                // the partial write.
                self.restore(before);
                Self::report_rejection(description, &e);
                Err(e)
            }
        }
    }

    fn report_rejection(action: &str, e: &EditorError) {
        if e.is_recoverable() {
            warn!(action, error = %e, "Operation rejected; state unchanged");
        } else {
            error!(action, error = %e, "Operation failed");
        }
    }

    fn check_invariants(&self, action: &str) {
        if cfg!(debug_assertions) {
            if let Err(e) = self.tree.verify() {
                error!(action, error = %e, "Tree invariant violated");
            }
        }
    }

    /// Verify every structural invariant of the component tree.
    pub fn verify(&self) -> Result<(), EditorError> {
        self.tree.verify().map_err(EditorError::from)
    }

    fn fresh_id(&mut self) -> ComponentId {
        loop {
            let id = ComponentId::from(self.ids.new_id());
            if !self.tree.contains(&id) {
                return id;
            }
        }
    }

    fn fresh_ids(&mut self, count: usize) -> Vec<ComponentId> {
        (0..count).map(|_| self.fresh_id()).collect()
    }

    /// Let the id generator skip past every component and page id in use.
    pub(crate) fn observe_ids(&mut self) {
        for id in self.tree.all_ids() {
            self.ids.observe(id.as_str());
        }
        for page in self.pages.pages() {
            self.ids.observe(page.id.as_str());
        }
    }

    // ---------------------------------------------------------------------
    // Component tree
    // ---------------------------------------------------------------------

    /// Create a component under `parent_id` (or as a root) and make it the
    /// sole selection.
    #[instrument(level = "debug", skip(self, data), fields(component_type = %data.component_type))]
    pub fn add_component(
        &mut self,
        data: NewComponent,
        parent_id: Option<&ComponentId>,
    ) -> Result<ComponentId, EditorError> {
        if let Some(parent) = parent_id {
            if !self.tree.contains(parent) {
                let e = EditorError::from(TreeError::ParentNotFound(parent.clone()));
                Self::report_rejection("Add component", &e);
                return Err(e);
            }
        }

        self.commit("Add component", |ed| {
            let id = ed.fresh_id();
            let component = ComponentInstance::from_new(id.clone(), data, Utc::now());
            ed.tree.insert(component, parent_id)?;
            ed.selection.select(Some(id.clone()));
            debug!(component_id = %id, parent_id = ?parent_id, "Component added");
            Ok(id)
        })
    }

    /// Shallow-merge `patch` into a component. Returns `Ok(false)` for an
    /// empty patch, which records no history.
    #[instrument(level = "debug", skip(self, patch))]
    pub fn update_component(
        &mut self,
        id: &ComponentId,
        patch: ComponentPatch,
    ) -> Result<bool, EditorError> {
        if !self.tree.contains(id) {
            let e = EditorError::from(TreeError::NotFound(id.clone()));
            Self::report_rejection("Update component", &e);
            return Err(e);
        }
        if patch.is_empty() {
            return Ok(false);
        }

        self.commit("Update component", |ed| {
            let changed = ed.tree.update(id, patch, Utc::now())?;
            debug!(component_id = %id, "Component updated");
            Ok(changed)
        })
    }

    /// Delete a component and its whole subtree. Returns the removed ids.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_component(&mut self, id: &ComponentId) -> Result<Vec<ComponentId>, EditorError> {
        self.commit("Delete component", |ed| {
            let removed = ed.tree.remove(id)?;
            ed.selection.forget(&removed);
            debug!(component_id = %id, removed = removed.len(), "Component deleted");
            Ok(removed)
        })
    }

    /// Delete every selected component as a single undo step. Returns the
    /// number of components removed, descendants included.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_selection(&mut self) -> Result<usize, EditorError> {
        let targets = self.selection.topmost_ids(&self.tree);
        if targets.is_empty() {
            let e = EditorError::EmptySelection;
            Self::report_rejection("Delete selection", &e);
            return Err(e);
        }

        self.commit("Delete selection", |ed| ed.remove_all(&targets))
    }

    fn remove_all(&mut self, targets: &[ComponentId]) -> Result<usize, EditorError> {
        let mut removed = Vec::new();
        for target in targets {
            removed.extend(self.tree.remove(target)?);
        }
        self.selection.forget(&removed);
        debug!(removed = removed.len(), "Components deleted");
        Ok(removed.len())
    }

    /// Reparent a component, appending it to the new parent's children (or
    /// the root list), and overwrite its position.
    pub fn move_component(
        &mut self,
        id: &ComponentId,
        new_parent_id: Option<&ComponentId>,
        position: Position,
    ) -> Result<(), EditorError> {
        self.move_component_at(id, new_parent_id, position, None)
    }

    /// Like [`move_component`](Self::move_component) but inserts at `index`
    /// among the new siblings.
    #[instrument(level = "debug", skip(self))]
    pub fn move_component_at(
        &mut self,
        id: &ComponentId,
        new_parent_id: Option<&ComponentId>,
        position: Position,
        index: Option<usize>,
    ) -> Result<(), EditorError> {
        self.commit("Move component", |ed| {
            ed.tree
                .move_to(id, new_parent_id, position, index, Utc::now())?;
            debug!(component_id = %id, parent_id = ?new_parent_id, "Component moved");
            Ok(())
        })
    }

    /// Deep-clone a component and its subtree next to the original. The
    /// top-level clone is renamed with a " (Copy)" suffix, offset, and
    /// selected.
    #[instrument(level = "debug", skip(self))]
    pub fn duplicate_component(&mut self, id: &ComponentId) -> Result<ComponentId, EditorError> {
        self.commit("Duplicate component", |ed| {
            let copy_id = ed.duplicate_subtree(id)?;
            ed.selection.select(Some(copy_id.clone()));
            Ok(copy_id)
        })
    }

    /// Duplicate every selected subtree as one undo step and select the
    /// copies.
    #[instrument(level = "debug", skip(self))]
    pub fn duplicate_selection(&mut self) -> Result<Vec<ComponentId>, EditorError> {
        let targets = self.selection.topmost_ids(&self.tree);
        if targets.is_empty() {
            let e = EditorError::EmptySelection;
            Self::report_rejection("Duplicate selection", &e);
            return Err(e);
        }

        self.commit("Duplicate selection", |ed| {
            let copies = targets
                .iter()
                .map(|target| ed.duplicate_subtree(target))
                .collect::<Result<Vec<_>, _>>()?;
            ed.selection.select_many(copies.clone());
            Ok(copies)
        })
    }

    fn duplicate_subtree(&mut self, id: &ComponentId) -> Result<ComponentId, EditorError> {
        let offset = self.config.duplicate_offset;
        let subtree = self.tree.extract_subtree(id)?;
        let parent = subtree.root().and_then(|root| root.parent_id.clone());
        let new_ids = self.fresh_ids(subtree.len());

        let copy_id = self
            .tree
            .graft(&subtree, parent.as_ref(), &new_ids, Utc::now(), |root| {
                root.name.push_str(" (Copy)");
                root.position = root.position.offset(offset.x, offset.y);
            })?;

        debug!(component_id = %id, copy_id = %copy_id, size = subtree.len(), "Component duplicated");
        Ok(copy_id)
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    /// Replace the selection with `id` (clear for `None`), or toggle `id`
    /// when `additive` is set.
    pub fn select_component(&mut self, id: Option<ComponentId>, additive: bool) {
        match (id, additive) {
            (Some(id), true) => self.selection.toggle(id),
            (None, true) => {}
            (id, false) => self.selection.select(id),
        }
    }

    pub fn select_multiple(&mut self, ids: Vec<ComponentId>) {
        self.selection.select_many(ids);
    }

    /// Select every root component
    pub fn select_all(&mut self) {
        self.selection.select_many(self.tree.root_ids().to_vec());
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn set_hovered_component(&mut self, id: Option<ComponentId>) {
        self.selection.set_hovered(id);
    }

    pub fn set_focused_component(&mut self, id: Option<ComponentId>) {
        self.selection.set_focused(id);
    }

    /// Selected components that still exist, in selection order
    pub fn selected_components(&self) -> Vec<&ComponentInstance> {
        self.selection
            .live_ids(&self.tree)
            .filter_map(|id| self.tree.get(id))
            .collect()
    }

    pub fn property_target(&self) -> PropertyTarget<'_> {
        let selected = self.selected_components();
        match selected.as_slice() {
            [] => PropertyTarget::None,
            &[only] => PropertyTarget::Single(only),
            many => PropertyTarget::Multiple(many.len()),
        }
    }

    // ---------------------------------------------------------------------
    // Clipboard
    // ---------------------------------------------------------------------

    fn capture_selection(&self) -> Result<(Vec<ComponentId>, Vec<Subtree>), EditorError> {
        let targets = self.selection.topmost_ids(&self.tree);
        if targets.is_empty() {
            return Err(EditorError::EmptySelection);
        }

        let entries = targets
            .iter()
            .map(|id| self.tree.extract_subtree(id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((targets, entries))
    }

    /// Copy the selected subtrees. Tree and selection are untouched.
    /// Returns the number of top-level subtrees copied.
    #[instrument(level = "debug", skip(self))]
    pub fn copy(&mut self) -> Result<usize, EditorError> {
        let (_, entries) = self.capture_selection().map_err(|e| {
            Self::report_rejection("Copy", &e);
            e
        })?;

        let count = entries.len();
        self.clipboard.store(ClipboardOperation::Copy, entries);
        debug!(count, "Selection copied");
        Ok(count)
    }

    /// Copy the selected subtrees, then delete them as one undo step.
    #[instrument(level = "debug", skip(self))]
    pub fn cut(&mut self) -> Result<usize, EditorError> {
        let (targets, entries) = self.capture_selection().map_err(|e| {
            Self::report_rejection("Cut", &e);
            e
        })?;

        self.commit("Cut", |ed| ed.remove_all(&targets))?;

        let count = entries.len();
        self.clipboard.store(ClipboardOperation::Cut, entries);
        debug!(count, "Selection cut");
        Ok(count)
    }

    /// Insert fresh copies of the clipboard contents as root components and
    /// select them. A cut clipboard is emptied by its first paste.
    #[instrument(level = "debug", skip(self))]
    pub fn paste(&mut self) -> Result<Vec<ComponentId>, EditorError> {
        let Some(operation) = self.clipboard.operation().filter(|_| self.clipboard.has_content())
        else {
            let e = EditorError::EmptyClipboard;
            Self::report_rejection("Paste", &e);
            return Err(e);
        };

        let offset = match operation {
            ClipboardOperation::Copy => {
                let n = f64::from(self.clipboard.paste_count() + 1);
                Position::new(self.config.paste_offset.x * n, self.config.paste_offset.y * n)
            }
            ClipboardOperation::Cut => Position::default(),
        };
        let entries = self.clipboard.entries().to_vec();

        let pasted = self.commit("Paste", |ed| {
            let now = Utc::now();
            let mut pasted = Vec::with_capacity(entries.len());
            for entry in &entries {
                let new_ids = ed.fresh_ids(entry.len());
                let id = ed.tree.graft(entry, None, &new_ids, now, |root| {
                    root.position = root.position.offset(offset.x, offset.y);
                })?;
                pasted.push(id);
            }
            ed.selection.select_many(pasted.clone());
            Ok(pasted)
        })?;

        self.clipboard.consume();
        debug!(count = pasted.len(), ?operation, "Clipboard pasted");
        Ok(pasted)
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    /// Returns `false` if there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(previous) => {
                self.restore(previous);
                self.check_invariants("Undo");
                debug!(undo_levels = self.history.undo_levels(), "Undo");
                true
            }
            None => false,
        }
    }

    /// Returns `false` if there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(next) => {
                self.restore(next);
                self.check_invariants("Redo");
                debug!(redo_levels = self.history.redo_levels(), "Redo");
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Group following mutations into one undo step until `end_batch`.
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch();
        self.history.set_batch_description(description);
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    // ---------------------------------------------------------------------
    // Auxiliary slices
    // ---------------------------------------------------------------------

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.viewport.set_zoom(zoom);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in(self.config.zoom_step);
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out(self.config.zoom_step);
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.viewport.set_pan(x, y);
    }

    pub fn reset_viewport(&mut self) {
        self.viewport.reset();
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn preview_mut(&mut self) -> &mut Preview {
        &mut self.preview
    }

    pub fn panel(&self) -> &PropertiesPanel {
        &self.panel
    }

    pub fn panel_mut(&mut self) -> &mut PropertiesPanel {
        &mut self.panel
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn preferences_mut(&mut self) -> &mut Preferences {
        &mut self.preferences
    }

    pub fn pages(&self) -> &WorkflowPages {
        &self.pages
    }

    pub fn add_page(&mut self, name: impl Into<String>, path: impl Into<String>) -> PageId {
        let id = loop {
            let candidate = PageId::from(self.ids.new_id());
            if !self.pages.contains(&candidate) {
                break candidate;
            }
        };
        self.pages.add(id.clone(), name, path);
        debug!(page_id = %id, "Page added");
        id
    }

    pub fn rename_page(&mut self, id: &PageId, name: impl Into<String>) -> Result<(), EditorError> {
        self.pages.rename(id, name)
    }

    pub fn delete_page(&mut self, id: &PageId) -> Result<(), EditorError> {
        self.pages.delete(id)?;
        debug!(page_id = %id, current = %self.pages.current_page_id(), "Page deleted");
        Ok(())
    }

    pub fn set_current_page(&mut self, id: &PageId) -> Result<(), EditorError> {
        self.pages.set_current(id)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
