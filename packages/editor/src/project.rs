//! # Project Persistence
//!
//! A `ProjectDocument` is the saved form of an editor: the canvas (component
//! tree, viewport, grid) plus pages, preview settings and preferences.
//! Selection, clipboard and history are session state and never saved.
//!
//! `ProjectPatch` carries any subset of those slices. Loading a patch either
//! replaces every present slice or, if any of them fails validation, nothing.

use crate::component::ComponentId;
use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::pages::WorkflowPages;
use crate::panels::Preferences;
use crate::preview::Preview;
use crate::tree::ComponentTree;
use crate::viewport::{Grid, Viewport};
use crate::Editor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasDocument {
    #[serde(default)]
    pub components: ComponentTree,
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub grid: Grid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    pub name: String,
    #[serde(default)]
    pub canvas: CanvasDocument,
    #[serde(default)]
    pub pages: WorkflowPages,
    #[serde(default)]
    pub preview: Preview,
    #[serde(default)]
    pub preferences: Preferences,
}

impl ProjectDocument {
    /// An empty project with a single home page
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            canvas: CanvasDocument::default(),
            pages: WorkflowPages::default(),
            preview: Preview::default(),
            preferences: Preferences::default(),
        }
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        self.canvas
            .components
            .verify()
            .map_err(|e| EditorError::InvalidDocument(e.to_string()))?;
        self.pages.validate()
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, EditorError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    #[instrument(level = "debug", skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save_to_path(&self, path: impl AsRef<Path>, pretty: bool) -> Result<(), EditorError> {
        let json = self.to_json(pretty)?;
        fs::write(path.as_ref(), json)?;
        info!(
            name = %self.name,
            components = self.canvas.components.len(),
            "Project saved"
        );
        Ok(())
    }

    #[instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let json = fs::read_to_string(path.as_ref())?;
        let document = Self::from_json(&json)?;
        debug!(name = %document.name, "Project read");
        Ok(document)
    }
}

/// Slices to replace on load. Absent slices keep their current value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<Grid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<WorkflowPages>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview: Option<Preview>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
}

impl ProjectPatch {
    pub fn components(tree: ComponentTree) -> Self {
        Self {
            components: Some(tree),
            ..Default::default()
        }
    }

    fn validate(&self) -> Result<(), EditorError> {
        if let Some(tree) = &self.components {
            tree.verify()
                .map_err(|e| EditorError::InvalidDocument(e.to_string()))?;
        }
        if let Some(pages) = &self.pages {
            pages.validate()?;
        }
        Ok(())
    }
}

impl From<ProjectDocument> for ProjectPatch {
    fn from(document: ProjectDocument) -> Self {
        Self {
            components: Some(document.canvas.components),
            viewport: Some(document.canvas.viewport),
            grid: Some(document.canvas.grid),
            pages: Some(document.pages),
            preview: Some(document.preview),
            preferences: Some(document.preferences),
        }
    }
}

impl Editor {
    /// Open a saved project. The editor takes the document's name.
    pub fn from_document(document: ProjectDocument, config: EditorConfig) -> Result<Self, EditorError> {
        let mut editor = Editor::with_config(document.name.clone(), config);
        editor.load_project(ProjectPatch::from(document))?;
        Ok(editor)
    }

    /// Snapshot of every persisted slice
    pub fn project_document(&self) -> ProjectDocument {
        ProjectDocument {
            name: self.name().to_string(),
            canvas: CanvasDocument {
                components: self.tree.clone(),
                viewport: self.viewport,
                grid: self.grid,
            },
            pages: self.pages.clone(),
            preview: self.preview,
            preferences: self.preferences,
        }
    }

    /// Replace the slices present in `patch`.
    ///
    /// The whole patch is validated first; on failure nothing changes.
    /// Selection, hover and focus are pruned to live ids and history is
    /// cleared, so a load cannot be undone.
    #[instrument(level = "debug", skip(self, patch))]
    pub fn load_project(&mut self, patch: ProjectPatch) -> Result<(), EditorError> {
        patch.validate()?;

        let ProjectPatch {
            components,
            viewport,
            grid,
            pages,
            preview,
            preferences,
        } = patch;

        if let Some(tree) = components {
            self.tree = tree.normalized();
            self.selection.prune(&self.tree);
        }
        if let Some(viewport) = viewport {
            self.viewport = viewport.normalized();
        }
        if let Some(grid) = grid {
            self.grid = grid.normalized();
        }
        if let Some(pages) = pages {
            self.pages = pages;
        }
        if let Some(preview) = preview {
            self.preview = preview;
        }
        if let Some(preferences) = preferences {
            self.preferences = preferences.normalized();
        }

        self.history.clear();
        self.observe_ids();

        info!(
            components = self.tree.len(),
            pages = self.pages.len(),
            "Project loaded"
        );
        Ok(())
    }

    /// Root ids followed by their descendants, with depth, for outlines
    pub fn outline(&self) -> Vec<(usize, &ComponentId)> {
        let mut out = Vec::with_capacity(self.tree.len());
        for root in self.tree.root_ids() {
            for id in self.tree.subtree_ids(root) {
                if let (Some(depth), Some(component)) = (self.tree.depth(&id), self.tree.get(&id)) {
                    out.push((depth, &component.id));
                }
            }
        }
        out
    }
}
