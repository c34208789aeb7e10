//! # Editor Commands
//!
//! Serializable form of every engine operation. Hosts that cannot call the
//! `Editor` API directly (scripts, the CLI, the shortcut dispatcher) describe
//! what they want as a `Command` and hand it to [`Editor::execute`].
//!
//! ```json
//! { "op": "addComponent", "component": { "type": "button", "name": "Buy" } }
//! { "op": "moveComponent", "id": "c-1", "newParentId": "c-4", "position": { "x": 0, "y": 0 } }
//! { "op": "undo" }
//! ```

use crate::component::{ComponentId, ComponentPatch, NewComponent, Position};
use crate::errors::EditorError;
use crate::pages::PageId;
use crate::preview::{Device, Orientation};
use crate::Editor;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    AddComponent {
        component: NewComponent,
        #[serde(default)]
        parent_id: Option<ComponentId>,
    },
    UpdateComponent {
        id: ComponentId,
        patch: ComponentPatch,
    },
    DeleteComponent {
        id: ComponentId,
    },
    DeleteSelection,
    MoveComponent {
        id: ComponentId,
        #[serde(default)]
        new_parent_id: Option<ComponentId>,
        position: Position,
        #[serde(default)]
        index: Option<usize>,
    },
    DuplicateComponent {
        id: ComponentId,
    },
    DuplicateSelection,

    SelectComponent {
        id: Option<ComponentId>,
        #[serde(default)]
        additive: bool,
    },
    SelectMultiple {
        ids: Vec<ComponentId>,
    },
    SelectAll,
    ClearSelection,
    SetHovered {
        id: Option<ComponentId>,
    },
    SetFocused {
        id: Option<ComponentId>,
    },

    Copy,
    Cut,
    Paste,

    Undo,
    Redo,
    ClearHistory,

    SetZoom {
        zoom: f64,
    },
    ZoomIn,
    ZoomOut,
    SetPan {
        x: f64,
        y: f64,
    },
    ResetViewport,
    SetGrid {
        #[serde(default)]
        enabled: Option<bool>,
        #[serde(default)]
        snap_to_grid: Option<bool>,
        #[serde(default)]
        size: Option<u32>,
    },
    SetPreview {
        #[serde(default)]
        enabled: Option<bool>,
        #[serde(default)]
        device: Option<Device>,
        #[serde(default)]
        orientation: Option<Orientation>,
    },

    AddPage {
        name: String,
        path: String,
    },
    RenamePage {
        id: PageId,
        name: String,
    },
    DeletePage {
        id: PageId,
    },
    SetCurrentPage {
        id: PageId,
    },
}

impl Command {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddComponent { .. } => "addComponent",
            Command::UpdateComponent { .. } => "updateComponent",
            Command::DeleteComponent { .. } => "deleteComponent",
            Command::DeleteSelection => "deleteSelection",
            Command::MoveComponent { .. } => "moveComponent",
            Command::DuplicateComponent { .. } => "duplicateComponent",
            Command::DuplicateSelection => "duplicateSelection",
            Command::SelectComponent { .. } => "selectComponent",
            Command::SelectMultiple { .. } => "selectMultiple",
            Command::SelectAll => "selectAll",
            Command::ClearSelection => "clearSelection",
            Command::SetHovered { .. } => "setHovered",
            Command::SetFocused { .. } => "setFocused",
            Command::Copy => "copy",
            Command::Cut => "cut",
            Command::Paste => "paste",
            Command::Undo => "undo",
            Command::Redo => "redo",
            Command::ClearHistory => "clearHistory",
            Command::SetZoom { .. } => "setZoom",
            Command::ZoomIn => "zoomIn",
            Command::ZoomOut => "zoomOut",
            Command::SetPan { .. } => "setPan",
            Command::ResetViewport => "resetViewport",
            Command::SetGrid { .. } => "setGrid",
            Command::SetPreview { .. } => "setPreview",
            Command::AddPage { .. } => "addPage",
            Command::RenamePage { .. } => "renamePage",
            Command::DeletePage { .. } => "deletePage",
            Command::SetCurrentPage { .. } => "setCurrentPage",
        }
    }
}

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", content = "value", rename_all = "camelCase")]
pub enum CommandOutcome {
    Created(ComponentId),
    CreatedMany(Vec<ComponentId>),
    CreatedPage(PageId),
    /// Number of components removed, descendants included
    Removed(usize),
    /// Number of subtrees placed on the clipboard
    Copied(usize),
    /// Whether the command had an effect (undo/redo, empty patches)
    Changed(bool),
    Done,
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::Created(id) => write!(f, "created {}", id),
            CommandOutcome::CreatedMany(ids) => {
                let ids: Vec<&str> = ids.iter().map(|id| id.as_str()).collect();
                write!(f, "created [{}]", ids.join(", "))
            }
            CommandOutcome::CreatedPage(id) => write!(f, "created page {}", id),
            CommandOutcome::Removed(n) => write!(f, "removed {}", n),
            CommandOutcome::Copied(n) => write!(f, "copied {}", n),
            CommandOutcome::Changed(true) => write!(f, "changed"),
            CommandOutcome::Changed(false) => write!(f, "unchanged"),
            CommandOutcome::Done => write!(f, "done"),
        }
    }
}

impl Editor {
    /// Dispatch a command to the matching operation.
    pub fn execute(&mut self, command: Command) -> Result<CommandOutcome, EditorError> {
        use CommandOutcome::*;

        let outcome = match command {
            Command::AddComponent {
                component,
                parent_id,
            } => Created(self.add_component(component, parent_id.as_ref())?),
            Command::UpdateComponent { id, patch } => Changed(self.update_component(&id, patch)?),
            Command::DeleteComponent { id } => Removed(self.delete_component(&id)?.len()),
            Command::DeleteSelection => Removed(self.delete_selection()?),
            Command::MoveComponent {
                id,
                new_parent_id,
                position,
                index,
            } => {
                self.move_component_at(&id, new_parent_id.as_ref(), position, index)?;
                Done
            }
            Command::DuplicateComponent { id } => Created(self.duplicate_component(&id)?),
            Command::DuplicateSelection => CreatedMany(self.duplicate_selection()?),

            Command::SelectComponent { id, additive } => {
                self.select_component(id, additive);
                Done
            }
            Command::SelectMultiple { ids } => {
                self.select_multiple(ids);
                Done
            }
            Command::SelectAll => {
                self.select_all();
                Done
            }
            Command::ClearSelection => {
                self.clear_selection();
                Done
            }
            Command::SetHovered { id } => {
                self.set_hovered_component(id);
                Done
            }
            Command::SetFocused { id } => {
                self.set_focused_component(id);
                Done
            }

            Command::Copy => Copied(self.copy()?),
            Command::Cut => Copied(self.cut()?),
            Command::Paste => CreatedMany(self.paste()?),

            Command::Undo => Changed(self.undo()),
            Command::Redo => Changed(self.redo()),
            Command::ClearHistory => {
                self.clear_history();
                Done
            }

            Command::SetZoom { zoom } => {
                self.set_zoom(zoom);
                Done
            }
            Command::ZoomIn => {
                self.zoom_in();
                Done
            }
            Command::ZoomOut => {
                self.zoom_out();
                Done
            }
            Command::SetPan { x, y } => {
                self.set_pan(x, y);
                Done
            }
            Command::ResetViewport => {
                self.reset_viewport();
                Done
            }
            Command::SetGrid {
                enabled,
                snap_to_grid,
                size,
            } => {
                let grid = self.grid_mut();
                if let Some(enabled) = enabled {
                    grid.enabled = enabled;
                }
                if let Some(snap) = snap_to_grid {
                    grid.snap_to_grid = snap;
                }
                if let Some(size) = size {
                    grid.set_size(size);
                }
                Done
            }
            Command::SetPreview {
                enabled,
                device,
                orientation,
            } => {
                let preview = self.preview_mut();
                if let Some(enabled) = enabled {
                    preview.is_preview_mode = enabled;
                }
                if let Some(device) = device {
                    preview.set_device(device);
                }
                if let Some(orientation) = orientation {
                    preview.set_orientation(orientation);
                }
                Done
            }

            Command::AddPage { name, path } => CreatedPage(self.add_page(name, path)),
            Command::RenamePage { id, name } => {
                self.rename_page(&id, name)?;
                Done
            }
            Command::DeletePage { id } => {
                self.delete_page(&id)?;
                Done
            }
            Command::SetCurrentPage { id } => {
                self.set_current_page(&id)?;
                Done
            }
        };

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;

    fn editor() -> Editor {
        Editor::with_config(
            "test",
            EditorConfig {
                id_seed: Some("c".into()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_command_json_shape() {
        let json = r#"{
            "op": "moveComponent",
            "id": "c-2",
            "newParentId": "c-1",
            "position": { "x": 4, "y": 8 }
        }"#;
        let command: Command = serde_json::from_str(json).unwrap();
        assert_eq!(
            command,
            Command::MoveComponent {
                id: "c-2".into(),
                new_parent_id: Some("c-1".into()),
                position: Position::new(4.0, 8.0),
                index: None,
            }
        );
        assert_eq!(command.name(), "moveComponent");
    }

    #[test]
    fn test_script_executes_in_order() {
        let script = r#"[
            { "op": "addComponent", "component": { "type": "container", "name": "Hero" } },
            { "op": "addComponent", "component": { "type": "text", "name": "Title" }, "parentId": "c-1" },
            { "op": "selectComponent", "id": "c-1" },
            { "op": "copy" },
            { "op": "paste" },
            { "op": "undo" }
        ]"#;
        let commands: Vec<Command> = serde_json::from_str(script).unwrap();
        let mut ed = editor();

        let outcomes: Vec<CommandOutcome> = commands
            .into_iter()
            .map(|c| ed.execute(c).unwrap())
            .collect();

        assert_eq!(outcomes[0], CommandOutcome::Created("c-1".into()));
        assert_eq!(outcomes[1], CommandOutcome::Created("c-2".into()));
        assert_eq!(outcomes[3], CommandOutcome::Copied(1));
        assert!(matches!(&outcomes[4], CommandOutcome::CreatedMany(ids) if ids.len() == 1));
        assert_eq!(outcomes[5], CommandOutcome::Changed(true));
        assert_eq!(ed.tree().len(), 2);
    }

    #[test]
    fn test_failed_command_reports_error() {
        let mut ed = editor();
        let err = ed
            .execute(Command::DeleteComponent { id: "nope".into() })
            .unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(CommandOutcome::Created("c-1".into()).to_string(), "created c-1");
        assert_eq!(
            CommandOutcome::CreatedMany(vec!["c-1".into(), "c-2".into()]).to_string(),
            "created [c-1, c-2]"
        );
        assert_eq!(CommandOutcome::Changed(false).to_string(), "unchanged");
    }
}
