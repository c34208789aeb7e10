//! # Page Builder Editor
//!
//! State engine for a visual page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ host: canvas, property editor, shortcuts    │
//! └─────────────────────────────────────────────┘
//!                     ↓ Command / method call
//! ┌─────────────────────────────────────────────┐
//! │ editor: one open document                   │
//! │  - Component tree store (arena)             │
//! │  - Selection, hover, focus                  │
//! │  - Clipboard (copy / cut / paste)           │
//! │  - Snapshot undo/redo history               │
//! │  - Viewport, grid, preview, pages, panels   │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ project: JSON document on disk              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Atomic operations**: a rejected operation leaves every slice untouched
//! 2. **Snapshot history**: undo restores tree and selection together
//! 3. **Ids are never reused**: not after delete, undo or load
//! 4. **Single owner**: the host calls in sequentially; nothing is shared
//!
//! ## Usage
//!
//! ```rust
//! use pagebuilder_editor::{Editor, NewComponent};
//!
//! let mut editor = Editor::new("landing");
//! let hero = editor.add_component(NewComponent::new("container", "Hero"), None)?;
//! editor.add_component(NewComponent::new("text", "Title"), Some(&hero))?;
//!
//! editor.select_component(Some(hero.clone()), false);
//! editor.copy()?;
//! let pasted = editor.paste()?;
//! assert_eq!(editor.tree().len(), 4);
//!
//! editor.undo();
//! assert_eq!(editor.tree().len(), 2);
//! assert!(!editor.tree().contains(&pasted[0]));
//! # Ok::<(), pagebuilder_editor::EditorError>(())
//! ```

mod clipboard;
mod commands;
mod component;
mod config;
mod editor;
mod errors;
mod id_generator;
mod pages;
mod panels;
mod preview;
mod project;
mod selection;
mod shortcuts;
mod tree;
mod undo_stack;
mod viewport;

pub use clipboard::{Clipboard, ClipboardOperation};
pub use commands::{Command, CommandOutcome};
pub use component::{
    ComponentId, ComponentInstance, ComponentPatch, NewComponent, Position, PropertyMap, Size,
};
pub use config::EditorConfig;
pub use editor::{Editor, PropertyTarget, Snapshot};
pub use errors::EditorError;
pub use id_generator::{get_document_seed, IdGenerator};
pub use pages::{Page, PageId, WorkflowPages};
pub use panels::{PanelTab, Preferences, PropertiesPanel, Theme, MIN_AUTO_SAVE_INTERVAL_SECS};
pub use preview::{Device, Orientation, Preview};
pub use project::{CanvasDocument, ProjectDocument, ProjectPatch};
pub use selection::Selection;
pub use shortcuts::{EditorAction, KeyChord, ParseChordError, Platform, ShortcutMap};
pub use tree::{ComponentTree, Subtree, TreeError};
pub use undo_stack::{HistoryEntry, UndoStack};
pub use viewport::{Grid, Viewport, MAX_ZOOM, MIN_ZOOM};
