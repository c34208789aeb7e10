//! # Clipboard
//!
//! Holds detached deep copies of the subtrees that were copied or cut.
//!
//! - Contents never alias live tree nodes
//! - A `Cut` clipboard is consumed by its first paste
//! - A `Copy` clipboard survives pastes; each paste cascades further away

use crate::tree::Subtree;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardOperation {
    Copy,
    Cut,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Clipboard {
    operation: Option<ClipboardOperation>,
    entries: Vec<Subtree>,
    /// Pastes taken from the current contents
    paste_count: u32,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn operation(&self) -> Option<ClipboardOperation> {
        self.operation
    }

    pub fn entries(&self) -> &[Subtree] {
        &self.entries
    }

    pub fn has_content(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Number of top-level subtrees held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paste_count(&self) -> u32 {
        self.paste_count
    }

    pub(crate) fn store(&mut self, operation: ClipboardOperation, entries: Vec<Subtree>) {
        self.operation = Some(operation);
        self.entries = entries;
        self.paste_count = 0;
    }

    /// Record one paste. A cut clipboard empties itself.
    pub(crate) fn consume(&mut self) {
        match self.operation {
            Some(ClipboardOperation::Cut) => self.clear(),
            Some(ClipboardOperation::Copy) => self.paste_count += 1,
            None => {}
        }
    }

    pub fn clear(&mut self) {
        self.operation = None;
        self.entries.clear();
        self.paste_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{ComponentId, ComponentInstance, NewComponent};
    use crate::tree::ComponentTree;
    use chrono::Utc;

    fn subtree() -> Subtree {
        let mut tree = ComponentTree::new();
        let id = ComponentId::from("a");
        tree.insert(
            ComponentInstance::from_new(id.clone(), NewComponent::new("text", "A"), Utc::now()),
            None,
        )
        .unwrap();
        tree.extract_subtree(&id).unwrap()
    }

    #[test]
    fn test_cut_is_single_use() {
        let mut clipboard = Clipboard::new();
        clipboard.store(ClipboardOperation::Cut, vec![subtree()]);
        assert!(clipboard.has_content());

        clipboard.consume();
        assert!(!clipboard.has_content());
        assert_eq!(clipboard.operation(), None);
    }

    #[test]
    fn test_copy_survives_pastes() {
        let mut clipboard = Clipboard::new();
        clipboard.store(ClipboardOperation::Copy, vec![subtree()]);
        clipboard.consume();
        clipboard.consume();

        assert_eq!(clipboard.len(), 1);
        assert_eq!(clipboard.paste_count(), 2);
        assert_eq!(clipboard.operation(), Some(ClipboardOperation::Copy));
    }

    #[test]
    fn test_store_resets_paste_count() {
        let mut clipboard = Clipboard::new();
        clipboard.store(ClipboardOperation::Copy, vec![subtree()]);
        clipboard.consume();
        clipboard.store(ClipboardOperation::Copy, vec![subtree()]);
        assert_eq!(clipboard.paste_count(), 0);
    }
}
