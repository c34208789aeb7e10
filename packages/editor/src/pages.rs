//! Workflow pages.
//!
//! There is always at least one page and exactly one of them is current.

use crate::errors::EditorError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PageId {
    fn from(s: String) -> Self {
        PageId(s)
    }
}

impl From<&str> for PageId {
    fn from(s: &str) -> Self {
        PageId(s.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub name: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowPages {
    pages: Vec<Page>,
    current_page_id: PageId,
}

impl Default for WorkflowPages {
    fn default() -> Self {
        let home = Page {
            id: PageId::from("home"),
            name: "Home".to_string(),
            path: "/".to_string(),
        };
        Self {
            current_page_id: home.id.clone(),
            pages: vec![home],
        }
    }
}

impl WorkflowPages {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, id: &PageId) -> Option<&Page> {
        self.pages.iter().find(|p| &p.id == id)
    }

    pub fn current_page_id(&self) -> &PageId {
        &self.current_page_id
    }

    pub fn current(&self) -> Option<&Page> {
        self.get(&self.current_page_id)
    }

    pub fn contains(&self, id: &PageId) -> bool {
        self.get(id).is_some()
    }

    /// Append a page under an id the caller guarantees is unused.
    pub(crate) fn add(&mut self, id: PageId, name: impl Into<String>, path: impl Into<String>) {
        self.pages.push(Page {
            id,
            name: name.into(),
            path: path.into(),
        });
    }

    pub fn rename(&mut self, id: &PageId, name: impl Into<String>) -> Result<(), EditorError> {
        let page = self
            .pages
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| EditorError::PageNotFound(id.clone()))?;
        page.name = name.into();
        Ok(())
    }

    pub fn set_current(&mut self, id: &PageId) -> Result<(), EditorError> {
        if !self.contains(id) {
            return Err(EditorError::PageNotFound(id.clone()));
        }
        self.current_page_id = id.clone();
        Ok(())
    }

    /// Remove a page. If it was current, the first remaining page becomes
    /// current. The last page cannot be removed.
    pub fn delete(&mut self, id: &PageId) -> Result<Page, EditorError> {
        let index = self
            .pages
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| EditorError::PageNotFound(id.clone()))?;
        if self.pages.len() == 1 {
            return Err(EditorError::LastPage);
        }

        let removed = self.pages.remove(index);
        if self.current_page_id == removed.id {
            self.current_page_id = self.pages[0].id.clone();
        }
        Ok(removed)
    }

    /// Check a deserialized page list.
    pub(crate) fn validate(&self) -> Result<(), EditorError> {
        if self.pages.is_empty() {
            return Err(EditorError::InvalidDocument("project has no pages".to_string()));
        }
        if !self.contains(&self.current_page_id) {
            return Err(EditorError::InvalidDocument(format!(
                "current page {} does not exist",
                self.current_page_id
            )));
        }
        for (i, page) in self.pages.iter().enumerate() {
            if self.pages[..i].iter().any(|p| p.id == page.id) {
                return Err(EditorError::InvalidDocument(format!(
                    "duplicate page id {}",
                    page.id
                )));
            }
        }
        Ok(())
    }
}
