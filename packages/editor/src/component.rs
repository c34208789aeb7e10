//! # Component Instances
//!
//! A component instance is one placed element on the page. Instances live in
//! the [`ComponentTree`](crate::ComponentTree) arena and refer to each other by
//! id only; nothing here embeds a child directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Open key-value data (button text, CSS declarations, ...).
///
/// Values are treated as opaque JSON trees and deep-cloned whenever a
/// component is duplicated or pasted.
pub type PropertyMap = BTreeMap<String, serde_json::Value>;

/// Opaque component identifier, stable for the component's lifetime
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ComponentId {
    fn from(s: String) -> Self {
        ComponentId(s)
    }
}

impl From<&str> for ComponentId {
    fn from(s: &str) -> Self {
        ComponentId(s.to_string())
    }
}

/// Coordinates relative to the parent's coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Negative dimensions are clamped to zero.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub(crate) fn clamped(self) -> Self {
        Self::new(self.width, self.height)
    }
}

/// A single placed element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInstance {
    pub id: ComponentId,

    /// Component kind (button, text, container, ...), opaque to the engine
    #[serde(rename = "type")]
    pub component_type: String,

    pub name: String,

    /// Containing component, or `None` for a root
    pub parent_id: Option<ComponentId>,

    /// Directly nested components, in order
    #[serde(default)]
    pub child_ids: Vec<ComponentId>,

    #[serde(default)]
    pub position: Position,

    #[serde(default)]
    pub size: Size,

    #[serde(default)]
    pub properties: PropertyMap,

    #[serde(default)]
    pub styles: PropertyMap,

    #[serde(default)]
    pub locked: bool,

    #[serde(default)]
    pub hidden: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ComponentInstance {
    /// Build a detached instance from a creation payload.
    pub(crate) fn from_new(id: ComponentId, data: NewComponent, now: DateTime<Utc>) -> Self {
        Self {
            id,
            component_type: data.component_type,
            name: data.name,
            parent_id: None,
            child_ids: Vec::new(),
            position: data.position,
            size: data.size.clamped(),
            properties: data.properties,
            styles: data.styles,
            locked: data.locked,
            hidden: data.hidden,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.child_ids.is_empty()
    }

    /// Shallow merge of a patch: each present field replaces the old value
    /// wholesale. Returns `false` if the patch was empty.
    pub(crate) fn apply_patch(&mut self, patch: ComponentPatch, now: DateTime<Utc>) -> bool {
        if patch.is_empty() {
            return false;
        }

        if let Some(component_type) = patch.component_type {
            self.component_type = component_type;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(size) = patch.size {
            self.size = size.clamped();
        }
        if let Some(properties) = patch.properties {
            self.properties = properties;
        }
        if let Some(styles) = patch.styles {
            self.styles = styles;
        }
        if let Some(locked) = patch.locked {
            self.locked = locked;
        }
        if let Some(hidden) = patch.hidden {
            self.hidden = hidden;
        }

        self.updated_at = now;
        true
    }
}

/// Creation payload: everything but id, structure and timestamps
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewComponent {
    #[serde(rename = "type")]
    pub component_type: String,
    pub name: String,
    pub position: Position,
    pub size: Size,
    pub properties: PropertyMap,
    pub styles: PropertyMap,
    pub locked: bool,
    pub hidden: bool,
}

impl NewComponent {
    pub fn new(component_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            component_type: component_type.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    pub fn with_style(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.styles.insert(key.into(), value);
        self
    }
}

/// Partial update.
///
/// Structural fields (`parentId`, `childIds`) are deliberately absent: use
/// `move_component` to restructure the tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComponentPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub component_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertyMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub styles: Option<PropertyMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl ComponentPatch {
    pub fn is_empty(&self) -> bool {
        self.component_type.is_none()
            && self.name.is_none()
            && self.position.is_none()
            && self.size.is_none()
            && self.properties.is_none()
            && self.styles.is_none()
            && self.locked.is_none()
            && self.hidden.is_none()
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn position(x: f64, y: f64) -> Self {
        Self {
            position: Some(Position::new(x, y)),
            ..Default::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            size: Some(Size::new(width, height)),
            ..Default::default()
        }
    }
}
