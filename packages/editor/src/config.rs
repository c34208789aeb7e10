use crate::component::Position;
use serde::{Deserialize, Serialize};

/// Engine tuning knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Maximum undo levels (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Offset of a duplicate from its original
    #[serde(default = "default_offset")]
    pub duplicate_offset: Position,

    /// Offset of each successive paste of a copied selection
    #[serde(default = "default_offset")]
    pub paste_offset: Position,

    /// Fixed id seed. When absent the seed is derived from the document name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_seed: Option<String>,

    /// Factor applied by zoom in/out
    #[serde(default = "default_zoom_step")]
    pub zoom_step: f64,
}

fn default_history_limit() -> usize {
    100
}

fn default_offset() -> Position {
    Position::new(20.0, 20.0)
}

fn default_zoom_step() -> f64 {
    1.2
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            duplicate_offset: default_offset(),
            paste_offset: default_offset(),
            id_seed: None,
            zoom_step: default_zoom_step(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_partial_config() {
        let json = r#"{ "historyLimit": 300, "idSeed": "doc" }"#;
        let config: EditorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.history_limit, 300);
        assert_eq!(config.id_seed.as_deref(), Some("doc"));
        assert_eq!(config.duplicate_offset, Position::new(20.0, 20.0));
        assert_eq!(config.zoom_step, 1.2);
    }

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(config.history_limit, 100);
        assert!(config.id_seed.is_none());
    }
}
