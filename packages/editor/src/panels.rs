//! Properties panel and user preferences.

use serde::{Deserialize, Serialize};

pub const MIN_AUTO_SAVE_INTERVAL_SECS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelTab {
    #[default]
    Properties,
    Styles,
    Layout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertiesPanel {
    pub is_open: bool,
    pub active_tab: PanelTab,
}

impl Default for PropertiesPanel {
    fn default() -> Self {
        Self {
            is_open: true,
            active_tab: PanelTab::default(),
        }
    }
}

impl PropertiesPanel {
    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    /// Switching tabs opens a closed panel.
    pub fn set_active_tab(&mut self, tab: PanelTab) {
        self.active_tab = tab;
        self.is_open = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub theme: Theme,
    pub auto_save: bool,
    auto_save_interval_secs: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            auto_save: true,
            auto_save_interval_secs: 30,
        }
    }
}

impl Preferences {
    pub fn auto_save_interval_secs(&self) -> u32 {
        self.auto_save_interval_secs
    }

    pub fn set_auto_save_interval(&mut self, secs: u32) {
        self.auto_save_interval_secs = secs.max(MIN_AUTO_SAVE_INTERVAL_SECS);
    }

    pub(crate) fn normalized(mut self) -> Self {
        self.set_auto_save_interval(self.auto_save_interval_secs);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_floor() {
        let mut prefs = Preferences::default();
        prefs.set_auto_save_interval(1);
        assert_eq!(prefs.auto_save_interval_secs(), MIN_AUTO_SAVE_INTERVAL_SECS);
        prefs.set_auto_save_interval(120);
        assert_eq!(prefs.auto_save_interval_secs(), 120);
    }

    #[test]
    fn test_switching_tab_opens_panel() {
        let mut panel = PropertiesPanel::default();
        panel.toggle();
        assert!(!panel.is_open);
        panel.set_active_tab(PanelTab::Styles);
        assert!(panel.is_open);
        assert_eq!(panel.active_tab, PanelTab::Styles);
    }
}
