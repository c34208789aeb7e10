//! Keyboard shortcut dispatch.
//!
//! Chords use the `modifier-modifier-key` notation (`"cmd-shift-z"`,
//! `"ctrl-c"`, `"delete"`). `cmd`, `ctrl`, `super` and `meta` all count as the
//! primary modifier, so one binding table serves every host platform.

use crate::commands::{Command, CommandOutcome};
use crate::errors::EditorError;
use crate::Editor;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Mac,
    Other,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Other
        }
    }

    /// Label of the primary modifier, for menus and tooltips
    pub fn primary_label(self) -> &'static str {
        match self {
            Platform::Mac => "cmd",
            Platform::Other => "ctrl",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub primary: bool,
    pub shift: bool,
    pub alt: bool,
    pub key: String,
}

impl KeyChord {
    pub fn key(key: &str) -> Self {
        Self {
            primary: false,
            shift: false,
            alt: false,
            key: key.to_ascii_lowercase(),
        }
    }

    pub fn primary(key: &str) -> Self {
        Self {
            primary: true,
            ..Self::key(key)
        }
    }

    pub fn primary_shift(key: &str) -> Self {
        Self {
            shift: true,
            ..Self::primary(key)
        }
    }

    /// Render for display on a given platform
    pub fn display(&self, platform: Platform) -> String {
        let mut parts = Vec::new();
        if self.primary {
            parts.push(platform.primary_label());
        }
        if self.alt {
            parts.push("alt");
        }
        if self.shift {
            parts.push("shift");
        }
        parts.push(&self.key);
        parts.join("-")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChordError(String);

impl fmt::Display for ParseChordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid key chord: {:?}", self.0)
    }
}

impl std::error::Error for ParseChordError {}

impl FromStr for KeyChord {
    type Err = ParseChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        // A trailing "-" is the minus key itself ("cmd--").
        let (mods, key) = match lowered.strip_suffix("--") {
            Some(rest) => (rest, "-"),
            None => match lowered.rsplit_once('-') {
                Some((mods, key)) => (mods, key),
                None => ("", lowered.as_str()),
            },
        };

        if key.is_empty() {
            return Err(ParseChordError(s.to_string()));
        }

        let mut chord = KeyChord::key(key);
        for modifier in mods.split('-').filter(|m| !m.is_empty()) {
            match modifier {
                "cmd" | "ctrl" | "super" | "meta" | "control" => chord.primary = true,
                "shift" => chord.shift = true,
                "alt" | "option" => chord.alt = true,
                _ => return Err(ParseChordError(s.to_string())),
            }
        }

        Ok(chord)
    }
}

/// Editor-level actions reachable from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Undo,
    Redo,
    Copy,
    Cut,
    Paste,
    Duplicate,
    Delete,
    SelectAll,
    ClearSelection,
}

impl EditorAction {
    pub fn to_command(self) -> Command {
        match self {
            EditorAction::Undo => Command::Undo,
            EditorAction::Redo => Command::Redo,
            EditorAction::Copy => Command::Copy,
            EditorAction::Cut => Command::Cut,
            EditorAction::Paste => Command::Paste,
            EditorAction::Duplicate => Command::DuplicateSelection,
            EditorAction::Delete => Command::DeleteSelection,
            EditorAction::SelectAll => Command::SelectAll,
            EditorAction::ClearSelection => Command::ClearSelection,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShortcutMap {
    bindings: HashMap<KeyChord, EditorAction>,
}

impl Default for ShortcutMap {
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(KeyChord::primary("z"), EditorAction::Undo);
        map.bind(KeyChord::primary_shift("z"), EditorAction::Redo);
        map.bind(KeyChord::primary("y"), EditorAction::Redo);
        map.bind(KeyChord::primary("c"), EditorAction::Copy);
        map.bind(KeyChord::primary("x"), EditorAction::Cut);
        map.bind(KeyChord::primary("v"), EditorAction::Paste);
        map.bind(KeyChord::primary("d"), EditorAction::Duplicate);
        map.bind(KeyChord::primary("a"), EditorAction::SelectAll);
        map.bind(KeyChord::key("delete"), EditorAction::Delete);
        map.bind(KeyChord::key("backspace"), EditorAction::Delete);
        map.bind(KeyChord::key("escape"), EditorAction::ClearSelection);
        map
    }
}

impl ShortcutMap {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `chord`, replacing any previous action.
    pub fn bind(&mut self, chord: KeyChord, action: EditorAction) {
        self.bindings.insert(chord, action);
    }

    pub fn unbind(&mut self, chord: &KeyChord) -> Option<EditorAction> {
        self.bindings.remove(chord)
    }

    pub fn resolve(&self, chord: &KeyChord) -> Option<EditorAction> {
        self.bindings.get(chord).copied()
    }

    /// Chords bound to `action`
    pub fn chords_for(&self, action: EditorAction) -> Vec<&KeyChord> {
        let mut chords: Vec<&KeyChord> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(chord, _)| chord)
            .collect();
        chords.sort_by(|a, b| a.key.cmp(&b.key).then(a.shift.cmp(&b.shift)));
        chords
    }
}

impl Editor {
    /// Run the action bound to `chord`. `Ok(None)` means the chord is not
    /// bound and the host should handle the key itself.
    pub fn dispatch_shortcut(
        &mut self,
        shortcuts: &ShortcutMap,
        chord: &KeyChord,
    ) -> Result<Option<CommandOutcome>, EditorError> {
        let Some(action) = shortcuts.resolve(chord) else {
            return Ok(None);
        };

        debug!(?action, chord = %chord.display(Platform::current()), "Shortcut");
        self.execute(action.to_command()).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(s: &str) -> KeyChord {
        s.parse().unwrap()
    }

    #[test]
    fn test_cmd_and_ctrl_are_equivalent() {
        assert_eq!(chord("cmd-z"), chord("ctrl-z"));
        assert_eq!(chord("Ctrl-Shift-Z"), chord("cmd-shift-z"));
        assert_eq!(chord("meta-c"), KeyChord::primary("c"));
    }

    #[test]
    fn test_parse_plain_and_minus_keys() {
        assert_eq!(chord("delete"), KeyChord::key("delete"));
        assert_eq!(chord("cmd--"), KeyChord::primary("-"));
        assert!("hyper-z".parse::<KeyChord>().is_err());
        assert!("cmd-".parse::<KeyChord>().is_err());
    }

    #[test]
    fn test_default_bindings() {
        let map = ShortcutMap::default();
        assert_eq!(map.resolve(&chord("cmd-z")), Some(EditorAction::Undo));
        assert_eq!(map.resolve(&chord("ctrl-y")), Some(EditorAction::Redo));
        assert_eq!(map.resolve(&chord("cmd-shift-z")), Some(EditorAction::Redo));
        assert_eq!(map.resolve(&chord("backspace")), Some(EditorAction::Delete));
        assert_eq!(map.resolve(&chord("z")), None);
        assert_eq!(map.chords_for(EditorAction::Redo).len(), 2);
    }

    #[test]
    fn test_display_uses_platform_label() {
        let c = KeyChord::primary_shift("z");
        assert_eq!(c.display(Platform::Mac), "cmd-shift-z");
        assert_eq!(c.display(Platform::Other), "ctrl-shift-z");
    }
}
