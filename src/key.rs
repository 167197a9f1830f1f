//! Type-safe key bindings for keyboard-driven components.
//!
//! A [`Binding`] groups one or more [`KeyPress`] values under a single action
//! together with the help text shown by help views. Components expose their
//! bindings through a struct implementing [`KeyMap`].
//!
//! ```rust
//! use disasm_viewport::key::{Binding, KeyPress};
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let copy = Binding::new(vec![KeyPress::from((KeyCode::Char('c'), KeyModifiers::CONTROL))])
//!     .with_help("ctrl+c", "copy selection");
//! assert_eq!(copy.help().key, "ctrl+c");
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key combination: a key code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyPress {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub mods: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            mods: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, mods): (KeyCode, KeyModifiers)) -> Self {
        Self { code, mods }
    }
}

impl From<&str> for KeyPress {
    /// Parses key names such as `"up"`, `"shift+pgdown"` or `"ctrl+c"`.
    ///
    /// Unknown names map to [`KeyCode::Null`], which never matches a real key.
    fn from(s: &str) -> Self {
        parse_key_str(s)
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"↑/k"`.
    pub key: String,
    /// Description of the action.
    pub desc: String,
}

/// An action bound to one or more key presses.
#[derive(Debug, Clone)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from anything convertible into key presses.
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help label and description.
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Replaces the bound keys.
    pub fn set_keys<K: Into<KeyPress>>(&mut self, keys: Vec<K>) {
        self.keys = keys.into_iter().map(Into::into).collect();
    }

    /// Enables or disables the binding. Disabled bindings never match.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// The bound key presses.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding is active and has keys.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Returns true if the key message triggers this binding.
    ///
    /// Modifiers are compared exactly, except that `SHIFT` on a character key
    /// is ignored since terminals already report the shifted character.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        if !self.enabled() {
            return false;
        }
        self.keys.iter().any(|kp| {
            if kp.code != key_msg.key {
                return false;
            }
            match kp.code {
                KeyCode::Char(_) => {
                    kp.mods.difference(KeyModifiers::SHIFT)
                        == key_msg.modifiers.difference(KeyModifiers::SHIFT)
                }
                _ => kp.mods == key_msg.modifiers,
            }
        })
    }
}

/// Implemented by component key maps to feed help views.
pub trait KeyMap {
    /// The most important bindings, for a single help line.
    fn short_help(&self) -> Vec<&Binding>;
    /// All bindings, grouped in columns.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// Returns true if the key message matches any of the given bindings.
pub fn matches(key_msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(key_msg))
}

/// Convenience for building a binding from string key names.
pub fn with_keys_str(keys: &[&str]) -> Binding {
    Binding::new(keys.to_vec())
}

fn parse_key_str(s: &str) -> KeyPress {
    let mut mods = KeyModifiers::NONE;
    let mut parts: Vec<&str> = s.split('+').collect();
    // "ctrl++" style names put the literal plus last
    let name = if s.ends_with("++") {
        parts.truncate(parts.len().saturating_sub(2));
        "+"
    } else {
        parts.pop().unwrap_or("")
    };
    for m in parts {
        match m {
            "ctrl" => mods |= KeyModifiers::CONTROL,
            "shift" => mods |= KeyModifiers::SHIFT,
            "alt" => mods |= KeyModifiers::ALT,
            _ => {}
        }
    }
    let code = match name {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" | "pageup" => KeyCode::PageUp,
        "pgdown" | "pgdn" | "pagedown" => KeyCode::PageDown,
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => KeyCode::Null,
            }
        }
    };
    KeyPress { code, mods }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(key: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg { key, modifiers }
    }

    #[test]
    fn test_parse_modified_keys() {
        assert_eq!(
            KeyPress::from("shift+down"),
            KeyPress::from((KeyCode::Down, KeyModifiers::SHIFT))
        );
        assert_eq!(
            KeyPress::from("ctrl+c"),
            KeyPress::from((KeyCode::Char('c'), KeyModifiers::CONTROL))
        );
        assert_eq!(KeyPress::from("pgdown").code, KeyCode::PageDown);
        assert_eq!(KeyPress::from("bogus").code, KeyCode::Null);
    }

    #[test]
    fn test_modifiers_compared_exactly_for_named_keys() {
        let down = Binding::new(vec!["down"]);
        assert!(down.matches(&msg(KeyCode::Down, KeyModifiers::NONE)));
        assert!(!down.matches(&msg(KeyCode::Down, KeyModifiers::SHIFT)));

        let extend = Binding::new(vec!["shift+down"]);
        assert!(extend.matches(&msg(KeyCode::Down, KeyModifiers::SHIFT)));
        assert!(!extend.matches(&msg(KeyCode::Down, KeyModifiers::NONE)));
    }

    #[test]
    fn test_shift_ignored_on_chars() {
        let g = Binding::new(vec![KeyCode::Char('G')]);
        assert!(g.matches(&msg(KeyCode::Char('G'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut b = with_keys_str(&["up", "k"]);
        b.set_enabled(false);
        assert!(!b.enabled());
        assert!(!b.matches(&msg(KeyCode::Up, KeyModifiers::NONE)));
        assert!(!matches(&msg(KeyCode::Up, KeyModifiers::NONE), &[&b]));
    }
}
