//! Key bindings for the disassembly viewport.

use crate::key::{self, KeyMap as KeyMapTrait, KeyPress};
use crossterm::event::{KeyCode, KeyModifiers};

/// Navigation, selection and copy bindings.
///
/// Shifted variants of the movement keys extend the selection instead of
/// moving it.
#[derive(Debug, Clone)]
pub struct DisassemblyKeyMap {
    /// Move the cursor one row up.
    pub up: key::Binding,
    /// Move the cursor one row down.
    pub down: key::Binding,
    /// Extend the selection one row up.
    pub select_up: key::Binding,
    /// Extend the selection one row down.
    pub select_down: key::Binding,
    /// Move the cursor one page up.
    pub page_up: key::Binding,
    /// Move the cursor one page down.
    pub page_down: key::Binding,
    /// Extend the selection one page up.
    pub select_page_up: key::Binding,
    /// Extend the selection one page down.
    pub select_page_down: key::Binding,
    /// Jump to the first row.
    pub top: key::Binding,
    /// Jump to the last row.
    pub bottom: key::Binding,
    /// Copy the selection to the clipboard.
    pub copy: key::Binding,
}

impl Default for DisassemblyKeyMap {
    fn default() -> Self {
        Self {
            up: key::Binding::new(vec![KeyCode::Up, KeyCode::Char('k')]).with_help("↑/k", "up"),
            down: key::Binding::new(vec![KeyCode::Down, KeyCode::Char('j')])
                .with_help("↓/j", "down"),
            select_up: key::Binding::new(vec!["shift+up", "K"]).with_help("shift+↑", "extend up"),
            select_down: key::Binding::new(vec!["shift+down", "J"])
                .with_help("shift+↓", "extend down"),
            page_up: key::Binding::new(vec![KeyCode::PageUp, KeyCode::Char('b')])
                .with_help("b/pgup", "page up"),
            page_down: key::Binding::new(vec![KeyCode::PageDown, KeyCode::Char('f')])
                .with_help("f/pgdn", "page down"),
            select_page_up: key::Binding::new(vec!["shift+pgup"])
                .with_help("shift+pgup", "extend page up"),
            select_page_down: key::Binding::new(vec!["shift+pgdown"])
                .with_help("shift+pgdn", "extend page down"),
            top: key::Binding::new(vec![KeyCode::Home, KeyCode::Char('g')])
                .with_help("g/home", "go to start"),
            bottom: key::Binding::new(vec![KeyCode::End, KeyCode::Char('G')])
                .with_help("G/end", "go to end"),
            copy: key::Binding::new(vec![
                KeyPress::from((KeyCode::Char('c'), KeyModifiers::CONTROL)),
                KeyPress::from(KeyCode::Char('y')),
            ])
            .with_help("y/ctrl+c", "copy"),
        }
    }
}

impl KeyMapTrait for DisassemblyKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.up, &self.down, &self.select_down, &self.copy]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![
            vec![&self.up, &self.down, &self.page_up, &self.page_down],
            vec![
                &self.select_up,
                &self.select_down,
                &self.select_page_up,
                &self.select_page_down,
            ],
            vec![&self.top, &self.bottom, &self.copy],
        ]
    }
}
