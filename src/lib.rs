#![warn(missing_docs)]
#![doc(html_root_url = "https://docs.rs/disasm-viewport/")]

//! # disasm-viewport
//!
//! A virtualized, address-indexed code listing component for
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs) applications such as
//! debuggers and emulator front-ends.
//!
//! ## Overview
//!
//! A disassembly listing is indexed by address, but rows are not 1:1 with
//! addresses: instructions span several bytes, blocks render marker rows and
//! labels inject extra lines. The viewport reconciles three coordinates:
//!
//! - the host **scrollbar** value, a fixed-resolution linear proxy,
//! - the **top address** of the view,
//! - the **row index** of each materialized line.
//!
//! Only the rows in view are materialized from a [`LineSource`], which is
//! the host's decoder. The viewport owns scrolling, a multi-row selection
//! with an anchored edge, keyboard and mouse navigation, and plain-text
//! export of the selection for the clipboard.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`source`] | The `LineSource` boundary and line records |
//! | [`scroll`] | Scrollbar ↔ address coordination |
//! | [`selection`] | Anchored selection state machine |
//! | [`export`] | Fixed-column text export |
//! | [`config`] | TOML configuration |
//! | [`disassembly`] | The composed component |
//! | [`key`] | Key bindings |
//!
//! ## Example
//!
//! ```rust
//! use disasm_viewport::prelude::*;
//! use std::sync::Arc;
//!
//! let mut view = Disassembly::new(20).with_line_source(Arc::new(FixedLineSource::new(0x1000)));
//! view.focus();
//!
//! // The debugger stopped at 0x0800
//! view.set_active_address(Some(0x800));
//! assert!(view.is_address_visible(0x800));
//!
//! // shift+down twice, then copy
//! view.move_cursor(2, true);
//! let text = view.copy_selection().unwrap();
//! assert!(text.starts_with("0800"));
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events under the `disasm.*` targets and never
//! installs a subscriber.

pub mod config;
pub mod disassembly;
pub mod export;
pub mod key;
pub mod scroll;
pub mod selection;
pub mod source;

use bubbletea_rs::Cmd;

/// Core trait for components that support focus management.
///
/// A focused disassembly view honors scrollbar input and key presses. A
/// blurred one reverts scrollbar writes, so layout-driven scrollbar resets
/// in an inactive pane can't move it.
///
/// ```rust
/// use disasm_viewport::prelude::*;
///
/// let mut view = Disassembly::default();
/// assert!(!view.focused());
/// view.focus();
/// assert!(view.focused());
/// view.blur();
/// assert!(!view.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state, returning an optional command.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred (unfocused) state.
    fn blur(&mut self);

    /// Returns the current focus state of the component.
    fn focused(&self) -> bool;
}

pub use config::{ConfigError, DisassemblyConfig};
pub use disassembly::Model as Disassembly;
pub use disassembly::{
    copy_to_clipboard, ActiveAddressMsg, CopyErrMsg, CopyMsg, DisassemblyKeyMap, GoToAddressMsg,
    ScrollbarMsg,
};
pub use export::CopyOptions;
pub use key::{Binding, KeyMap, KeyPress};
pub use scroll::ScrollDisplayPosition;
pub use selection::{AnchorEdge, Selection};
pub use source::{CodeLine, FixedLineSource, LineFlags, LineSource};

/// Prelude module for convenient imports.
///
/// ```rust
/// use disasm_viewport::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ConfigError, DisassemblyConfig};
    pub use crate::disassembly::Model as Disassembly;
    pub use crate::disassembly::{
        copy_to_clipboard, ActiveAddressMsg, CopyErrMsg, CopyMsg, DisassemblyKeyMap,
        GoToAddressMsg, ScrollbarMsg,
    };
    pub use crate::export::CopyOptions;
    pub use crate::key::{Binding, KeyMap, KeyPress};
    pub use crate::scroll::ScrollDisplayPosition;
    pub use crate::selection::{AnchorEdge, Selection};
    pub use crate::source::{CodeLine, FixedLineSource, LineFlags, LineSource};
    pub use crate::Component;
}
