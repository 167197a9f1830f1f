//! Disassembly viewport component for bubbletea-rs applications.
//!
//! A virtualized, address-indexed code listing. Only the rows in view are
//! materialized from a [`LineSource`](crate::source::LineSource); the host
//! scrollbar is a coarse proxy for the position in the address space, the
//! cursor walks rendered rows, and the selection can be exported as text.
//!
//! # Basic Usage
//!
//! ```rust
//! use disasm_viewport::disassembly::Model;
//! use disasm_viewport::source::FixedLineSource;
//! use disasm_viewport::Component;
//! use std::sync::Arc;
//!
//! let mut view = Model::new(20).with_line_source(Arc::new(FixedLineSource::new(1000)));
//! view.focus();
//!
//! view.go_to_address(500);
//! view.move_cursor(3, true); // shift+down three times
//! assert_eq!((view.selection_start(), view.selection_end()), (500, 503));
//!
//! let text = view.copy_selection().unwrap();
//! assert_eq!(text.lines().count(), 4);
//! ```
//!
//! # Messages
//!
//! Besides key presses, [`update`](bubbletea_rs::Model::update) accepts
//! [`ScrollbarMsg`] for scrollbar drags, [`ActiveAddressMsg`] when the
//! execution pointer moves and [`GoToAddressMsg`] for goto-address prompts.
//! Copy key presses return a command built by [`copy_to_clipboard`] that
//! answers with [`CopyMsg`] or [`CopyErrMsg`].

pub mod keymap;
pub mod model;
pub mod types;


pub use keymap::DisassemblyKeyMap;
pub use model::{copy_to_clipboard, new, Model, Styles};
pub use types::{ActiveAddressMsg, CopyErrMsg, CopyMsg, GoToAddressMsg, ScrollbarMsg};
