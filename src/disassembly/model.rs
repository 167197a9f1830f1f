//! The disassembly viewport model.

use super::keymap::DisassemblyKeyMap;
use super::types::{ActiveAddressMsg, CopyErrMsg, CopyMsg, GoToAddressMsg, ScrollbarMsg};
use crate::config::DisassemblyConfig;
use crate::export::{self, CopyOptions};
use crate::scroll::{clamp_address, ScrollDisplayPosition, ScrollRequest, ScrollState};
use crate::selection::Selection;
use crate::source::{CodeLine, LineSource};
use bubbletea_rs::{Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};
use unicode_width::UnicodeWidthChar;

/// Row styles used by [`Model::view`].
#[derive(Debug, Clone)]
pub struct Styles {
    /// Rows inside the selected range.
    pub selected: Style,
    /// The row of the active (execution) address.
    pub active: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        Self {
            selected: Style::new().background(AdaptiveColor {
                Light: "#D7D7FF",
                Dark: "#264F78",
            }),
            active: Style::new()
                .foreground(AdaptiveColor {
                    Light: "#8A6D00",
                    Dark: "#FFD75F",
                })
                .bold(true),
        }
    }
}

/// Address-indexed viewport over a [`LineSource`].
///
/// Keeps three coordinate systems in step: the host scrollbar value, the
/// top address of the view, and the index of each materialized row. The
/// materialized rows in [`lines`](Model::lines) always reflect the current
/// top address and source once an operation returns.
///
/// Without a line source every operation is a no-op.
///
/// ```rust
/// use disasm_viewport::disassembly::Model;
/// use disasm_viewport::source::FixedLineSource;
/// use disasm_viewport::Component;
/// use std::sync::Arc;
///
/// let mut view = Model::new(4).with_line_source(Arc::new(FixedLineSource::new(10)));
/// view.focus();
/// view.scroll_to_bottom();
/// assert_eq!(view.top_address(), 7);
/// assert_eq!(view.selected_row_address(), 9);
/// ```
#[derive(Clone)]
pub struct Model {
    /// Render width in columns; 0 disables truncation.
    pub width: usize,
    /// Style wrapped around the rendered rows.
    pub style: Style,
    /// Per-row highlight styles.
    pub styles: Styles,
    /// Keyboard bindings.
    pub keymap: DisassemblyKeyMap,
    /// Columns included by [`copy_selection`](Model::copy_selection).
    pub copy_options: CopyOptions,
    /// Rows scrolled per mouse wheel notch.
    pub mouse_wheel_delta: usize,
    /// Last clipboard error, cleared by a successful copy.
    pub err: Option<String>,

    source: Option<Arc<dyn LineSource>>,
    scroll: ScrollState,
    selection: Selection,
    lines: Vec<CodeLine>,
    visible_rows: usize,
    revision: u64,
}

impl fmt::Debug for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("has_source", &self.source.is_some())
            .field("scroll", &self.scroll)
            .field("selection", &self.selection)
            .field("visible_rows", &self.visible_rows)
            .field("lines", &self.lines.len())
            .field("revision", &self.revision)
            .finish()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(DisassemblyConfig::default().visible_rows)
    }
}

impl Model {
    /// Creates an empty, unfocused viewport materializing `visible_rows` rows.
    pub fn new(visible_rows: usize) -> Self {
        let config = DisassemblyConfig::default();
        Self {
            width: 0,
            style: Style::new(),
            styles: Styles::default(),
            keymap: DisassemblyKeyMap::default(),
            copy_options: config.copy,
            mouse_wheel_delta: config.mouse_wheel_delta,
            err: None,
            source: None,
            scroll: ScrollState::new(config.max_scroll_position)
                .with_small_scroll_threshold(config.small_scroll_threshold),
            selection: Selection::default(),
            lines: Vec::new(),
            visible_rows: visible_rows.max(1),
            revision: 0,
        }
    }

    /// Creates a viewport from configuration.
    pub fn from_config(config: &DisassemblyConfig) -> Self {
        let mut model = Self::new(config.visible_rows);
        model.copy_options = config.copy.clone();
        model.mouse_wheel_delta = config.mouse_wheel_delta;
        model.scroll = ScrollState::new(config.max_scroll_position)
            .with_small_scroll_threshold(config.small_scroll_threshold);
        model
    }

    /// Builder form of [`set_line_source`](Model::set_line_source).
    pub fn with_line_source(mut self, source: Arc<dyn LineSource>) -> Self {
        self.set_line_source(Some(source));
        self
    }

    /// Builder method to set the render width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Builder method to set the outer style.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Swaps the line source (e.g. when switching the processor being viewed).
    ///
    /// The top address is re-clamped to the new space, the scrollbar is
    /// re-derived from it and the rows are refreshed. Passing `None` clears
    /// the materialized rows.
    pub fn set_line_source(&mut self, source: Option<Arc<dyn LineSource>>) {
        self.source = source;
        let count = self.line_count();
        debug!(target: "disasm.viewport", has_source = self.source.is_some(), line_count = count, "line_source_changed");
        self.scroll.reset(count);
        if self.source.is_none() {
            self.lines.clear();
            self.revision = self.revision.wrapping_add(1);
            return;
        }
        self.refresh();
    }

    /// The current line source, if any.
    pub fn line_source(&self) -> Option<&Arc<dyn LineSource>> {
        self.source.as_ref()
    }

    /// Total rows in the source's address space (0 without a source).
    pub fn line_count(&self) -> usize {
        self.source.as_ref().map_or(0, |s| s.line_count())
    }

    /// Changes the number of materialized rows and refreshes.
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows.max(1);
        self.refresh();
    }

    /// Number of rows materialized per refresh.
    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// The materialized rows, top first.
    pub fn lines(&self) -> &[CodeLine] {
        &self.lines
    }

    /// Address of the first materialized row.
    pub fn top_address(&self) -> usize {
        self.scroll.top_address()
    }

    /// Host scrollbar value.
    pub fn scroll_position(&self) -> usize {
        self.scroll.position()
    }

    /// Host scrollbar resolution.
    pub fn max_scroll_position(&self) -> usize {
        self.scroll.max_position()
    }

    /// Scroll progress in `[0, 1]`.
    pub fn scroll_percent(&self) -> f64 {
        self.scroll.percent()
    }

    /// The selection state.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// First selected address.
    pub fn selection_start(&self) -> usize {
        self.selection.start()
    }

    /// Last selected address (inclusive).
    pub fn selection_end(&self) -> usize {
        self.selection.end()
    }

    /// Fixed edge of the selection.
    pub fn selection_anchor(&self) -> usize {
        self.selection.anchor()
    }

    /// Row the keyboard cursor sits on.
    pub fn selected_row_address(&self) -> usize {
        self.selection.cursor()
    }

    /// Highlighted execution address.
    pub fn active_address(&self) -> Option<usize> {
        self.selection.active_address()
    }

    /// Bumped every time the rows must be redrawn.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Handles a scrollbar write from the host.
    ///
    /// Small deltas step rows through the source's row walker; large deltas
    /// jump proportionally. Ignored while the view is not focused.
    pub fn set_scroll_position(&mut self, position: usize) {
        if self.source.is_none() {
            return;
        }
        match self.scroll.set_position(position, self.line_count()) {
            ScrollRequest::None => {}
            ScrollRequest::Rows(rows) => self.scroll_by_rows(rows),
            ScrollRequest::Jump(address) => {
                debug!(target: "disasm.scroll", position, address, "scrollbar_jump");
                self.set_top_address(address);
            }
        }
    }

    /// Moves the view `rows` rendered rows up (negative) or down.
    pub fn scroll_by_rows(&mut self, rows: isize) {
        let Some(source) = self.source.clone() else {
            return;
        };
        self.set_top_address(source.row_address(self.top_address(), rows));
    }

    /// Moves the view so `address` is the top row, refreshing if it moved.
    pub fn set_top_address(&mut self, address: usize) {
        if self.source.is_none() {
            return;
        }
        if self.scroll.set_top_address(address, self.line_count()) {
            self.refresh();
        }
    }

    /// Re-reads the visible rows from the source.
    ///
    /// The top address is re-anchored to the first returned row, since the
    /// source may snap a mid-instruction address to a row start.
    pub fn refresh(&mut self) {
        let Some(source) = self.source.clone() else {
            return;
        };
        let count = source.line_count();
        self.lines = source.code_lines(self.top_address(), self.visible_rows);
        if let Some(address) = self.lines.first().and_then(|l| l.address) {
            self.scroll.set_top_address(address, count);
        }
        self.revision = self.revision.wrapping_add(1);
        trace!(target: "disasm.viewport", top = self.top_address(), rows = self.lines.len(), "refresh");
    }

    /// Marks the rows as changed without re-reading them.
    pub fn invalidate(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    /// True if a fully visible row carries `address`.
    ///
    /// The first row and the last row of the capacity window are treated
    /// as margins and never count as visible.
    pub fn is_address_visible(&self, address: usize) -> bool {
        let limit = self.visible_rows.saturating_sub(1).min(self.lines.len());
        self.lines
            .get(1..limit)
            .is_some_and(|rows| rows.iter().any(|l| l.address == Some(address)))
    }

    /// Scrolls so `address` lands at `position`, unless it is already visible.
    pub fn scroll_into_view(&mut self, address: usize, position: ScrollDisplayPosition) {
        if self.is_address_visible(address) {
            return;
        }
        let Some(source) = self.source.clone() else {
            return;
        };

        let rows = self.visible_rows as isize;
        let offset = match position {
            ScrollDisplayPosition::Top => -1,
            ScrollDisplayPosition::Center => -(rows / 2) + 1,
            ScrollDisplayPosition::Bottom => -rows + 2,
        };
        self.set_top_address(source.row_address(address, offset));

        // variable-width rows can leave the target just outside the margins
        if !self.is_address_visible(address) {
            let step = if self.top_address() < address { 1 } else { -1 };
            self.set_top_address(source.row_address(self.top_address(), step));
        }
    }

    /// Selects exactly one row and moves the cursor there.
    ///
    /// The address is clamped to the source's address space.
    pub fn select_single(&mut self, address: usize) {
        if self.source.is_none() {
            return;
        }
        let address = clamp_address(address, self.line_count());
        self.selection.select_single(address);
        self.invalidate();
    }

    /// Sets the execution pointer; a new pointer is clamped to the address
    /// space, selected and centered.
    pub fn set_active_address(&mut self, address: Option<usize>) {
        if self.source.is_none() {
            return;
        }
        let count = self.line_count();
        let address = address.map(|a| clamp_address(a, count));
        self.selection.set_active_address(address);
        match address {
            Some(address) => {
                self.select_single(address);
                self.scroll_into_view(address, ScrollDisplayPosition::Center);
            }
            None => self.invalidate(),
        }
    }

    /// Moves the cursor `rows` rendered rows, optionally extending the
    /// selection instead of replacing it.
    pub fn move_cursor(&mut self, rows: isize, extend: bool) {
        let Some(source) = self.source.clone() else {
            return;
        };
        let address = source.row_address(self.selected_row_address(), rows);
        if extend {
            self.resize_selection_to(address);
        } else {
            self.select_single(address);
            let position = if rows < 0 {
                ScrollDisplayPosition::Top
            } else {
                ScrollDisplayPosition::Bottom
            };
            self.scroll_into_view(address, position);
        }
    }

    /// Drags the free edge of the selection to `address`.
    pub fn resize_selection_to(&mut self, address: usize) {
        if self.source.is_none() {
            return;
        }
        let address = clamp_address(address, self.line_count());
        if let Some(position) = self.selection.resize_to(address) {
            self.scroll_into_view(address, position);
            self.invalidate();
        }
    }

    /// Selects the first row and shows it at the top.
    pub fn scroll_to_top(&mut self) {
        self.select_single(0);
        self.scroll_into_view(0, ScrollDisplayPosition::Top);
    }

    /// Selects the last row and shows it at the bottom.
    pub fn scroll_to_bottom(&mut self) {
        let Some(last) = self.line_count().checked_sub(1) else {
            return;
        };
        self.select_single(last);
        self.scroll_into_view(last, ScrollDisplayPosition::Bottom);
    }

    /// Selects `address` (clamped to the space) and centers it.
    pub fn go_to_address(&mut self, address: usize) {
        if self.source.is_none() {
            return;
        }
        let address = clamp_address(address, self.line_count());
        self.select_single(address);
        self.scroll_into_view(address, ScrollDisplayPosition::Center);
    }

    /// Rows moved by one page: the rows inside the visibility margins.
    pub fn page_rows(&self) -> usize {
        self.visible_rows.saturating_sub(2).max(1)
    }

    /// Moves (or extends) the cursor one page up.
    pub fn page_up(&mut self, extend: bool) {
        self.move_cursor(-(self.page_rows() as isize), extend);
    }

    /// Moves (or extends) the cursor one page down.
    pub fn page_down(&mut self, extend: bool) {
        self.move_cursor(self.page_rows() as isize, extend);
    }

    /// Mouse click on the materialized row at `index`.
    ///
    /// Rows without an address can't be selected.
    pub fn click_row(&mut self, index: usize, extend: bool) {
        let Some(address) = self.lines.get(index).and_then(|l| l.address) else {
            return;
        };
        if extend {
            self.resize_selection_to(address);
        } else {
            self.select_single(address);
        }
    }

    /// Mouse wheel: `notches` times the wheel delta, negative is up.
    pub fn wheel(&mut self, notches: isize) {
        self.scroll_by_rows(notches.saturating_mul(self.mouse_wheel_delta as isize));
    }

    /// Exports the selected range as text for the clipboard.
    ///
    /// Returns `None` without a line source.
    pub fn copy_selection(&self) -> Option<String> {
        let source = self.source.as_ref()?;
        Some(export::format_range(
            source.as_ref(),
            self.selection_start(),
            self.selection_end(),
            &self.copy_options,
        ))
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        let page = self.page_rows() as isize;
        if self.keymap.copy.matches(key_msg) {
            return self.copy_selection().map(copy_to_clipboard);
        } else if self.keymap.select_up.matches(key_msg) {
            self.move_cursor(-1, true);
        } else if self.keymap.select_down.matches(key_msg) {
            self.move_cursor(1, true);
        } else if self.keymap.select_page_up.matches(key_msg) {
            self.move_cursor(-page, true);
        } else if self.keymap.select_page_down.matches(key_msg) {
            self.move_cursor(page, true);
        } else if self.keymap.up.matches(key_msg) {
            self.move_cursor(-1, false);
        } else if self.keymap.down.matches(key_msg) {
            self.move_cursor(1, false);
        } else if self.keymap.page_up.matches(key_msg) {
            self.move_cursor(-page, false);
        } else if self.keymap.page_down.matches(key_msg) {
            self.move_cursor(page, false);
        } else if self.keymap.top.matches(key_msg) {
            self.scroll_to_top();
        } else if self.keymap.bottom.matches(key_msg) {
            self.scroll_to_bottom();
        }
        None
    }

    fn render_row(&self, line: &CodeLine, address_size: usize) -> String {
        let is_active = line.address.is_some() && line.address == self.active_address();
        let marker = if is_active { "> " } else { "  " };
        let mut row = format!(
            "{marker}{}",
            export::format_line(line, address_size, &self.copy_options)
        );
        if self.width > 0 {
            row = truncate_to_width(&row, self.width);
        }

        if is_active {
            self.styles.active.render(&row)
        } else if line.address.is_some_and(|a| self.selection.contains(a)) {
            self.styles.selected.render(&row)
        } else {
            row
        }
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        (Self::default(), None)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(ScrollbarMsg(position)) = msg.downcast_ref::<ScrollbarMsg>() {
            self.set_scroll_position(*position);
        } else if let Some(ActiveAddressMsg(address)) = msg.downcast_ref::<ActiveAddressMsg>() {
            self.set_active_address(*address);
        } else if let Some(GoToAddressMsg(address)) = msg.downcast_ref::<GoToAddressMsg>() {
            self.go_to_address(*address);
        } else if msg.downcast_ref::<CopyMsg>().is_some() {
            self.err = None;
        } else if let Some(CopyErrMsg(err)) = msg.downcast_ref::<CopyErrMsg>() {
            self.err = Some(err.clone());
        } else if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.scroll.is_active() {
                return self.handle_key(key_msg);
            }
        }
        None
    }

    fn view(&self) -> String {
        let address_size = self.source.as_ref().map_or(0, |s| s.address_size());
        let rows: Vec<String> = self
            .lines
            .iter()
            .map(|line| self.render_row(line, address_size))
            .collect();
        self.style.render(&rows.join("\n"))
    }
}

impl crate::Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.scroll.set_active(true);
        None
    }

    fn blur(&mut self) {
        self.scroll.set_active(false);
    }

    fn focused(&self) -> bool {
        self.scroll.is_active()
    }
}

/// Creates a command that places `text` on the system clipboard.
///
/// The command resolves to [`CopyMsg`] on success or [`CopyErrMsg`] when the
/// clipboard is unavailable (or the `clipboard-support` feature is off).
pub fn copy_to_clipboard(text: String) -> Cmd {
    use bubbletea_rs::tick as bubbletea_tick;
    bubbletea_tick(Duration::from_nanos(1), move |_| {
        #[cfg(feature = "clipboard-support")]
        {
            use clipboard::{ClipboardContext, ClipboardProvider};
            let res: Result<(), String> = (|| {
                let mut ctx: ClipboardContext = ClipboardProvider::new()
                    .map_err(|e| format!("Failed to create clipboard context: {}", e))?;
                ctx.set_contents(text.clone())
                    .map_err(|e| format!("Failed to write clipboard: {}", e))
            })();
            match res {
                Ok(()) => Box::new(CopyMsg(text.clone())) as Msg,
                Err(e) => Box::new(CopyErrMsg(e)) as Msg,
            }
        }
        #[cfg(not(feature = "clipboard-support"))]
        {
            let _ = &text;
            Box::new(CopyErrMsg("Clipboard support not enabled".to_string())) as Msg
        }
    })
}

fn truncate_to_width(s: &str, width: usize) -> String {
    let mut out = String::new();
    let mut current = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if current + w > width {
            break;
        }
        current += w;
        out.push(ch);
    }
    out
}

/// Creates a viewport with the default configuration.
pub fn new() -> Model {
    Model::default()
}
