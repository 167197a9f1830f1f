//! Multi-row selection with an anchored edge.
//!
//! A selection is an inclusive address range `start..=end` plus an anchor
//! address that always equals one of the two edges. The anchor stays put
//! while the cursor drags the opposite edge; when the cursor crosses the
//! anchor the range flips around it.

use crate::scroll::ScrollDisplayPosition;
use tracing::trace;

/// Which edge of the range the anchor currently sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorEdge {
    /// `anchor == start`: the cursor drives `end`.
    Top,
    /// `anchor == end`: the cursor drives `start`.
    Bottom,
}

/// Selected range, cursor row and active (execution) address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    start: usize,
    end: usize,
    anchor: usize,
    cursor: usize,
    active: Option<usize>,
}

impl Selection {
    /// First selected address.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last selected address (inclusive).
    pub fn end(&self) -> usize {
        self.end
    }

    /// The fixed edge of the range.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Row the keyboard cursor sits on.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Highlighted execution address, independent of the selected range.
    pub fn active_address(&self) -> Option<usize> {
        self.active
    }

    /// Sets or clears the highlighted execution address.
    pub fn set_active_address(&mut self, address: Option<usize>) {
        self.active = address;
    }

    /// Edge the anchor sits on. A single-row selection reports `Top`.
    pub fn anchor_edge(&self) -> AnchorEdge {
        if self.anchor == self.start {
            AnchorEdge::Top
        } else {
            AnchorEdge::Bottom
        }
    }

    /// Returns true if `address` lies inside the selected range.
    pub fn contains(&self, address: usize) -> bool {
        (self.start..=self.end).contains(&address)
    }

    /// Collapses the selection to a single row and puts the cursor there.
    pub fn select_single(&mut self, address: usize) {
        self.start = address;
        self.end = address;
        self.anchor = address;
        self.cursor = address;
    }

    /// Drags the non-anchored edge to `address`.
    ///
    /// Returns `None` when the cursor is already there. Otherwise returns
    /// where the cursor row should be scrolled into view: toward the top
    /// when moving up, toward the bottom when moving down.
    pub fn resize_to(&mut self, address: usize) -> Option<ScrollDisplayPosition> {
        if address == self.cursor {
            return None;
        }

        match (self.anchor_edge(), address < self.anchor) {
            // anchor stays the start, end follows the cursor
            (AnchorEdge::Top, false) => self.end = address,
            // cursor crossed above a top anchor
            (AnchorEdge::Top, true) => {
                self.end = self.start;
                self.start = address;
            }
            // anchor stays the end, start follows the cursor
            (AnchorEdge::Bottom, true) => self.start = address,
            // cursor crossed below a bottom anchor
            (AnchorEdge::Bottom, false) => {
                self.start = self.end;
                self.end = address;
            }
        }

        let position = if self.cursor < address {
            ScrollDisplayPosition::Bottom
        } else {
            ScrollDisplayPosition::Top
        };
        self.cursor = address;
        trace!(target: "disasm.selection", start = self.start, end = self.end, anchor = self.anchor, "resize");
        Some(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(address: usize) -> Selection {
        let mut s = Selection::default();
        s.select_single(address);
        s
    }

    #[test]
    fn test_select_single_collapses_range() {
        let s = single(42);
        assert_eq!((s.start(), s.end(), s.anchor(), s.cursor()), (42, 42, 42, 42));
        assert_eq!(s.anchor_edge(), AnchorEdge::Top);
    }

    #[test]
    fn test_resize_up_then_cross_anchor() {
        let mut s = single(100);
        assert_eq!(s.resize_to(50), Some(ScrollDisplayPosition::Top));
        assert_eq!((s.start(), s.end()), (50, 100));
        assert_eq!(s.anchor(), 100);
        assert_eq!(s.anchor_edge(), AnchorEdge::Bottom);

        assert_eq!(s.resize_to(150), Some(ScrollDisplayPosition::Bottom));
        assert_eq!((s.start(), s.end()), (100, 150));
        assert_eq!(s.anchor(), 100);
        assert_eq!(s.anchor_edge(), AnchorEdge::Top);
    }

    #[test]
    fn test_resize_down_keeps_start() {
        let mut s = single(10);
        s.resize_to(12);
        s.resize_to(15);
        assert_eq!((s.start(), s.end(), s.cursor()), (10, 15, 15));
        s.resize_to(11);
        assert_eq!((s.start(), s.end()), (10, 11));
    }

    #[test]
    fn test_resize_back_onto_anchor() {
        let mut s = single(10);
        s.resize_to(5);
        s.resize_to(10);
        assert_eq!((s.start(), s.end()), (10, 10));
        assert_eq!(s.anchor(), 10);
    }

    #[test]
    fn test_resize_to_cursor_is_noop() {
        let mut s = single(7);
        assert_eq!(s.resize_to(7), None);
        assert_eq!(s, single(7));
    }

    #[test]
    fn test_active_address_independent_of_range() {
        let mut s = single(3);
        s.set_active_address(Some(20));
        assert_eq!(s.active_address(), Some(20));
        assert!(s.contains(3));
        assert!(!s.contains(20));
    }
}
