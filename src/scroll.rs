//! Scrollbar ↔ address coordination.
//!
//! The scrollbar is a fixed-resolution, uniform projection of an address
//! space whose rows have non-uniform density. [`ScrollState`] owns the
//! scrollbar value, the top address and the reentrancy guard that keeps
//! derived scrollbar writes (caused by moving the top address) from being
//! interpreted as user scrolling.
//!
//! `ScrollState` does not talk to the line source itself: a scrollbar change
//! yields a [`ScrollRequest`] that the owning component resolves, since a
//! relative scroll needs the source's row walker.

use tracing::trace;

/// Default scrollbar resolution.
pub const DEFAULT_MAX_SCROLL_POSITION: usize = 10_000;

/// Scrollbar deltas up to this many units are treated as row steps.
pub const DEFAULT_SMALL_SCROLL_THRESHOLD: usize = 10;

/// Where a row should land when it is scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollDisplayPosition {
    /// One row below the top edge.
    Top,
    /// Vertically centered.
    #[default]
    Center,
    /// Two rows above the bottom edge of the capacity window.
    Bottom,
}

/// What the owner must do after a scrollbar write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollRequest {
    /// Nothing to recompute: no movement, an inactive view, or a derived write.
    None,
    /// Step this many rendered rows from the current top address.
    Rows(isize),
    /// Jump straight to this (already clamped) top address.
    Jump(usize),
}

/// Scrollbar value, top address and reentrancy guard for one view.
#[derive(Debug, Clone)]
pub struct ScrollState {
    position: usize,
    max_position: usize,
    last_position: usize,
    top_address: usize,
    ignore_updates: u32,
    small_scroll_threshold: usize,
    active: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SCROLL_POSITION)
    }
}

impl ScrollState {
    /// Creates an inactive scroll state at the top of the space.
    pub fn new(max_position: usize) -> Self {
        Self {
            position: 0,
            max_position,
            last_position: 0,
            top_address: 0,
            ignore_updates: 0,
            small_scroll_threshold: DEFAULT_SMALL_SCROLL_THRESHOLD,
            active: false,
        }
    }

    /// Sets the largest scrollbar delta still handled as a row step.
    pub fn with_small_scroll_threshold(mut self, threshold: usize) -> Self {
        self.small_scroll_threshold = threshold;
        self
    }

    /// Current scrollbar value, in `0..=max_position()`.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Scrollbar resolution.
    pub fn max_position(&self) -> usize {
        self.max_position
    }

    /// Address of the first visible row.
    pub fn top_address(&self) -> usize {
        self.top_address
    }

    /// Whether user scrolling is currently honored.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Marks the view as the focused/visible pane (or not).
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Scroll progress in `[0, 1]`.
    pub fn percent(&self) -> f64 {
        if self.max_position == 0 {
            return 0.0;
        }
        (self.position as f64 / self.max_position as f64).clamp(0.0, 1.0)
    }

    /// Handles a scrollbar write.
    ///
    /// While the view is inactive the write is reverted. Writes made while
    /// the reentrancy guard is held are recorded but not interpreted.
    /// Otherwise small deltas become row steps and large ones a proportional
    /// jump over `line_count` rows.
    pub fn set_position(&mut self, value: usize, line_count: usize) -> ScrollRequest {
        if !self.active {
            self.position = self.last_position;
            return ScrollRequest::None;
        }

        let value = value.min(self.max_position);
        self.position = value;
        let gap = value as isize - self.last_position as isize;
        self.last_position = value;

        if self.ignore_updates > 0 || gap == 0 {
            return ScrollRequest::None;
        }

        if gap.unsigned_abs() <= self.small_scroll_threshold {
            trace!(target: "disasm.scroll", gap, "row_step");
            ScrollRequest::Rows(gap)
        } else {
            let top = self.proportional_address(value, line_count);
            trace!(target: "disasm.scroll", gap, top, "proportional_jump");
            ScrollRequest::Jump(top)
        }
    }

    /// Moves the top address and writes the derived scrollbar value under the
    /// reentrancy guard. Returns true if the top address changed.
    pub fn set_top_address(&mut self, address: usize, line_count: usize) -> bool {
        let address = clamp_address(address, line_count);
        let changed = address != self.top_address;

        self.ignore_updates += 1;
        self.top_address = address;
        let derived = self.proportional_position(address, line_count);
        let request = self.set_position(derived, line_count);
        debug_assert_eq!(request, ScrollRequest::None);
        self.ignore_updates -= 1;

        changed
    }

    /// Forgets the scrollbar history, used when the line source is swapped.
    pub fn reset(&mut self, line_count: usize) {
        self.top_address = clamp_address(self.top_address, line_count);
        self.position = self.proportional_position(self.top_address, line_count);
        self.last_position = self.position;
    }

    fn proportional_address(&self, position: usize, line_count: usize) -> usize {
        if self.max_position == 0 {
            return 0;
        }
        let top = (line_count as f64 / self.max_position as f64 * position as f64).round();
        clamp_address(top as usize, line_count)
    }

    fn proportional_position(&self, address: usize, line_count: usize) -> usize {
        if line_count == 0 {
            return 0;
        }
        let pos = (address as f64 / line_count as f64 * self.max_position as f64).round();
        (pos as usize).min(self.max_position)
    }
}

/// Clamps an address to `[0, line_count - 1]` (0 for an empty space).
pub fn clamp_address(address: usize, line_count: usize) -> usize {
    address.min(line_count.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn active() -> ScrollState {
        let mut s = ScrollState::default();
        s.set_active(true);
        s
    }

    #[test]
    fn test_inactive_view_reverts_writes() {
        let mut s = ScrollState::default();
        assert_eq!(s.set_position(500, 1000), ScrollRequest::None);
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn test_small_gap_is_row_step() {
        let mut s = active();
        assert_eq!(s.set_position(10, 1000), ScrollRequest::Rows(10));
        assert_eq!(s.set_position(3, 1000), ScrollRequest::Rows(-7));
        assert_eq!(s.set_position(3, 1000), ScrollRequest::None);
    }

    #[test]
    fn test_large_gap_is_proportional_jump() {
        let mut s = active();
        // 2000 rows over 10000 positions: 0.2 rows per unit
        assert_eq!(s.set_position(5000, 2000), ScrollRequest::Jump(1000));
        assert_eq!(s.set_position(10_000, 2000), ScrollRequest::Jump(1999));
    }

    #[test]
    fn test_out_of_range_write_is_clamped() {
        let mut s = active();
        s.set_position(50_000, 100);
        assert_eq!(s.position(), DEFAULT_MAX_SCROLL_POSITION);
    }

    #[test]
    fn test_top_address_write_is_not_reinterpreted() {
        let mut s = active();
        assert!(s.set_top_address(500, 1000));
        assert_eq!(s.top_address(), 500);
        assert_eq!(s.position(), 5000);
        // Feeding the derived value back is a no-op
        let pos = s.position();
        assert_eq!(s.set_position(pos, 1000), ScrollRequest::None);
        assert_eq!(s.top_address(), 500);
    }

    #[test]
    fn test_top_address_clamped_to_space() {
        let mut s = active();
        s.set_top_address(5000, 10);
        assert_eq!(s.top_address(), 9);
        s.set_top_address(5, 0);
        assert_eq!(s.top_address(), 0);
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn test_threshold_is_configurable() {
        let mut s = ScrollState::new(100).with_small_scroll_threshold(0);
        s.set_active(true);
        assert_eq!(s.set_position(1, 100), ScrollRequest::Jump(1));
    }

    #[test]
    fn test_percent() {
        let mut s = active();
        s.set_position(2500, 10);
        assert!((s.percent() - 0.25).abs() < f64::EPSILON);
        assert_eq!(ScrollState::new(0).percent(), 0.0);
    }
}
