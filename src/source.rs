//! The line-data boundary between the viewport and whatever decodes the code.
//!
//! The viewport never looks at bytes. It asks a [`LineSource`] for rendered
//! [`CodeLine`] records starting at an address, and for the address reached
//! by moving a number of rendered rows. Rows and addresses are not 1:1: an
//! instruction can span several bytes, a block marker renders as an extra row
//! and decorative rows carry no address at all.
//!
//! [`FixedLineSource`] is a simple one-row-per-address source, handy for
//! hosts that display flat data and for tests.

use std::ops::BitOr;

/// Structural markers carried by a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct LineFlags(u8);

impl LineFlags {
    /// No markers.
    pub const NONE: Self = Self(0);
    /// First row of a code/data block.
    pub const BLOCK_START: Self = Self(1);
    /// Last row of a code/data block.
    pub const BLOCK_END: Self = Self(1 << 1);

    /// Returns true if every bit of `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true for block start or block end rows.
    pub const fn is_block_boundary(self) -> bool {
        self.0 & (Self::BLOCK_START.0 | Self::BLOCK_END.0) != 0
    }
}

impl BitOr for LineFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One rendered row, as produced by a [`LineSource`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeLine {
    /// Position of the row in the address space. `None` for purely
    /// decorative rows that cannot be navigated to.
    pub address: Option<usize>,
    /// Whether the address column should print `address`. Label rows share
    /// the address of the instruction they precede but don't show it.
    pub has_address: bool,
    /// Mnemonic and operands, or label/marker text.
    pub text: String,
    /// Hex dump of the instruction bytes, e.g. `"A9 00"`.
    pub byte_code: String,
    /// Indentation level in tenths of a column.
    pub indentation: u16,
    /// Structural markers.
    pub flags: LineFlags,
    /// User comment, if any.
    pub comment: Option<String>,
}

impl CodeLine {
    /// A row that carries and prints a real address.
    pub fn new(address: usize, text: impl Into<String>) -> Self {
        Self {
            address: Some(address),
            has_address: true,
            text: text.into(),
            ..Self::default()
        }
    }

    /// A decorative row: block markers, separators, labels.
    ///
    /// `address` is the location the row belongs to (if any); it is never
    /// printed.
    pub fn decoration(address: Option<usize>, text: impl Into<String>) -> Self {
        Self {
            address,
            has_address: false,
            text: text.into(),
            ..Self::default()
        }
    }

    /// Sets the byte-code column.
    pub fn with_byte_code(mut self, byte_code: impl Into<String>) -> Self {
        self.byte_code = byte_code.into();
        self
    }

    /// Attaches a comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Sets the indentation level.
    pub fn with_indentation(mut self, indentation: u16) -> Self {
        self.indentation = indentation;
        self
    }

    /// Sets the structural markers.
    pub fn with_flags(mut self, flags: LineFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Provider of rendered rows for an address space.
///
/// Implementations must give self-consistent answers for the duration of a
/// single viewport operation; the viewport never mutates the source.
pub trait LineSource: Send + Sync {
    /// Total number of addressable rows. Valid addresses are
    /// `0..line_count()`.
    fn line_count(&self) -> usize;

    /// Up to `count` rows starting at `start`, in display order. Returns
    /// fewer rows near the end of the space. A source may snap `start` to the
    /// nearest valid row start (e.g. the first byte of an instruction).
    fn code_lines(&self, start: usize, count: usize) -> Vec<CodeLine>;

    /// The address reached by moving `row_offset` rendered rows from `from`,
    /// honoring variable row widths. Results stay inside the address space.
    fn row_address(&self, from: usize, row_offset: isize) -> usize;

    /// Number of hexadecimal digits used to print an address.
    fn address_size(&self) -> usize;
}

/// A source with exactly one row per address.
///
/// ```rust
/// use disasm_viewport::source::{FixedLineSource, LineSource};
///
/// let source = FixedLineSource::new(10);
/// assert_eq!(source.row_address(8, 5), 9);
/// assert_eq!(source.code_lines(8, 5).len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct FixedLineSource {
    rows: usize,
    address_size: usize,
}

impl FixedLineSource {
    /// A source of `rows` addresses printed with four hex digits.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            address_size: 4,
        }
    }

    /// Overrides the printed address width.
    pub fn with_address_size(mut self, digits: usize) -> Self {
        self.address_size = digits;
        self
    }
}

impl LineSource for FixedLineSource {
    fn line_count(&self) -> usize {
        self.rows
    }

    fn code_lines(&self, start: usize, count: usize) -> Vec<CodeLine> {
        let end = start.saturating_add(count).min(self.rows);
        (start..end)
            .map(|addr| CodeLine::new(addr, "NOP").with_byte_code("EA"))
            .collect()
    }

    fn row_address(&self, from: usize, row_offset: isize) -> usize {
        let last = self.rows.saturating_sub(1);
        from.saturating_add_signed(row_offset).min(last)
    }

    fn address_size(&self) -> usize {
        self.address_size
    }
}
