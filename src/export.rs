//! Plain-text export of an address range.
//!
//! Each exported row has the fixed column layout
//!
//! ```text
//! <address>  <byte code, 13 wide><indent><text, padded to comment column><comment>
//! ```
//!
//! where the address is upper-case hex zero-padded to the source's address
//! width (or `..` for rows that don't print an address) and block boundary
//! rows are wrapped in `--------` markers.

use crate::source::{CodeLine, LineSource};
use serde::Deserialize;
use tracing::{debug, warn};

const BLOCK_MARKER: &str = "--------";
const BYTE_CODE_WIDTH: usize = 13;
const NO_ADDRESS: &str = "..";

/// Column selection and layout for exported text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CopyOptions {
    /// Prefix rows with their address.
    pub addresses: bool,
    /// Include the byte-code column.
    pub byte_code: bool,
    /// Append comments.
    pub comments: bool,
    /// Minimum width of the text column when it is not empty.
    pub comment_column: usize,
    /// Rows requested from the source per batch.
    pub batch_size: usize,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            addresses: true,
            byte_code: true,
            comments: true,
            comment_column: 25,
            batch_size: 5000,
        }
    }
}

/// Formats one row, without the trailing line break.
pub fn format_line(line: &CodeLine, address_size: usize, options: &CopyOptions) -> String {
    let indent = " ".repeat(usize::from(line.indentation / 10));

    let mut text = line.text.trim().to_string();
    if line.flags.is_block_boundary() {
        text = format!("{BLOCK_MARKER}{text}{BLOCK_MARKER}");
    }
    let width = if text.is_empty() {
        0
    } else {
        options.comment_column.max(text.chars().count())
    };

    let mut out = String::new();
    if options.addresses {
        match line.address {
            Some(address) if line.has_address => {
                out.push_str(&format!("{address:0address_size$X}  "));
            }
            _ => out.push_str(&format!("{:<width$}  ", NO_ADDRESS, width = address_size)),
        }
    }
    if options.byte_code {
        out.push_str(&format!("{:<width$}", line.byte_code, width = BYTE_CODE_WIDTH));
    }
    out.push_str(&indent);
    out.push_str(&format!("{text:<width$}"));
    if options.comments {
        if let Some(comment) = line.comment.as_deref().filter(|c| !c.trim().is_empty()) {
            out.push_str(comment);
        }
    }
    out
}

/// Formats every row of `start..=end`, each terminated by `\n`.
///
/// Rows are pulled from the source in batches of `options.batch_size`. Each
/// batch after the first restarts at the last exported address, since a
/// source may snap any other start back onto a row already written, and
/// rows up to and including that address are skipped. The walk stops at the
/// first row past `end`, and also when a batch is empty or adds nothing new;
/// the range is then only partially exported.
pub fn format_range(
    source: &dyn LineSource,
    start: usize,
    end: usize,
    options: &CopyOptions,
) -> String {
    let address_size = source.address_size();
    let batch_size = options.batch_size.max(1);
    let mut out = String::new();
    let mut rows = 0usize;
    let mut last_exported: Option<usize> = None;

    'batches: loop {
        let batch = match last_exported {
            None => source.code_lines(start, batch_size),
            Some(last) => source.code_lines(last, batch_size.saturating_add(1)),
        };
        if batch.is_empty() {
            warn!(target: "disasm.export", ?last_exported, end, "selection_partially_unresolved");
            break;
        }

        let mut overlap = last_exported;
        let mut newest = None;
        for line in &batch {
            if let Some(last) = overlap {
                match line.address {
                    Some(address) if address == last => {
                        overlap = None;
                        continue;
                    }
                    Some(address) if address > last => overlap = None,
                    _ => continue,
                }
            }
            if line.address.is_some_and(|a| a > end) {
                break 'batches;
            }
            out.push_str(&format_line(line, address_size, options));
            out.push('\n');
            rows += 1;
            if line.address.is_some() {
                newest = line.address;
            }
        }

        // only rows past the last exported address reach `newest`

        match newest {
            Some(address) => {
                if address >= end {
                    break;
                }
                last_exported = Some(address);
            }
            _ => {
                warn!(target: "disasm.export", ?last_exported, end, "selection_partially_unresolved");
                break;
            }
        }
    }

    debug!(target: "disasm.export", start, end, rows, "formatted_range");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{FixedLineSource, LineFlags};

    #[test]
    fn test_instruction_row_layout() {
        let line = CodeLine::new(0x8000, "  LDA #$00 ")
            .with_byte_code("A9 00")
            .with_indentation(20)
            .with_comment("clear A");
        let out = format_line(&line, 4, &CopyOptions::default());
        assert_eq!(out, format!("8000  {:<13}  {:<25}clear A", "A9 00", "LDA #$00"));
    }

    #[test]
    fn test_row_without_address_uses_placeholder() {
        let label = CodeLine::decoration(Some(0x8000), "reset:");
        let out = format_line(&label, 6, &CopyOptions::default());
        assert!(out.starts_with(&format!("{:<6}  {:<13}", "..", "")));
        assert!(out.ends_with(&format!("{:<25}", "reset:")));
    }

    #[test]
    fn test_block_boundary_markers() {
        let line = CodeLine::decoration(None, "").with_flags(LineFlags::BLOCK_START);
        let options = CopyOptions {
            addresses: false,
            byte_code: false,
            ..CopyOptions::default()
        };
        let out = format_line(&line, 4, &options);
        assert_eq!(out, format!("{:<25}", "----------------"));
    }

    #[test]
    fn test_empty_text_is_not_padded() {
        let line = CodeLine::new(1, "   ").with_comment("only a comment");
        let options = CopyOptions {
            addresses: false,
            byte_code: false,
            ..CopyOptions::default()
        };
        assert_eq!(format_line(&line, 4, &options), "only a comment");
    }

    #[test]
    fn test_blank_comment_and_disabled_comments_are_skipped() {
        let line = CodeLine::new(1, "RTS").with_comment("  ");
        let options = CopyOptions {
            byte_code: false,
            ..CopyOptions::default()
        };
        let out = format_line(&line, 2, &options);
        assert_eq!(out.trim_end(), "01  RTS");

        let line = CodeLine::new(1, "RTS").with_comment("return");
        let options = CopyOptions {
            comments: false,
            ..CopyOptions::default()
        };
        assert!(!format_line(&line, 2, &options).contains("return"));
    }

    #[test]
    fn test_range_is_inclusive_and_ordered() {
        let source = FixedLineSource::new(10);
        let text = format_range(&source, 2, 4, &CopyOptions::default());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("0002"));
        assert!(lines[1].starts_with("0003"));
        assert!(lines[2].starts_with("0004"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_range_spans_batches() {
        let source = FixedLineSource::new(100);
        let options = CopyOptions {
            batch_size: 7,
            ..CopyOptions::default()
        };
        let text = format_range(&source, 10, 40, &options);
        assert_eq!(text.lines().count(), 31);
        assert!(text.lines().last().is_some_and(|l| l.starts_with("0028")));
    }

    /// Three-byte instructions; any start inside one snaps back to its
    /// first byte.
    struct WideSource {
        size: usize,
    }

    impl LineSource for WideSource {
        fn line_count(&self) -> usize {
            self.size
        }

        fn code_lines(&self, start: usize, count: usize) -> Vec<CodeLine> {
            (start / 3 * 3..self.size)
                .step_by(3)
                .take(count)
                .map(|addr| CodeLine::new(addr, "JMP").with_byte_code("4C 00 80"))
                .collect()
        }

        fn row_address(&self, from: usize, row_offset: isize) -> usize {
            let row = (from / 3).saturating_add_signed(row_offset);
            (row * 3).min(self.size.saturating_sub(3))
        }

        fn address_size(&self) -> usize {
            2
        }
    }

    fn exported_addresses(text: &str) -> Vec<&str> {
        text.lines().map(|l| &l[..2]).collect()
    }

    #[test]
    fn test_range_over_snapping_source_exports_each_row_once() {
        let source = WideSource { size: 30 };
        let expected = vec!["00", "03", "06", "09", "0C", "0F", "12", "15", "18", "1B"];

        for batch_size in [1, 2, 3, 4, 5000] {
            let options = CopyOptions {
                batch_size,
                ..CopyOptions::default()
            };
            let text = format_range(&source, 0, 27, &options);
            assert_eq!(exported_addresses(&text), expected, "batch_size {batch_size}");
        }
    }

    #[test]
    fn test_range_over_snapping_source_stops_at_end() {
        let source = WideSource { size: 30 };
        let options = CopyOptions {
            batch_size: 2,
            ..CopyOptions::default()
        };
        let text = format_range(&source, 6, 13, &options);
        assert_eq!(exported_addresses(&text), vec!["06", "09", "0C"]);
    }

    #[test]
    fn test_range_past_end_of_space_stops() {
        let source = FixedLineSource::new(5);
        let text = format_range(&source, 3, 50, &CopyOptions::default());
        assert_eq!(text.lines().count(), 2);
    }
}
