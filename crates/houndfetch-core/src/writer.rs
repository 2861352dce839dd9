//! Serialization of a [`Frame`] to a terminal byte stream.
//!
//! The logo is printed first, then the cursor is walked back up to the
//! logo's top row and every content row is drawn at an absolute column to
//! the right of it. No screen buffer is involved.
//!
//! A serialized frame always leaves the cursor at the start of the row just
//! below the taller of the two columns, so whatever is printed next cannot
//! overwrite the logo.

use std::borrow::Cow;
use std::io::{self, Write};
use std::sync::OnceLock;

use crossterm::cursor::{MoveToColumn, MoveToPreviousLine};
use regex::Regex;

use crate::color::ansi;
use crate::frame::Frame;

fn sgr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;]*m").expect("SGR pattern is valid"))
}

fn csi_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("CSI pattern is valid"))
}

/// Remove color (SGR) sequences, keeping cursor movement.
#[must_use]
pub fn strip_sgr(text: &str) -> Cow<'_, str> {
    sgr_regex().replace_all(text, "")
}

/// Remove every CSI escape sequence.
#[must_use]
pub fn strip_escapes(text: &str) -> Cow<'_, str> {
    csi_regex().replace_all(text, "")
}

/// Escape that moves the cursor to 1-based `column` on the current row.
#[must_use]
pub fn column_escape(column: usize) -> String {
    // crossterm columns are 0-based
    let zero_based = u16::try_from(column.saturating_sub(1)).unwrap_or(u16::MAX);
    ansi(MoveToColumn(zero_based))
}

/// Escape that moves the cursor to column 1 of the previous row.
#[must_use]
pub fn line_up_escape() -> String {
    ansi(MoveToPreviousLine(1))
}

/// Turns frames into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalWriter {
    color: bool,
}

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    /// Writer that keeps colors.
    #[must_use]
    pub const fn new() -> Self {
        Self { color: true }
    }

    /// Keep (`true`) or drop (`false`) color sequences.
    #[must_use]
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn paint<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.color {
            Cow::Borrowed(text)
        } else {
            strip_sgr(text)
        }
    }

    /// Serialize `frame`.
    ///
    /// Every content row ends with its newline; `frame.padding` newlines
    /// then carry the cursor past the logo's last row when the content
    /// column is shorter.
    #[must_use]
    pub fn render(&self, frame: &Frame) -> String {
        let mut out = String::new();

        if let Some(logo) = &frame.logo {
            out.push_str(&self.paint(&logo.text));
            let up = line_up_escape();
            for _ in 1..logo.line_count {
                out.push_str(&up);
            }
        }

        for row in &frame.rows {
            out.push_str(&column_escape(row.column));
            out.push_str(&self.paint(&row.text));
            out.push('\n');
        }

        out.push_str(&"\n".repeat(frame.padding));
        out
    }

    /// Serialize `frame` into `w` and flush.
    pub fn write_to(&self, w: &mut impl Write, frame: &Frame) -> io::Result<()> {
        w.write_all(self.render(frame).as_bytes())?;
        w.flush()
    }
}

/// Serialize `frame` with colors.
#[must_use]
pub fn write_frame(frame: &Frame) -> String {
    TerminalWriter::new().render(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame::{FrameRow, LogoBlock};

    fn row(column: usize, text: &str) -> FrameRow {
        FrameRow {
            column,
            text: text.to_string(),
        }
    }

    fn logo(text: &str, line_count: usize) -> Option<LogoBlock> {
        Some(LogoBlock {
            text: text.to_string(),
            line_count,
        })
    }

    #[test]
    fn test_column_escape_is_one_based() {
        assert_eq!(column_escape(12), "\x1b[12G");
        assert_eq!(column_escape(1), "\x1b[1G");
        // No offset lands on the first column
        assert_eq!(column_escape(0), "\x1b[1G");
    }

    /// Row the cursor ends on, counting from the logo's top row as 0.
    fn final_row(out: &str) -> usize {
        let up = line_up_escape();
        let mut row = 0usize;
        let mut rest = out;
        while !rest.is_empty() {
            if let Some(tail) = rest.strip_prefix(up.as_str()) {
                row = row.saturating_sub(1);
                rest = tail;
            } else {
                let mut chars = rest.chars();
                if chars.next() == Some('\n') {
                    row += 1;
                }
                rest = chars.as_str();
            }
        }
        row
    }

    #[test]
    fn test_rows_only() {
        let frame = Frame {
            logo: None,
            rows: vec![row(0, "a"), row(0, "b")],
            padding: 0,
        };
        assert_eq!(write_frame(&frame), "\x1b[1Ga\n\x1b[1Gb\n");
    }

    #[test]
    fn test_empty_frame_writes_nothing() {
        assert_eq!(write_frame(&Frame::default()), "");
    }

    #[test]
    fn test_logo_walks_cursor_back_up() {
        let frame = Frame {
            logo: logo("ab\ncd\nef", 3),
            rows: vec![row(4, "x")],
            padding: 2,
        };
        let up = line_up_escape();
        let expected = format!("ab\ncd\nef{up}{up}\x1b[4Gx\n\n\n");
        assert_eq!(write_frame(&frame), expected);
    }

    #[test]
    fn test_single_row_logo_has_no_cursor_up() {
        let frame = Frame {
            logo: logo("ab", 1),
            rows: vec![],
            padding: 1,
        };
        assert_eq!(write_frame(&frame), "ab\n");
    }

    #[test]
    fn test_empty_last_row_keeps_its_escape() {
        let frame = Frame {
            logo: None,
            rows: vec![row(1, "a"), row(1, "")],
            padding: 0,
        };
        assert_eq!(write_frame(&frame), "\x1b[1Ga\n\x1b[1G\n");
    }

    #[test]
    fn test_cursor_ends_below_taller_column() {
        // (logo rows, content rows) -> expected final row
        for (logo_rows, content_rows) in [(3, 0), (3, 1), (3, 3), (3, 5), (1, 0), (0, 2)] {
            let text = vec!["#"; logo_rows].join("\n");
            let frame = Frame {
                logo: (logo_rows > 0).then(|| LogoBlock {
                    text,
                    line_count: logo_rows,
                }),
                rows: (0..content_rows).map(|_| row(3, "x")).collect(),
                padding: logo_rows.saturating_sub(content_rows),
            };
            let out = write_frame(&frame);
            assert_eq!(
                final_row(&out),
                logo_rows.max(content_rows),
                "logo {logo_rows}, content {content_rows}: {out:?}"
            );
            assert!(out.ends_with('\n'));
        }
    }

    #[test]
    fn test_without_color_strips_sgr_only() {
        let frame = Frame {
            logo: logo("\x1b[38;5;1m#\x1b[0m\n#", 2),
            rows: vec![row(3, "\x1b[38;5;1mOS\x1b[0m: x")],
            padding: 0,
        };
        let out = TerminalWriter::new().with_color(false).render(&frame);
        assert!(!out.contains("38;5"));
        assert!(out.contains("\x1b[3GOS: x"));
        assert!(out.contains(&line_up_escape()));
    }

    #[test]
    fn test_write_to_buffer() {
        let frame = Frame {
            logo: None,
            rows: vec![row(2, "hi")],
            padding: 0,
        };
        let mut buf = Vec::new();
        TerminalWriter::new().write_to(&mut buf, &frame).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "\x1b[2Ghi\n");
    }

    #[test]
    fn test_strip_escapes_removes_cursor_moves() {
        let text = format!("{}a{}\x1b[38;5;2mb\x1b[0m", column_escape(5), line_up_escape());
        assert_eq!(strip_escapes(&text), "ab");
    }
}
