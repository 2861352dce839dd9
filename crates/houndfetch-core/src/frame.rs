//! Positioned, colored output of a compose pass.
//!
//! A [`Frame`] is plain data: no escape sequences for cursor movement yet,
//! only color codes inside the text. The [`crate::writer`] module turns it
//! into a terminal byte stream.

use crate::writer::strip_escapes;

/// The expanded logo raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoBlock {
    /// Raster rows joined by `\n`, colors expanded.
    pub text: String,
    /// Number of raster rows.
    pub line_count: usize,
}

/// One content row drawn at a fixed terminal column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameRow {
    /// 1-based terminal column; 0 means "no offset".
    pub column: usize,
    /// Row text, colors expanded.
    pub text: String,
}

/// Everything one pass draws.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    /// Logo raster, when the logo field is enabled.
    pub logo: Option<LogoBlock>,
    /// Content rows in canonical order.
    pub rows: Vec<FrameRow>,
    /// Blank lines appended so the cursor ends below the logo.
    pub padding: usize,
}

impl Frame {
    /// Number of content rows.
    #[must_use]
    pub fn content_lines(&self) -> usize {
        self.rows.len()
    }

    /// Number of logo rows (0 without a logo).
    #[must_use]
    pub fn logo_lines(&self) -> usize {
        self.logo.as_ref().map_or(0, |logo| logo.line_count)
    }

    /// Content rows with every escape sequence removed.
    #[must_use]
    pub fn plain_rows(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| strip_escapes(&row.text).into_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame() {
        let frame = Frame::default();
        assert_eq!(frame.content_lines(), 0);
        assert_eq!(frame.logo_lines(), 0);
        assert!(frame.plain_rows().is_empty());
    }

    #[test]
    fn test_plain_rows_strip_colors() {
        let frame = Frame {
            logo: None,
            rows: vec![FrameRow {
                column: 10,
                text: "\x1b[38;5;3mOS\x1b[0m: Linux".to_string(),
            }],
            padding: 0,
        };
        assert_eq!(frame.plain_rows(), vec!["OS: Linux"]);
    }

    #[test]
    fn test_logo_lines() {
        let frame = Frame {
            logo: Some(LogoBlock {
                text: "a\nb\nc".to_string(),
                line_count: 3,
            }),
            ..Frame::default()
        };
        assert_eq!(frame.logo_lines(), 3);
    }
}
