//! Color placeholders and their expansion to ANSI SGR sequences.
//!
//! Templates carry `${name}` tokens (`c0`..`c15`, `creset`, `caccent`).
//! A [`Palette`] maps each token to the escape sequence that selects the
//! color. `caccent` is an alias bound per render pass with
//! [`Palette::with_accent`], which returns a new palette instead of
//! mutating a shared table.

use std::borrow::Cow;
use std::fmt;
use std::sync::OnceLock;

use crossterm::style::{Attribute, Color, SetAttribute, SetForegroundColor};
use crossterm::Command;
use regex::{Captures, Regex};

/// Number of indexed palette colors addressable from templates.
pub const INDEXED_COLORS: u8 = 16;

/// Serialize a crossterm command to its ANSI text.
pub fn ansi(command: impl Command) -> String {
    let mut out = String::new();
    command
        .write_ansi(&mut out)
        .expect("writing to a String cannot fail");
    out
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]*)\}").expect("placeholder pattern is valid"))
}

/// A color a template can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorId {
    /// One of the 16 indexed colors (`c0`..`c15`).
    Indexed(u8),
    /// `creset`: clear all attributes.
    Reset,
    /// `caccent`: whatever the active logo declares.
    Accent,
}

impl ColorId {
    /// Indexed color, or `None` when `n` is outside `0..16`.
    #[must_use]
    pub fn indexed(n: u8) -> Option<Self> {
        (n < INDEXED_COLORS).then_some(Self::Indexed(n))
    }

    /// Parse a placeholder name (`c7`, `creset`, `caccent`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "creset" => Some(Self::Reset),
            "caccent" => Some(Self::Accent),
            _ => {
                let digits = name.strip_prefix('c')?;
                if digits.is_empty() || digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                Self::indexed(digits.parse().ok()?)
            }
        }
    }

    /// The `${name}` token for this color.
    #[must_use]
    pub fn placeholder(self) -> String {
        format!("${{{self}}}")
    }
}

impl fmt::Display for ColorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Indexed(n) => write!(f, "c{n}"),
            Self::Reset => f.write_str("creset"),
            Self::Accent => f.write_str("caccent"),
        }
    }
}

/// Escape sequences for every [`ColorId`], plus the accent binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    indexed: Vec<String>,
    reset: String,
    accent: Option<ColorId>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {
    /// 256-color foreground codes for `c0`..`c15`, accent unbound.
    #[must_use]
    pub fn new() -> Self {
        Self {
            indexed: (0..INDEXED_COLORS)
                .map(|n| ansi(SetForegroundColor(Color::AnsiValue(n))))
                .collect(),
            reset: ansi(SetAttribute(Attribute::Reset)),
            accent: None,
        }
    }

    /// A copy of this palette with `caccent` bound to `color`.
    ///
    /// Binding the accent to `Accent` itself leaves the binding unchanged.
    #[must_use]
    pub fn with_accent(&self, color: ColorId) -> Self {
        let accent = match color {
            ColorId::Accent => self.accent,
            concrete => Some(concrete),
        };
        Self {
            accent,
            ..self.clone()
        }
    }

    /// The color `caccent` currently resolves to.
    #[must_use]
    pub fn accent(&self) -> Option<ColorId> {
        self.accent
    }

    /// Escape sequence for `id`. An unbound accent is empty.
    #[must_use]
    pub fn lookup(&self, id: ColorId) -> &str {
        match id {
            ColorId::Indexed(n) => self.indexed.get(usize::from(n)).map_or("", String::as_str),
            ColorId::Reset => &self.reset,
            ColorId::Accent => match self.accent {
                Some(ColorId::Accent) | None => "",
                Some(concrete) => self.lookup(concrete),
            },
        }
    }

    /// Replace every `${name}` token in `template` with its escape sequence.
    ///
    /// Unknown names expand to nothing; a malformed community logo degrades
    /// instead of aborting the display.
    #[must_use]
    pub fn expand(&self, template: &str) -> String {
        placeholder_regex()
            .replace_all(template, |caps: &Captures<'_>| {
                ColorId::from_name(&caps[1]).map_or("", |id| self.lookup(id)).to_string()
            })
            .into_owned()
    }
}

/// Remove every `${...}` token; they occupy no terminal columns.
#[must_use]
pub fn strip_placeholders(text: &str) -> Cow<'_, str> {
    placeholder_regex().replace_all(text, "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_color_id_from_name() {
        assert_eq!(ColorId::from_name("c0"), Some(ColorId::Indexed(0)));
        assert_eq!(ColorId::from_name("c15"), Some(ColorId::Indexed(15)));
        assert_eq!(ColorId::from_name("creset"), Some(ColorId::Reset));
        assert_eq!(ColorId::from_name("caccent"), Some(ColorId::Accent));
        assert_eq!(ColorId::from_name("c16"), None);
        assert_eq!(ColorId::from_name("c"), None);
        assert_eq!(ColorId::from_name("c007"), None);
        assert_eq!(ColorId::from_name("red"), None);
    }

    #[test]
    fn test_color_id_placeholder_roundtrip() {
        for n in 0..INDEXED_COLORS {
            let id = ColorId::Indexed(n);
            let token = id.placeholder();
            let name = &token[2..token.len() - 1];
            assert_eq!(ColorId::from_name(name), Some(id));
        }
        assert_eq!(ColorId::Reset.placeholder(), "${creset}");
    }

    #[test]
    fn test_ansi_serializes_command() {
        assert_eq!(ansi(SetForegroundColor(Color::AnsiValue(9))), "\x1b[38;5;9m");
        assert_eq!(ansi(SetAttribute(Attribute::Reset)), "\x1b[0m");
    }

    #[test]
    fn test_palette_sgr_codes() {
        let palette = Palette::new();
        assert_eq!(palette.lookup(ColorId::Indexed(0)), "\x1b[38;5;0m");
        assert_eq!(palette.lookup(ColorId::Indexed(12)), "\x1b[38;5;12m");
        assert_eq!(palette.lookup(ColorId::Reset), "\x1b[0m");
    }

    #[test]
    fn test_unbound_accent_is_empty() {
        let palette = Palette::new();
        assert_eq!(palette.accent(), None);
        assert_eq!(palette.lookup(ColorId::Accent), "");
        assert_eq!(palette.expand("${caccent}x${creset}"), "x\x1b[0m");
    }

    #[test]
    fn test_with_accent_returns_new_palette() {
        let base = Palette::new();
        let bound = base.with_accent(ColorId::Indexed(4));
        assert_eq!(bound.lookup(ColorId::Accent), "\x1b[38;5;4m");
        // The base palette is untouched
        assert_eq!(base.lookup(ColorId::Accent), "");
    }

    #[test]
    fn test_rebinding_accent_replaces_previous() {
        let first = Palette::new().with_accent(ColorId::Indexed(1));
        let second = first.with_accent(ColorId::Indexed(2));
        assert_eq!(second.expand("${caccent}"), "\x1b[38;5;2m");
    }

    #[test]
    fn test_accent_to_accent_keeps_binding() {
        let palette = Palette::new()
            .with_accent(ColorId::Indexed(3))
            .with_accent(ColorId::Accent);
        assert_eq!(palette.accent(), Some(ColorId::Indexed(3)));
    }

    #[test]
    fn test_expand_replaces_tokens() {
        let palette = Palette::new().with_accent(ColorId::Indexed(6));
        let out = palette.expand("${caccent}OS${creset}: Linux");
        assert_eq!(out, "\x1b[38;5;6mOS\x1b[0m: Linux");
    }

    #[test]
    fn test_expand_unknown_token_is_empty() {
        let palette = Palette::new();
        assert_eq!(palette.expand("a${c99}b${bogus}c${}d"), "abcd");
    }

    #[test]
    fn test_expand_leaves_plain_dollars() {
        let palette = Palette::new();
        assert_eq!(palette.expand("cost: $5 {braces}"), "cost: $5 {braces}");
    }

    #[test]
    fn test_strip_placeholders() {
        assert_eq!(strip_placeholders("${c1}##${creset}  ${c2}#"), "##  #");
        assert_eq!(strip_placeholders("plain"), "plain");
    }

    proptest! {
        #[test]
        fn prop_expand_idempotent(text in "[a-z #$}{]{0,40}", accent in 0u8..16) {
            let palette = Palette::new().with_accent(ColorId::Indexed(accent));
            let once = palette.expand(&text);
            // Expansion can splice `$` and `{x}` into a fresh token
            prop_assume!(!once.contains("${"));
            prop_assert_eq!(palette.expand(&once), once.clone());
        }

        #[test]
        fn prop_expand_of_plain_text_is_identity(text in "[a-zA-Z0-9 .:/-]{0,60}") {
            prop_assert_eq!(Palette::new().expand(&text), text);
        }
    }
}
