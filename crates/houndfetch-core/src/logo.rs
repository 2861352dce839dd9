//! Logo documents: parsing and the built-in catalog.
//!
//! A logo document is a `#accent c<N>` directive line followed by the raster
//! body, which may itself contain color placeholders:
//!
//! ```text
//! #accent c6
//! ${c6}  /\
//!  /  \${creset}
//! ```
//!
//! Placeholders are kept in [`Logo::body`] and expanded at render time, once
//! the accent binding for the pass exists.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::color::{strip_placeholders, ColorId, Palette};
use crate::error::FetchError;
use crate::facts::Fact;

/// Selector that asks the distro-detection collaborator for an id.
pub const AUTO: &str = "auto";

/// Name of the document used when nothing else matches.
pub const DEFAULT_LOGO: &str = "default";

const BUILTIN: &[(&str, &str)] = &[
    (DEFAULT_LOGO, include_str!("../logos/default.txt")),
    ("arch", include_str!("../logos/arch.txt")),
    ("debian", include_str!("../logos/debian.txt")),
    ("ubuntu", include_str!("../logos/ubuntu.txt")),
    ("fedora", include_str!("../logos/fedora.txt")),
    ("macos", include_str!("../logos/macos.txt")),
];

fn directive_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\A#accent c(\d{1,2})[ \t]*\n").expect("accent directive pattern is valid")
    })
}

/// A parsed logo document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    body: String,
    line_count: usize,
    max_width: usize,
    accent: ColorId,
}

impl Logo {
    /// Parse a logo document.
    ///
    /// Fails with [`FetchError::MalformedLogo`] when the leading accent
    /// directive is missing, names a color outside `c0..c15`, or no raster
    /// follows it.
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        let raw = raw.replace("\r\n", "\n");
        let caps = directive_regex().captures(&raw).ok_or_else(|| {
            FetchError::MalformedLogo("missing leading `#accent c<N>` directive".to_string())
        })?;

        let digits = &caps[1];
        let accent = digits
            .parse::<u8>()
            .ok()
            .and_then(ColorId::indexed)
            .ok_or_else(|| {
                FetchError::MalformedLogo(format!("accent color c{digits} is outside c0..c15"))
            })?;

        let directive_end = caps.get(0).map_or(0, |m| m.end());
        let rest = &raw[directive_end..];
        let body = rest.strip_suffix('\n').unwrap_or(rest);
        let visual = strip_placeholders(body);
        if visual.trim().is_empty() {
            return Err(FetchError::MalformedLogo("empty raster body".to_string()));
        }

        let line_count = visual.split('\n').count();
        let max_width = visual.split('\n').map(UnicodeWidthStr::width).max().unwrap_or(0);

        Ok(Self {
            body: body.to_string(),
            line_count,
            max_width,
            accent,
        })
    }

    /// Raster with placeholders intact.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Number of raster rows.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Widest raster row in terminal columns, placeholders excluded.
    #[must_use]
    pub fn max_width(&self) -> usize {
        self.max_width
    }

    /// Accent color declared by the directive.
    #[must_use]
    pub fn accent(&self) -> ColorId {
        self.accent
    }

    /// Body with placeholders expanded against `palette`.
    #[must_use]
    pub fn render(&self, palette: &Palette) -> String {
        palette.expand(&self.body)
    }
}

/// A named, embedded logo document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoDocument {
    /// Catalog name (distro id).
    pub name: &'static str,
    /// Raw document text.
    pub text: &'static str,
}

impl LogoDocument {
    /// Parse this document.
    pub fn parse(&self) -> Result<Logo, FetchError> {
        Logo::parse(self.text)
    }
}

/// Static table of logo documents keyed by distro id.
#[derive(Debug, Clone, Copy)]
pub struct LogoCatalog {
    documents: &'static [(&'static str, &'static str)],
}

impl Default for LogoCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LogoCatalog {
    /// The documents compiled into the binary.
    #[must_use]
    pub const fn builtin() -> Self {
        Self { documents: BUILTIN }
    }

    /// Names of every document, default first.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.documents.iter().map(|(name, _)| *name)
    }

    /// Look up a document by id (ASCII case-insensitive).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<LogoDocument> {
        self.documents
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(id.trim()))
            .map(|&(name, text)| LogoDocument { name, text })
    }

    /// The fallback document. Never requires detection.
    #[must_use]
    pub fn fallback(&self) -> LogoDocument {
        self.get(DEFAULT_LOGO).unwrap_or(LogoDocument {
            name: DEFAULT_LOGO,
            text: BUILTIN[0].1,
        })
    }

    /// Pick the document for `selector`.
    ///
    /// `"auto"` calls `detect` once and looks its answer up directly, so a
    /// detector that itself answers `"auto"` lands on the default instead of
    /// recursing. Unknown ids and detection failures fall back to the
    /// default document.
    pub fn resolve(&self, selector: &str, detect: impl FnOnce() -> Fact<String>) -> LogoDocument {
        if !selector.trim().eq_ignore_ascii_case(AUTO) {
            return self.lookup_or_fallback(selector);
        }
        match detect() {
            Ok(id) => {
                debug!(distro = %id, "detected distro");
                self.lookup_or_fallback(&id)
            }
            Err(err) => {
                debug!(%err, "distro detection failed, using default logo");
                self.fallback()
            }
        }
    }

    fn lookup_or_fallback(&self, id: &str) -> LogoDocument {
        self.get(id).unwrap_or_else(|| {
            debug!(id, "no logo for id, using default");
            self.fallback()
        })
    }
}
