//! The compositor: logo beside a column of field lines.
//!
//! A pass walks [`Field::ALL`] in canonical order. The logo, if enabled,
//! goes first: it binds the accent color and fixes the column every later
//! row is drawn at. Each other field contributes its lines at that column.
//! Finally the frame is padded so the cursor ends below whichever of the two
//! columns is taller.

use tracing::debug;

use crate::color::Palette;
use crate::error::FetchError;
use crate::facts::{non_empty, FactSource};
use crate::field::{gather, render, Field, Line};
use crate::frame::{Frame, FrameRow, LogoBlock};
use crate::logo::{Logo, LogoCatalog, AUTO};
use crate::writer::TerminalWriter;

/// Columns between the logo's widest row and the content column.
pub const LOGO_GAP: usize = 2;

/// Output of rendering one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedField {
    Logo(Logo),
    Lines(Vec<Line>),
}

/// Where a pass is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No offset yet.
    Uninitialized,
    /// Logo drawn, offset fixed.
    LogoSet,
    /// At least one content field rendered.
    Composing,
    /// Padding computed.
    Finalized,
}

/// Bookkeeping for a single compose pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderState {
    offset: usize,
    logo_lines: usize,
    content_lines: usize,
    phase: Phase,
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            offset: 0,
            logo_lines: 0,
            content_lines: 0,
            phase: Phase::Uninitialized,
        }
    }

    /// Fix the offset from the logo. Only valid before any content.
    pub fn set_logo(&mut self, logo: &Logo) {
        debug_assert_eq!(self.phase, Phase::Uninitialized, "logo must be set once, first");
        self.offset = logo.max_width() + LOGO_GAP;
        self.logo_lines = logo.line_count();
        self.phase = Phase::LogoSet;
    }

    /// Count `n` emitted content rows.
    pub fn record_lines(&mut self, n: usize) {
        debug_assert_ne!(self.phase, Phase::Finalized);
        self.content_lines += n;
        self.phase = Phase::Composing;
    }

    /// End the pass; returns the blank lines to pad with.
    ///
    /// Padding only ever grows the output: a content column taller than
    /// the logo gets none.
    pub fn finalize(&mut self) -> usize {
        self.phase = Phase::Finalized;
        self.logo_lines.saturating_sub(self.content_lines)
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn logo_lines(&self) -> usize {
        self.logo_lines
    }

    #[must_use]
    pub const fn content_lines(&self) -> usize {
        self.content_lines
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }
}

/// How the logo document is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoChoice {
    /// Catalog name or `"auto"`.
    Named(String),
    /// A document supplied verbatim (e.g. read from a file).
    Document(String),
}

impl Default for LogoChoice {
    fn default() -> Self {
        Self::Named(AUTO.to_string())
    }
}

/// Builds frames from a fact source.
pub struct Compositor<'a> {
    source: &'a dyn FactSource,
    catalog: LogoCatalog,
    logo: LogoChoice,
}

impl std::fmt::Debug for Compositor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("catalog", &self.catalog)
            .field("logo", &self.logo)
            .finish_non_exhaustive()
    }
}

impl<'a> Compositor<'a> {
    /// Compositor using the built-in catalog and `auto` logo selection.
    #[must_use]
    pub fn new(source: &'a dyn FactSource) -> Self {
        Self {
            source,
            catalog: LogoCatalog::builtin(),
            logo: LogoChoice::default(),
        }
    }

    /// Select a catalog logo by name (or `"auto"`).
    #[must_use]
    pub fn with_logo(mut self, selector: impl Into<String>) -> Self {
        self.logo = LogoChoice::Named(selector.into());
        self
    }

    /// Use a raw logo document instead of the catalog.
    #[must_use]
    pub fn with_logo_document(mut self, document: impl Into<String>) -> Self {
        self.logo = LogoChoice::Document(document.into());
        self
    }

    /// Set the logo choice directly.
    #[must_use]
    pub fn with_logo_choice(mut self, choice: LogoChoice) -> Self {
        self.logo = choice;
        self
    }

    /// Parse the selected logo. A malformed document is fatal.
    pub fn load_logo(&self) -> Result<Logo, FetchError> {
        match &self.logo {
            LogoChoice::Named(selector) => {
                let document = self.catalog.resolve(selector, || {
                    non_empty("distro_id", self.source.distro_id())
                });
                debug!(logo = document.name, "selected logo");
                document.parse()
            }
            LogoChoice::Document(raw) => Logo::parse(raw),
        }
    }

    /// Render a single field.
    pub fn render_field(&self, field: Field) -> Result<RenderedField, FetchError> {
        if field == Field::Logo {
            return self.load_logo().map(RenderedField::Logo);
        }
        let lines = gather(field, self.source)
            .map(|data| render(&data))
            .unwrap_or_default();
        Ok(RenderedField::Lines(lines))
    }

    /// Compose the enabled fields into a frame.
    ///
    /// The order of `enabled` is irrelevant and duplicates are ignored;
    /// fields always stack in canonical order. Only a malformed logo fails
    /// the pass.
    pub fn compose(&self, enabled: &[Field]) -> Result<Frame, FetchError> {
        let mut state = RenderState::new();
        let mut palette = Palette::new();
        let mut frame = Frame::default();

        for field in Field::ALL.into_iter().filter(|f| enabled.contains(f)) {
            match self.render_field(field)? {
                RenderedField::Logo(logo) => {
                    // Bound once per pass, before any line is expanded
                    palette = palette.with_accent(logo.accent());
                    state.set_logo(&logo);
                    frame.logo = Some(LogoBlock {
                        text: logo.render(&palette),
                        line_count: logo.line_count(),
                    });
                }
                RenderedField::Lines(lines) => {
                    state.record_lines(lines.len());
                    frame.rows.extend(lines.iter().map(|line| FrameRow {
                        column: state.offset(),
                        text: palette.expand(line),
                    }));
                }
            }
        }

        frame.padding = state.finalize();
        debug!(
            offset = state.offset(),
            logo_lines = state.logo_lines(),
            content_lines = state.content_lines(),
            padding = frame.padding,
            "composed frame"
        );
        Ok(frame)
    }

    /// Compose and serialize in one step.
    pub fn render(&self, enabled: &[Field]) -> Result<String, FetchError> {
        self.compose(enabled)
            .map(|frame| TerminalWriter::new().render(&frame))
    }
}
