//! Core of houndfetch: logo documents, color placeholders, field lines and
//! the compositor that places them side by side.
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::use_self)] // "unnecessary structure name repetition"
#![allow(clippy::uninlined_format_args)] // "variables can be used directly in format!"
#![allow(clippy::match_same_arms)] // "match arms have identical bodies" (intentional for readability)
#![allow(clippy::doc_markdown)] // "item in documentation missing backticks"
//!
//! Nothing here touches the host directly. System facts arrive through the
//! [`FactSource`] trait; output leaves as a [`Frame`] that the
//! [`TerminalWriter`] serializes.
//!
//! # Example
//!
//! ```
//! use houndfetch_core::{Compositor, Field, StaticFacts};
//!
//! let facts = StaticFacts::new().with_user("alice").with_host("box");
//! let frame = Compositor::new(&facts)
//!     .compose(&[Field::UserLine, Field::UserUnderline])
//!     .unwrap();
//! assert_eq!(frame.plain_rows(), vec!["alice@box", "--------"]);
//! ```

pub mod color;
pub mod compose;
pub mod error;
pub mod facts;
pub mod field;
pub mod format;
pub mod frame;
pub mod logo;
pub mod writer;

pub use color::{ColorId, Palette};
pub use compose::{Compositor, LogoChoice, RenderState, RenderedField};
pub use error::{FetchError, FieldDataUnavailable};
pub use facts::{Fact, FactSource, MemoryUsage, StaticFacts};
pub use field::{Field, FieldData, Line};
pub use frame::{Frame, FrameRow, LogoBlock};
pub use logo::{Logo, LogoCatalog, LogoDocument};
pub use writer::TerminalWriter;
