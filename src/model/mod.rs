//! Document model types for formatted generated text.
//!
//! This module defines the intermediate representation (IR) shared by the
//! screen display and the PDF export: an ordered list of classified blocks,
//! each carrying styled text runs. Both consumers walk the same blocks, so
//! what is shown on screen paginates identically in the exported document.

mod block;
mod document;
mod run;

pub use block::{Block, BlockKind};
pub use document::{Document, Metadata};
pub use run::StyledRun;
