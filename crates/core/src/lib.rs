#![deny(missing_docs)]
//! Handbook core: source units, diagnostics, bracket validation, list splitting,
//! and the chapter/section/subsection tree builder.

/// Bracket pairing checks for raw unit text.
pub mod brackets;
/// Core error and diagnostic types.
pub mod error;
/// Span-aware list item splitting.
pub mod split;
/// Document tree construction and canonical renumbering.
pub mod tree;
/// Source unit and position types.
pub mod unit;

pub use brackets::{CLOSE_BRACKET, OPEN_BRACKET, brackets_balanced, validate_paragraphs};
pub use error::{Diagnostic, Diagnostics, Severity, StructuralError, UnitError};
pub use split::{LINK_CLOSE, LINK_OPEN, split_list_items};
pub use tree::{DocumentNode, DocumentTree, NodeId, RenumberedUnit, TreeStatistics, build_document};
pub use unit::{Level, Position, SourceUnit, sort_units, unit_label};
