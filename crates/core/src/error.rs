use serde::Serialize;
use thiserror::Error;

use crate::unit::Position;

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported but never fails the unit
    Warning,
    /// Fails the unit it was found in
    Severe,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Severe => f.write_str("severe"),
        }
    }
}

/// A single finding produced while checking a unit's markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Finding severity
    pub severity: Severity,
    /// Display identifier of the unit the finding belongs to
    pub unit: String,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Create a warning
    pub fn warning(unit: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            unit: unit.into(),
            message: message.into(),
        }
    }

    /// Create a severe finding
    pub fn severe(unit: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Severe,
            unit: unit.into(),
            message: message.into(),
        }
    }

    /// Whether this finding fails its unit
    pub fn is_severe(&self) -> bool {
        self.severity == Severity::Severe
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} in {}: {}", self.severity, self.unit, self.message)
    }
}

/// Collection of diagnostics gathered over one validation pass.
///
/// Kept in emission order so callers can merge per-unit collections back in
/// original unit order after parallel processing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create a new empty diagnostics collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a finding
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    /// Add a warning for a unit
    pub fn add_warning(&mut self, unit: impl Into<String>, message: impl Into<String>) {
        self.entries.push(Diagnostic::warning(unit, message));
    }

    /// Add a severe finding for a unit
    pub fn add_severe(&mut self, unit: impl Into<String>, message: impl Into<String>) {
        self.entries.push(Diagnostic::severe(unit, message));
    }

    /// Check if any finding is severe
    pub fn has_severe(&self) -> bool {
        self.entries.iter().any(Diagnostic::is_severe)
    }

    /// Check if there are any warnings
    pub fn has_warnings(&self) -> bool {
        self.entries.iter().any(|d| !d.is_severe())
    }

    /// Check if there are no findings at all
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get total count of all findings
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over all findings in emission order
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    /// Severe findings only
    pub fn severe(&self) -> Vec<Diagnostic> {
        self.entries.iter().filter(|d| d.is_severe()).cloned().collect()
    }

    /// Warnings only
    pub fn warnings(&self) -> Vec<Diagnostic> {
        self.entries
            .iter()
            .filter(|d| !d.is_severe())
            .cloned()
            .collect()
    }

    /// Consume the collection, returning the findings in emission order
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.entries
    }
}

impl Extend<Diagnostic> for Diagnostics {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl From<Vec<Diagnostic>> for Diagnostics {
    fn from(entries: Vec<Diagnostic>) -> Self {
        Self { entries }
    }
}

/// Errors raised while ingesting units or building the document tree.
///
/// Any of these is fatal to the whole build pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// A chapter-level unit carries chapter number 0.
    #[error("unit {unit} is misnamed: a chapter-level unit needs a nonzero chapter number")]
    InvalidChapter {
        /// Original position of the offending unit
        unit: Position,
    },
    /// The unit's parent is absent from the original collection.
    #[error("unit {unit} is missing its parent unit {parent}")]
    MissingParent {
        /// Original position of the child
        unit: Position,
        /// Original position the child requires
        parent: Position,
    },
    /// The parent exists but was not placed before the child.
    #[error("unit {unit} appears before its parent unit {parent}")]
    ParentOutOfOrder {
        /// Original position of the child
        unit: Position,
        /// Original position of the parent
        parent: Position,
    },
    /// Two units share one original position.
    #[error("unit {unit} appears more than once")]
    DuplicateUnit {
        /// The repeated position
        unit: Position,
    },
    /// A serial string is not `chapter-section-subsection`.
    #[error("invalid unit serial '{serial}': expected chapter-section-subsection")]
    InvalidSerial {
        /// The rejected serial
        serial: String,
    },
    /// A unit has no paragraphs, not even a title.
    #[error("unit {unit} is empty")]
    EmptyUnit {
        /// Position of the empty unit
        unit: Position,
    },
}

/// Fatal per-unit errors. Any of these aborts the current unit; blocks already
/// emitted for it must be discarded by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    /// A paragraph's opening and closing brackets do not pair up.
    #[error("unpaired brackets in {unit}, paragraph {paragraph}")]
    BracketMismatch {
        /// Unit display identifier
        unit: String,
        /// 1-indexed paragraph number
        paragraph: usize,
    },
    /// The scanner reported at least one severe finding.
    #[error("severe syntax errors in {unit}: {}", first_message(.diagnostics))]
    SevereSyntax {
        /// Unit display identifier
        unit: String,
        /// The severe findings
        diagnostics: Vec<Diagnostic>,
    },
    /// A bracketed directive keyword is not defined.
    #[error("undefined syntax '{keyword}' in {unit}")]
    UnknownDirective {
        /// Unit display identifier
        unit: String,
        /// The literal unrecognized keyword
        keyword: String,
        /// Likely intended spellings, for display
        suggestions: Vec<String>,
    },
    /// An image or figure reference names an asset that does not exist.
    #[error("image '{asset}' used in {unit} does not exist")]
    MissingAsset {
        /// Unit display identifier
        unit: String,
        /// The missing asset key
        asset: String,
    },
}

impl UnitError {
    /// Display identifier of the failed unit
    pub fn unit(&self) -> &str {
        match self {
            UnitError::BracketMismatch { unit, .. }
            | UnitError::SevereSyntax { unit, .. }
            | UnitError::UnknownDirective { unit, .. }
            | UnitError::MissingAsset { unit, .. } => unit,
        }
    }
}

fn first_message(diagnostics: &[Diagnostic]) -> String {
    match diagnostics {
        [] => String::from("no details"),
        [only] => only.message.clone(),
        [first, rest @ ..] => format!("{} (+{} more)", first.message, rest.len()),
    }
}
