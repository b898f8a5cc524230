//! Report types for a batch run.

use handbook_core::{Diagnostics, RenumberedUnit, TreeStatistics, UnitError};
use handbook_markup::{ParseBlock, UnitOutcome};
use serde::Serialize;

use crate::error::BatchError;

/// Outcome of one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitResult {
    /// Canonical `C-S-Z` tag.
    pub tag: String,
    /// Position the unit was authored at.
    pub original: String,
    /// Unit title.
    pub title: String,
    /// Compiled blocks (present on success).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<Vec<ParseBlock>>,
    /// Error message (present on failure).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Suggested fixes for an unknown directive.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    /// Scanner findings, including warnings on successful units.
    pub diagnostics: Diagnostics,
}

impl UnitResult {
    /// Builds the result of a compiled unit.
    pub fn new(unit: &RenumberedUnit, outcome: UnitOutcome) -> Self {
        let (blocks, error, suggestions) = match outcome.result {
            Ok(blocks) => (Some(blocks), None, Vec::new()),
            Err(err) => {
                let suggestions = match &err {
                    UnitError::UnknownDirective { suggestions, .. } => suggestions.clone(),
                    _ => Vec::new(),
                };
                (None, Some(err.to_string()), suggestions)
            }
        };
        Self {
            tag: unit.unit.position.to_string(),
            original: unit.original.to_string(),
            title: unit.unit.title.clone(),
            blocks,
            error,
            suggestions,
            diagnostics: outcome.diagnostics,
        }
    }

    /// Whether the unit failed.
    pub fn is_failure(&self) -> bool {
        self.error.is_some()
    }
}

/// Statistics for a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStats {
    /// Units in the canonical collection.
    pub total: u32,
    /// Units compiled successfully.
    pub succeeded: u32,
    /// Units that failed.
    pub failed: u32,
    /// Units never compiled because the run aborted.
    pub skipped: u32,
    /// Warning diagnostics across all compiled units.
    pub warnings: u32,
    /// Wall time of the run in milliseconds.
    pub processing_time_ms: f64,
}

/// Everything a batch run produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Handbook name, when a handbook was selected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handbook: Option<String>,
    /// Node counts of the document tree.
    pub tree: TreeStatistics,
    /// Indented rendering of the document tree.
    pub outline: String,
    /// Per-unit results in canonical order.
    pub results: Vec<UnitResult>,
    /// Run statistics.
    pub stats: BatchStats,
}

impl BatchReport {
    /// Whether every unit compiled.
    pub fn is_success(&self) -> bool {
        self.stats.failed == 0 && self.stats.skipped == 0
    }

    /// Failed units in canonical order.
    pub fn failures(&self) -> impl Iterator<Item = &UnitResult> {
        self.results.iter().filter(|r| r.is_failure())
    }

    /// Result of the unit with a canonical tag.
    pub fn unit(&self, tag: &str) -> Option<&UnitResult> {
        self.results.iter().find(|r| r.tag == tag)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, BatchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
