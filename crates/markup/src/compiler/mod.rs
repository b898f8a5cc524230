//! Markup compiler: normalizes, checks and parses unit paragraphs into blocks.
//!
//! - `context`: per-unit heading counter.
//! - `parse`: recursive directive dispatch.
//! - `suggest`: hints for unknown keywords.

mod context;
mod parse;
/// Suggestion heuristics for unknown directive keywords.
pub mod suggest;

pub use context::UnitContext;

use handbook_core::{Diagnostics, UnitError, validate_paragraphs};
use log::debug;

use crate::assets::AssetLookup;
use crate::blocks::{BlockSink, ParseBlock};
use crate::diagnostics::SyntaxScanner;
use crate::registry::DirectiveRegistry;
use crate::transform::normalize::Normalizer;

/// Result of compiling one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOutcome {
    /// Display identifier of the unit.
    pub unit: String,
    /// All scanner findings, severe and warning, in paragraph order.
    pub diagnostics: Diagnostics,
    /// The unit's blocks, or the error that aborted it.
    pub result: Result<Vec<ParseBlock>, UnitError>,
}

impl UnitOutcome {
    /// Whether the unit compiled.
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }

    /// Compiled blocks, if the unit succeeded.
    pub fn blocks(&self) -> Option<&[ParseBlock]> {
        self.result.as_deref().ok()
    }
}

/// Compiles bracket markup against a registry and an asset lookup.
///
/// Holds no per-unit state, so one compiler can be shared across threads.
pub struct MarkupCompiler<'a> {
    registry: &'a DirectiveRegistry,
    assets: &'a dyn AssetLookup,
    normalizer: Normalizer<'a>,
    scanner: SyntaxScanner<'a>,
}

impl<'a> MarkupCompiler<'a> {
    /// Creates a compiler.
    pub fn new(registry: &'a DirectiveRegistry, assets: &'a dyn AssetLookup) -> Self {
        Self {
            registry,
            assets,
            normalizer: Normalizer::new(registry, assets),
            scanner: SyntaxScanner::new(registry),
        }
    }

    /// Registry this compiler dispatches against.
    pub fn registry(&self) -> &DirectiveRegistry {
        self.registry
    }

    /// Runs the pre-pass over one paragraph.
    pub fn normalize(&self, text: &str) -> String {
        self.normalizer.normalize(text)
    }

    /// Scans one normalized paragraph for malformed link and reference markup.
    pub fn scan(&self, text: &str, unit: &str) -> Diagnostics {
        self.scanner.scan(text, unit).into()
    }

    /// Normalizes and parses one paragraph into `sink`.
    ///
    /// On error the blocks already pushed are left in `sink`.
    pub fn compile(
        &self,
        text: &str,
        ctx: &mut UnitContext,
        sink: &mut dyn BlockSink,
    ) -> Result<(), UnitError> {
        let normalized = self.normalizer.normalize(text);
        self.parse(&normalized, ctx, sink)
    }

    /// Compiles a unit's body paragraphs.
    ///
    /// Brackets are checked on the raw text, then every paragraph is
    /// normalized and scanned before any is parsed. A severe finding in any
    /// paragraph fails the whole unit. Parsing uses a fresh [`UnitContext`],
    /// and a failing paragraph discards everything compiled for the unit.
    pub fn compile_unit<S: AsRef<str>>(&self, unit: &str, paragraphs: &[S]) -> UnitOutcome {
        let mut diagnostics = Diagnostics::new();
        let result = self.compile_paragraphs(unit, paragraphs, &mut diagnostics);
        UnitOutcome {
            unit: unit.to_string(),
            diagnostics,
            result,
        }
    }

    fn compile_paragraphs<S: AsRef<str>>(
        &self,
        unit: &str,
        paragraphs: &[S],
        diagnostics: &mut Diagnostics,
    ) -> Result<Vec<ParseBlock>, UnitError> {
        validate_paragraphs(unit, paragraphs)?;

        let normalized: Vec<String> = paragraphs
            .iter()
            .map(|p| self.normalizer.normalize(p.as_ref()))
            .collect();
        for paragraph in &normalized {
            diagnostics.extend(self.scanner.scan(paragraph, unit));
        }
        if diagnostics.has_severe() {
            return Err(UnitError::SevereSyntax {
                unit: unit.to_string(),
                diagnostics: diagnostics.severe(),
            });
        }

        let mut ctx = UnitContext::new(unit);
        let mut blocks: Vec<ParseBlock> = Vec::new();
        for paragraph in &normalized {
            self.parse(paragraph, &mut ctx, &mut blocks)?;
        }
        debug!(
            "compiled {} blocks for {unit}: {}",
            blocks.len(),
            blocks
                .iter()
                .map(ParseBlock::kind_name)
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(blocks)
    }
}
