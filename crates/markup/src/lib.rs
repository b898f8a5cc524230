#![deny(missing_docs)]
//! Handbook markup: the bracket directive language compiled into typed blocks.
//!
//! A paragraph goes through the pre-pass [`Normalizer`], the
//! [`SyntaxScanner`], and finally the recursive [`MarkupCompiler`], which
//! emits [`ParseBlock`] values into a [`BlockSink`].

/// Asset existence lookup and script-variant aware wrappers.
pub mod assets;
/// Typed presentation blocks and the sink they are emitted into.
pub mod blocks;
/// Recursive descent compiler for bracket directives.
pub mod compiler;
/// Pattern-based detection of malformed link and reference markup.
pub mod diagnostics;
/// Directive keyword tables for both script variants.
pub mod registry;
/// Pre-pass text normalization.
pub mod transform;

pub use assets::{
    AssetLookup, AssetSet, IMAGE_EXTENSIONS, NoConversion, ScriptConverter, VariantAwareAssets,
};
pub use blocks::{BlockSink, HeadingTier, ParseBlock};
pub use compiler::{MarkupCompiler, UnitContext, UnitOutcome};
pub use diagnostics::SyntaxScanner;
pub use registry::{
    CalloutDefinition, DirectiveKind, DirectiveRegistry, ScriptVariant, SuggestionRule,
    TermReplacement,
};
pub use transform::normalize::{Normalizer, PARAGRAPH_BREAK};
