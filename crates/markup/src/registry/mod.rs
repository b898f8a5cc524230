//! Directive keyword registry.
//!
//! - `types` - registry and keyword definitions
//! - `defaults` - built-in tables for simplified and traditional script

/// Built-in keyword tables.
pub mod defaults;
mod types;

pub use types::{
    CalloutDefinition, DirectiveKind, DirectiveRegistry, ScriptVariant, SuggestionRule,
    TermReplacement,
};
