//! Pre-pass transforms applied to every paragraph before parsing.
//!
//! - `links`: line-break markers and bare URL wrapping.
//! - `normalize`: the full pre-pass pipeline.
//! - `symbols`: fixed symbol substitution table.

/// Line-break rewriting and link-wrap helpers.
pub mod links;
/// The pre-pass pipeline.
pub mod normalize;
/// Symbol substitution table.
pub mod symbols;
