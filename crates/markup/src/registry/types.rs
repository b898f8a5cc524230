//! Registry type definitions for directive keywords.

use serde::{Deserialize, Serialize};

use crate::blocks::HeadingTier;

/// Script variant a handbook is authored in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptVariant {
    /// Simplified Chinese keywords.
    #[default]
    Simplified,
    /// Traditional Chinese keywords.
    Traditional,
}

/// A callout box kind and the color it is drawn in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalloutDefinition {
    /// Box keyword (e.g., "实用建议").
    pub kind: String,
    /// Palette color name (e.g., "orange").
    pub color: String,
}

/// Literal terminology normalization applied by the pre-pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermReplacement {
    /// Text to find.
    pub from: String,
    /// Canonical replacement.
    pub to: String,
}

/// Suggestion shown when an unknown keyword contains any of `contains`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRule {
    /// Substrings that trigger the rule.
    pub contains: Vec<String>,
    /// Message shown to the author.
    pub suggestion: String,
}

/// What a keyword resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `图片`
    Image,
    /// `小标题` / `小小标题`
    Heading(HeadingTier),
    /// `加粗`
    Bold,
    /// `脚注`
    Footnote,
    /// `引用`, or its figure form prefixed with the figure word
    Reference {
        /// Whether this is the figure form
        figure: bool,
    },
    /// A callout box kind
    Callout {
        /// Color bound to the kind
        color: String,
    },
    /// A list alias
    List {
        /// Whether the list is numbered
        ordered: bool,
    },
}

/// Closed keyword sets of the bracket directive language.
///
/// Keywords are matched exactly and case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DirectiveRegistry {
    /// Image directive keyword.
    pub image: String,
    /// Numbered heading keyword.
    pub major_heading: String,
    /// Unnumbered heading keyword.
    pub minor_heading: String,
    /// Bold keyword.
    pub bold: String,
    /// Footnote keyword.
    pub footnote: String,
    /// Cross-reference keyword.
    pub reference: String,
    /// Word that marks a figure reference (e.g., "图").
    pub figure_prefix: String,
    /// Keyword of the bracketed line-break marker.
    pub line_break: String,
    /// Callout box kinds with their colors.
    pub callouts: Vec<CalloutDefinition>,
    /// Unordered list aliases.
    pub unordered_lists: Vec<String>,
    /// Ordered list aliases.
    pub ordered_lists: Vec<String>,
    /// Color token that callout boxes replace with their own color.
    pub emphasis_color: String,
    /// Terminology normalization table.
    pub terms: Vec<TermReplacement>,
    /// Substring-triggered suggestions for unknown keywords.
    pub suggestions: Vec<SuggestionRule>,
    /// Hint for a keyword close to a known one; `{keyword}` is substituted.
    pub similar_keyword_hint: String,
    /// Suggestions used when nothing more specific applies.
    pub fallback_suggestions: Vec<String>,
}

impl Default for DirectiveRegistry {
    fn default() -> Self {
        super::defaults::simplified_registry()
    }
}

impl DirectiveRegistry {
    /// Built-in simplified-script registry.
    pub fn simplified() -> Self {
        super::defaults::simplified_registry()
    }

    /// Built-in traditional-script registry.
    pub fn traditional() -> Self {
        super::defaults::traditional_registry()
    }

    /// Built-in registry for a script variant.
    pub fn for_variant(variant: ScriptVariant) -> Self {
        match variant {
            ScriptVariant::Simplified => super::defaults::simplified_registry(),
            ScriptVariant::Traditional => super::defaults::traditional_registry(),
        }
    }

    /// Keyword of the figure form of a cross reference (e.g., "图引用").
    pub fn figure_reference(&self) -> String {
        format!("{}{}", self.figure_prefix, self.reference)
    }

    /// Color of a callout kind.
    pub fn callout_color(&self, kind: &str) -> Option<&str> {
        self.callouts
            .iter()
            .find(|c| c.kind == kind)
            .map(|c| c.color.as_str())
    }

    /// Resolves a keyword.
    pub fn classify(&self, keyword: &str) -> Option<DirectiveKind> {
        if keyword.is_empty() {
            return None;
        }
        if keyword == self.image {
            return Some(DirectiveKind::Image);
        }
        if keyword == self.major_heading {
            return Some(DirectiveKind::Heading(HeadingTier::Major));
        }
        if keyword == self.minor_heading {
            return Some(DirectiveKind::Heading(HeadingTier::Minor));
        }
        if keyword == self.bold {
            return Some(DirectiveKind::Bold);
        }
        if keyword == self.footnote {
            return Some(DirectiveKind::Footnote);
        }
        if keyword == self.reference {
            return Some(DirectiveKind::Reference { figure: false });
        }
        if keyword == self.figure_reference() {
            return Some(DirectiveKind::Reference { figure: true });
        }
        if let Some(color) = self.callout_color(keyword) {
            return Some(DirectiveKind::Callout {
                color: color.to_string(),
            });
        }
        if self.unordered_lists.iter().any(|l| l == keyword) {
            return Some(DirectiveKind::List { ordered: false });
        }
        if self.ordered_lists.iter().any(|l| l == keyword) {
            return Some(DirectiveKind::List { ordered: true });
        }
        None
    }

    /// Every keyword an author may write, for suggestion matching.
    pub fn known_keywords(&self) -> Vec<&str> {
        let mut keywords = vec![
            self.image.as_str(),
            self.major_heading.as_str(),
            self.minor_heading.as_str(),
            self.bold.as_str(),
            self.footnote.as_str(),
            self.reference.as_str(),
        ];
        keywords.extend(self.callouts.iter().map(|c| c.kind.as_str()));
        keywords.extend(self.unordered_lists.iter().map(String::as_str));
        keywords.extend(self.ordered_lists.iter().map(String::as_str));
        keywords
    }
}
