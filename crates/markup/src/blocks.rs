//! Type definitions for compiled blocks.

use serde::Serialize;

/// Heading tier of a bracket heading directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingTier {
    /// Numbered heading; advances the unit's heading counter.
    Major,
    /// Unnumbered heading.
    Minor,
}

/// A typed presentation block produced by the markup compiler.
///
/// Paragraph breaks are implicit: each `PlainText` is its own paragraph, and
/// a `\n` inside its text is an explicit break within it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ParseBlock {
    /// Text outside any directive.
    PlainText {
        /// The text, already normalized.
        text: String,
    },
    /// Emphasized text.
    Bold {
        /// The emphasized text.
        text: String,
    },
    /// Footnote attached at the current point.
    Footnote {
        /// Footnote content.
        text: String,
    },
    /// A figure. Terminal: everything after the directive is its caption.
    Image {
        /// Asset key as written by the author.
        key: String,
        /// Resolved file name including extension.
        file: String,
        /// Caption text.
        caption: String,
    },
    /// Reference to a labelled target.
    CrossReference {
        /// Referenced label.
        target: String,
        /// Whether the renderer prefixes the figure word.
        figure: bool,
    },
    /// A heading inside a unit body.
    Heading {
        /// Major or minor.
        tier: HeadingTier,
        /// Heading text.
        title: String,
        /// Counter value for major headings.
        counter: Option<u32>,
    },
    /// Ordered or unordered list.
    List {
        /// Whether items are numbered.
        ordered: bool,
        /// Item texts in order.
        items: Vec<String>,
    },
    /// Colored callout box with its own block body.
    CalloutBox {
        /// Box kind keyword.
        kind: String,
        /// Color bound to the kind.
        color: String,
        /// Optional box title.
        title: Option<String>,
        /// Blocks inside the box.
        body: Vec<ParseBlock>,
    },
}

impl ParseBlock {
    /// Creates a plain text block.
    pub fn text(text: impl Into<String>) -> Self {
        ParseBlock::PlainText { text: text.into() }
    }

    /// Creates a bold block.
    pub fn bold(text: impl Into<String>) -> Self {
        ParseBlock::Bold { text: text.into() }
    }

    /// Creates a footnote block.
    pub fn footnote(text: impl Into<String>) -> Self {
        ParseBlock::Footnote { text: text.into() }
    }

    /// Returns the variant name, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ParseBlock::PlainText { .. } => "plainText",
            ParseBlock::Bold { .. } => "bold",
            ParseBlock::Footnote { .. } => "footnote",
            ParseBlock::Image { .. } => "image",
            ParseBlock::CrossReference { .. } => "crossReference",
            ParseBlock::Heading { .. } => "heading",
            ParseBlock::List { .. } => "list",
            ParseBlock::CalloutBox { .. } => "calloutBox",
        }
    }
}

/// Append-only consumer of compiled blocks, in emission order.
pub trait BlockSink {
    /// Accepts the next block.
    fn push_block(&mut self, block: ParseBlock);
}

impl BlockSink for Vec<ParseBlock> {
    fn push_block(&mut self, block: ParseBlock) {
        self.push(block);
    }
}
