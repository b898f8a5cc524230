//! Recursive descent over bracket directives.

use handbook_core::{CLOSE_BRACKET, OPEN_BRACKET, UnitError, split_list_items};
use log::{debug, warn};

use super::MarkupCompiler;
use super::context::UnitContext;
use super::suggest::suggest;
use crate::blocks::{BlockSink, HeadingTier, ParseBlock};
use crate::registry::DirectiveKind;

/// The first `【...】` span of a paragraph.
struct Span<'t> {
    pre: &'t str,
    content: &'t str,
    after: &'t str,
}

fn first_span(text: &str) -> Option<Span<'_>> {
    let open = text.find(OPEN_BRACKET)?;
    let inner = open + OPEN_BRACKET.len_utf8();
    let close = inner + text[inner..].find(CLOSE_BRACKET)?;
    Some(Span {
        pre: &text[..open],
        content: &text[inner..close],
        after: &text[close + CLOSE_BRACKET.len_utf8()..],
    })
}

/// Splits directive content on its first colon of either width.
fn split_directive(content: &str) -> Option<(&str, &str)> {
    let at = content.find([':', '：'])?;
    let colon = content[at..].chars().next().map_or(1, char::len_utf8);
    Some((&content[..at], &content[at + colon..]))
}

/// What follows a handled span.
enum Flow {
    /// Keep parsing the text after the span.
    Continue,
    /// The span consumed the rest of the paragraph.
    Stop,
}

fn push_text(text: &str, sink: &mut dyn BlockSink) {
    if !text.trim().is_empty() {
        sink.push_block(ParseBlock::text(text));
    }
}

impl MarkupCompiler<'_> {
    /// Parses normalized text, emitting blocks in document order.
    ///
    /// Spans are consumed left to right in a loop; only callout bodies
    /// recurse. On error, blocks already pushed stay in `sink`; the caller
    /// discards them.
    pub(crate) fn parse(
        &self,
        text: &str,
        ctx: &mut UnitContext,
        sink: &mut dyn BlockSink,
    ) -> Result<(), UnitError> {
        let mut rest = text;
        while let Some(span) = first_span(rest) {
            // `pre` holds no opening bracket.
            push_text(span.pre, sink);
            let flow = match split_directive(span.content) {
                Some((directive, argument)) => {
                    self.parse_directive(directive, argument, &span, ctx, sink)?
                }
                None => self.parse_bare(&span, ctx, sink)?,
            };
            match flow {
                Flow::Continue => rest = span.after,
                Flow::Stop => return Ok(()),
            }
        }
        push_text(rest, sink);
        Ok(())
    }

    fn parse_directive(
        &self,
        directive: &str,
        argument: &str,
        span: &Span<'_>,
        ctx: &mut UnitContext,
        sink: &mut dyn BlockSink,
    ) -> Result<Flow, UnitError> {
        let Some(kind) = self.registry.classify(directive) else {
            return Err(self.unknown(directive, ctx));
        };

        match kind {
            DirectiveKind::Image => {
                let file = self.require_asset(argument, ctx)?;
                let caption = if span.after.is_empty() {
                    argument
                } else {
                    span.after
                };
                sink.push_block(ParseBlock::Image {
                    key: argument.to_string(),
                    file,
                    caption: caption.to_string(),
                });
                Ok(Flow::Stop)
            }
            DirectiveKind::Heading(tier) => {
                sink.push_block(heading(tier, argument, ctx));
                Ok(Flow::Continue)
            }
            DirectiveKind::Bold => {
                sink.push_block(ParseBlock::bold(argument));
                Ok(Flow::Continue)
            }
            DirectiveKind::Footnote => {
                sink.push_block(ParseBlock::footnote(argument));
                Ok(Flow::Continue)
            }
            DirectiveKind::Reference { figure } => {
                if figure {
                    self.require_asset(argument, ctx)?;
                }
                sink.push_block(ParseBlock::CrossReference {
                    target: argument.to_string(),
                    figure,
                });
                Ok(Flow::Continue)
            }
            DirectiveKind::Callout { color } => {
                let title = (!argument.is_empty()).then(|| argument.to_string());
                let block = self.callout(directive, &color, title, span.after, ctx)?;
                sink.push_block(block);
                Ok(Flow::Stop)
            }
            // Lists only have the bare form.
            DirectiveKind::List { .. } => Err(self.unknown(directive, ctx)),
        }
    }

    /// Handles `【content】` with no colon.
    fn parse_bare(
        &self,
        span: &Span<'_>,
        ctx: &mut UnitContext,
        sink: &mut dyn BlockSink,
    ) -> Result<Flow, UnitError> {
        if span.content.is_empty() {
            return Err(self.unknown("", ctx));
        }

        match self.registry.classify(span.content) {
            Some(DirectiveKind::List { ordered }) => {
                sink.push_block(ParseBlock::List {
                    ordered,
                    items: split_list_items(span.after),
                });
                Ok(Flow::Stop)
            }
            Some(DirectiveKind::Heading(tier)) => {
                sink.push_block(heading(tier, span.after, ctx));
                Ok(Flow::Stop)
            }
            Some(DirectiveKind::Callout { color }) => {
                let block = self.callout(span.content, &color, None, span.after, ctx)?;
                sink.push_block(block);
                Ok(Flow::Stop)
            }
            _ => {
                sink.push_block(ParseBlock::bold(span.content));
                Ok(Flow::Continue)
            }
        }
    }

    /// Builds a callout box whose body is the rest of the paragraph.
    fn callout(
        &self,
        kind: &str,
        color: &str,
        title: Option<String>,
        after: &str,
        ctx: &mut UnitContext,
    ) -> Result<ParseBlock, UnitError> {
        let recolored = if self.registry.emphasis_color.is_empty() {
            after.to_string()
        } else {
            after.replace(&self.registry.emphasis_color, color)
        };
        let mut body: Vec<ParseBlock> = Vec::new();
        self.parse(&recolored, ctx, &mut body)?;
        Ok(ParseBlock::CalloutBox {
            kind: kind.to_string(),
            color: color.to_string(),
            title,
            body,
        })
    }

    fn require_asset(&self, key: &str, ctx: &UnitContext) -> Result<String, UnitError> {
        if !self.assets.exists(key) {
            return Err(UnitError::MissingAsset {
                unit: ctx.unit().to_string(),
                asset: key.to_string(),
            });
        }
        Ok(self
            .assets
            .resolve_filename(key)
            .unwrap_or_else(|| key.to_string()))
    }

    fn unknown(&self, keyword: &str, ctx: &UnitContext) -> UnitError {
        let suggestions = suggest(self.registry, keyword);
        warn!(
            "undefined syntax '{keyword}' in {}; suggestions: {}",
            ctx.unit(),
            suggestions.join(" | ")
        );
        UnitError::UnknownDirective {
            unit: ctx.unit().to_string(),
            keyword: keyword.to_string(),
            suggestions,
        }
    }
}

fn heading(tier: HeadingTier, title: &str, ctx: &mut UnitContext) -> ParseBlock {
    let counter = match tier {
        HeadingTier::Major => Some(ctx.next_major()),
        HeadingTier::Minor => None,
    };
    debug!("{} heading '{title}' in {}", tier_name(tier), ctx.unit());
    ParseBlock::Heading {
        tier,
        title: title.to_string(),
        counter,
    }
}

fn tier_name(tier: HeadingTier) -> &'static str {
    match tier {
        HeadingTier::Major => "major",
        HeadingTier::Minor => "minor",
    }
}
