//! Pattern checks for link and reference markup that would break rendering.
//!
//! Runs on normalized paragraphs, after bare URLs have been wrapped.

use handbook_core::{CLOSE_BRACKET, Diagnostic, LINK_OPEN, OPEN_BRACKET};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::registry::DirectiveRegistry;

static NESTED_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\url\{[^}]*\\url\{").expect("nested link pattern"));

static INCOMPLETE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)\\url\{[^}]*$").expect("incomplete link pattern"));

/// More adjacent `】【` pairs than this in one paragraph is severe.
pub const MAX_ADJACENT_MARKERS: usize = 3;

/// Detects malformed link and reference constructs.
#[derive(Debug, Clone, Copy)]
pub struct SyntaxScanner<'a> {
    registry: &'a DirectiveRegistry,
}

impl<'a> SyntaxScanner<'a> {
    /// Creates a scanner for a registry's reference keywords.
    pub fn new(registry: &'a DirectiveRegistry) -> Self {
        Self { registry }
    }

    /// Scans one paragraph. Findings are returned in a fixed order: nested
    /// links, incomplete links, malformed references, adjacent references,
    /// excessive markers.
    pub fn scan(&self, text: &str, unit: &str) -> Vec<Diagnostic> {
        let mut findings = Vec::new();

        if text.contains(LINK_OPEN) {
            if NESTED_LINK.is_match(text) {
                findings.push(Diagnostic::severe(unit, "nested link command"));
            }
            if INCOMPLETE_LINK.is_match(text) {
                findings.push(Diagnostic::severe(
                    unit,
                    "incomplete link command (missing closing brace)",
                ));
            }
        }

        let spans = bracket_spans(text);
        for span in spans.iter().filter(|s| self.is_reference(s.content)) {
            if span.content.contains(LINK_OPEN) {
                findings.push(Diagnostic::severe(
                    unit,
                    format!("malformed reference: link command inside 【{}】", span.content),
                ));
            }
        }

        let adjacent = self.adjacent_references(&spans);
        if adjacent > 0 {
            findings.push(Diagnostic::warning(
                unit,
                format!("consecutive reference markers without separator: {adjacent} occurrence(s)"),
            ));
        }

        let markers = text.matches("】【").count();
        if markers > MAX_ADJACENT_MARKERS {
            findings.push(Diagnostic::severe(
                unit,
                format!("excessive consecutive markers ({markers}), likely parse ambiguity"),
            ));
        }

        findings
    }

    fn is_reference(&self, content: &str) -> bool {
        let figure = self.registry.figure_reference();
        [self.registry.reference.as_str(), figure.as_str()]
            .into_iter()
            .any(|keyword| {
                content
                    .strip_prefix(keyword)
                    .is_some_and(|rest| rest.starts_with([':', '：']))
            })
    }

    /// Counts non-overlapping pairs of reference tokens with nothing between.
    fn adjacent_references(&self, spans: &[BracketSpan<'_>]) -> usize {
        let mut count = 0;
        let mut i = 0;
        while i + 1 < spans.len() {
            let (a, b) = (&spans[i], &spans[i + 1]);
            if a.end == b.start && self.is_reference(a.content) && self.is_reference(b.content) {
                count += 1;
                i += 2;
            } else {
                i += 1;
            }
        }
        count
    }
}

struct BracketSpan<'t> {
    start: usize,
    end: usize,
    content: &'t str,
}

/// Flat `【...】` spans: each opener paired with the next closer.
fn bracket_spans(text: &str) -> Vec<BracketSpan<'_>> {
    let mut spans = Vec::new();
    let mut offset = 0;
    while let Some(open) = text[offset..].find(OPEN_BRACKET) {
        let start = offset + open;
        let inner = start + OPEN_BRACKET.len_utf8();
        let Some(close) = text[inner..].find(CLOSE_BRACKET) else {
            break;
        };
        let end = inner + close + CLOSE_BRACKET.len_utf8();
        spans.push(BracketSpan {
            start,
            end,
            content: &text[inner..inner + close],
        });
        offset = end;
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use handbook_core::Severity;

    fn scan(text: &str) -> Vec<Diagnostic> {
        let registry = DirectiveRegistry::simplified();
        SyntaxScanner::new(&registry).scan(text, "1-1-0")
    }

    fn severities(findings: &[Diagnostic]) -> Vec<Severity> {
        findings.iter().map(|d| d.severity).collect()
    }

    #[test]
    fn clean_text_has_no_findings() {
        assert!(scan(r"见\url{https://a.cn}与【引用：表一】。").is_empty());
    }

    #[test]
    fn nested_link_is_severe() {
        let findings = scan(r"\url{\url{https://a.cn}}");
        assert_eq!(findings[0].message, "nested link command");
        assert!(findings[0].is_severe());
    }

    #[test]
    fn unclosed_link_is_severe() {
        let findings = scan(r"访问\url{https://a.cn");
        assert_eq!(severities(&findings), [Severity::Severe]);
        assert!(findings[0].message.starts_with("incomplete link"));
    }

    #[test]
    fn link_inside_reference_is_severe() {
        let findings = scan(r"【引用：\url{www.a.cn}】");
        assert_eq!(severities(&findings), [Severity::Severe]);
        assert!(findings[0].message.starts_with("malformed reference"));
    }

    #[test]
    fn adjacent_references_warn_only() {
        let findings = scan("【引用：a】【图引用：b】");
        assert_eq!(severities(&findings), [Severity::Warning]);
        assert!(findings[0].message.ends_with("1 occurrence(s)"));
    }

    #[test]
    fn separated_references_do_not_warn() {
        assert!(scan("【引用：a】和【引用：b】").is_empty());
    }

    #[test]
    fn marker_threshold() {
        assert!(scan("【a】【b】【c】【d】").is_empty());
        let findings = scan("【a】【b】【c】【d】【e】");
        assert_eq!(severities(&findings), [Severity::Severe]);
    }
}
