//! Line breaks and link wrapping.

use std::ops::Range;

use handbook_core::{LINK_CLOSE, LINK_OPEN};
use once_cell::sync::Lazy;
use regex::Regex;

use super::normalize::PARAGRAPH_BREAK;

/// A URL runs to whitespace, a bracket marker or full-width punctuation.
/// Braces end it too, since they delimit the link wrap.
static BARE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:https?://|www\.)[^\s【】；，。、（）{}]+").expect("bare url pattern")
});

static WRAPPED_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\url\{[^}]*\}").expect("wrapped url pattern"));

/// Rewrites the bracketed line-break marker and raw `//` into breaks.
///
/// A `//` directly after `http:` or `https:` is a URL scheme and is kept.
pub fn rewrite_line_breaks(text: &str, keyword: &str) -> String {
    let marker = format!("【{keyword}】");
    let text = text.replace(&marker, PARAGRAPH_BREAK);
    if !text.contains("//") {
        return text;
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text.as_str();
    while let Some(at) = rest.find("//") {
        out.push_str(&rest[..at]);
        if out.ends_with("http:") || out.ends_with("https:") {
            out.push_str("//");
        } else {
            out.push_str(PARAGRAPH_BREAK);
        }
        rest = &rest[at + 2..];
    }
    out.push_str(rest);
    out
}

/// Byte ranges of complete link-wrap spans in `text`.
pub fn link_spans(text: &str) -> Vec<Range<usize>> {
    WRAPPED_URL.find_iter(text).map(|m| m.range()).collect()
}

/// Wraps bare URLs in the link form; already wrapped URLs are left alone.
pub fn wrap_bare_urls(text: &str) -> String {
    if !text.contains("://") && !text.contains("www.") {
        return text.to_string();
    }

    let spans = link_spans(text);
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for m in BARE_URL.find_iter(text) {
        let inside = spans.iter().any(|span| span.contains(&m.start()));
        if inside || text[..m.start()].ends_with(LINK_OPEN) {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push_str(LINK_OPEN);
        out.push_str(m.as_str());
        out.push(LINK_CLOSE);
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}
