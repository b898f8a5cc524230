//! The pre-pass: rewrites a raw paragraph into the form the parser expects.
//!
//! Steps, in order: line breaks, symbols, bold/footnote short forms,
//! cross-reference canonicalization, URL wrapping, terminology.

use log::debug;

use super::links::{rewrite_line_breaks, wrap_bare_urls};
use super::symbols::replace_symbols;
use crate::assets::AssetLookup;
use crate::registry::DirectiveRegistry;

/// Explicit break marker the pre-pass writes for line-break markup.
pub const PARAGRAPH_BREAK: &str = "\n";

const COLONS: [char; 2] = [':', '：'];
const CANONICAL_COLON: char = '：';

/// Pre-pass text normalizer for one registry and asset lookup.
pub struct Normalizer<'a> {
    registry: &'a DirectiveRegistry,
    assets: &'a dyn AssetLookup,
}

impl<'a> Normalizer<'a> {
    /// Creates a normalizer.
    pub fn new(registry: &'a DirectiveRegistry, assets: &'a dyn AssetLookup) -> Self {
        Self { registry, assets }
    }

    /// Runs the whole pre-pass over one paragraph.
    pub fn normalize(&self, text: &str) -> String {
        let text = rewrite_line_breaks(text, &self.registry.line_break);
        let text = replace_symbols(&text);
        let text = rewrite_short_form(&text, &self.registry.bold);
        let text = rewrite_short_form(&text, &self.registry.footnote);
        let text = self.rewrite_references(&text);
        let text = wrap_bare_urls(&text);
        self.replace_terms(text)
    }

    /// Canonicalizes cross-reference tokens.
    ///
    /// `【引用:x】` becomes `【图引用：x】` when `x` names an existing image and
    /// the token is not already preceded by the figure word; otherwise it
    /// becomes `【引用：x】`. Running this twice gives the same text as once.
    pub fn rewrite_references(&self, text: &str) -> String {
        let keyword = &self.registry.reference;
        let prefix = &self.registry.figure_prefix;
        let opener = format!("【{keyword}");

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(at) = rest.find(&opener) {
            let after_keyword = &rest[at + opener.len()..];
            let Some(argument) = after_keyword
                .strip_prefix(COLONS)
                .and_then(|arg| arg.find(['】', '\n']).map(|end| (arg, end)))
                .filter(|(arg, end)| arg[*end..].starts_with('】'))
                .map(|(arg, end)| &arg[..end])
            else {
                out.push_str(&rest[..at + opener.len()]);
                rest = after_keyword;
                continue;
            };

            out.push_str(&rest[..at]);
            let figure = !out.ends_with(prefix.as_str()) && self.assets.exists(argument);
            if figure {
                debug!("reference to '{argument}' resolved as figure");
                out.push('【');
                out.push_str(prefix);
            } else {
                out.push('【');
            }
            out.push_str(keyword);
            out.push(CANONICAL_COLON);
            out.push_str(argument);
            out.push('】');

            let consumed = opener.len() + colon_len(after_keyword) + argument.len() + '】'.len_utf8();
            rest = &rest[at + consumed..];
        }
        out.push_str(rest);
        out
    }

    fn replace_terms(&self, mut text: String) -> String {
        for term in &self.registry.terms {
            if !term.from.is_empty() && text.contains(&term.from) {
                text = text.replace(&term.from, &term.to);
            }
        }
        text
    }
}

fn colon_len(text: &str) -> usize {
    text.chars().next().map_or(0, char::len_utf8)
}

/// Rewrites `【keyword:x】` and `【keyword：x】` into `【keyword：x】` with `x`
/// trimmed, dropping the token entirely when `x` is blank.
fn rewrite_short_form(text: &str, keyword: &str) -> String {
    let opener = format!("【{keyword}");
    if !text.contains(&opener) {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = rest.find(&opener) {
        let after_keyword = &rest[at + opener.len()..];
        let body = after_keyword
            .strip_prefix(COLONS)
            .and_then(|arg| arg.find(['】', '\n']).map(|end| (arg, end)))
            .filter(|(arg, end)| arg[*end..].starts_with('】'));

        let Some((arg, end)) = body else {
            out.push_str(&rest[..at + opener.len()]);
            rest = after_keyword;
            continue;
        };

        out.push_str(&rest[..at]);
        let content = arg[..end].trim();
        if !content.is_empty() {
            out.push_str(&opener);
            out.push(CANONICAL_COLON);
            out.push_str(content);
            out.push('】');
        }
        rest = &arg[end + '】'.len_utf8()..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetSet;

    fn with_normalizer<F: FnOnce(&Normalizer<'_>)>(images: &[&str], f: F) {
        let registry = DirectiveRegistry::simplified();
        let assets = AssetSet::from_filenames(images.iter().copied());
        let normalizer = Normalizer::new(&registry, &assets);
        f(&normalizer);
    }

    #[test]
    fn short_forms_are_canonicalized() {
        assert_eq!(rewrite_short_form("【加粗: 重点 】", "加粗"), "【加粗：重点】");
        assert_eq!(rewrite_short_form("前【加粗：】后", "加粗"), "前后");
        assert_eq!(rewrite_short_form("【脚注:来源】", "脚注"), "【脚注：来源】");
        assert_eq!(rewrite_short_form("【加粗】", "加粗"), "【加粗】");
    }

    #[test]
    fn reference_to_existing_image_becomes_figure() {
        with_normalizer(&["肩部拉伸.png"], |n| {
            assert_eq!(n.rewrite_references("见【引用:肩部拉伸】"), "见【图引用：肩部拉伸】");
            assert_eq!(n.rewrite_references("见【引用：表一】"), "见【引用：表一】");
        });
    }

    #[test]
    fn figure_word_already_written_stays_generic() {
        with_normalizer(&["肩部拉伸.png"], |n| {
            assert_eq!(n.rewrite_references("如图【引用：肩部拉伸】"), "如图【引用：肩部拉伸】");
        });
    }

    #[test]
    fn reference_rewrite_is_idempotent() {
        with_normalizer(&["a.png", "b.jpg"], |n| {
            let text = "【引用:a】【引用：a】图【引用：b】【引用:c】【图引用：b】";
            let once = n.rewrite_references(text);
            assert_eq!(once, "【图引用：a】【图引用：a】图【引用：b】【引用：c】【图引用：b】");
            assert_eq!(n.rewrite_references(&once), once);
        });
    }

    #[test]
    fn full_pre_pass() {
        with_normalizer(&[], |n| {
            assert_eq!(
                n.normalize("劳动派遣比例≥50%【换行】详见 https://a.cn"),
                "劳务派遣比例$\\ge$50\\%\n详见 \\url{https://a.cn}"
            );
        });
    }
}
