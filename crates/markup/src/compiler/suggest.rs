//! Suggestions for unknown directive keywords.

use crate::registry::DirectiveRegistry;

/// Likely intended spellings for an unknown keyword, most specific first.
///
/// The first registry rule whose trigger substring occurs in `keyword` comes
/// first, then a hint for every known keyword within edit distance. The
/// registry's fallback list is used when neither matches.
pub fn suggest(registry: &DirectiveRegistry, keyword: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();

    if let Some(rule) = registry
        .suggestions
        .iter()
        .find(|rule| rule.contains.iter().any(|c| keyword.contains(c.as_str())))
    {
        out.push(rule.suggestion.clone());
    }

    for known in registry.known_keywords() {
        let distance = edit_distance(keyword, known);
        let limit = (known.chars().count() / 2).max(1);
        if distance > 0 && distance <= limit {
            push_unique(
                &mut out,
                registry.similar_keyword_hint.replace("{keyword}", known),
            );
        }
    }

    if out.is_empty() {
        for fallback in &registry.fallback_suggestions {
            push_unique(&mut out, fallback.clone());
        }
    }
    out
}

fn push_unique(out: &mut Vec<String>, item: String) {
    if !out.contains(&item) {
        out.push(item);
    }
}

/// Levenshtein distance over characters.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_counts_characters() {
        assert_eq!(edit_distance("小标退", "小标题"), 1);
        assert_eq!(edit_distance("", "加粗"), 2);
        assert_eq!(edit_distance("实用建议", "实用建议"), 0);
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn typo_gets_rule_and_similar_keywords() {
        let registry = DirectiveRegistry::simplified();
        let suggestions = suggest(&registry, "小标退");
        assert_eq!(suggestions[0], "应该是【小标题】，请检查文档中的错别字");
        assert!(suggestions.contains(&"是否应为【小标题】？".to_string()));
    }

    #[test]
    fn heading_like_keyword_hits_rule() {
        let registry = DirectiveRegistry::simplified();
        let suggestions = suggest(&registry, "大标题");
        assert_eq!(
            suggestions[0],
            "使用【小标题：标题内容】或【小小标题：标题内容】"
        );
    }

    #[test]
    fn unrelated_keyword_gets_fallbacks() {
        let registry = DirectiveRegistry::simplified();
        assert_eq!(
            suggest(&registry, "notareal"),
            registry.fallback_suggestions
        );
    }
}
