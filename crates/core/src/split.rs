//! Span-aware list item splitting.
//!
//! List bodies separate items with `;` or `；`. Link-wrapped spans
//! (`\url{...}`) may contain semicolons of their own, so splitting tracks
//! link depth and never cuts inside one.

/// Opening token of a link-wrapped span.
pub const LINK_OPEN: &str = "\\url{";
/// Closing character of a link-wrapped span.
pub const LINK_CLOSE: char = '}';

/// Splits `text` into trimmed, non-empty list items.
///
/// # Examples
///
/// ```
/// use handbook_core::split_list_items;
///
/// let items = split_list_items("一；二;\\url{https://a.cn/x;y} 三");
/// assert_eq!(items, ["一", "二", "\\url{https://a.cn/x;y} 三"]);
/// ```
pub fn split_list_items(text: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut link_depth = 0usize;
    let mut rest = text;

    while let Some(c) = rest.chars().next() {
        if rest.starts_with(LINK_OPEN) {
            link_depth += 1;
            current.push_str(LINK_OPEN);
            rest = &rest[LINK_OPEN.len()..];
            continue;
        }

        if c == LINK_CLOSE && link_depth > 0 {
            link_depth -= 1;
        } else if matches!(c, ';' | '；') && link_depth == 0 {
            flush_item(&mut current, &mut items);
            rest = &rest[c.len_utf8()..];
            continue;
        }

        current.push(c);
        rest = &rest[c.len_utf8()..];
    }

    flush_item(&mut current, &mut items);
    items
}

fn flush_item(current: &mut String, items: &mut Vec<String>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        items.push(trimmed.to_string());
    }
    current.clear();
}
