//! Literal symbol substitutions into typesetting-escaped forms.

/// Substitution pairs, applied in table order. `->` precedes `<-`, so
/// `<->` becomes `<$\rightarrow$`.
pub const SYMBOLS: [(&str, &str); 20] = [
    ("%", r"\%"),
    ("×", r"$\times$"),
    ("≤", r"$\le$"),
    ("≥", r"$\ge$"),
    ("÷", r"$\div$"),
    ("≈", r"$\approx$"),
    ("°", r"$^{\circ}$"),
    ("->", r"$\rightarrow$"),
    ("<-", r"$\leftarrow$"),
    ("℃", r"$^{\circ}$C"),
    ("Ⅰ", r"\uppercase\expandafter{\romannumeral1}"),
    ("Ⅱ", r"\uppercase\expandafter{\romannumeral2}"),
    ("Ⅲ", r"\uppercase\expandafter{\romannumeral3}"),
    ("Ⅳ", r"\uppercase\expandafter{\romannumeral4}"),
    ("~", r"$\sim$"),
    ("&", r"\&"),
    ("α", r"$\alpha$"),
    ("β", r"$\beta$"),
    ("γ", r"$\gamma$"),
    ("δ", r"$\delta$"),
];

/// Applies the symbol table to `text`.
pub fn replace_symbols(text: &str) -> String {
    let mut out = text.to_string();
    for (from, to) in SYMBOLS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_math_and_escapes() {
        assert_eq!(replace_symbols("50%"), r"50\%");
        assert_eq!(replace_symbols("3×4"), r"3$\times$4");
        assert_eq!(replace_symbols("37℃"), r"37$^{\circ}$C");
        assert_eq!(replace_symbols("A->B"), r"A$\rightarrow$B");
        assert_eq!(
            replace_symbols("第Ⅱ期"),
            r"第\uppercase\expandafter{\romannumeral2}期"
        );
    }

    #[test]
    fn right_arrow_wins_on_overlap() {
        assert_eq!(replace_symbols("A<->B"), r"A<$\rightarrow$B");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(replace_symbols("普通文本"), "普通文本");
    }
}
