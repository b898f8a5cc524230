//! Bracket pairing checks for raw unit text.
//!
//! Every directive is enclosed in `【` `】`. A paragraph is only handed to the
//! markup compiler once its brackets pair up.

use crate::error::UnitError;

/// Opening marker of a bracketed directive.
pub const OPEN_BRACKET: char = '【';
/// Closing marker of a bracketed directive.
pub const CLOSE_BRACKET: char = '】';

/// Returns true if every closing bracket matches an earlier opening bracket
/// and none is left open at the end of `text`.
pub fn brackets_balanced(text: &str) -> bool {
    let mut depth = 0usize;
    for c in text.chars() {
        match c {
            OPEN_BRACKET => depth += 1,
            CLOSE_BRACKET => {
                if depth == 0 {
                    return false;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    depth == 0
}

/// Checks every paragraph of a unit, failing on the first unpaired one.
pub fn validate_paragraphs<S: AsRef<str>>(unit: &str, paragraphs: &[S]) -> Result<(), UnitError> {
    match paragraphs
        .iter()
        .position(|p| !brackets_balanced(p.as_ref()))
    {
        Some(index) => Err(UnitError::BracketMismatch {
            unit: unit.to_string(),
            paragraph: index + 1,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_balanced_and_plain_text() {
        assert!(brackets_balanced(""));
        assert!(brackets_balanced("普通段落"));
        assert!(brackets_balanced("【加粗：重点】后文【图片：示意图】"));
        assert!(brackets_balanced("【外【内】外】"));
    }

    #[test]
    fn rejects_closer_without_opener() {
        assert!(!brackets_balanced("】"));
        assert!(!brackets_balanced("【a】】【"));
    }

    #[test]
    fn rejects_unclosed_opener() {
        assert!(!brackets_balanced("【小标题：概述"));
        assert!(!brackets_balanced("【【a】"));
    }

    #[test]
    fn validate_reports_one_indexed_paragraph() {
        let paragraphs = ["正常", "【正常】", "【缺少闭合"];
        let err = validate_paragraphs("2-1-0", &paragraphs).unwrap_err();
        assert_eq!(
            err,
            UnitError::BracketMismatch {
                unit: "2-1-0".into(),
                paragraph: 3
            }
        );
        assert!(validate_paragraphs("2-1-0", &paragraphs[..2]).is_ok());
    }
}
