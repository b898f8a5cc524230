//! Default registry configurations for the two script variants.

use super::types::{CalloutDefinition, DirectiveRegistry, SuggestionRule, TermReplacement};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn callout(kind: &str, color: &str) -> CalloutDefinition {
    CalloutDefinition {
        kind: kind.to_string(),
        color: color.to_string(),
    }
}

fn rule(contains: &[&str], suggestion: &str) -> SuggestionRule {
    SuggestionRule {
        contains: strings(contains),
        suggestion: suggestion.to_string(),
    }
}

fn term(from: &str, to: &str) -> TermReplacement {
    TermReplacement {
        from: from.to_string(),
        to: to.to_string(),
    }
}

/// Keyword tables for handbooks written in simplified script.
///
/// # Example
///
/// ```
/// use handbook_markup::registry::defaults::simplified_registry;
/// use handbook_markup::DirectiveKind;
///
/// let registry = simplified_registry();
/// assert_eq!(registry.classify("加粗"), Some(DirectiveKind::Bold));
/// assert_eq!(registry.callout_color("实用建议"), Some("orange"));
/// ```
pub fn simplified_registry() -> DirectiveRegistry {
    DirectiveRegistry {
        image: "图片".into(),
        major_heading: "小标题".into(),
        minor_heading: "小小标题".into(),
        bold: "加粗".into(),
        footnote: "脚注".into(),
        reference: "引用".into(),
        figure_prefix: "图".into(),
        line_break: "换行".into(),
        callouts: vec![
            callout("名词解释", "green"),
            callout("操作步骤", "green"),
            callout("实用建议", "orange"),
            callout("编者的话", "red"),
            callout("就医建议", "red"),
        ],
        unordered_lists: strings(&["无序", "无序列表", "无序列"]),
        ordered_lists: strings(&["有序", "有序列表", "有序列"]),
        emphasis_color: "blue".into(),
        terms: vec![term("劳动派遣", "劳务派遣")],
        suggestions: vec![
            rule(&["标题"], "使用【小标题：标题内容】或【小小标题：标题内容】"),
            rule(&["弹力带", "髋关节"], "使用【加粗：弹力带髋关节松动】进行加粗显示"),
            rule(&["小标退"], "应该是【小标题】，请检查文档中的错别字"),
        ],
        similar_keyword_hint: "是否应为【{keyword}】？".into(),
        fallback_suggestions: strings(&[
            "检查语法是否正确",
            "参考支持的语法：【小标题】、【图片：名称】、【加粗：内容】等",
        ]),
    }
}

/// Keyword tables for handbooks written in traditional script.
pub fn traditional_registry() -> DirectiveRegistry {
    DirectiveRegistry {
        image: "圖片".into(),
        major_heading: "小標題".into(),
        minor_heading: "小小標題".into(),
        bold: "加粗".into(),
        footnote: "腳註".into(),
        reference: "引用".into(),
        figure_prefix: "圖".into(),
        line_break: "換行".into(),
        callouts: vec![
            callout("名詞解釋", "green"),
            callout("操作步驟", "green"),
            callout("實用建議", "orange"),
            callout("編者的話", "red"),
            callout("就醫建議", "red"),
        ],
        unordered_lists: strings(&["無序", "無序列表", "無序列"]),
        ordered_lists: strings(&["有序", "有序列表", "有序列"]),
        emphasis_color: "blue".into(),
        terms: vec![term("勞動派遣", "勞務派遣")],
        suggestions: vec![
            rule(&["標題"], "使用【小標題：標題內容】或【小小標題：標題內容】"),
            rule(&["小標退"], "應該是【小標題】，請檢查文件中的錯別字"),
        ],
        similar_keyword_hint: "是否應為【{keyword}】？".into(),
        fallback_suggestions: strings(&[
            "檢查語法是否正確",
            "參考支援的語法：【小標題】、【圖片：名稱】、【加粗：內容】等",
        ]),
    }
}
