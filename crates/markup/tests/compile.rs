//! End-to-end compilation through the public API.

use handbook_core::UnitError;
use handbook_markup::{
    AssetLookup, AssetSet, DirectiveRegistry, HeadingTier, MarkupCompiler, NoConversion,
    ParseBlock, ScriptConverter, ScriptVariant, UnitContext, VariantAwareAssets,
};
use proptest::prelude::*;

struct SwapScript;

impl ScriptConverter for SwapScript {
    fn variants(&self, name: &str) -> Vec<String> {
        let swapped: String = name
            .chars()
            .map(|c| match c {
                '颈' => '頸',
                '頸' => '颈',
                '训' => '訓',
                '訓' => '训',
                '练' => '練',
                '練' => '练',
                other => other,
            })
            .collect();
        vec![swapped]
    }
}

#[test]
fn traditional_handbook_compiles_with_variant_assets() {
    let registry = DirectiveRegistry::for_variant(ScriptVariant::Traditional);
    let files = AssetSet::from_filenames(["颈部训练.png"]);
    let assets = VariantAwareAssets::new(&files, &SwapScript);
    let compiler = MarkupCompiler::new(&registry, &assets);

    let outcome = compiler.compile_unit(
        "2-1-0",
        &["【小標題：頸部】【圖片：頸部訓練】示意圖", "【無序】轉頭；聳肩"],
    );
    assert_eq!(
        outcome.blocks().unwrap(),
        [
            ParseBlock::Heading {
                tier: HeadingTier::Major,
                title: "頸部".into(),
                counter: Some(1),
            },
            ParseBlock::Image {
                key: "頸部訓練".into(),
                file: "颈部训练.png".into(),
                caption: "示意圖".into(),
            },
            ParseBlock::List {
                ordered: false,
                items: vec!["轉頭".into(), "聳肩".into()],
            },
        ]
    );
}

#[test]
fn simplified_keywords_are_unknown_in_traditional_registry() {
    let registry = DirectiveRegistry::traditional();
    let assets = AssetSet::new();
    let compiler = MarkupCompiler::new(&registry, &assets);
    let outcome = compiler.compile_unit("1-0-0", &["【小标题：概述】"]);
    assert!(matches!(
        outcome.result,
        Err(UnitError::UnknownDirective { ref keyword, .. }) if keyword == "小标题"
    ));
}

#[test]
fn terminology_is_normalized() {
    let registry = DirectiveRegistry::simplified();
    let assets = AssetSet::new();
    let compiler = MarkupCompiler::new(&registry, &assets);
    let mut ctx = UnitContext::new("1-0-0");
    let mut blocks = Vec::new();
    compiler
        .compile("签订劳动派遣协议", &mut ctx, &mut blocks)
        .unwrap();
    assert_eq!(blocks, [ParseBlock::text("签订劳务派遣协议")]);
}

#[test]
fn variant_lookup_without_converter_is_exact() {
    let files = AssetSet::from_filenames(["a.png"]);
    let assets = VariantAwareAssets::new(&files, &NoConversion);
    assert!(assets.exists("a"));
    assert!(!assets.exists("A"));
}

proptest! {
    #[test]
    fn bare_words_are_bold(word in "[a-z甲乙丙丁]{1,8}") {
        let registry = DirectiveRegistry::simplified();
        let assets = AssetSet::new();
        let compiler = MarkupCompiler::new(&registry, &assets);
        let mut ctx = UnitContext::new("1-0-0");
        let mut blocks = Vec::new();
        compiler.compile(&format!("【{word}】"), &mut ctx, &mut blocks).unwrap();
        prop_assert_eq!(blocks, vec![ParseBlock::bold(word)]);
    }

    #[test]
    fn reference_canonicalization_is_idempotent(
        parts in prop::collection::vec(
            prop_oneof![
                Just("【引用:a】"),
                Just("【引用：b】"),
                Just("【图引用：a】"),
                Just("图"),
                Just("文字"),
                Just("【引用："),
            ],
            0..10,
        )
    ) {
        let registry = DirectiveRegistry::simplified();
        let assets = AssetSet::from_filenames(["a.png"]);
        let compiler = MarkupCompiler::new(&registry, &assets);
        let text: String = parts.concat();
        let once = compiler.normalize(&text);
        prop_assert_eq!(compiler.normalize(&once), once);
    }

    #[test]
    fn plain_text_passes_through(text in "[a-z甲乙 ]{1,20}") {
        prop_assume!(!text.trim().is_empty());
        let registry = DirectiveRegistry::simplified();
        let assets = AssetSet::new();
        let compiler = MarkupCompiler::new(&registry, &assets);
        let outcome = compiler.compile_unit("1-0-0", &[text.as_str()]);
        prop_assert_eq!(outcome.blocks().unwrap(), &[ParseBlock::text(text.clone())][..]);
    }
}
