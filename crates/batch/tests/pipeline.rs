//! Whole-collection runs through the batch pipeline.

use handbook_batch::{BatchConfig, BatchError, FailurePolicy, HandbookConfig, Pipeline, ingest};
use handbook_core::{Position, SourceUnit, StructuralError};
use handbook_markup::{AssetSet, HeadingTier, ParseBlock};

fn unit(serial: &str, title: &str, paragraphs: &[&str]) -> SourceUnit {
    SourceUnit::new(
        Position::from_serial(serial).unwrap(),
        title,
        paragraphs.iter().map(|p| p.to_string()).collect(),
    )
}

fn exercise_collection() -> Vec<SourceUnit> {
    vec![
        unit("7-1-0", "热身", &["【小标题：准备】慢跑", "【有序】抬腿；转髋"]),
        unit("1-0-0", "急救", &["基础知识"]),
        unit("6-0-0", "锻炼", &["【图片：封面】锻炼总览"]),
        unit("7-0-0", "拉伸", &["【实用建议：提示】量力而行"]),
        unit("6-2-0", "力量", &["【小标题：深蹲】【加粗：膝盖】朝前"]),
    ]
}

fn exercise_config(policy: FailurePolicy) -> BatchConfig {
    BatchConfig {
        handbook: Some(HandbookConfig {
            name: "锻炼手册".into(),
            chapters: (6..12).collect(),
            description: None,
        }),
        failure_policy: policy,
        max_threads: Some(2),
        ..BatchConfig::default()
    }
}

#[test]
fn handbook_is_renumbered_and_compiled() {
    let config = exercise_config(FailurePolicy::Continue);
    let assets = AssetSet::from_filenames(["封面.png"]);
    let report = Pipeline::new(&config, &assets)
        .run(exercise_collection())
        .unwrap();

    assert!(report.is_success());
    assert_eq!(report.handbook.as_deref(), Some("锻炼手册"));
    let tags: Vec<(&str, &str)> = report
        .results
        .iter()
        .map(|r| (r.tag.as_str(), r.original.as_str()))
        .collect();
    assert_eq!(
        tags,
        [("1-0-0", "6-0-0"), ("1-1-0", "6-2-0"), ("2-0-0", "7-0-0"), ("2-1-0", "7-1-0")]
    );
    assert_eq!(report.stats.total, 4);
    assert_eq!(report.stats.succeeded, 4);
    assert_eq!(report.tree.chapters, 2);

    let warmup = report.unit("2-1-0").unwrap();
    assert_eq!(
        warmup.blocks.as_deref().unwrap(),
        [
            ParseBlock::Heading {
                tier: HeadingTier::Major,
                title: "准备".into(),
                counter: Some(1),
            },
            ParseBlock::text("慢跑"),
            ParseBlock::List {
                ordered: true,
                items: vec!["抬腿".into(), "转髋".into()],
            },
        ]
    );
}

#[test]
fn continue_policy_records_failures_and_keeps_going() {
    let config = exercise_config(FailurePolicy::Continue);
    let assets = AssetSet::new();
    let report = Pipeline::new(&config, &assets)
        .run(exercise_collection())
        .unwrap();

    assert!(!report.is_success());
    assert_eq!(report.stats.failed, 1);
    assert_eq!(report.stats.succeeded, 3);
    assert_eq!(report.stats.skipped, 0);

    let failure = report.failures().next().unwrap();
    assert_eq!(failure.tag, "1-0-0");
    assert_eq!(
        failure.error.as_deref(),
        Some("image '封面' used in 1-0-0 (originally 6-0-0) does not exist")
    );
}

#[test]
fn abort_policy_stops_at_first_failure() {
    let config = exercise_config(FailurePolicy::Abort);
    let assets = AssetSet::new();
    let report = Pipeline::new(&config, &assets)
        .run(exercise_collection())
        .unwrap();

    assert_eq!(report.results.len(), 1);
    assert_eq!(report.stats.failed, 1);
    assert_eq!(report.stats.skipped, 3);
}

#[test]
fn unknown_directive_carries_suggestions() {
    let config = BatchConfig::default();
    let assets = AssetSet::new();
    let units = vec![unit("1-0-0", "概述", &["【小标退：错字】"])];
    let report = Pipeline::new(&config, &assets).run(units).unwrap();

    let failure = report.failures().next().unwrap();
    assert_eq!(
        failure.error.as_deref(),
        Some("undefined syntax '小标退' in 1-0-0")
    );
    assert_eq!(failure.suggestions[0], "应该是【小标题】，请检查文档中的错别字");
}

#[test]
fn warnings_are_counted_without_failing() {
    let config = BatchConfig::default();
    let assets = AssetSet::new();
    let units = vec![unit("1-0-0", "引用", &["见【引用：甲】【引用：乙】"])];
    let report = Pipeline::new(&config, &assets).run(units).unwrap();

    assert!(report.is_success());
    assert_eq!(report.stats.warnings, 1);
    assert_eq!(report.results[0].diagnostics.len(), 1);
}

#[test]
fn missing_parent_fails_the_run() {
    let config = BatchConfig::default();
    let assets = AssetSet::new();
    let units = vec![unit("1-0-0", "一", &[]), unit("2-1-0", "孤儿", &[])];
    let err = Pipeline::new(&config, &assets).run(units).unwrap_err();
    assert!(matches!(
        err,
        BatchError::Structural(StructuralError::MissingParent { .. })
    ));
}

#[test]
fn single_chapter_handbook_drops_other_chapters() {
    let mut config = exercise_config(FailurePolicy::Continue);
    if let Some(handbook) = config.handbook.as_mut() {
        handbook.chapters = vec![6];
    }
    let assets = AssetSet::from_filenames(["封面.png"]);
    let mut units = exercise_collection();
    units.push(unit("6-1-0", "热身", &[]));
    let report = Pipeline::new(&config, &assets).run(units).unwrap();
    assert_eq!(report.stats.total, 3);
    assert_eq!(report.outline, "1-0-0 锻炼\n├── 1-1-0 热身\n└── 1-2-0 力量\n");
}

#[test]
fn documents_are_ingested_from_paragraph_lists() {
    let documents = vec![
        ("1-0-0".to_string(), vec!["急救", "——", "第一段\n第二段", ""]),
        ("1-1-0".to_string(), vec!["止血", "——", "压迫止血"]),
    ];
    let units = ingest(documents).unwrap();
    assert_eq!(units[0].title, "急救");
    assert_eq!(units[0].paragraphs, ["第一段", "第二段"]);
    assert_eq!(units[1].paragraphs, ["压迫止血"]);

    let err = ingest(vec![("x-1".to_string(), vec!["t"])]).unwrap_err();
    assert!(matches!(err, StructuralError::InvalidSerial { .. }));
}

#[test]
fn report_serializes_to_json() {
    let config = BatchConfig::default();
    let assets = AssetSet::new();
    let units = vec![unit("3-0-0", "食物", &["【加粗：蔬菜】为主"])];
    let report = Pipeline::new(&config, &assets).run(units).unwrap();

    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["results"][0]["tag"], "1-0-0");
    assert_eq!(json["results"][0]["original"], "3-0-0");
    assert_eq!(json["results"][0]["blocks"][0]["type"], "bold");
    assert_eq!(json["stats"]["succeeded"], 1);
    assert!(json["results"][0].get("error").is_none());
}
