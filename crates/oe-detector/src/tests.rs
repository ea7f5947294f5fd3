use crate::*;
use crate::detector::{semantic_suggestion, STRUCTURAL_SUGGESTION};
use crate::templates::{find_templates, TEMPLATE_SIMILARITY};
use oe_core::config::{DetectionStrategy, EngineConfig};
use oe_core::types::{DuplicateKind, DuplicateResult, SegmentRef, TemplateCategory};
use oe_core::{Script, Segment};
use std::collections::HashSet;

fn detector_with(strategies: &[DetectionStrategy]) -> DuplicateDetector {
    let cfg = EngineConfig::default().with_strategies(strategies);
    DuplicateDetector::from_engine_config(&cfg).unwrap()
}

fn similar_pair(
    source: &Segment,
    target: &Segment,
    similarity: f64,
    hint: &str,
) -> DuplicateResult {
    let (source, target) = (SegmentRef::whole(source), SegmentRef::whole(target));
    DuplicateResult::new(DuplicateKind::Similar, source, target, similarity, hint)
}

// ========== Normalizer ==========

#[test]
fn test_normalize_basic() {
    assert_eq!(normalize("  Hello, World!  "), "helloworld");
}

#[test]
fn test_normalize_fullwidth_punct() {
    assert_eq!(normalize("大家好，欢迎来到本期视频！"), "大家好欢迎来到本期视频");
}

#[test]
fn test_normalize_keeps_cjk_intact() {
    let out = normalize("《原创》内容：测试");
    assert_eq!(out, "原创内容测试");
    assert_eq!(out.chars().count(), 6);
}

#[test]
fn test_normalize_idempotent() {
    for text in ["Hello, World!", "大家好，欢迎来到 本期视频。", "ÀÉÎ ü —— ok", "", "İstanbul"] {
        let once = normalize(text);
        assert_eq!(normalize(&once), once, "not idempotent for {text:?}");
    }
}

#[test]
fn test_normalize_empty() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize(" ，。 "), "");
}

// ========== Metrics ==========

#[test]
fn test_levenshtein_classic() {
    let a: Vec<char> = "kitten".chars().collect();
    let b: Vec<char> = "sitting".chars().collect();
    assert_eq!(levenshtein(&a, &b), 3);
}

#[test]
fn test_levenshtein_cjk_counts_chars() {
    let a: Vec<char> = "今天天气很好".chars().collect();
    let b: Vec<char> = "今天天气不好".chars().collect();
    assert_eq!(levenshtein(&a, &b), 1);
}

#[test]
fn test_levenshtein_empty() {
    let a: Vec<char> = "abc".chars().collect();
    assert_eq!(levenshtein(&a, &[]), 3);
    assert_eq!(levenshtein(&[], &a), 3);
}

#[test]
fn test_edit_similarity_reflexive() {
    assert_eq!(edit_similarity("同一句话", "同一句话"), 1.0);
    assert_eq!(edit_similarity("a", "a"), 1.0);
}

#[test]
fn test_edit_similarity_symmetric() {
    let pairs = [("今天天气很好", "今天天气不错"), ("abc", "abd"), ("短", "很长的一句话")];
    for (a, b) in pairs {
        assert_eq!(edit_similarity(a, b), edit_similarity(b, a));
    }
}

#[test]
fn test_edit_similarity_degenerate() {
    assert_eq!(edit_similarity("", ""), 1.0);
    assert_eq!(edit_similarity("", "abc"), 0.0);
    assert_eq!(edit_similarity("，。", "abc"), 0.0);
}

#[test]
fn test_edit_similarity_range() {
    let s = edit_similarity("完全不同", "xyz");
    assert!((0.0..=1.0).contains(&s));
    assert_eq!(s, 0.0);
}

#[test]
fn test_edit_similarity_ignores_case_and_punct() {
    assert_eq!(edit_similarity("Hello, World", "hello world!"), 1.0);
}

#[test]
fn test_jaccard_empty_sets() {
    let empty: std::collections::BTreeSet<u8> = Default::default();
    assert_eq!(jaccard(&empty, &empty), 0.0);
}

// ========== Structure ==========

#[test]
fn test_structural_topic_forms() {
    let tags = structural_features("人工智能是未来的方向");
    assert!(tags.contains(&StructuralTag::TopicIs));
    let tags = structural_features("这个工具可以节省时间");
    assert!(tags.contains(&StructuralTag::TopicCan));
}

#[test]
fn test_structural_marker_needs_both_sides() {
    let tags = structural_features("是的");
    assert!(!tags.contains(&StructuralTag::TopicIs));
}

#[test]
fn test_structural_connectives() {
    let tags = structural_features("因为天气冷，所以多穿衣服，但是别太厚");
    assert!(tags.contains(&StructuralTag::Causal));
    assert!(tags.contains(&StructuralTag::Contrastive));
    let tags = structural_features("If it rains, however, we stay home");
    assert!(tags.contains(&StructuralTag::Conditional));
    assert!(tags.contains(&StructuralTag::Contrastive));
}

#[test]
fn test_structural_similarity_identical_shapes() {
    let a = "因为价格低，所以卖得好";
    let b = "因为质量高，所以口碑好";
    assert_eq!(structural_similarity(a, b), 1.0);
}

#[test]
fn test_structural_similarity_featureless() {
    assert_eq!(structural_similarity("嗯", "啊"), 0.0);
}

// ========== Templates ==========

#[test]
fn test_find_templates_offsets_in_chars() {
    let hits = find_templates("开场。接下来看第二部分");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].category, TemplateCategory::Transition);
    assert_eq!(hits[0].offset, 3);
}

#[test]
fn test_find_templates_every_occurrence() {
    let hits = find_templates("接下来说A，接下来说B");
    assert_eq!(hits.len(), 2);
}

// ========== Exact pass ==========

#[test]
fn test_exact_scenario_two_identical_segments() {
    let line = "大家好，欢迎来到本期视频";
    let script = Script::from_texts("s", &[line, line], 3.0);
    let results = DuplicateDetector::default().detect_exact_duplicates(&script);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind, DuplicateKind::Exact);
    assert_eq!(results[0].similarity, 1.0);
    assert_eq!(results[0].source.segment_id, script.segments[0].id);
    assert_eq!(results[0].target.segment_id, script.segments[1].id);
}

#[test]
fn test_exact_matches_after_normalization() {
    let script = Script::from_texts("s", &["Hello, World", "hello world!", "other"], 3.0);
    let results = DuplicateDetector::default().detect_exact_duplicates(&script);
    assert_eq!(results.len(), 1);
}

#[test]
fn test_exact_skips_blank_segments() {
    let script = Script::from_texts("s", &["，", "。"], 3.0);
    assert!(DuplicateDetector::default().detect_exact_duplicates(&script).is_empty());
}

// ========== Semantic pass ==========

#[test]
fn test_semantic_detects_near_duplicates() {
    let script = Script::from_texts(
        "s",
        &[
            "今天我们讲解如何制作一杯好喝的咖啡",
            "今天我们讲解如何制作一杯好喝的奶茶",
            "完全无关的内容在这里",
        ],
        3.0,
    );
    let results = DuplicateDetector::default().detect_semantic_duplicates(&script);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind, DuplicateKind::Similar);
    assert!(results[0].similarity >= 0.7);
}

#[test]
fn test_semantic_suggestion_bands() {
    assert_eq!(semantic_suggestion(0.95), "rewrite completely");
    assert_eq!(semantic_suggestion(0.85), "major rewrite");
    assert_eq!(semantic_suggestion(0.72), "adjust phrasing");
}

#[test]
fn test_semantic_threshold_configurable() {
    let cfg = EngineConfig { similarity_threshold: 0.95, ..Default::default() };
    let det = DuplicateDetector::from_engine_config(&cfg).unwrap();
    let script = Script::from_texts("s", &["今天天气很好啊", "今天天气不好啊"], 3.0);
    assert!(det.detect_semantic_duplicates(&script).is_empty());
}

#[test]
fn test_semantic_parallel_matches_sequential() {
    let texts: Vec<String> = (0..80).map(|i| format!("这是第{}段重复的解说内容", i % 10)).collect();
    let script = Script::from_texts("s", &texts, 2.0);

    let seq_cfg = EngineConfig { parallel_min_segments: usize::MAX, ..Default::default() };
    let par_cfg = EngineConfig { parallel_min_segments: 2, ..Default::default() };
    let seq = DuplicateDetector::from_engine_config(&seq_cfg)
        .unwrap()
        .detect_semantic_duplicates(&script);
    let par = DuplicateDetector::from_engine_config(&par_cfg)
        .unwrap()
        .detect_semantic_duplicates(&script);

    let key = |r: &DuplicateResult| (r.source.segment_id.clone(), r.target.segment_id.clone());
    let a: Vec<_> = seq.iter().map(key).collect();
    let b: Vec<_> = par.iter().map(key).collect();
    assert_eq!(a, b);
    assert!(!a.is_empty());
}

// ========== Structural pass ==========

#[test]
fn test_structural_pass() {
    let script = Script::from_texts(
        "s",
        &["因为价格低，所以卖得好", "因为质量高，所以口碑好", "嗯"],
        3.0,
    );
    let results = DuplicateDetector::default().detect_structural_duplicates(&script);
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].suggestion, STRUCTURAL_SUGGESTION);
}

// ========== Template pass ==========

#[test]
fn test_template_scenario_intro_every_segment() {
    let script = Script::from_texts(
        "s",
        &["大家好，欢迎来到美食频道", "大家好，欢迎来到旅行频道", "大家好，欢迎来到科技频道"],
        3.0,
    );
    let results = DuplicateDetector::default().detect_template_content(&script);
    assert_eq!(results.len(), 3);
    for (r, seg) in results.iter().zip(&script.segments) {
        assert_eq!(r.kind, DuplicateKind::Template);
        assert_eq!(r.category, Some(TemplateCategory::Intro));
        assert_eq!(r.similarity, TEMPLATE_SIMILARITY);
        assert_eq!(r.target.segment_id, seg.id);
    }
}

#[test]
fn test_template_hits_survive_post_processing() {
    let script = Script::from_texts("s", &["接下来说A，接下来说B"], 3.0);
    let det = detector_with(&[DetectionStrategy::Template]);
    assert_eq!(det.detect(&script).len(), 2);
}

// ========== Post-processing ==========

#[test]
fn test_post_process_collapses_symmetric_pairs() {
    let a = Segment::narration("a");
    let b = Segment::narration("b");
    let results = vec![
        similar_pair(&a, &b, 0.8, "x"),
        similar_pair(&b, &a, 0.9, "y"),
    ];
    let out = post_process(results);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].similarity, 0.9);
}

#[test]
fn test_post_process_drops_self_pairs() {
    let a = Segment::narration("a");
    let (source, target) = (SegmentRef::whole(&a), SegmentRef::whole(&a));
    let results = vec![DuplicateResult::new(DuplicateKind::Exact, source, target, 1.0, "x")];
    assert!(post_process(results).is_empty());
}

#[test]
fn test_detect_sorted_and_unique_pairs() {
    let script = Script::from_texts(
        "s",
        &[
            "大家好，欢迎来到本期视频",
            "大家好，欢迎来到本期视频",
            "大家好，欢迎来到本期节目",
            "因为天冷，所以多穿",
        ],
        3.0,
    );
    let results = DuplicateDetector::default().detect(&script);
    assert!(!results.is_empty());
    for w in results.windows(2) {
        assert!(w[0].similarity >= w[1].similarity);
    }
    let mut keys = HashSet::new();
    for r in &results {
        assert_ne!(r.source.key(), r.target.key());
        assert!(keys.insert(r.pair_key()), "pair reported twice");
    }
    // exact wins over the semantic 1.0 hit for the same pair
    let first = &results[0];
    assert_eq!(first.kind, DuplicateKind::Exact);
}

#[test]
fn test_detect_empty_script() {
    let script = Script::new("empty", Vec::new());
    assert!(DuplicateDetector::default().detect(&script).is_empty());
}

#[test]
fn test_detect_respects_disabled_passes() {
    let script = Script::from_texts("s", &["大家好，欢迎来到A", "大家好，欢迎来到A"], 3.0);
    let det = detector_with(&[DetectionStrategy::Exact]);
    let results = det.detect(&script);
    assert!(results.iter().all(|r| r.kind == DuplicateKind::Exact));
}

#[test]
fn test_invalid_detector_config() {
    let cfg = DetectorConfig { similarity_threshold: 2.0, ..Default::default() };
    assert!(DuplicateDetector::new(cfg).is_err());
}
