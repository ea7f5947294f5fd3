//! Fingerprint derivation, similarity and history store tests.

use chrono::Utc;
use oe_core::{Script, Segment, SegmentType};
use oe_fingerprint::{
    fingerprint::{content_hash, sentence_count, structural_match_ratio, structural_signature},
    keywords::{extract_keywords, tokenize},
    fingerprint, similarity, ContentFingerprint, FileBackend, FingerprintStore, HistoryBackend,
    MemoryBackend, Records,
};
use serde_json::json;
use std::sync::Arc;
use tempfile::TempDir;

fn fp(id: &str, hash: &str, keywords: &[&str], signature: &str) -> ContentFingerprint {
    ContentFingerprint {
        id: id.into(),
        script_id: format!("script-{id}"),
        hash: hash.into(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        structural_signature: signature.into(),
        created_at: Utc::now(),
    }
}

fn coffee_script() -> Script {
    Script::from_texts(
        "coffee",
        &[
            "今天聊聊手冲咖啡的器具。",
            "滤杯、手冲壶和电子秤是基本配置。",
            "水温控制在九十度左右最合适。",
        ],
        4.0,
    )
}

// ============================================================
// Tokenizer / keywords
// ============================================================

#[test]
fn test_tokenize_mixed_scripts() {
    assert_eq!(tokenize("AI技术的发展 Rust2024"), vec!["ai", "技术", "发展", "rust2024"]);
}

#[test]
fn test_keywords_ranked_by_frequency_then_first_seen() {
    let kws = extract_keywords("apple banana apple cherry banana apple date", 20);
    assert_eq!(kws, vec!["apple", "banana", "cherry", "date"]);
}

#[test]
fn test_keywords_skip_stopwords() {
    assert_eq!(extract_keywords("The cat and the dog", 20), vec!["cat", "dog"]);
}

#[test]
fn test_keywords_capped() {
    let text: String = (0..30).map(|i| format!("word{i} ")).collect();
    assert_eq!(extract_keywords(&text, 20).len(), 20);
}

// ============================================================
// Fingerprint derivation
// ============================================================

#[test]
fn test_hash_deterministic_across_scripts() {
    let a = coffee_script();
    let b = coffee_script();
    assert_ne!(a.id, b.id);
    assert_eq!(fingerprint(&a).hash, fingerprint(&b).hash);
}

#[test]
fn test_hash_is_pure_function_of_normalized_content() {
    assert_eq!(content_hash("Hello, World"), content_hash("hello world!"));
    assert_ne!(content_hash("hello world"), content_hash("hello there"));
    assert_eq!(content_hash("x").len(), 64);
}

#[test]
fn test_empty_script_fingerprint() {
    let script = Script::new("empty", Vec::new());
    let f = fingerprint(&script);
    assert!(f.keywords.is_empty());
    assert_eq!(f.structural_signature, "");
    assert_eq!(f.segment_count(), 0);
    assert_eq!(f.hash, "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262");
}

#[test]
fn test_sentence_count() {
    assert_eq!(sentence_count("第一句。第二句！"), 2);
    assert_eq!(sentence_count("没有标点"), 1);
    assert_eq!(sentence_count(""), 0);
    assert_eq!(sentence_count("真的吗？？？"), 1);
    assert_eq!(sentence_count("a. b"), 2);
}

#[test]
fn test_structural_signature_order_and_format() {
    let segs = vec![
        Segment::new("你好。", SegmentType::Narration),
        Segment::new("hi", SegmentType::Dialogue),
    ];
    assert_eq!(structural_signature(&segs), "narration:3:1|dialogue:2:1");
}

#[test]
fn test_fingerprint_fields() {
    let script = coffee_script();
    let f = fingerprint(&script);
    assert_eq!(f.script_id, script.id);
    assert_eq!(f.segment_count(), 3);
    assert!(f.keywords.len() <= 20);
    assert!(f.keywords.contains(&"手冲壶".to_string()));
}

// ============================================================
// Similarity
// ============================================================

#[test]
fn test_similarity_equal_hash_short_circuits() {
    let a = fp("a", "h", &["x"], "narration:1:1");
    let b = fp("b", "h", &["y"], "dialogue:9:9|narration:1:1");
    assert_eq!(similarity(&a, &b), 1.0);
}

#[test]
fn test_similarity_weighted() {
    // keywords: {x, y} vs {x, z} -> 1/3; structure 1/2
    let a = fp("a", "h1", &["x", "y"], "narration:1:1|narration:2:1");
    let b = fp("b", "h2", &["x", "z"], "narration:1:1|narration:3:1");
    let expected = 0.6 * (1.0 / 3.0) + 0.4 * 0.5;
    assert!((similarity(&a, &b) - expected).abs() < 1e-9);
}

#[test]
fn test_structure_requires_equal_segment_counts() {
    let a = fp("a", "h1", &[], "narration:1:1");
    let b = fp("b", "h2", &[], "narration:1:1|narration:1:1");
    assert_eq!(structural_match_ratio(&a, &b), 0.0);
    assert_eq!(similarity(&a, &b), 0.0);
}

#[test]
fn test_similarity_symmetric_and_bounded() {
    let a = fingerprint(&coffee_script());
    let other = Script::from_texts("other", &["完全不同的话题。", "聊聊旅行。", "再见。"], 3.0);
    let b = fingerprint(&other);
    let ab = similarity(&a, &b);
    assert_eq!(ab, similarity(&b, &a));
    assert!((0.0..=1.0).contains(&ab));
}

// ============================================================
// History store
// ============================================================

#[test]
fn test_query_empty_history() {
    let store = FingerprintStore::in_memory();
    assert!(store.query_best(&fingerprint(&coffee_script())).is_none());
}

#[test]
fn test_register_then_match() {
    let store = FingerprintStore::in_memory();
    let first = fingerprint(&coffee_script());
    assert!(store.register(&first).unwrap());
    let found = store.query_best(&fingerprint(&coffee_script())).unwrap();
    assert_eq!(found.fingerprint.id, first.id);
    assert_eq!(found.similarity, 1.0);
}

#[test]
fn test_query_picks_highest() {
    let store = FingerprintStore::in_memory();
    store.register(&fp("weak", "h1", &["x", "q"], "narration:1:1")).unwrap();
    store.register(&fp("strong", "h2", &["x", "y"], "narration:1:1")).unwrap();
    let query = fp("query", "h3", &["x", "y"], "narration:1:1");
    let found = store.query_best(&query).unwrap();
    assert_eq!(found.fingerprint.id, "strong");
}

#[test]
fn test_threshold_is_strict() {
    let backend = Arc::new(MemoryBackend::new());
    let store = FingerprintStore::new(backend, 0.4).unwrap();
    // structure only: 0.4 * 1.0 == threshold, not above it
    store.register(&fp("a", "h1", &["x"], "narration:1:1")).unwrap();
    let query = fp("b", "h2", &["y"], "narration:1:1");
    assert!(store.query_best(&query).is_none());
}

#[test]
fn test_register_is_append_only() {
    let store = FingerprintStore::in_memory();
    let f = fp("same", "h", &[], "");
    assert!(store.register(&f).unwrap());
    let mut changed = f.clone();
    changed.hash = "other".into();
    assert!(!store.register(&changed).unwrap());
    assert_eq!(store.len(), 1);
    assert_eq!(store.history()[0].hash, "h");
}

#[test]
fn test_check_and_register() {
    let store = FingerprintStore::in_memory();
    assert!(store.check_and_register(&fingerprint(&coffee_script())).unwrap().is_none());
    assert_eq!(store.len(), 1);
    assert!(store.check_and_register(&fingerprint(&coffee_script())).unwrap().is_some());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_clear() {
    let store = FingerprintStore::in_memory();
    store.register(&fingerprint(&coffee_script())).unwrap();
    store.clear().unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_invalid_threshold_rejected() {
    assert!(FingerprintStore::new(Arc::new(MemoryBackend::new()), 1.2).is_err());
    assert!(FingerprintStore::new(Arc::new(MemoryBackend::new()), -0.1).is_err());
}

#[test]
fn test_corrupt_record_discarded() {
    let good = fp("good", "h", &["x"], "narration:1:1");
    let mut records = Records::new();
    records.insert("good".into(), serde_json::to_value(&good).unwrap());
    records.insert("bad".into(), json!({"nope": true}));
    let store = FingerprintStore::new(Arc::new(MemoryBackend::with_records(records)), 0.3).unwrap();
    let history = store.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].id, "good");
}

// ============================================================
// File backend
// ============================================================

#[test]
fn test_file_backend_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("history").join("fingerprints.json");
    {
        let store = FingerprintStore::new(Arc::new(FileBackend::new(&path)), 0.3).unwrap();
        store.register(&fingerprint(&coffee_script())).unwrap();
    }
    let store = FingerprintStore::new(Arc::new(FileBackend::new(&path)), 0.3).unwrap();
    assert_eq!(store.len(), 1);
    assert!(store.query_best(&fingerprint(&coffee_script())).is_some());
}

#[test]
fn test_file_backend_missing_file_is_empty() {
    let dir = TempDir::new().unwrap();
    let backend = FileBackend::new(dir.path().join("absent.json"));
    assert!(backend.load_all().unwrap().is_empty());
}

#[test]
fn test_corrupt_file_recovers() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fingerprints.json");
    std::fs::write(&path, b"{not json").unwrap();
    let store = FingerprintStore::new(Arc::new(FileBackend::new(&path)), 0.3).unwrap();
    assert!(store.history().is_empty());
    assert!(store.register(&fingerprint(&coffee_script())).unwrap());
    assert_eq!(store.len(), 1);
}

#[test]
fn test_concurrent_registration_loses_nothing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fingerprints.json");
    let store = Arc::new(FingerprintStore::new(Arc::new(FileBackend::new(&path)), 0.3).unwrap());
    std::thread::scope(|s| {
        for t in 0..8 {
            let store = Arc::clone(&store);
            s.spawn(move || {
                for i in 0..10 {
                    let f = fp(&format!("t{t}-{i}"), &format!("h{t}-{i}"), &[], "");
                    store.register(&f).unwrap();
                }
            });
        }
    });
    assert_eq!(store.len(), 80);
}
