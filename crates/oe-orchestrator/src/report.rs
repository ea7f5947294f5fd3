use oe_core::{DuplicateKind, DuplicateResult, OriginalityReport, Script};
use oe_variant::VariantEngine;
use rand::Rng;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;

/// Score the script from its findings and attach advice.
///
/// Score is the share of segments never flagged as a duplicate target,
/// on a 0 to 100 scale. An empty script scores 100.
pub fn generate_originality_report(
    script: &Script,
    duplicates: Vec<DuplicateResult>,
) -> OriginalityReport {
    let total = script.len();
    let flagged: BTreeSet<&str> = duplicates
        .iter()
        .map(|d| d.target.segment_id.as_str())
        .filter(|id| script.segment(id).is_some())
        .collect();
    let score = if total == 0 {
        100.0
    } else {
        (100.0 - 100.0 * flagged.len() as f64 / total as f64).max(0.0)
    };

    let mut suggestions = Vec::new();
    if score < 60.0 {
        suggestions.push("Low originality: a major rewrite is recommended".to_string());
    } else if score < 80.0 {
        suggestions.push("Moderate originality: optimize the repeated segments".to_string());
    }
    let templates = duplicates.iter().filter(|d| d.kind == DuplicateKind::Template).count();
    if templates > 0 {
        suggestions.push(format!(
            "{templates} template phrase(s) found; replace them with your own wording"
        ));
    }
    let exact = duplicates.iter().filter(|d| d.kind == DuplicateKind::Exact).count();
    if exact > 0 {
        suggestions.push(format!(
            "{exact} exact duplicate(s) found; remove or rewrite the repeated segments"
        ));
    }

    OriginalityReport { score, duplicates, suggestions }
}

/// Rewrite every flagged target segment.
///
/// Each segment is rewritten once, driven by its highest finding. With
/// `auto_variant` the engine hands out session variants round-robin;
/// otherwise the variant strength follows the similarity.
pub fn auto_fix<R: Rng>(
    script: &Script,
    duplicates: &[DuplicateResult],
    engine: &mut VariantEngine<R>,
    auto_variant: bool,
) -> Script {
    let mut worst: HashMap<&str, f64> = HashMap::new();
    for d in duplicates {
        let entry = worst.entry(d.target.segment_id.as_str()).or_insert(0.0);
        *entry = entry.max(d.similarity);
    }
    if worst.is_empty() {
        return script.clone();
    }

    let segments = script
        .segments
        .iter()
        .map(|seg| match worst.get(seg.id.as_str()) {
            Some(&similarity) => {
                let text = if auto_variant {
                    let variant = engine.select_random(&[]);
                    engine.apply_variant(&seg.content, variant)
                } else {
                    engine.smart_rewrite(&seg.content, similarity).text
                };
                debug!(segment_id = %seg.id, similarity, "segment rewritten");
                seg.with_content(text)
            }
            None => seg.clone(),
        })
        .collect();
    script.with_segments(segments)
}
