//! Variant catalog and the phrase tables the strategies draw from.

use crate::types::{DedupVariant, Strategy, VariantProfile};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use Strategy::*;

fn profile(
    variant: DedupVariant,
    intensity: f64,
    strategies: &[Strategy],
    flags: (bool, bool, bool),
    synonym_ratio: f64,
) -> VariantProfile {
    VariantProfile {
        variant,
        intensity,
        strategies: strategies.to_vec(),
        restructuring: flags.0,
        expansion: flags.1,
        contraction: flags.2,
        synonym_ratio,
    }
}

/// One profile per variant, in `DedupVariant::ALL` order.
pub static PROFILES: LazyLock<Vec<VariantProfile>> = LazyLock::new(|| {
    use DedupVariant as V;
    vec![
        profile(
            V::Conservative,
            0.2,
            &[SynonymReplacement, TransitionSwap],
            (false, false, false),
            0.2,
        ),
        profile(
            V::Balanced,
            0.5,
            &[SynonymReplacement, SentencePattern, TransitionSwap],
            (true, false, false),
            0.4,
        ),
        profile(
            V::Aggressive,
            1.0,
            &[
                SynonymReplacement,
                SentencePattern,
                ParagraphReorder,
                PerspectiveShift,
                TransitionSwap,
            ],
            (true, true, true),
            0.8,
        ),
        profile(
            V::Creative,
            0.8,
            &[SynonymReplacement, SentencePattern, RhetoricalEmbellishment, ParagraphReorder],
            (true, true, false),
            0.6,
        ),
        profile(
            V::Academic,
            0.6,
            &[RegisterShift, SynonymReplacement, SentencePattern, TransitionSwap],
            (true, false, false),
            0.5,
        ),
        profile(
            V::Casual,
            0.4,
            &[RegisterShift, PerspectiveShift, SynonymReplacement],
            (false, false, true),
            0.4,
        ),
        profile(
            V::Poetic,
            0.7,
            &[RhetoricalEmbellishment, SynonymReplacement, SentencePattern],
            (true, true, false),
            0.6,
        ),
        profile(
            V::Technical,
            0.3,
            &[RegisterShift, SynonymReplacement, TransitionSwap],
            (false, false, true),
            0.3,
        ),
    ]
});

/// Profile of a variant.
pub fn variant_profile(variant: DedupVariant) -> &'static VariantProfile {
    &PROFILES[variant as usize]
}

/// Compiled lookup: one alternation regex over every key, longest key first.
pub struct PhraseTable {
    pub pattern: Regex,
    alternates: HashMap<String, &'static [&'static str]>,
}

impl PhraseTable {
    fn build(entries: &[(&'static str, &'static [&'static str])]) -> Self {
        let mut keys: Vec<&str> = entries.iter().map(|(k, _)| *k).collect();
        keys.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));
        let alternation = keys
            .iter()
            .map(|k| {
                let escaped = regex::escape(k);
                if k.chars().all(|c| c.is_ascii_alphabetic()) {
                    format!(r"\b{escaped}\b")
                } else {
                    escaped
                }
            })
            .collect::<Vec<_>>()
            .join("|");
        let alternates = entries.iter().map(|(k, v)| (k.to_lowercase(), *v)).collect();
        Self { pattern: Regex::new(&format!("(?i){alternation}")).unwrap(), alternates }
    }

    /// Alternates for a matched key, case-insensitively.
    pub fn alternates(&self, key: &str) -> &'static [&'static str] {
        self.alternates.get(&key.to_lowercase()).copied().unwrap_or(&[])
    }
}

pub static SYNONYMS: LazyLock<PhraseTable> = LazyLock::new(|| {
    PhraseTable::build(&[
        ("非常", &["十分", "格外", "极其"]),
        ("重要", &["关键", "要紧"]),
        ("简单", &["容易", "轻松"]),
        ("方法", &["办法", "方式", "途径"]),
        ("问题", &["难题", "疑问"]),
        ("发现", &["注意到", "察觉"]),
        ("喜欢", &["偏爱", "钟爱"]),
        ("美丽", &["漂亮", "动人"]),
        ("快速", &["迅速", "飞快"]),
        ("开始", &["着手", "启动"]),
        ("很多", &["许多", "大量", "不少"]),
        ("帮助", &["协助", "帮忙"]),
        ("使用", &["运用", "利用", "采用"]),
        ("了解", &["知道", "掌握"]),
        ("特点", &["特色", "特征"]),
        ("效果", &["成效", "功效"]),
        ("important", &["crucial", "essential"]),
        ("very", &["really", "quite"]),
        ("use", &["employ", "apply"]),
        ("show", &["demonstrate", "reveal"]),
        ("help", &["assist", "support"]),
        ("big", &["large", "huge"]),
        ("fast", &["quick", "rapid"]),
    ])
});

pub static TRANSITIONS: LazyLock<PhraseTable> = LazyLock::new(|| {
    PhraseTable::build(&[
        ("接下来", &["下面", "紧接着", "随后"]),
        ("然后", &["随后", "之后", "接着"]),
        ("此外", &["另外", "除此之外", "与此同时"]),
        ("总之", &["归根结底", "简而言之"]),
        ("但是", &["不过", "然而", "可是"]),
        ("所以", &["因此", "因而", "于是"]),
        ("首先", &["第一步", "一开始"]),
        ("最后", &["末了", "最终"]),
        ("however", &["still", "even so"]),
        ("therefore", &["thus", "so"]),
        ("then", &["next", "after that"]),
    ])
});

pub static PERSPECTIVE: LazyLock<PhraseTable> = LazyLock::new(|| {
    PhraseTable::build(&[
        ("我们", &["咱们", "大家"]),
        ("我", &["笔者", "本人"]),
        ("你们", &["各位", "大家"]),
        ("你", &["您", "各位"]),
    ])
});

pub static FORMAL_REGISTER: LazyLock<PhraseTable> = LazyLock::new(|| {
    PhraseTable::build(&[
        ("很", &["颇为", "相当"]),
        ("挺", &["较为"]),
        ("东西", &["事物"]),
        ("咱们", &["我们"]),
        ("觉得", &["认为"]),
        ("搞定", &["完成"]),
        ("好用", &["实用"]),
        ("厉害", &["出色"]),
    ])
});

pub static COLLOQUIAL_REGISTER: LazyLock<PhraseTable> = LazyLock::new(|| {
    PhraseTable::build(&[
        ("十分", &["超级", "特别"]),
        ("因此", &["所以说"]),
        ("然而", &["可是"]),
        ("认为", &["觉得"]),
        ("进行", &["来"]),
        ("我们", &["咱们"]),
        ("完成", &["搞定"]),
        ("出色", &["厉害"]),
    ])
});

/// Clause-level rewrites: a capture pattern and alternative templates.
pub struct PatternRule {
    pub pattern: Regex,
    pub templates: &'static [&'static str],
}

const CLAUSE: &str = "[^，。！？；,.!?;]+";

fn rule(pattern: &str, templates: &'static [&'static str]) -> PatternRule {
    PatternRule { pattern: Regex::new(&pattern.replace("{C}", CLAUSE)).unwrap(), templates }
}

pub static SENTENCE_PATTERNS: LazyLock<Vec<PatternRule>> = LazyLock::new(|| {
    vec![
        rule("因为(?P<a>{C})，所以(?P<b>{C})", &["${b}，是因为${a}", "之所以${b}，是因为${a}"]),
        rule("如果(?P<a>{C})，就(?P<b>{C})", &["只要${a}，便${b}", "假如${a}，那么${b}"]),
        rule("虽然(?P<a>{C})，但是(?P<b>{C})", &["${b}，尽管${a}", "尽管${a}，却${b}"]),
        rule("不仅(?P<a>{C})，而且(?P<b>{C})", &["除了${a}，还${b}", "${a}，更${b}"]),
        rule("我们可以(?P<a>{C})", &["不妨${a}", "可以试着${a}"]),
    ]
});

/// Lead-ins inserted before a sentence when a profile allows expansion.
pub const LEAD_INS: &[&str] =
    &["不难发现，", "有趣的是，", "换个角度看，", "仔细想想，", "说到底，"];

/// Figurative tails appended to the last sentence by the poetic variant.
pub const FLOURISHES: &[&str] =
    &["，宛如一幅徐徐展开的画卷", "，如同清晨的第一缕阳光", "，像溪水一样自然流淌"];

/// Fillers a contracting profile may drop.
pub const FILLERS: &[&str] = &["其实", "基本上", "就是说", "可以说", "总的来讲"];
