//! Keyword extraction: word-like units ranked by frequency.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Number of keywords kept per fingerprint.
pub const TOP_KEYWORDS: usize = 20;

/// CJK runs, or runs of letters/digits outside the CJK scripts.
static RE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"[\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}]+",
        r"|[[\p{Alphabetic}\p{Nd}]--[\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}]]+",
    ))
    .unwrap()
});

/// Single-char particles that delimit CJK runs.
const CJK_PARTICLES: &[char] = &[
    '的', '了', '和', '是', '在', '也', '就', '都', '而', '及', '与', '着', '把', '被', '吗',
    '呢', '吧', '啊',
];

const STOPWORDS: &[&str] = &[
    // zh
    "我们", "你们", "他们", "这个", "那个", "这些", "那些", "一个", "什么", "因为", "所以",
    "但是", "然后", "如果", "可以", "就是", "还是", "已经", "自己", "没有", "大家", "今天",
    // en
    "the", "a", "an", "and", "or", "but", "of", "to", "in", "on", "for", "with", "is", "are",
    "was", "were", "be", "it", "this", "that", "as", "at", "by", "from", "we", "you", "i",
];

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(&token)
}

/// Split text into lowercase word-like units, in reading order.
pub fn tokenize(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for m in RE_WORD.find_iter(text) {
        let word = m.as_str();
        if word.chars().next().is_some_and(is_cjk) {
            tokens.extend(
                word.split(|c| CJK_PARTICLES.contains(&c))
                    .filter(|w| !w.is_empty())
                    .map(str::to_string),
            );
        } else {
            tokens.push(word.to_lowercase());
        }
    }
    tokens
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2FA1F}')
}

/// Top `limit` non-stopword tokens by frequency; ties go to the earlier
/// first occurrence.
pub fn extract_keywords(text: &str, limit: usize) -> Vec<String> {
    // token -> (count, first index)
    let mut stats: HashMap<String, (usize, usize)> = HashMap::new();
    for (idx, token) in tokenize(text).into_iter().enumerate() {
        if is_stopword(&token) {
            continue;
        }
        stats.entry(token).or_insert((0, idx)).0 += 1;
    }
    let mut ranked: Vec<(String, usize, usize)> = stats
        .into_iter()
        .map(|(token, (count, first))| (token, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.into_iter().take(limit).map(|(token, _, _)| token).collect()
}
