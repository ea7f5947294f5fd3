//! Text normalizer: canonical form used by every comparison.

/// Full-width and CJK punctuation stripped on top of ASCII punctuation.
const WIDE_PUNCT: &[char] = &[
    '\u{FF0C}', '\u{3002}', '\u{FF01}', '\u{FF1F}', '\u{FF1B}', '\u{FF1A}', '\u{3001}',
    '\u{201C}', '\u{201D}', '\u{2018}', '\u{2019}', '\u{FF08}', '\u{FF09}', '\u{3010}',
    '\u{3011}', '\u{300A}', '\u{300B}', '\u{3008}', '\u{3009}', '\u{300C}', '\u{300D}',
    '\u{300E}', '\u{300F}', '\u{2026}', '\u{2014}', '\u{FF5E}', '\u{00B7}', '\u{FF0E}',
    '\u{FF02}', '\u{FF07}', '\u{FF3B}', '\u{FF3D}', '\u{FF5B}', '\u{FF5D}', '\u{FF0D}',
];

/// Whether `c` is one of the punctuation marks removed by [`normalize`].
pub fn is_stripped_punct(c: char) -> bool {
    c.is_ascii_punctuation() || WIDE_PUNCT.contains(&c)
}

/// Lowercase, drop whitespace and punctuation. Works on chars, never bytes.
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_whitespace() && !is_stripped_punct(*c))
        .collect()
}

/// Normalized text as a char vector, ready for edit distance.
pub fn normalized_chars(text: &str) -> Vec<char> {
    normalize(text).chars().collect()
}
