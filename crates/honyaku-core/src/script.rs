//! Japanese kana detection.
//!
//! The range tables mirror the Unicode 15.0 `Script=Hiragana` and
//! `Script=Katakana` property values. Code points whose script is `Common`
//! (U+30FB KATAKANA MIDDLE DOT, U+30FC PROLONGED SOUND MARK, the halfwidth
//! sound marks) or `Inherited` (U+3099, U+309A combining marks) are not kana
//! under these tables.

/// `Script=Hiragana`, sorted and non-overlapping.
const HIRAGANA: &[(char, char)] = &[
    ('\u{3041}', '\u{3096}'),
    ('\u{309D}', '\u{309F}'),
    ('\u{1B001}', '\u{1B11F}'),
    ('\u{1B132}', '\u{1B132}'),
    ('\u{1B150}', '\u{1B152}'),
    ('\u{1F200}', '\u{1F200}'),
];

/// `Script=Katakana`, sorted and non-overlapping.
const KATAKANA: &[(char, char)] = &[
    ('\u{30A1}', '\u{30FA}'),
    ('\u{30FD}', '\u{30FF}'),
    ('\u{31F0}', '\u{31FF}'),
    ('\u{32D0}', '\u{32FE}'),
    ('\u{3300}', '\u{3357}'),
    ('\u{FF66}', '\u{FF6F}'),
    ('\u{FF71}', '\u{FF9D}'),
    ('\u{1AFF0}', '\u{1AFF3}'),
    ('\u{1AFF5}', '\u{1AFFB}'),
    ('\u{1AFFD}', '\u{1AFFE}'),
    ('\u{1B000}', '\u{1B000}'),
    ('\u{1B120}', '\u{1B122}'),
    ('\u{1B155}', '\u{1B155}'),
    ('\u{1B164}', '\u{1B167}'),
];

fn in_table(table: &[(char, char)], c: char) -> bool {
    table
        .binary_search_by(|&(lo, hi)| {
            if hi < c {
                std::cmp::Ordering::Less
            } else if lo > c {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        })
        .is_ok()
}

pub fn is_hiragana(c: char) -> bool {
    in_table(HIRAGANA, c)
}

pub fn is_katakana(c: char) -> bool {
    in_table(KATAKANA, c)
}

/// Whether `text` contains at least one hiragana or katakana code point.
///
/// Stops at the first match. Kanji alone does not count: CJK ideographs are
/// shared with Chinese and say nothing about the source language.
pub fn contains_kana(text: &str) -> bool {
    text.chars().any(|c| is_hiragana(c) || is_katakana(c))
}
