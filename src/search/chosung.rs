//! Hangul initial-consonant (chosung) matching.
//!
//! A precomposed syllable encodes `(lead * 21 + vowel) * 28 + tail` above
//! U+AC00, so the lead consonant is recovered by integer division. Typing
//! "ㄴㅇㅂ" then finds "네이버".

const SYLLABLE_FIRST: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const SYLLABLES_PER_LEAD: u32 = 21 * 28;

/// The 19 leading consonants, in syllable-block order.
pub const LEAD_CONSONANTS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ', 'ㅌ',
    'ㅍ', 'ㅎ',
];

/// Lead consonant of a precomposed Hangul syllable, if `c` is one.
pub fn lead_consonant(c: char) -> Option<char> {
    let code = c as u32;
    if (SYLLABLE_FIRST..=SYLLABLE_LAST).contains(&code) {
        let index = ((code - SYLLABLE_FIRST) / SYLLABLES_PER_LEAD) as usize;
        Some(LEAD_CONSONANTS[index])
    } else {
        None
    }
}

pub fn is_lead_consonant(c: char) -> bool {
    LEAD_CONSONANTS.contains(&c)
}

/// Replace every Hangul syllable with its lead consonant; other chars pass through.
pub fn lead_consonants(text: &str) -> String {
    text.chars().map(|c| lead_consonant(c).unwrap_or(c)).collect()
}

/// True if `pattern` is made only of lead consonants and occurs in the
/// consonant skeleton of `text`.
pub fn matches_lead_consonants(text: &str, pattern: &str) -> bool {
    if pattern.is_empty() || !pattern.chars().all(is_lead_consonant) {
        return false;
    }
    lead_consonants(text).contains(pattern)
}
