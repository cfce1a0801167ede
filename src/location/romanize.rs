//! Hangul to Roman-letter transliteration
//!
//! Precomposed syllables in U+AC00..=U+D7A3 are laid out algebraically:
//! `0xAC00 + (lead * 21 + vowel) * 28 + tail`. Each index is mapped through
//! a fixed alphabet and the pieces are concatenated.

const SYLLABLE_FIRST: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
const LEAD_STRIDE: u32 = 588;
const VOWEL_STRIDE: u32 = 28;

const LEADS: [&str; 19] = [
    "g", "kk", "n", "d", "tt", "r", "m", "b", "pp", "s", "ss", "", "j", "jj", "ch", "k", "t", "p",
    "h",
];

const VOWELS: [&str; 21] = [
    "a", "ae", "ya", "yae", "eo", "e", "yeo", "ye", "o", "wa", "wae", "oe", "yo", "u", "wo", "we",
    "wi", "yu", "eu", "ui", "i",
];

const TAILS: [&str; 28] = [
    "", "g", "kk", "gs", "n", "nj", "nh", "d", "l", "lg", "lm", "lb", "ls", "lt", "lp", "lh", "m",
    "b", "bs", "s", "ss", "ng", "j", "ch", "k", "t", "p", "h",
];

/// Jamo indices of one precomposed syllable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jamo {
    pub lead: usize,
    pub vowel: usize,
    pub tail: usize,
}

/// Returns true for characters in the precomposed Hangul syllable block
#[must_use]
pub fn is_hangul_syllable(c: char) -> bool {
    (SYLLABLE_FIRST..=SYLLABLE_LAST).contains(&u32::from(c))
}

/// Returns true if `text` contains at least one Hangul syllable
#[must_use]
pub fn contains_hangul(text: &str) -> bool {
    text.chars().any(is_hangul_syllable)
}

/// Split a syllable into its lead/vowel/tail indices, `None` for anything else
#[must_use]
pub fn decompose(c: char) -> Option<Jamo> {
    if !is_hangul_syllable(c) {
        return None;
    }
    let base = u32::from(c) - SYLLABLE_FIRST;
    Some(Jamo {
        lead: (base / LEAD_STRIDE) as usize,
        vowel: ((base % LEAD_STRIDE) / VOWEL_STRIDE) as usize,
        tail: (base % VOWEL_STRIDE) as usize,
    })
}

/// Transliterate `text`, passing non-Hangul characters through and
/// uppercasing the first character of the result.
#[must_use]
pub fn romanize(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 3);
    for c in text.chars() {
        match decompose(c) {
            Some(jamo) => {
                out.push_str(LEADS[jamo.lead]);
                out.push_str(VOWELS[jamo.vowel]);
                out.push_str(TAILS[jamo.tail]);
            }
            None => out.push(c),
        }
    }
    capitalize_first(&out)
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("수원", "Suwon")]
    #[case("포천", "Pocheon")]
    #[case("가", "Ga")]
    #[case("힣", "Hih")]
    #[case("양화", "Yanghwa")]
    #[case("의정부", "Uijeongbu")]
    fn test_romanize_known_words(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(romanize(input), expected);
    }

    #[test]
    fn test_decomposition_indices_stay_in_range() {
        for cp in SYLLABLE_FIRST..=SYLLABLE_LAST {
            let c = char::from_u32(cp).unwrap();
            let jamo = decompose(c).unwrap();
            assert!(jamo.lead <= 18);
            assert!(jamo.vowel <= 20);
            assert!(jamo.tail <= 27);
        }
    }

    #[test]
    fn test_block_edges() {
        assert_eq!(decompose('가'), Some(Jamo { lead: 0, vowel: 0, tail: 0 }));
        assert_eq!(decompose('힣'), Some(Jamo { lead: 18, vowel: 20, tail: 27 }));
        assert_eq!(decompose('ㄱ'), None);
        assert_eq!(decompose('a'), None);
    }

    #[test]
    fn test_romanize_is_deterministic() {
        let text = "서울 강남구 역삼동";
        assert_eq!(romanize(text), romanize(text));
    }

    #[test]
    fn test_non_hangul_only_capitalized() {
        assert_eq!(romanize("seoul"), "Seoul");
        assert_eq!(romanize("Busan-si"), "Busan-si");
        assert_eq!(romanize("123 abc"), "123 abc");
        assert_eq!(romanize(""), "");
    }

    #[test]
    fn test_mixed_text_passes_through() {
        assert_eq!(romanize("수원-si"), "Suwon-si");
        assert!(contains_hangul("abc수원"));
        assert!(!contains_hangul("Suwon"));
    }
}
