//! Generic English-to-Korean place name conversion

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::tables::{self, NAME_STEMS, PLACE_NAMES, PROVINCES, SUFFIXES};

static STEM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = NAME_STEMS
        .iter()
        .map(|(stem, _)| regex::escape(stem))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).expect("name stems form a valid pattern")
});

/// Convert an upstream English place name to its Korean form.
///
/// Exact table entries win. Otherwise known name stems are replaced as whole
/// words and the romanized administrative suffix is swapped for its Hangul
/// counterpart. Unknown stems stay in Latin letters.
#[must_use]
pub fn to_korean(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    if let Some(korean) = tables::lookup(PLACE_NAMES, text) {
        return korean.to_string();
    }

    let mut korean = STEM_PATTERN
        .replace_all(text, |caps: &Captures<'_>| {
            let matched = &caps[0];
            NAME_STEMS
                .iter()
                .find(|(stem, _)| stem.eq_ignore_ascii_case(matched))
                .map_or_else(|| matched.to_string(), |(_, korean)| (*korean).to_string())
        })
        .into_owned();

    for (suffix, replacement) in SUFFIXES {
        if let Some(stripped) = strip_suffix_ignore_case(&korean, suffix) {
            korean = format!("{stripped}{replacement}");
        }
    }

    korean
}

/// Korean province name for an admin1 value, falling back to the raw value
#[must_use]
pub fn province_name(admin1: Option<&str>) -> String {
    match admin1 {
        Some(name) => tables::lookup(PROVINCES, name).unwrap_or(name).to_string(),
        None => String::new(),
    }
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split = text.len().checked_sub(suffix.len())?;
    let tail = text.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &text[..split])
}
