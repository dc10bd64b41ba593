use crate::error::DictationError;
use itertools::{EitherOrBoth, Itertools};
use serde::Serialize;
use std::collections::BTreeSet;

/// Characters dropped from both texts before comparison.
pub const IGNORED_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

/// Letter-like mark for a checked dictation, `2` (worst) to `5` (best).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, strum_macros::Display,
)]
pub enum Grade {
    #[strum(serialize = "2")]
    #[serde(rename = "2")]
    Two,
    #[strum(serialize = "3")]
    #[serde(rename = "3")]
    Three,
    #[strum(serialize = "4")]
    #[serde(rename = "4")]
    Four,
    #[strum(serialize = "5")]
    #[serde(rename = "5")]
    Five,
}

/// Lowercase, strip the ignored punctuation and split into words.
///
/// Punctuation is removed rather than replaced, so `"ветер,дует"` stays a
/// single token.
pub fn normalize(text: &str) -> Vec<String> {
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !IGNORED_PUNCTUATION.contains(c))
        .collect();

    stripped.split_whitespace().map(str::to_owned).collect()
}

/// Positions where the normalized draft diverges from the normalized
/// reference. A position present in only one of the two always counts.
pub fn compare(reference_body: &str, draft: &str) -> BTreeSet<usize> {
    let reference = normalize(reference_body);
    let user = normalize(draft);

    reference
        .iter()
        .zip_longest(user.iter())
        .enumerate()
        .filter_map(|(idx, pair)| match pair {
            EitherOrBoth::Both(expected, typed) if expected == typed => None,
            _ => Some(idx),
        })
        .collect()
}

/// Raw whitespace-separated word count, punctuation included.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Reference word count minus mismatches. Negative when the draft runs
/// past the reference by more than its length.
pub fn correct_words(reference_body: &str, mismatches: &BTreeSet<usize>) -> i64 {
    word_count(reference_body) as i64 - mismatches.len() as i64
}

/// Percentage of correct reference words, rounded half up. Can be negative
/// for drafts much longer than the reference.
pub fn score(reference_body: &str, mismatches: &BTreeSet<usize>) -> Result<i32, DictationError> {
    let total = word_count(reference_body);
    if total == 0 {
        return Err(DictationError::DegenerateReferenceText);
    }

    let total = total as i64;
    let correct = correct_words(reference_body, mismatches);
    // floor(correct / total * 100 + 1/2) without going through floats
    let pct = (correct * 200 + total).div_euclid(total * 2);

    Ok(pct as i32)
}

pub fn grade(score: i32) -> Grade {
    match score {
        s if s >= 95 => Grade::Five,
        s if s >= 80 => Grade::Four,
        s if s >= 60 => Grade::Three,
        _ => Grade::Two,
    }
}
