//! Answer checking for typed exercises.

use crate::types::MatchingMode;

/// Default similarity needed for a fuzzy match.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Outcome of checking a typed answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerCheck {
    pub is_correct: bool,
    /// Similarity between 0.0 and 1.0.
    pub similarity: f64,
    /// Expected answer with whitespace collapsed, for feedback.
    pub expected: String,
}

/// Check a typed answer against the expected one.
pub fn check_answer(typed: &str, expected: &str, mode: MatchingMode, fuzzy_threshold: f64) -> AnswerCheck {
    let typed = normalize_whitespace(typed);
    let expected = normalize_whitespace(expected);

    let (is_correct, similarity) = match mode {
        MatchingMode::Exact => exact(typed == expected),
        MatchingMode::CaseInsensitive => exact(typed.to_lowercase() == expected.to_lowercase()),
        MatchingMode::Fuzzy => {
            let similarity = normalized_similarity(&typed.to_lowercase(), &expected.to_lowercase());
            (similarity >= fuzzy_threshold, similarity)
        }
    };

    AnswerCheck {
        is_correct,
        similarity,
        expected,
    }
}

fn exact(equal: bool) -> (bool, f64) {
    (equal, if equal { 1.0 } else { 0.0 })
}

/// Trim and collapse runs of whitespace.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Levenshtein distance over chars.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Similarity in `[0, 1]` derived from the edit distance.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (levenshtein_distance(a, b) as f64 / max_len as f64)
}
