//! String similarity functions used by the filter stage and the scorer.
//!
//! Every metric returns a ratio in `[0.0, 1.0]`, is symmetric and returns
//! `1.0` for identical inputs.

use serde::Deserialize;
use std::collections::BTreeSet;

/// Similarity contract shared by all metrics
pub trait Similarity {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Available similarity metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityAlgo {
    /// Normalized Levenshtein ratio over the whole strings
    #[default]
    Levenshtein,
    /// Best Levenshtein ratio of the shorter string against any
    /// equal-length window of the longer one
    PartialLevenshtein,
    JaroWinkler,
    SorensenDice,
}

impl Similarity for SimilarityAlgo {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        let score = match self {
            SimilarityAlgo::Levenshtein => strsim::normalized_levenshtein(a, b),
            SimilarityAlgo::PartialLevenshtein => partial_ratio(a, b),
            SimilarityAlgo::JaroWinkler => strsim::jaro_winkler(a, b),
            SimilarityAlgo::SorensenDice => strsim::sorensen_dice(a, b),
        };
        score.clamp(0.0, 1.0)
    }
}

/// Lower-case and trim, collapsing inner whitespace
#[inline]
pub fn normalize_text(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Partial ratio: substring-tolerant similarity
///
/// The shorter string is slid across the longer one and the best
/// normalized Levenshtein ratio of any window wins, so `"sql"` against
/// `"mysql"` scores `1.0`.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };

    if short.is_empty() {
        return if long.is_empty() { 1.0 } else { 0.0 };
    }

    let needle: String = short.iter().collect();
    if short.len() == long.len() {
        return strsim::normalized_levenshtein(&needle, &long.iter().collect::<String>());
    }

    let mut best = 0.0_f64;
    for window in long.windows(short.len()) {
        let candidate: String = window.iter().collect();
        let score = strsim::normalized_levenshtein(&needle, &candidate);
        if score > best {
            best = score;
            if best >= 1.0 {
                break;
            }
        }
    }
    best
}

/// Fraction of query skills that fuzzily match some record skill
///
/// Both sides are normalized before comparison, so matching is
/// case-insensitive. Returns `0.0` when `query_skills` holds no non-blank
/// skill.
pub fn skill_overlap<M: Similarity>(
    query_skills: &BTreeSet<String>,
    record_skills: &BTreeSet<String>,
    metric: &M,
    threshold: f64,
) -> f64 {
    let wanted: BTreeSet<String> = normalized_tokens(query_skills);
    if wanted.is_empty() {
        return 0.0;
    }
    let offered: BTreeSet<String> = normalized_tokens(record_skills);

    let matched = wanted
        .iter()
        .filter(|skill| {
            offered
                .iter()
                .any(|candidate| metric.similarity(skill, candidate) >= threshold)
        })
        .count();

    matched as f64 / wanted.len() as f64
}

fn normalized_tokens(values: &BTreeSet<String>) -> BTreeSet<String> {
    values
        .iter()
        .map(|v| normalize_text(v))
        .filter(|v| !v.is_empty())
        .collect()
}

/// Fuzzy similarity between two field labels after normalization
pub fn field_similarity<M: Similarity>(query_field: &str, record_field: &str, metric: &M) -> f64 {
    let query_field = normalize_text(query_field);
    let record_field = normalize_text(record_field);

    if query_field.is_empty() || record_field.is_empty() {
        return 0.0;
    }

    metric.similarity(&query_field, &record_field)
}
