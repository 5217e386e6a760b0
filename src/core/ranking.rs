use std::cmp::Ordering;

/// Candidate carrying its composite score through ranking
#[derive(Debug, Clone)]
pub struct Scored<T> {
    pub item: T,
    pub score: f64,
}

/// Sort by score (descending) and keep the first `top_n`
///
/// The sort is stable, so equal scores keep their incoming order.
pub fn rank<T>(mut scored: Vec<Scored<T>>, top_n: usize) -> Vec<Scored<T>> {
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(top_n);
    scored
}
