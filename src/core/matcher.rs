use std::collections::HashSet;

use crate::core::{
    filters::filter_candidates,
    ranking::{rank, Scored},
    scoring::calculate_match_score,
    store::RecordStore,
};
use crate::models::{InternshipRecord, MatchPolicy, MatchResult, ScoringWeights, StudentQuery};

/// Result of the recommendation process
#[derive(Debug)]
pub struct RecommendationSet {
    pub matches: Vec<MatchResult>,
    pub total_candidates: usize,
    pub filtered_candidates: usize,
}

/// Main recommendation orchestrator - runs the filter/score/rank pipeline
///
/// # Pipeline Stages
/// 1. Location filter
/// 2. Field-similarity threshold
/// 3. Scoring
/// 4. Ranking, de-duplication and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
    policy: MatchPolicy,
}

impl Matcher {
    pub fn new(weights: ScoringWeights, policy: MatchPolicy) -> Self {
        Self { weights, policy }
    }

    pub fn with_defaults() -> Self {
        Self {
            weights: ScoringWeights::default(),
            policy: MatchPolicy::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Resolve the requested result count
    ///
    /// Missing or non-positive values fall back to the default; everything
    /// else is clamped to `[1, max_top_n]`.
    pub fn resolve_top_n(&self, requested: Option<i64>) -> usize {
        let max = self.policy.max_top_n.max(1);
        match requested {
            Some(n) if n > 0 => usize::try_from(n).unwrap_or(max).clamp(1, max),
            _ => self.policy.default_top_n.clamp(1, max),
        }
    }

    /// Recommend listings from `store` for a student query
    ///
    /// # Arguments
    /// * `query` - The student query
    /// * `store` - The record store snapshot to search
    ///
    /// # Returns
    /// RecommendationSet with matches in descending score order; empty when
    /// nothing survives filtering
    pub fn get_recommendations(&self, query: &StudentQuery, store: &RecordStore) -> RecommendationSet {
        let top_n = self.resolve_top_n(query.top_n);
        let records = store.records();

        // Stages 1 & 2: hard constraints
        let candidates = filter_candidates(query, records, &self.policy);
        let filtered_candidates = candidates.len();

        // Stage 3: composite scores
        let scored: Vec<Scored<&InternshipRecord>> = candidates
            .into_iter()
            .map(|record| {
                let breakdown = calculate_match_score(record, query, &self.weights, &self.policy);
                Scored {
                    item: record,
                    score: breakdown.composite,
                }
            })
            .collect();

        // Stage 4: rank, then drop repeated listings before truncating
        let ranked = rank(scored, usize::MAX);
        let mut seen = HashSet::new();
        let matches: Vec<MatchResult> = ranked
            .into_iter()
            .filter(|s| seen.insert(s.item.listing_key()))
            .take(top_n)
            .map(|s| MatchResult::from_record(s.item, s.score))
            .collect();

        tracing::debug!(
            "Recommended {} of {} listings ({} passed filters, top_n {})",
            matches.len(),
            records.len(),
            filtered_candidates,
            top_n
        );

        RecommendationSet {
            matches,
            total_candidates: records.len(),
            filtered_candidates,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_defaults()
    }
}
