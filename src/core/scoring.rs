use crate::core::similarity::{field_similarity, skill_overlap};
use crate::models::{InternshipRecord, MatchPolicy, ScoreBreakdown, ScoringWeights, StudentQuery};

/// Calculate a match score (0-1) for a listing against a student query
///
/// Scoring formula:
/// score = (
///     skill_score * 0.6 +      # Fraction of query skills the listing covers
///     field_score * 0.4        # Fuzzy similarity of the field labels
/// )
///
/// The weights come from `ScoringWeights`; the result is clamped to [0, 1].
pub fn calculate_match_score(
    record: &InternshipRecord,
    query: &StudentQuery,
    weights: &ScoringWeights,
    policy: &MatchPolicy,
) -> ScoreBreakdown {
    let skill_score = skill_overlap(
        &query.skills,
        &record.skills,
        &policy.skill_metric,
        policy.skill_match_threshold,
    );

    let field_score = field_similarity(&query.field, &record.field, &policy.field_metric);

    let composite = (skill_score * weights.skills + field_score * weights.field).clamp(0.0, 1.0);

    ScoreBreakdown {
        skill_score,
        field_score,
        composite,
    }
}
