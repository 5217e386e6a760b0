use crate::core::similarity::{field_similarity, normalize_text};
use crate::models::{InternshipRecord, LocationMode, MatchPolicy, StudentQuery};

/// Check if a listing is in one of the requested locations
///
/// An empty location set (or one holding only blanks) means "anywhere".
/// Both sides are compared case-insensitively.
#[inline]
pub fn matches_location(record: &InternshipRecord, query: &StudentQuery, mode: LocationMode) -> bool {
    let mut wanted = query
        .locations
        .iter()
        .map(|l| normalize_text(l))
        .filter(|l| !l.is_empty())
        .peekable();

    if wanted.peek().is_none() {
        return true;
    }

    let location = normalize_text(&record.location);
    match mode {
        LocationMode::Exact => wanted.any(|l| l == location),
        LocationMode::Contains => wanted.any(|l| location.contains(l.as_str())),
    }
}

/// Check if a listing's field is close enough to the requested field
///
/// A blank query field bypasses the check.
#[inline]
pub fn passes_field_threshold(record: &InternshipRecord, query: &StudentQuery, policy: &MatchPolicy) -> bool {
    if query.field.trim().is_empty() {
        return true;
    }

    field_similarity(&query.field, &record.field, &policy.field_metric) >= policy.field_threshold
}

/// Apply the hard constraints, preserving store order
///
/// The exact location check runs first so the fuzzy field comparison only
/// sees listings that are already in an acceptable location.
pub fn filter_candidates<'a>(
    query: &StudentQuery,
    records: &'a [InternshipRecord],
    policy: &MatchPolicy,
) -> Vec<&'a InternshipRecord> {
    records
        .iter()
        .filter(|record| matches_location(record, query, policy.location_mode))
        .filter(|record| passes_field_threshold(record, query, policy))
        .collect()
}
