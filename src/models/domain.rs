use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;

use crate::core::similarity::{normalize_text, SimilarityAlgo};

/// Raw dataset row, before normalization
///
/// Every column is optional here; the record store fills in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default, alias = "title")]
    pub internship_title: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Option<String>,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub apply_link: Option<String>,
}

/// Internship listing as held by the record store
#[derive(Debug, Clone, PartialEq)]
pub struct InternshipRecord {
    pub company: String,
    pub title: String,
    pub location: String,
    pub skills: BTreeSet<String>,
    pub field: String,
    pub apply_link: String,
}

impl InternshipRecord {
    /// Key used to collapse duplicate listings
    pub fn listing_key(&self) -> (String, String, String) {
        (
            normalize_text(&self.company),
            normalize_text(&self.title),
            normalize_text(&self.location),
        )
    }
}

/// Student query, normalized and ready for matching
#[derive(Debug, Clone, Default)]
pub struct StudentQuery {
    pub name: String,
    pub course: String,
    pub skills: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    pub field: String,
    /// Raw requested size; resolved by the matcher
    pub top_n: Option<i64>,
}

impl StudentQuery {
    /// Build a query, normalizing every matching input
    pub fn new<S, L>(
        name: impl Into<String>,
        course: impl Into<String>,
        skills: S,
        locations: L,
        field: &str,
        top_n: Option<i64>,
    ) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        L: IntoIterator,
        L::Item: AsRef<str>,
    {
        Self {
            name: name.into(),
            course: course.into(),
            skills: normalize_set(skills),
            locations: normalize_set(locations),
            field: normalize_text(field),
            top_n,
        }
    }
}

/// Normalize a collection of free-form tokens into a set, dropping blanks
pub fn normalize_set<I>(values: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| normalize_text(v.as_ref()))
        .filter(|v| !v.is_empty())
        .collect()
}

/// Recommended listing returned to the caller
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub company: String,
    #[serde(rename = "internship_title")]
    pub title: String,
    pub location: String,
    #[serde(serialize_with = "serialize_skills")]
    pub skills: Vec<String>,
    pub field: String,
    pub match_score: f64,
    pub apply_link: String,
}

impl MatchResult {
    pub fn from_record(record: &InternshipRecord, match_score: f64) -> Self {
        Self {
            company: record.company.clone(),
            title: record.title.clone(),
            location: record.location.clone(),
            skills: record.skills.iter().cloned().collect(),
            field: record.field.clone(),
            match_score,
            apply_link: record.apply_link.clone(),
        }
    }
}

fn serialize_skills<S: Serializer>(skills: &[String], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&skills.join(", "))
}

/// Per-record score decomposition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub skill_score: f64,
    pub field_score: f64,
    pub composite: f64,
}

/// Scoring weights
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub skills: f64,
    pub field: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skills: 0.6,
            field: 0.4,
        }
    }
}

/// How query locations are compared against listing locations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationMode {
    /// Case-insensitive equality
    #[default]
    Exact,
    /// Case-insensitive substring
    Contains,
}

/// Thresholds and metrics that drive filtering and skill matching
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchPolicy {
    /// Minimum per-pair similarity for a query skill to count as matched
    pub skill_match_threshold: f64,
    /// Minimum field similarity for a record to survive filtering
    pub field_threshold: f64,
    pub skill_metric: SimilarityAlgo,
    pub field_metric: SimilarityAlgo,
    pub location_mode: LocationMode,
    pub default_top_n: usize,
    pub max_top_n: usize,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            skill_match_threshold: 0.70,
            field_threshold: 0.80,
            skill_metric: SimilarityAlgo::PartialLevenshtein,
            field_metric: SimilarityAlgo::Levenshtein,
            location_mode: LocationMode::Exact,
            default_top_n: 5,
            max_top_n: 20,
        }
    }
}
