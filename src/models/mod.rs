// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{RawListing, InternshipRecord, StudentQuery, MatchResult, ScoreBreakdown, ScoringWeights, MatchPolicy, LocationMode};
pub use requests::RecommendationRequest;
pub use responses::{RecommendationsResponse, HealthResponse, ErrorResponse, ReloadResponse};
