// Core algorithm exports
pub mod filters;
pub mod matcher;
pub mod ranking;
pub mod scoring;
pub mod similarity;
pub mod store;

pub use filters::{filter_candidates, matches_location, passes_field_threshold};
pub use matcher::{Matcher, RecommendationSet};
pub use ranking::{rank, Scored};
pub use scoring::calculate_match_score;
pub use similarity::{field_similarity, partial_ratio, skill_overlap, Similarity, SimilarityAlgo};
pub use store::{RecordStore, StoreHandle};
