//! Intern Match - internship recommendation service
//!
//! This library provides the matching and ranking engine that recommends
//! internship listings to a student profile. It runs a filter/score/rank
//! pipeline over an in-memory record store loaded from a CSV dataset.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, RecommendationSet, RecordStore, StoreHandle};
pub use models::{InternshipRecord, StudentQuery, MatchResult, ScoringWeights, MatchPolicy, RecommendationRequest, RecommendationsResponse};
pub use services::{load_store, DatasetError};
