use serde::{Deserialize, Serialize};
use crate::models::domain::MatchResult;

/// Response for the recommendations endpoint
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationsResponse {
    pub success: bool,
    pub recommendations: Vec<MatchResult>,
    pub total_found: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub data_rows: usize,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Dataset reload response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub success: bool,
    pub data_rows: usize,
}
