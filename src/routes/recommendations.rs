use actix_web::{web, HttpResponse, Responder};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

use crate::core::{Matcher, StoreHandle};
use crate::models::{ErrorResponse, HealthResponse, RecommendationRequest, RecommendationsResponse, ReloadResponse};
use crate::services::{load_store, DatasetError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StoreHandle>,
    pub matcher: Matcher,
    pub dataset_path: PathBuf,
}

/// Errors that can occur while reloading the dataset
#[derive(Debug, Error)]
pub enum ReloadError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("Reload task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Configure all recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/", web::get().to(root))
        .route("/health", web::get().to(health_check))
        .route("/get_recommendations", web::post().to(get_recommendations))
        .route("/dataset/reload", web::post().to(reload_dataset));
}

async fn root() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Internship matching server is running. Use /get_recommendations to get results.",
    }))
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        data_rows: state.store.snapshot().len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommendations endpoint
///
/// POST /get_recommendations
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "course": "string",
///   "skills": ["string"],
///   "locations": ["string"],
///   "field": "string",
///   "top_n": 5
/// }
/// ```
async fn get_recommendations(
    state: web::Data<AppState>,
    req: web::Json<RecommendationRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for get_recommendations request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let query = req.to_query();
    let store = state.store.snapshot();

    tracing::info!(
        "Recommending for {} ({} skills, {} locations, field {:?})",
        query.name,
        query.skills.len(),
        query.locations.len(),
        query.field
    );

    let result = state.matcher.get_recommendations(&query, &store);

    let response = RecommendationsResponse {
        success: true,
        total_found: result.matches.len(),
        recommendations: result.matches,
    };

    tracing::info!(
        "Returning {} recommendations for {} (from {} listings)",
        response.total_found,
        query.name,
        result.total_candidates
    );

    HttpResponse::Ok().json(response)
}

/// Dataset reload endpoint
///
/// POST /dataset/reload
///
/// Re-reads the configured dataset and swaps it in. On failure the current
/// store stays in place.
async fn reload_dataset(state: web::Data<AppState>) -> impl Responder {
    match reload(&state).await {
        Ok(rows) => {
            tracing::info!("Dataset reloaded ({} rows)", rows);
            HttpResponse::Ok().json(ReloadResponse {
                success: true,
                data_rows: rows,
            })
        }
        Err(e) => {
            tracing::error!("Failed to reload dataset from {}: {}", state.dataset_path.display(), e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to reload dataset".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

async fn reload(state: &AppState) -> Result<usize, ReloadError> {
    let path = state.dataset_path.clone();
    let store = tokio::task::spawn_blocking(move || load_store(path)).await??;
    let rows = store.len();
    state.store.replace(store);
    Ok(rows)
}
