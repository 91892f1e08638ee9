use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::error::AppError;
use crate::service::{AnalyzeRequest, DealAnalysis, DealAnalysisService};

/// Router exposing the deal analysis endpoint.
pub fn deal_router(service: Arc<DealAnalysisService>) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze_handler))
        .with_state(service)
}

pub(crate) async fn analyze_handler(
    State(service): State<Arc<DealAnalysisService>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<DealAnalysis>, AppError> {
    let Json(request) =
        payload.map_err(|rejection| AppError::InvalidRequest(rejection.body_text()))?;
    let analysis = service.analyze_request(request).await?;
    Ok(Json(analysis))
}
