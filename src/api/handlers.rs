//! Request handlers

use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

use crate::api::extract::ApiJson;
use crate::api::models::{ApiError, NearestRequest, QueryRequest};
use crate::cameras::Coordinate;
use crate::guidance::{GuidanceResponse, GuidanceService};
use crate::metrics::METRICS;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<GuidanceService>,
}

/// Health check
///
/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "service": "Lorien's Guide API" }))
}

/// Main guidance endpoint
///
/// POST /api/v1/query
///
/// Always answers 200 with an explicit `error` flag once validation
/// passes; voice clients need a presentable body either way.
pub async fn query(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<QueryRequest>,
) -> Result<Json<GuidanceResponse>, (StatusCode, Json<ApiError>)> {
    if request.question_text.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("question_text cannot be empty")),
        ));
    }

    if Coordinate::new(request.lat, request.long).is_err() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ApiError::new("lat/long out of range")),
        ));
    }

    info!("Guidance query at ({}, {})", request.lat, request.long);

    let response = state
        .service
        .handle(request.lat, request.long, &request.question_text)
        .await;

    Ok(Json(response))
}

/// List all registered cameras in load order
///
/// GET /api/v1/cameras
pub async fn list_cameras(State(state): State<AppState>) -> Json<Value> {
    let cameras = state.service.directory().list_all();
    Json(json!({ "cameras": cameras }))
}

/// Find the camera nearest to the given coordinates
///
/// POST /api/v1/cameras/nearest
pub async fn nearest_camera(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<NearestRequest>,
) -> Result<Json<Value>, (StatusCode, Json<ApiError>)> {
    let coordinate = Coordinate::new(request.lat, request.long).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiError::new(format!("Invalid parameter types: {}", e))),
        )
    })?;

    match state.service.directory().find_nearest(coordinate) {
        Some(camera) => {
            METRICS.record_nearest_lookup(true);
            Ok(Json(json!({ "camera": camera })))
        }
        None => {
            METRICS.record_nearest_lookup(false);
            Err((
                StatusCode::NOT_FOUND,
                Json(ApiError::new("No cameras available")),
            ))
        }
    }
}

/// Prometheus text exposition
///
/// GET /metrics
pub async fn metrics() -> String {
    METRICS.export()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cameras::{CameraDirectory, CameraRecord, Coordinate};
    use crate::guidance::GuidanceService;
    use crate::vlm::{VlmBackend, VlmOutcome};
    use async_trait::async_trait;

    struct StubBackend;

    #[async_trait]
    impl VlmBackend for StubBackend {
        async fn analyze(&self, _video_ref: &str, _prompt: &str) -> VlmOutcome {
            VlmOutcome::answer("Walk 10 steps forward.")
        }
    }

    fn state_with(cameras: Vec<CameraRecord>) -> AppState {
        AppState {
            service: Arc::new(GuidanceService::new(
                Arc::new(CameraDirectory::new(cameras)),
                Arc::new(StubBackend),
            )),
        }
    }

    fn lobby_camera() -> CameraRecord {
        CameraRecord {
            camera_id: "lib_lobby_01".to_string(),
            name: "Library Lobby - Main Entrance".to_string(),
            location: Coordinate::new(55.6761, 12.5683).unwrap(),
            context_description: "facing the main hall".to_string(),
            video_clip_url: "asset:lobby-clip".to_string(),
        }
    }

    #[tokio::test]
    async fn test_query_rejects_empty_question() {
        let request = QueryRequest {
            lat: 55.6761,
            long: 12.5683,
            question_text: "   ".to_string(),
        };

        let result = query(State(state_with(vec![lobby_camera()])), ApiJson(request)).await;

        let (status, Json(error)) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error.error);
    }

    #[tokio::test]
    async fn test_query_rejects_out_of_range_coordinates() {
        let request = QueryRequest {
            lat: 123.0,
            long: 12.5683,
            question_text: "Where is the exit?".to_string(),
        };

        let result = query(State(state_with(vec![lobby_camera()])), ApiJson(request)).await;

        let (status, _) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_query_success_returns_guidance() {
        let request = QueryRequest {
            lat: 55.6761,
            long: 12.5683,
            question_text: "Where is the exit?".to_string(),
        };

        let Json(response) = query(State(state_with(vec![lobby_camera()])), ApiJson(request))
            .await
            .ok()
            .unwrap();

        assert!(!response.is_error);
        assert_eq!(response.camera_id.as_deref(), Some("lib_lobby_01"));
        assert_eq!(response.answer_text, "Walk 10 steps forward.");
    }

    #[tokio::test]
    async fn test_nearest_camera_404_when_directory_empty() {
        let request = NearestRequest {
            lat: 55.6761,
            long: 12.5683,
        };

        let result = nearest_camera(State(state_with(vec![])), ApiJson(request)).await;

        let (status, Json(error)) = result.err().unwrap();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error.message, "No cameras available");
    }

    #[tokio::test]
    async fn test_nearest_camera_found() {
        let request = NearestRequest {
            lat: 55.6761,
            long: 12.5683,
        };

        let Json(body) = nearest_camera(State(state_with(vec![lobby_camera()])), ApiJson(request))
            .await
            .ok()
            .unwrap();

        assert_eq!(body["camera"]["camera_id"], "lib_lobby_01");
    }

    #[tokio::test]
    async fn test_nearest_camera_rejects_out_of_range() {
        let request = NearestRequest {
            lat: -91.0,
            long: 12.5683,
        };

        let result = nearest_camera(State(state_with(vec![lobby_camera()])), ApiJson(request)).await;

        let (status, _) = result.err().unwrap();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
