//! End-to-end guidance flow

use super::models::{GuidanceRequest, GuidanceResponse, INVALID_REQUEST_TEXT, NO_CAMERAS_TEXT};
use crate::cameras::CameraDirectory;
use crate::metrics::METRICS;
use crate::vlm::{build_prompt, VlmBackend};
use std::sync::Arc;
use tracing::{info, warn};

/// Composes the camera directory and a VLM backend into the end-to-end
/// flow. Stateless per call; the directory is shared read-only and each
/// request owns its asset lifecycle inside the backend.
pub struct GuidanceService {
    directory: Arc<CameraDirectory>,
    backend: Arc<dyn VlmBackend>,
}

impl GuidanceService {
    pub fn new(directory: Arc<CameraDirectory>, backend: Arc<dyn VlmBackend>) -> Self {
        Self { directory, backend }
    }

    pub fn directory(&self) -> &CameraDirectory {
        &self.directory
    }

    /// Process one user request: nearest camera, prompt, VLM analysis,
    /// normalized response. Never fails; every branch yields a
    /// presentable answer.
    pub async fn handle(
        &self,
        latitude: f64,
        longitude: f64,
        question_text: &str,
    ) -> GuidanceResponse {
        // The HTTP layer validates first, but the core stays defensive
        // against direct invocation.
        let request = match GuidanceRequest::new(latitude, longitude, question_text) {
            Ok(request) => request,
            Err(e) => {
                warn!("Rejected guidance request: {}", e);
                METRICS.record_guidance("invalid");
                return GuidanceResponse::failure(question_text, INVALID_REQUEST_TEXT, e);
            }
        };

        let camera = match self.directory.find_nearest(request.location) {
            Some(camera) => {
                METRICS.record_nearest_lookup(true);
                camera
            }
            None => {
                METRICS.record_nearest_lookup(false);
                METRICS.record_guidance("no_camera");
                return GuidanceResponse::failure(
                    question_text,
                    NO_CAMERAS_TEXT,
                    "No cameras available in your area",
                );
            }
        };

        let prompt = build_prompt(&request.question_text, &camera.context_description);

        info!(
            camera_id = %camera.camera_id,
            "Forwarding question to VLM"
        );

        let outcome = self
            .backend
            .analyze(&camera.video_clip_url, &prompt)
            .await;

        METRICS.record_guidance(if outcome.errored { "vlm_error" } else { "success" });

        GuidanceResponse {
            camera_id: Some(camera.camera_id.clone()),
            camera_name: Some(camera.name.clone()),
            question_text: request.question_text,
            answer_text: outcome.text,
            is_error: outcome.errored,
            detail: outcome.detail,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cameras::{CameraRecord, Coordinate};
    use crate::vlm::VlmOutcome;
    use async_trait::async_trait;

    struct StubBackend {
        outcome: VlmOutcome,
    }

    #[async_trait]
    impl VlmBackend for StubBackend {
        async fn analyze(&self, _video_ref: &str, _prompt: &str) -> VlmOutcome {
            self.outcome.clone()
        }
    }

    fn service_with(cameras: Vec<CameraRecord>, outcome: VlmOutcome) -> GuidanceService {
        GuidanceService::new(
            Arc::new(CameraDirectory::new(cameras)),
            Arc::new(StubBackend { outcome }),
        )
    }

    fn lobby_camera() -> CameraRecord {
        CameraRecord {
            camera_id: "lib_lobby_01".to_string(),
            name: "Library Lobby - Main Entrance".to_string(),
            location: Coordinate::new(55.6761, 12.5683).unwrap(),
            context_description: "Library Lobby, facing the main hall".to_string(),
            video_clip_url: "videos/lobby.mp4".to_string(),
        }
    }

    #[tokio::test]
    async fn test_handle_success_end_to_end() {
        let service = service_with(
            vec![lobby_camera()],
            VlmOutcome::answer("The bathroom is behind you."),
        );

        let response = service
            .handle(55.6761, 12.5683, "Where is the bathroom?")
            .await;

        assert_eq!(response.camera_id.as_deref(), Some("lib_lobby_01"));
        assert_eq!(response.question_text, "Where is the bathroom?");
        assert_eq!(response.answer_text, "The bathroom is behind you.");
        assert!(!response.is_error);
    }

    #[tokio::test]
    async fn test_handle_empty_directory() {
        let service = service_with(vec![], VlmOutcome::answer("unused"));

        let response = service.handle(55.6761, 12.5683, "Where is the exit?").await;

        assert!(response.is_error);
        assert!(response.camera_id.is_none());
        assert!(response.camera_name.is_none());
        assert_eq!(response.answer_text, NO_CAMERAS_TEXT);
    }

    #[tokio::test]
    async fn test_handle_propagates_vlm_error_as_data() {
        let service = service_with(
            vec![lobby_camera()],
            VlmOutcome::failure("I'm sorry, something went wrong.", "status 502"),
        );

        let response = service.handle(55.6761, 12.5683, "Where am I?").await;

        assert!(response.is_error);
        // Camera was still resolved; only the analysis failed
        assert_eq!(response.camera_id.as_deref(), Some("lib_lobby_01"));
        assert!(!response.answer_text.is_empty());
    }

    #[tokio::test]
    async fn test_handle_rejects_out_of_range_coordinates() {
        let service = service_with(vec![lobby_camera()], VlmOutcome::answer("unused"));

        let response = service.handle(123.0, 12.5683, "Where is the exit?").await;

        assert!(response.is_error);
        assert!(response.camera_id.is_none());
    }

    #[tokio::test]
    async fn test_handle_rejects_blank_question() {
        let service = service_with(vec![lobby_camera()], VlmOutcome::answer("unused"));

        let response = service.handle(55.6761, 12.5683, "   ").await;

        assert!(response.is_error);
        assert!(response.camera_id.is_none());
    }
}
