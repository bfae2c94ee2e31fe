//! Request orchestration: nearest camera, prompt, VLM call, response

pub mod models;
pub mod orchestrator;

pub use models::{GuidanceRequest, GuidanceResponse};
pub use orchestrator::GuidanceService;
