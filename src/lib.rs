//! Backend relay for camera-grounded accessibility guidance.
//!
//! The service resolves the registered camera nearest to a user's
//! coordinates, crafts a prompt from the camera's context description,
//! and forwards the camera's video clip to an external vision-language
//! model for analysis. Every upstream outcome is normalized into a
//! user-presentable answer.

pub mod api;
pub mod cameras;
pub mod config;
pub mod error;
pub mod guidance;
pub mod metrics;
pub mod vlm;

pub use cameras::CameraDirectory;
pub use config::AppConfig;
pub use error::{GuideError, Result};
pub use guidance::GuidanceService;
pub use vlm::{AssetChatClient, VlmBackend, VlmConfig};
