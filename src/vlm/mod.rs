//! Client adapter for the external vision-language-model API
//!
//! Two backends implement one capability trait: [`AssetChatClient`] is
//! the canonical upload/chat/delete sequence against the documented
//! provider API, and [`DirectUrlClient`] is the legacy single-call
//! variant kept for providers that accept a video URL inline.
//!
//! Every remote failure is converted to data at this boundary. Callers
//! always receive a [`VlmOutcome`] with a user-presentable `text`.

pub mod client;
pub mod config;
pub mod direct;
pub mod models;
pub mod prompt;

pub use client::{AssetChatClient, VlmBackend};
pub use config::VlmConfig;
pub use direct::DirectUrlClient;
pub use models::{AnalysisPhase, VlmError, VlmOutcome};
pub use prompt::build_prompt;
