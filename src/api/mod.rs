//! HTTP layer: routing, validation, and wire models

pub mod extract;
pub mod handlers;
pub mod models;
pub mod routes;

pub use extract::ApiJson;
pub use handlers::AppState;
pub use routes::build_router;
