//! Static camera registry with nearest-neighbor lookup
//!
//! The registry is loaded once at startup and treated as immutable for
//! the process lifetime, so an `Arc<CameraDirectory>` is safe for any
//! number of concurrent readers.

pub mod directory;
pub mod geo;
pub mod models;

pub use directory::CameraDirectory;
pub use geo::haversine_meters;
pub use models::{CameraRecord, Coordinate};
