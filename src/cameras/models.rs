//! Data models for the camera registry

use serde::{Deserialize, Serialize};

/// A validated latitude/longitude pair in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "long")]
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate, rejecting out-of-range values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&latitude) || !latitude.is_finite() {
            return Err(format!("latitude {} out of range [-90, 90]", latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) || !longitude.is_finite() {
            return Err(format!("longitude {} out of range [-180, 180]", longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn is_in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
            && self.latitude.is_finite()
            && self.longitude.is_finite()
    }
}

/// A registered camera. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraRecord {
    /// Unique identifier within the directory ("id" accepted as alias)
    #[serde(alias = "id")]
    pub camera_id: String,

    /// Display name
    pub name: String,

    /// Camera position
    pub location: Coordinate,

    /// Physical orientation and landmarks, injected into VLM prompts
    #[serde(default)]
    pub context_description: String,

    /// Opaque video reference: a remote asset URL or a local clip path
    #[serde(alias = "video_reference")]
    pub video_clip_url: String,
}

/// Top-level shape of the cameras registry file.
#[derive(Debug, Deserialize)]
pub struct CameraFile {
    #[serde(default)]
    pub cameras: Vec<CameraRecord>,
}
