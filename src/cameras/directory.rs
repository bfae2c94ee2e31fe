//! Camera directory: load, enumerate, nearest-neighbor lookup

use super::geo::haversine_meters;
use super::models::{CameraFile, CameraRecord, Coordinate};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Immutable registry of cameras, loaded once at startup.
#[derive(Debug, Default)]
pub struct CameraDirectory {
    cameras: Vec<CameraRecord>,
}

impl CameraDirectory {
    /// Build a directory from an in-memory list of records.
    ///
    /// Records with out-of-range coordinates are dropped with a warning;
    /// load order is preserved for the remaining ones.
    pub fn new(cameras: Vec<CameraRecord>) -> Self {
        let cameras: Vec<CameraRecord> = cameras
            .into_iter()
            .filter(|camera| {
                if camera.location.is_in_range() {
                    true
                } else {
                    warn!(
                        camera_id = %camera.camera_id,
                        "Skipping camera with out-of-range location"
                    );
                    false
                }
            })
            .collect();

        Self { cameras }
    }

    /// Load the registry from a JSON file.
    ///
    /// Fails softly: a missing file and a malformed file both produce an
    /// empty directory (the service stays reachable), distinguished only
    /// by the log channel.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Camera registry {} not found: {}", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<CameraFile>(&contents) {
            Ok(file) => {
                let directory = Self::new(file.cameras);
                info!(
                    "Loaded {} cameras from {}",
                    directory.len(),
                    path.display()
                );
                directory
            }
            Err(e) => {
                error!("Error parsing camera registry {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Find the camera nearest to the given coordinate.
    ///
    /// Returns `None` when the directory is empty. Ties keep the first
    /// record in load order (strict `<` comparison).
    pub fn find_nearest(&self, coordinate: Coordinate) -> Option<&CameraRecord> {
        let mut nearest: Option<&CameraRecord> = None;
        let mut min_distance = f64::INFINITY;

        for camera in &self.cameras {
            let distance = haversine_meters(coordinate, camera.location);

            if distance < min_distance {
                min_distance = distance;
                nearest = Some(camera);
            }
        }

        if let Some(camera) = nearest {
            debug!(
                camera_id = %camera.camera_id,
                distance_m = min_distance,
                "Resolved nearest camera"
            );
        }

        nearest
    }

    /// All records in load order.
    pub fn list_all(&self) -> &[CameraRecord] {
        &self.cameras
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }
}
