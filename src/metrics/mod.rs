//! Metrics collection for observability

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::Duration;

/// Global metrics registry
pub static METRICS: Lazy<Arc<Metrics>> =
    Lazy::new(|| Arc::new(Metrics::new().expect("Failed to initialize metrics")));

/// Metrics collector
pub struct Metrics {
    registry: Registry,

    /// Guidance requests, labeled by outcome (success / no_camera / vlm_error / invalid)
    pub guidance_requests: CounterVec,

    /// VLM provider calls, labeled by operation and status
    pub vlm_requests: CounterVec,

    /// VLM call latency per operation
    pub vlm_request_duration: HistogramVec,

    /// Nearest-camera lookups, labeled by result (found / none)
    pub nearest_lookups: CounterVec,
}

impl Metrics {
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let registry = Registry::new();

        let guidance_requests = register_counter_vec_with_registry!(
            Opts::new("guidance_requests_total", "Total guidance requests"),
            &["outcome"],
            registry
        )?;

        let vlm_requests = register_counter_vec_with_registry!(
            Opts::new("vlm_requests_total", "Total calls against the VLM provider"),
            &["operation", "status"],
            registry
        )?;

        let vlm_request_duration = register_histogram_vec_with_registry!(
            "vlm_request_duration_seconds",
            "VLM provider call duration",
            &["operation"],
            registry
        )?;

        let nearest_lookups = register_counter_vec_with_registry!(
            Opts::new("nearest_lookups_total", "Nearest-camera directory lookups"),
            &["result"],
            registry
        )?;

        Ok(Self {
            registry,
            guidance_requests,
            vlm_requests,
            vlm_request_duration,
            nearest_lookups,
        })
    }

    pub fn record_guidance(&self, outcome: &str) {
        self.guidance_requests.with_label_values(&[outcome]).inc();
    }

    pub fn record_vlm_request(&self, operation: &str, status: &str) {
        self.vlm_requests
            .with_label_values(&[operation, status])
            .inc();
    }

    pub fn observe_vlm_duration(&self, operation: &str, elapsed: Duration) {
        self.vlm_request_duration
            .with_label_values(&[operation])
            .observe(elapsed.as_secs_f64());
    }

    pub fn record_nearest_lookup(&self, found: bool) {
        self.nearest_lookups
            .with_label_values(&[if found { "found" } else { "none" }])
            .inc();
    }

    /// Render the registry in prometheus text exposition format.
    pub fn export(&self) -> String {
        let encoder = TextEncoder::new();
        let families = self.registry.gather();
        let mut buffer = Vec::new();
        if encoder.encode(&families, &mut buffer).is_err() {
            return String::new();
        }
        String::from_utf8(buffer).unwrap_or_default()
    }
}
