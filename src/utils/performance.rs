//! Cycle timing
//!
//! Collects durations of named operations (the processing cycle, mainly) so
//! the host page can watch re-segmentation cost as documents grow.

use std::collections::HashMap;

/// Running total for one operation
#[derive(Debug, Default, Clone, Copy)]
struct Timing {
    total_ms: f64,
    count: usize,
}

/// Performance monitor for measuring operation times.
///
/// Keeps a running sum and count per operation, not the samples.
#[derive(Debug, Default)]
pub struct PerformanceMonitor {
    measurements: HashMap<String, Timing>,
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_measurement(&mut self, operation: &str, duration_ms: f32) {
        let timing = self.measurements.entry(operation.to_string()).or_default();
        timing.total_ms += f64::from(duration_ms);
        timing.count += 1;
    }

    /// Mean duration, `None` if the operation was never recorded
    pub fn get_average_time(&self, operation: &str) -> Option<f32> {
        self.measurements
            .get(operation)
            .filter(|timing| timing.count > 0)
            .map(|timing| (timing.total_ms / timing.count as f64) as f32)
    }

    pub fn count(&self, operation: &str) -> usize {
        self.measurements.get(operation).map_or(0, |timing| timing.count)
    }
}
