// file: src/utils/telemetry.rs
// description: operation timing for pipeline runs and upstream calls
// reference: tracing structured fields

use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Logs start and completion of a named operation.
pub struct OperationTimer {
    operation: String,
    start: Instant,
}

impl OperationTimer {
    pub fn new(operation: &str) -> Self {
        info!(operation, "Starting operation");
        Self {
            operation: operation.to_string(),
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.elapsed();
        info!(
            operation = %self.operation,
            elapsed_ms = elapsed.as_millis() as u64,
            "Completed operation"
        );
        elapsed
    }

    pub fn finish_with_count(self, count: usize) -> Duration {
        let elapsed = self.elapsed();
        info!(
            operation = %self.operation,
            count,
            elapsed_ms = elapsed.as_millis() as u64,
            "Completed operation"
        );
        elapsed
    }

    pub fn warn_if_slow(&self, threshold: Duration, message: &str) {
        let elapsed = self.elapsed();
        if elapsed > threshold {
            warn!(
                operation = %self.operation,
                elapsed_ms = elapsed.as_millis() as u64,
                threshold_ms = threshold.as_millis() as u64,
                "Slow operation: {}",
                message
            );
        }
    }
}
