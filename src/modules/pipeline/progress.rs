use crate::shared::utils::logger::LogContext;

/// Throttles per-record progress output so large batches do not flood
/// the log: a line every `interval` records plus a final line.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    interval: usize,
}

impl ProgressTracker {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
        }
    }

    pub fn should_report(&self, processed: usize, total: usize) -> bool {
        processed == total || processed % self.interval == 0
    }

    pub fn report(&self, phase: &str, processed: usize, total: usize) {
        if self.should_report(processed, total) {
            LogContext::phase_progress(phase, processed, total);
        }
    }
}
