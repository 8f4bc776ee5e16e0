use serde::Serialize;
use std::collections::HashMap;

use crate::modules::registry::{ImportStats, PlaceStatus};
use crate::modules::scoring::GradeBand;

/// Result of the ingest phase: upsert counts, optional closure sweep,
/// and the store's status census afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct IngestReport {
    pub stats: ImportStats,
    pub closed: usize,
    pub status_counts: HashMap<PlaceStatus, i64>,
}

/// Result of the match phase
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatchReport {
    pub total: usize,
    pub matched: usize,
    pub failed: usize,
    pub error_samples: Vec<String>,
}

impl MatchReport {
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64
        }
    }
}

/// Count of scored masters per reporting band
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreDistribution {
    pub excellent: usize,
    pub good: usize,
    pub fair: usize,
    pub poor: usize,
}

impl ScoreDistribution {
    pub fn record(&mut self, band: GradeBand) {
        match band {
            GradeBand::Excellent => self.excellent += 1,
            GradeBand::Good => self.good += 1,
            GradeBand::Fair => self.fair += 1,
            GradeBand::Poor => self.poor += 1,
        }
    }
}

/// Result of the score phase
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScoreReport {
    pub calculated: usize,
    pub failed: usize,
    pub distribution: ScoreDistribution,
}

/// Combined result of a full Ingest -> Match -> Score run
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub ingest: IngestReport,
    pub matching: MatchReport,
    pub scoring: ScoreReport,
}
