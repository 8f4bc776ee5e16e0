use crate::modules::matcher::MatchCriteria;
use crate::modules::scoring::{ScoreWeights, VolumeBuckets};

/// Everything the pipeline needs beyond credentials, with sane defaults.
/// Passed explicitly at construction so independent runs can use
/// independent settings in the same process.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub matching: MatchCriteria,
    pub weights: ScoreWeights,
    pub volume_buckets: VolumeBuckets,
    /// Platform search radius in meters (clamped further per platform).
    pub search_radius_m: u32,
    /// Rows per registry commit batch.
    pub batch_commit_size: usize,
    /// Optional cap on masters processed in the match phase.
    pub match_limit: Option<i64>,
    /// Emit a progress line every N processed records.
    pub progress_interval: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            matching: MatchCriteria::default(),
            weights: ScoreWeights::default(),
            volume_buckets: VolumeBuckets::default(),
            search_radius_m: 100,
            batch_commit_size: 100,
            match_limit: None,
            progress_interval: 10,
        }
    }
}
