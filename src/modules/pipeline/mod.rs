pub mod orchestrator;
pub mod progress;
pub mod types;

pub use orchestrator::ReconciliationPipeline;
pub use progress::ProgressTracker;
pub use types::{IngestReport, MatchReport, PipelineReport, ScoreDistribution, ScoreReport};
