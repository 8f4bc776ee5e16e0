pub mod calculator;
pub mod domain;
pub mod persistence;
pub mod repository;

pub use calculator::{ScoreCalculator, ScoreWeights, VolumeBuckets};
pub use domain::{GradeBand, PlaceScore, PlatformSignals, ScoreBreakdown};
pub use persistence::PlaceScoreRepositoryImpl;
pub use repository::PlaceScoreRepository;
