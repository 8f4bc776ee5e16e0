use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aggregated per-platform inputs for one master record, as read back
/// from its detail rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlatformSignals {
    pub kakao_rating: Option<f64>,
    pub naver_rating: Option<f64>,
    pub kakao_reviews: i32,
    pub naver_reviews: i32,
}

/// Result of one composite-score computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Normalized Kakao rating, 0.0-5.0, one decimal
    pub kakao_score: f64,
    /// Normalized Naver rating, 0.0-5.0, one decimal
    pub naver_score: f64,
    /// Review-volume bucket, 0-100
    pub volume_score: i32,
    /// Weighted composite, 0-100
    pub composite_score: i32,
}

/// Persisted score row, recomputable from the master's detail rows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceScore {
    pub master_id: Uuid,
    pub kakao_score: f64,
    pub naver_score: f64,
    pub volume_score: i32,
    pub composite_score: i32,
    pub calculated_at: DateTime<Utc>,
}

/// Coarse reporting bands over the composite score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GradeBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl GradeBand {
    pub fn from_score(composite_score: i32) -> Self {
        if composite_score >= 80 {
            GradeBand::Excellent
        } else if composite_score >= 60 {
            GradeBand::Good
        } else if composite_score >= 40 {
            GradeBand::Fair
        } else {
            GradeBand::Poor
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_edges() {
        assert_eq!(GradeBand::from_score(100), GradeBand::Excellent);
        assert_eq!(GradeBand::from_score(80), GradeBand::Excellent);
        assert_eq!(GradeBand::from_score(79), GradeBand::Good);
        assert_eq!(GradeBand::from_score(60), GradeBand::Good);
        assert_eq!(GradeBand::from_score(59), GradeBand::Fair);
        assert_eq!(GradeBand::from_score(40), GradeBand::Fair);
        assert_eq!(GradeBand::from_score(39), GradeBand::Poor);
        assert_eq!(GradeBand::from_score(0), GradeBand::Poor);
    }
}
