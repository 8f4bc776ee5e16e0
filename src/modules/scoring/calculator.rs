use super::domain::{PlatformSignals, ScoreBreakdown};

/// Highest rating either platform hands out
const MAX_RATING: f64 = 5.0;

/// Relative weight of each signal in the composite.
/// Platform weights plus the volume weight sum to 1.0 by default; callers
/// tuning them are responsible for keeping the sum at or below 1.0.
#[derive(Debug, Clone, Copy)]
pub struct ScoreWeights {
    pub kakao: f64,
    pub naver: f64,
    pub volume: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            kakao: 0.5,
            naver: 0.3,
            volume: 0.2,
        }
    }
}

/// Step function from total review count to a 0-100 sub-score.
/// Tiers are checked top-down; the floor applies below the lowest tier.
#[derive(Debug, Clone)]
pub struct VolumeBuckets {
    tiers: Vec<(i64, i32)>,
    floor: i32,
}

impl VolumeBuckets {
    pub fn new(mut tiers: Vec<(i64, i32)>, floor: i32) -> Self {
        tiers.sort_by(|a, b| b.0.cmp(&a.0));
        Self { tiers, floor }
    }

    pub fn score(&self, total_reviews: i64) -> i32 {
        for (threshold, score) in &self.tiers {
            if total_reviews >= *threshold {
                return *score;
            }
        }
        self.floor
    }
}

impl Default for VolumeBuckets {
    fn default() -> Self {
        Self::new(
            vec![(200, 100), (100, 80), (50, 60), (20, 40), (10, 20)],
            10,
        )
    }
}

/// Folds multi-platform rating and review-volume signals into a single
/// bounded composite score. Deterministic, no I/O.
#[derive(Debug, Clone)]
pub struct ScoreCalculator {
    weights: ScoreWeights,
    buckets: VolumeBuckets,
}

impl ScoreCalculator {
    pub fn new(weights: ScoreWeights, buckets: VolumeBuckets) -> Self {
        Self { weights, buckets }
    }

    /// Clamp a nullable rating into [0, MAX_RATING]; absent ratings
    /// contribute nothing.
    pub fn normalize_rating(rating: Option<f64>) -> f64 {
        match rating {
            Some(value) => value.clamp(0.0, MAX_RATING),
            None => 0.0,
        }
    }

    /// Volume bucket for the combined review count of all platforms
    pub fn volume_score(&self, signals: &PlatformSignals) -> i32 {
        let total = signals.kakao_reviews.max(0) as i64 + signals.naver_reviews.max(0) as i64;
        self.buckets.score(total)
    }

    /// Weighted composite over normalized ratings and the volume bucket.
    ///
    /// The bucket is rescaled to the 0-5 rating range before weighting so
    /// all three terms share one scale; the weighted sum is then stretched
    /// to 0-100. An establishment with no ratings anywhere intentionally
    /// still earns up to 20 points from volume alone.
    pub fn calculate(&self, signals: &PlatformSignals) -> ScoreBreakdown {
        let kakao_norm = Self::normalize_rating(signals.kakao_rating);
        let naver_norm = Self::normalize_rating(signals.naver_rating);

        let volume_score = self.volume_score(signals);
        let volume_norm = volume_score as f64 / 100.0 * MAX_RATING;

        let weighted_sum = kakao_norm * self.weights.kakao
            + naver_norm * self.weights.naver
            + volume_norm * self.weights.volume;

        let composite_score = ((weighted_sum * 20.0).round() as i32).clamp(0, 100);

        ScoreBreakdown {
            kakao_score: round1(kakao_norm),
            naver_score: round1(naver_norm),
            volume_score,
            composite_score,
        }
    }
}

impl Default for ScoreCalculator {
    fn default() -> Self {
        Self::new(ScoreWeights::default(), VolumeBuckets::default())
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
