use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{PlaceScore, ScoreBreakdown};
use crate::shared::errors::AppResult;

/// Persistence port for composite scores. One row per master; writing a
/// score for a master that already has one overwrites it.
#[async_trait]
pub trait PlaceScoreRepository: Send + Sync {
    async fn upsert_score(&self, master_id: Uuid, breakdown: &ScoreBreakdown) -> AppResult<()>;

    async fn get_by_master(&self, master_id: Uuid) -> AppResult<Option<PlaceScore>>;
}
