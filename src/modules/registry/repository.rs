use async_trait::async_trait;
use std::collections::HashMap;

use super::domain::{MasterPlace, NewMasterPlace, PlaceStatus};
use crate::shared::errors::AppResult;

/// Counts for one committed upsert batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub inserted: usize,
    pub updated: usize,
}

/// Persistence port for the canonical master store.
#[async_trait]
pub trait MasterPlaceRepository: Send + Sync {
    /// Cheap connectivity probe; phases call this once up front so that a
    /// dead database fails the phase instead of every record in it.
    async fn ping(&self) -> AppResult<()>;

    /// Upsert one batch atomically. Existing natural keys are fully
    /// overwritten (except the key itself) and forced back to ACTIVE; new
    /// keys are inserted as ACTIVE.
    async fn upsert_batch(&self, rows: &[NewMasterPlace]) -> AppResult<BatchOutcome>;

    /// Close every ACTIVE record whose natural key is absent from
    /// `active_keys`. Returns the number of records transitioned.
    async fn mark_closed_except(&self, active_keys: &[String]) -> AppResult<usize>;

    async fn count_by_status(&self) -> AppResult<HashMap<PlaceStatus, i64>>;

    /// ACTIVE records in ascending natural-key order, optionally capped.
    async fn load_active(&self, limit: Option<i64>) -> AppResult<Vec<MasterPlace>>;
}
