use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{NewPlaceDetail, PlaceDetail};
use crate::modules::scoring::PlatformSignals;
use crate::shared::errors::AppResult;

/// Persistence port for per-platform detail rows. One row per
/// (master, platform); a re-match refreshes the row in place.
#[async_trait]
pub trait PlaceDetailRepository: Send + Sync {
    async fn upsert(&self, detail: &NewPlaceDetail) -> AppResult<()>;

    async fn load_by_master(&self, master_id: Uuid) -> AppResult<Vec<PlaceDetail>>;

    /// Aggregated rating/review signals for every ACTIVE master that has
    /// at least one detail row, in ascending natural-key order.
    async fn signals_for_active_masters(&self) -> AppResult<Vec<(Uuid, PlatformSignals)>>;
}
