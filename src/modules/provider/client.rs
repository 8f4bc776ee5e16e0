use async_trait::async_trait;

use crate::modules::provider::domain::{PlaceCandidate, Platform};
use crate::shared::errors::AppResult;

/// Port for external map-search platforms.
///
/// Implementations must return an empty list (not an error) when the
/// platform simply has no results near the given point; errors are
/// reserved for transport, auth, and rate-limit failures, which the
/// pipeline treats as "no candidates" for the record being matched.
#[async_trait]
pub trait SearchClient: Send + Sync {
    /// The platform this client talks to
    fn platform(&self) -> Platform;

    /// Keyword search around a coordinate. `radius_m` is clamped to the
    /// platform's own maximum by the implementation.
    async fn search(
        &self,
        latitude: f64,
        longitude: f64,
        name_hint: &str,
        radius_m: u32,
    ) -> AppResult<Vec<PlaceCandidate>>;
}
