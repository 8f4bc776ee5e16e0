use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use super::domain::{NewMasterPlace, PlaceStatus, RegistryRow};
use super::repository::MasterPlaceRepository;
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::TimedOperation;
use crate::{log_info, log_warn};

/// At most this many row-level error messages are kept for the report;
/// the rest are only counted.
const ERROR_SAMPLE_LIMIT: usize = 5;

/// Outcome of one registry import
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportStats {
    pub inserted: usize,
    pub updated: usize,
    pub errors: usize,
    pub error_samples: Vec<String>,
}

impl ImportStats {
    fn record_error(&mut self, message: String) {
        if self.error_samples.len() < ERROR_SAMPLE_LIMIT {
            self.error_samples.push(message);
        }
        self.errors += 1;
    }
}

/// Ingests parsed registry rows into the master store: validates each
/// row, upserts in bounded batches, and sweeps closures on demand.
pub struct MasterImportService {
    repository: Arc<dyn MasterPlaceRepository>,
    batch_size: usize,
}

impl MasterImportService {
    pub fn new(repository: Arc<dyn MasterPlaceRepository>, batch_size: usize) -> Self {
        Self {
            repository,
            batch_size: batch_size.max(1),
        }
    }

    /// Validate and upsert a registry snapshot. Row-level failures are
    /// counted and skipped; a failed batch costs only that batch.
    pub async fn upsert(&self, rows: Vec<RegistryRow>) -> AppResult<ImportStats> {
        let timer = TimedOperation::new("registry_upsert");
        let total = rows.len();
        let mut stats = ImportStats::default();

        // A dead store should fail the phase, not every row in it
        self.repository.ping().await?;

        let mut valid: Vec<NewMasterPlace> = Vec::with_capacity(rows.len());
        for row in rows {
            match row.validate() {
                Ok(place) => valid.push(place),
                Err(e) => {
                    if stats.error_samples.len() < ERROR_SAMPLE_LIMIT {
                        log_warn!("Skipping registry row: {}", e);
                    }
                    stats.record_error(e.to_string());
                }
            }
        }

        for chunk in valid.chunks(self.batch_size) {
            match self.repository.upsert_batch(chunk).await {
                Ok(outcome) => {
                    stats.inserted += outcome.inserted;
                    stats.updated += outcome.updated;
                }
                Err(e) => {
                    // Earlier batches are already committed; this one is
                    // lost as a unit and the import moves on.
                    log_warn!("Batch of {} rows failed: {}", chunk.len(), e);
                    stats.record_error(format!("batch failed: {}", e));
                    stats.errors += chunk.len() - 1;
                }
            }
        }

        log_info!(
            "Registry upsert finished: {} inserted, {} updated, {} errors (of {} rows)",
            stats.inserted,
            stats.updated,
            stats.errors,
            total
        );
        timer.finish_with_info(&format!("{} rows", total));

        Ok(stats)
    }

    /// Closure sweep: callers must pass the complete current set of
    /// externally-known-active keys. A partial set will close records that
    /// are still alive.
    pub async fn mark_closed(&self, active_keys: &[String]) -> AppResult<usize> {
        let closed = self.repository.mark_closed_except(active_keys).await?;
        if closed > 0 {
            log_warn!("Closure sweep marked {} records CLOSED", closed);
        }
        Ok(closed)
    }

    pub async fn statistics(&self) -> AppResult<HashMap<PlaceStatus, i64>> {
        self.repository.count_by_status().await
    }
}
