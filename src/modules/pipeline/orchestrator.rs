use std::sync::Arc;

use super::progress::ProgressTracker;
use super::types::{IngestReport, MatchReport, PipelineReport, ScoreDistribution, ScoreReport};
use crate::config::PipelineConfig;
use crate::modules::enrichment::{NewPlaceDetail, PlaceDetailRepository};
use crate::modules::matcher::EntityMatcher;
use crate::modules::provider::SearchClient;
use crate::modules::registry::{
    MasterImportService, MasterPlaceRepository, RegistryRow,
};
use crate::modules::scoring::{GradeBand, PlaceScoreRepository, ScoreCalculator};
use crate::shared::errors::AppResult;
use crate::shared::utils::logger::TimedOperation;
use crate::{log_debug, log_error, log_info, log_warn};

/// At most this many per-record error messages are surfaced in a phase
/// report; the rest are only counted.
const ERROR_SAMPLE_LIMIT: usize = 5;

/// Drives the end-to-end reconciliation flow over the master store.
///
/// Phases are independently invokable and strictly ordered when combined.
/// Per-record failures stay inside the phase loop; only an unreachable
/// store aborts a phase.
pub struct ReconciliationPipeline {
    masters: Arc<dyn MasterPlaceRepository>,
    details: Arc<dyn PlaceDetailRepository>,
    scores: Arc<dyn PlaceScoreRepository>,
    clients: Vec<Arc<dyn SearchClient>>,
    import_service: MasterImportService,
    matcher: EntityMatcher,
    calculator: ScoreCalculator,
    progress: ProgressTracker,
    config: PipelineConfig,
}

impl ReconciliationPipeline {
    pub fn new(
        masters: Arc<dyn MasterPlaceRepository>,
        details: Arc<dyn PlaceDetailRepository>,
        scores: Arc<dyn PlaceScoreRepository>,
        clients: Vec<Arc<dyn SearchClient>>,
        config: PipelineConfig,
    ) -> Self {
        let import_service =
            MasterImportService::new(Arc::clone(&masters), config.batch_commit_size);

        Self {
            masters,
            details,
            scores,
            clients,
            import_service,
            matcher: EntityMatcher::new(config.matching),
            calculator: ScoreCalculator::new(config.weights, config.volume_buckets.clone()),
            progress: ProgressTracker::new(config.progress_interval),
            config,
        }
    }

    /// Phase 1: upsert a batch of parsed registry rows. When the batch is
    /// a complete snapshot of the registry, records absent from it are
    /// swept to CLOSED.
    pub async fn run_ingest(
        &self,
        rows: Vec<RegistryRow>,
        complete_snapshot: bool,
    ) -> AppResult<IngestReport> {
        log_info!("Ingest phase: {} registry rows", rows.len());

        // Keys present in the snapshot stay active even when the rest of
        // their row fails validation; the sweep must see all of them.
        let snapshot_keys: Vec<String> = rows
            .iter()
            .filter_map(|row| row.natural_key.as_deref())
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .collect();

        let stats = self.import_service.upsert(rows).await?;

        let closed = if complete_snapshot {
            self.import_service.mark_closed(&snapshot_keys).await?
        } else {
            0
        };

        let status_counts = self.import_service.statistics().await?;
        for (status, count) in &status_counts {
            log_info!("Master store: {} {}", count, status);
        }

        Ok(IngestReport {
            stats,
            closed,
            status_counts,
        })
    }

    /// Phase 2: search every configured platform for each ACTIVE master
    /// and persist a detail row per matching platform. A record counts as
    /// matched when at least one platform produced a detail row.
    pub async fn run_match(&self) -> AppResult<MatchReport> {
        let timer = TimedOperation::new("match_phase");

        self.masters.ping().await?;

        let masters = self.masters.load_active(self.config.match_limit).await?;
        log_info!(
            "Match phase: {} active masters against {} platform(s)",
            masters.len(),
            self.clients.len()
        );

        let mut report = MatchReport {
            total: masters.len(),
            ..Default::default()
        };

        for (index, master) in masters.iter().enumerate() {
            let mut record_matched = false;

            for client in &self.clients {
                let candidates = match client
                    .search(
                        master.latitude,
                        master.longitude,
                        &master.name,
                        self.config.search_radius_m,
                    )
                    .await
                {
                    Ok(candidates) => candidates,
                    Err(e) => {
                        // Timeouts, rate limits, and transport failures all
                        // degrade to "no candidates" for this record.
                        if report.error_samples.len() < ERROR_SAMPLE_LIMIT {
                            report
                                .error_samples
                                .push(format!("{} [{}]: {}", master.natural_key, client.platform(), e));
                        }
                        if e.is_transient() {
                            log_warn!(
                                "Search failed for '{}' on {}: {}",
                                master.name,
                                client.platform(),
                                e
                            );
                        } else {
                            log_error!(
                                "Unexpected search failure for '{}' on {}: {}",
                                master.name,
                                client.platform(),
                                e
                            );
                        }
                        continue;
                    }
                };

                if candidates.is_empty() {
                    continue;
                }

                let Some((candidate, decision)) =
                    self.matcher.find_best_match(master, &candidates)
                else {
                    continue;
                };

                let detail = NewPlaceDetail::from_candidate(master.id, candidate);
                match self.details.upsert(&detail).await {
                    Ok(()) => {
                        record_matched = true;
                        log_debug!(
                            "Matched '{}' to {} '{}' ({:.1} m, similarity {:.3})",
                            master.name,
                            candidate.platform,
                            candidate.name,
                            decision.distance_m,
                            decision.similarity
                        );
                    }
                    Err(e) => {
                        if report.error_samples.len() < ERROR_SAMPLE_LIMIT {
                            report
                                .error_samples
                                .push(format!("{}: detail write failed: {}", master.natural_key, e));
                        }
                        log_warn!("Detail write failed for '{}': {}", master.name, e);
                    }
                }
            }

            if record_matched {
                report.matched += 1;
            } else {
                report.failed += 1;
            }

            self.progress.report("Match", index + 1, report.total);
        }

        log_info!(
            "Match phase finished: {} matched, {} failed, success rate {:.1}%",
            report.matched,
            report.failed,
            report.success_rate() * 100.0
        );
        timer.finish();

        Ok(report)
    }

    /// Phase 3: recompute composite scores for every ACTIVE master that
    /// has at least one detail row.
    pub async fn run_score(&self) -> AppResult<ScoreReport> {
        let timer = TimedOperation::new("score_phase");

        self.masters.ping().await?;

        let signal_sets = self.details.signals_for_active_masters().await?;
        log_info!("Score phase: {} masters with platform signals", signal_sets.len());

        let mut report = ScoreReport::default();
        let mut distribution = ScoreDistribution::default();
        let total = signal_sets.len();

        for (index, (master_id, signals)) in signal_sets.into_iter().enumerate() {
            let breakdown = self.calculator.calculate(&signals);

            match self.scores.upsert_score(master_id, &breakdown).await {
                Ok(()) => {
                    report.calculated += 1;
                    distribution.record(GradeBand::from_score(breakdown.composite_score));
                }
                Err(e) => {
                    report.failed += 1;
                    log_warn!("Score write failed for master {}: {}", master_id, e);
                }
            }

            self.progress.report("Score", index + 1, total);
        }

        report.distribution = distribution;

        log_info!(
            "Score phase finished: {} calculated ({} excellent / {} good / {} fair / {} poor), {} failed",
            report.calculated,
            distribution.excellent,
            distribution.good,
            distribution.fair,
            distribution.poor,
            report.failed
        );
        timer.finish();

        Ok(report)
    }

    /// Ingest -> Match -> Score. Each phase isolates its own per-record
    /// failures; one record's match failure never blocks another's score.
    pub async fn run_all(
        &self,
        rows: Vec<RegistryRow>,
        complete_snapshot: bool,
    ) -> AppResult<PipelineReport> {
        let ingest = self.run_ingest(rows, complete_snapshot).await?;
        let matching = self.run_match().await?;
        let scoring = self.run_score().await?;

        Ok(PipelineReport {
            ingest,
            matching,
            scoring,
        })
    }
}
