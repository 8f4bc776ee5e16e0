use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use placelink::config::PipelineConfig;
use placelink::modules::enrichment::PlaceDetailRepositoryImpl;
use placelink::modules::pipeline::ReconciliationPipeline;
use placelink::modules::provider::{KakaoSearchClient, NaverSearchClient, SearchClient};
use placelink::modules::registry::{CsvRegistrySource, MasterPlaceRepositoryImpl, RegistryRow};
use placelink::modules::scoring::PlaceScoreRepositoryImpl;
use placelink::shared::utils::init_logger;
use placelink::shared::Database;

#[derive(Parser)]
#[command(
    name = "placelink",
    about = "Reconciles registry records with map-platform listings and scores them"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Clone, Copy)]
struct MatchOptions {
    /// Cap on masters processed in the match phase
    #[arg(long)]
    limit: Option<i64>,

    /// Maximum candidate distance in meters
    #[arg(long)]
    max_distance: Option<f64>,

    /// Minimum name similarity in [0, 1]
    #[arg(long)]
    min_similarity: Option<f64>,
}

#[derive(Subcommand)]
enum Command {
    /// Upsert registry rows from a CSV export into the master store
    Ingest {
        /// CSV file with WGS84 coordinate columns
        #[arg(long)]
        csv: PathBuf,

        /// Treat the file as a complete registry snapshot and close
        /// records absent from it
        #[arg(long)]
        snapshot: bool,
    },

    /// Match active masters against the configured platforms
    Match {
        #[command(flatten)]
        options: MatchOptions,
    },

    /// Recompute composite scores from persisted details
    Score,

    /// Run ingest, match, and score back to back
    Run {
        #[arg(long)]
        csv: PathBuf,

        #[arg(long)]
        snapshot: bool,

        #[command(flatten)]
        options: MatchOptions,
    },
}

fn pipeline_config(options: Option<MatchOptions>) -> PipelineConfig {
    let mut config = PipelineConfig::default();
    if let Some(options) = options {
        config.match_limit = options.limit;
        if let Some(max_distance) = options.max_distance {
            config.matching.max_distance_m = max_distance;
        }
        if let Some(min_similarity) = options.min_similarity {
            config.matching.min_name_similarity = min_similarity;
        }
    }
    config
}

fn search_clients() -> anyhow::Result<Vec<Arc<dyn SearchClient>>> {
    let mut clients: Vec<Arc<dyn SearchClient>> = Vec::new();

    if let Ok(key) = std::env::var("KAKAO_REST_API_KEY") {
        clients.push(Arc::new(KakaoSearchClient::new(&key)?));
    }

    if let (Ok(id), Ok(secret)) = (
        std::env::var("NAVER_CLIENT_ID"),
        std::env::var("NAVER_CLIENT_SECRET"),
    ) {
        clients.push(Arc::new(NaverSearchClient::new(&id, &secret)?));
    }

    if clients.is_empty() {
        bail!(
            "No platform credentials configured; set KAKAO_REST_API_KEY and/or \
             NAVER_CLIENT_ID + NAVER_CLIENT_SECRET"
        );
    }

    Ok(clients)
}

fn build_pipeline(
    options: Option<MatchOptions>,
    needs_clients: bool,
) -> anyhow::Result<ReconciliationPipeline> {
    let database = Arc::new(Database::new().context("database initialization failed")?);
    database.run_migrations()?;

    let clients = if needs_clients {
        search_clients()?
    } else {
        Vec::new()
    };

    Ok(ReconciliationPipeline::new(
        Arc::new(MasterPlaceRepositoryImpl::new(Arc::clone(&database))),
        Arc::new(PlaceDetailRepositoryImpl::new(Arc::clone(&database))),
        Arc::new(PlaceScoreRepositoryImpl::new(Arc::clone(&database))),
        clients,
        pipeline_config(options),
    ))
}

fn load_rows(csv: &PathBuf) -> anyhow::Result<Vec<RegistryRow>> {
    let rows = CsvRegistrySource::load(csv)
        .with_context(|| format!("failed to read {}", csv.display()))?;
    if rows.is_empty() {
        bail!("{} contained no usable rows", csv.display());
    }
    Ok(rows)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logger();

    let cli = Cli::parse();

    match cli.command {
        Command::Ingest { csv, snapshot } => {
            let pipeline = build_pipeline(None, false)?;
            let report = pipeline.run_ingest(load_rows(&csv)?, snapshot).await?;
            println!(
                "Ingest: {} inserted, {} updated, {} errors, {} closed",
                report.stats.inserted, report.stats.updated, report.stats.errors, report.closed
            );
        }
        Command::Match { options } => {
            let pipeline = build_pipeline(Some(options), true)?;
            let report = pipeline.run_match().await?;
            println!(
                "Match: {}/{} matched ({:.1}%), {} failed",
                report.matched,
                report.total,
                report.success_rate() * 100.0,
                report.failed
            );
        }
        Command::Score => {
            let pipeline = build_pipeline(None, false)?;
            let report = pipeline.run_score().await?;
            let d = report.distribution;
            println!(
                "Score: {} calculated ({} excellent / {} good / {} fair / {} poor), {} failed",
                report.calculated, d.excellent, d.good, d.fair, d.poor, report.failed
            );
        }
        Command::Run {
            csv,
            snapshot,
            options,
        } => {
            let pipeline = build_pipeline(Some(options), true)?;
            let report = pipeline.run_all(load_rows(&csv)?, snapshot).await?;
            println!(
                "Ingest: {} inserted, {} updated, {} errors, {} closed",
                report.ingest.stats.inserted,
                report.ingest.stats.updated,
                report.ingest.stats.errors,
                report.ingest.closed
            );
            println!(
                "Match: {}/{} matched ({:.1}%)",
                report.matching.matched,
                report.matching.total,
                report.matching.success_rate() * 100.0
            );
            let d = report.scoring.distribution;
            println!(
                "Score: {} calculated ({} excellent / {} good / {} fair / {} poor)",
                report.scoring.calculated, d.excellent, d.good, d.fair, d.poor
            );
        }
    }

    Ok(())
}
