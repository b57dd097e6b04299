use log::{error, info, warn};
use serde::Serialize;
use thiserror::Error;

use crate::config::{ConfigError, LoaderConfig};
use crate::db::guest_checks::load_guest_checks;
use crate::db::maintenance::{
    count_dangling_detail_lines, purge_orphaned_details, reset_gold_tables, table_counts,
};
use crate::db::{establish_connection_pool, run_db_migrations, DbConnection, RepositoryError};
use crate::enums::load::{BatchReport, TableCount};
use crate::source::{BronzeSource, OrderSource, SourceError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything a Gold load run did, for logging and for callers to inspect.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineSummary {
    pub source_records: usize,
    pub report: BatchReport,
    pub purged_details: usize,
    pub table_counts: Vec<TableCount>,
    pub dangling_lines: i64,
}

impl PipelineSummary {
    fn not_run() -> Self {
        Self::default()
    }
}

pub fn run_from_env() -> Result<PipelineSummary, PipelineError> {
    let config = LoaderConfig::from_env()?;
    run_pipeline(&config)
}

pub fn run_pipeline(config: &LoaderConfig) -> Result<PipelineSummary, PipelineError> {
    info!(
        "run_pipeline: reading Bronze guest checks from {}",
        config.input_path.display()
    );
    run_with_source(config, &BronzeSource::new(config.input_path.clone()))
}

/// One Gold load: schema, optional reset, batch load, optional purge, then
/// validation counts. Returns an empty summary when no database is reachable.
pub fn run_with_source(
    config: &LoaderConfig,
    source: &dyn OrderSource,
) -> Result<PipelineSummary, PipelineError> {
    let pool = match establish_connection_pool(&config.database_url, config.pool_size) {
        Ok(pool) => pool,
        Err(e) => {
            error!("run_pipeline: no database connection, nothing loaded: {}", e);
            return Ok(PipelineSummary::not_run());
        }
    };
    run_db_migrations(pool.clone())?;

    let records = source.records()?;
    if records.is_empty() {
        warn!("run_pipeline: source yielded no guest checks");
    }

    let mut conn = DbConnection::new(&pool)?;
    if config.reset_before_load {
        reset_gold_tables(conn.connection())?;
    }

    let report = load_guest_checks(Some(conn.connection()), &records, &config.catalog())?;

    let purged_details = if config.purge_orphaned_details {
        purge_orphaned_details(conn.connection())?
    } else {
        0
    };

    let table_counts = table_counts(conn.connection())?;
    let dangling_lines = count_dangling_detail_lines(conn.connection())?;
    if dangling_lines > 0 {
        warn!(
            "run_pipeline: {} line details reference missing variant rows",
            dangling_lines
        );
    }

    Ok(PipelineSummary {
        source_records: records.len(),
        report,
        purged_details,
        table_counts,
        dangling_lines,
    })
}
