//! Load test orchestration: load inputs, connect, run, disconnect.

use crate::config::parse_duration;
use crate::LoadOpts;
use anyhow::Context;
use loadgen_core::{CandidatePool, SchemaDefinition};
use loadgen_generator::DocumentSynthesizer;
use loadgen_mongodb::{MongoConnectionArgs, MongoStore};
use loadgen_workload::{
    run_workload, CompiledPlan, DocumentStore, FsFilterLoader, LatencyAggregator, MemoryStore,
    OperationCounters, OperationExecutor, RunSummary, StatsSink, TableSink, WorkloadConfig,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Everything resolved from the command line before any connection is made.
struct Prepared {
    schema: Arc<SchemaDefinition>,
    pool: Arc<CandidatePool>,
    plan: Arc<CompiledPlan>,
    config: WorkloadConfig,
    request_timeout: Duration,
    connect_timeout: Duration,
}

fn prepare(opts: &LoadOpts) -> anyhow::Result<Prepared> {
    if opts.workers == 0 {
        anyhow::bail!("--workers must be at least 1");
    }
    let report_interval =
        parse_duration(&opts.report_interval).context("Invalid --report-interval")?;
    let request_timeout =
        parse_duration(&opts.request_timeout).context("Invalid --request-timeout")?;
    let connect_timeout =
        parse_duration(&opts.connect_timeout).context("Invalid --connect-timeout")?;

    let schema = SchemaDefinition::from_file(&opts.schema)
        .with_context(|| format!("Failed to load schema from {:?}", opts.schema))?;

    let pool = match &opts.pool_file {
        Some(path) => CandidatePool::from_file(path)
            .with_context(|| format!("Failed to load candidate pool from {path:?}"))?,
        None => CandidatePool::empty(),
    };

    // Filter files are resolved relative to the schema.
    let schema_dir = opts
        .schema
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let plan = CompiledPlan::compile(&schema, &FsFilterLoader::new(schema_dir), &pool)
        .with_context(|| format!("Invalid operations in {:?}", opts.schema))?;

    Ok(Prepared {
        schema: Arc::new(schema),
        pool: Arc::new(pool),
        plan: Arc::new(plan),
        config: WorkloadConfig {
            workers: opts.workers,
            requests: opts.requests,
            report_interval,
        },
        request_timeout,
        connect_timeout,
    })
}

/// Run a complete load test and print the final report.
///
/// Input and connection errors are returned before any request is issued.
/// Per-request failures only show up in the summary.
pub async fn run_loadtest(
    connection: &MongoConnectionArgs,
    opts: &LoadOpts,
) -> anyhow::Result<RunSummary> {
    run_loadtest_with_sink(connection, opts, Arc::new(TableSink)).await
}

/// [`run_loadtest`] with reports sent to `sink`.
pub async fn run_loadtest_with_sink(
    connection: &MongoConnectionArgs,
    opts: &LoadOpts,
    sink: Arc<dyn StatsSink>,
) -> anyhow::Result<RunSummary> {
    let prepared = prepare(opts)?;

    let mut store: Box<dyn DocumentStore> = if opts.dry_run {
        info!("Dry run: using in-memory store");
        Box::new(MemoryStore::new())
    } else {
        Box::new(
            MongoStore::new(connection.read_preference.clone())
                .with_connect_timeout(prepared.connect_timeout),
        )
    };

    tokio::time::timeout(prepared.connect_timeout, store.connect(&connection.uri))
        .await
        .map_err(|_| {
            anyhow::anyhow!(
                "Connection not established within {:?}",
                prepared.connect_timeout
            )
        })?
        .context("Failed to connect")?;

    let collection = store
        .collection(&connection.collection, &connection.database)
        .with_context(|| {
            format!(
                "Failed to open collection {}.{}",
                connection.database, connection.collection
            )
        })?;

    info!(
        "Running {} requests with {} workers against {}.{}",
        prepared.config.requests,
        prepared.config.workers,
        connection.database,
        connection.collection
    );

    let counters = Arc::new(OperationCounters::new());
    let executor = OperationExecutor::new(
        collection,
        Arc::new(DocumentSynthesizer::new(Arc::clone(&prepared.schema))),
        Arc::clone(&prepared.pool),
        Arc::clone(&counters),
    )
    .with_request_timeout(prepared.request_timeout);

    let result = run_workload(
        prepared.config,
        prepared.plan,
        Arc::new(executor),
        Arc::new(LatencyAggregator::new(counters)),
        sink,
    )
    .await;

    if let Err(e) = store.disconnect().await {
        warn!("Failed to disconnect cleanly: {}", e);
    }

    let summary = result.context("Workload failed")?;
    if summary.total_failures() > 0 {
        warn!(
            "{} of {} requests failed",
            summary.total_failures(),
            opts.requests
        );
    }
    Ok(summary)
}
