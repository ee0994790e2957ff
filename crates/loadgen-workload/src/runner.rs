//! Fixed-size worker pool driving the request budget.
//!
//! ```text
//! run_workload
//!   ├── StatsReporter (periodic snapshots)
//!   ├── worker 0 ─┐
//!   ├── worker 1  ├── select → execute → record, share-many times
//!   └── worker N ─┘
//!   join all workers → stop reporter → final snapshot
//! ```

use crate::executor::OperationExecutor;
use crate::plan::CompiledPlan;
use crate::reporter::{StatsReporter, StatsSink, DEFAULT_REPORT_INTERVAL};
use crate::stats::{LatencyAggregator, StatsSnapshot};
use futures::future::join_all;
use loadgen_core::OperationKind;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Fatal worker pool errors.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("worker count must be at least 1")]
    NoWorkers,

    #[error("worker {worker} panicked: {reason}")]
    WorkerPanicked { worker: usize, reason: String },

    #[error("stats reporter failed: {0}")]
    Reporter(String),
}

/// Pool sizing and reporting cadence.
#[derive(Debug, Clone, Copy)]
pub struct WorkloadConfig {
    pub workers: usize,
    pub requests: u64,
    pub report_interval: Duration,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            requests: 1000,
            report_interval: DEFAULT_REPORT_INTERVAL,
        }
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Snapshot emitted as the final report
    pub snapshot: StatsSnapshot,
    /// Successful requests per kind, in [`OperationKind::ALL`] order
    pub successes: [u64; 4],
    /// Failed requests per kind, in [`OperationKind::ALL`] order
    pub failures: [u64; 4],
    /// Requests that selected nothing or an unsupported operation
    pub skipped: u64,
    pub duration: Duration,
}

impl RunSummary {
    pub fn total_successes(&self) -> u64 {
        self.successes.iter().sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.failures.iter().sum()
    }

    pub fn successes_of(&self, kind: OperationKind) -> u64 {
        self.successes[kind.index()]
    }

    pub fn failures_of(&self, kind: OperationKind) -> u64 {
        self.failures[kind.index()]
    }
}

/// Split `total` into `workers` shares; the remainder goes to the last worker.
pub fn partition_requests(total: u64, workers: usize) -> Vec<u64> {
    if workers == 0 {
        return Vec::new();
    }
    let count = workers as u64;
    let mut shares = vec![total / count; workers];
    if let Some(last) = shares.last_mut() {
        *last += total % count;
    }
    shares
}

/// Run the whole request budget and return once every worker is done.
///
/// Periodic reports go to `sink` while workers run; the final report is
/// emitted after all workers have joined.
pub async fn run_workload(
    config: WorkloadConfig,
    plan: Arc<CompiledPlan>,
    executor: Arc<OperationExecutor>,
    aggregator: Arc<LatencyAggregator>,
    sink: Arc<dyn StatsSink>,
) -> Result<RunSummary, RunError> {
    if config.workers == 0 {
        return Err(RunError::NoWorkers);
    }

    let shares = partition_requests(config.requests, config.workers);
    info!(
        "Starting {} workers for {} requests ({} per worker, {} on the last)",
        config.workers,
        config.requests,
        shares[0],
        shares[shares.len() - 1]
    );

    let started = Instant::now();
    let reporter = StatsReporter::start(Arc::clone(&aggregator), sink, config.report_interval);
    let skipped = Arc::new(AtomicU64::new(0));

    let handles: Vec<_> = shares
        .into_iter()
        .enumerate()
        .map(|(worker, share)| {
            let plan = Arc::clone(&plan);
            let executor = Arc::clone(&executor);
            let aggregator = Arc::clone(&aggregator);
            let skipped = Arc::clone(&skipped);
            tokio::spawn(async move {
                run_worker(worker, share, &plan, &executor, &aggregator, &skipped).await
            })
        })
        .collect();

    let mut panicked = None;
    for (worker, result) in join_all(handles).await.into_iter().enumerate() {
        if let Err(e) = result {
            warn!("Worker {} did not complete: {}", worker, e);
            panicked.get_or_insert(RunError::WorkerPanicked {
                worker,
                reason: e.to_string(),
            });
        }
    }

    // Workers are done; the final report still goes out before any error.
    let snapshot = reporter
        .stop()
        .await
        .map_err(|e| RunError::Reporter(e.to_string()))?;
    if let Some(error) = panicked {
        return Err(error);
    }

    let counters = executor.counters();
    let summary = RunSummary {
        snapshot,
        successes: OperationKind::ALL.map(|kind| counters.successes(kind)),
        failures: OperationKind::ALL.map(|kind| counters.failures(kind)),
        skipped: skipped.load(Ordering::Relaxed),
        duration: started.elapsed(),
    };

    info!(
        "Workload finished in {:?}: {} succeeded, {} failed, {} skipped",
        summary.duration,
        summary.total_successes(),
        summary.total_failures(),
        summary.skipped
    );
    Ok(summary)
}

async fn run_worker(
    worker: usize,
    share: u64,
    plan: &CompiledPlan,
    executor: &OperationExecutor,
    aggregator: &LatencyAggregator,
    skipped: &AtomicU64,
) {
    let mut rng = StdRng::from_entropy();

    for request in 0..share {
        let entry = match plan.select(&mut rng) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Worker {} request {}: {}", worker, request, e);
                skipped.fetch_add(1, Ordering::Relaxed);
                continue;
            }
        };

        match executor.execute(entry, &mut rng).await {
            Ok(outcome) => aggregator.record(outcome.kind, outcome.elapsed),
            Err(e) => {
                if e.kind().is_none() {
                    skipped.fetch_add(1, Ordering::Relaxed);
                }
                warn!("Worker {} request {}: {}", worker, request, e);
            }
        }
    }
}
