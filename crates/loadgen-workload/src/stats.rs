//! Latency aggregation and operation counters.
//!
//! Workers append one sample per successful operation to the
//! [`LatencyAggregator`]; the reporter takes point-in-time [`StatsSnapshot`]s
//! from it. Success and failure counts live in [`OperationCounters`], which
//! the executor updates without locking.

use chrono::{DateTime, Utc};
use loadgen_core::OperationKind;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Lock-free success/failure counts per operation kind.
#[derive(Debug, Default)]
pub struct OperationCounters {
    successes: [AtomicU64; 4],
    failures: [AtomicU64; 4],
}

impl OperationCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_success(&self, kind: OperationKind) {
        self.successes[kind.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self, kind: OperationKind) {
        self.failures[kind.index()].fetch_add(1, Ordering::Relaxed);
    }

    pub fn successes(&self, kind: OperationKind) -> u64 {
        self.successes[kind.index()].load(Ordering::Relaxed)
    }

    pub fn failures(&self, kind: OperationKind) -> u64 {
        self.failures[kind.index()].load(Ordering::Relaxed)
    }
}

/// Latency distribution of one operation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySummary {
    pub average: Duration,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
    pub max: Duration,
}

/// One row of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindStats {
    pub kind: OperationKind,
    /// Number of recorded samples
    pub count: u64,
    /// Number of failed requests
    pub failures: u64,
    /// `None` when there are no samples
    pub latency: Option<LatencySummary>,
}

/// Point-in-time view of the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub taken_at: DateTime<Utc>,
    /// One row per kind, in [`OperationKind::ALL`] order
    pub kinds: Vec<KindStats>,
}

impl StatsSnapshot {
    pub fn get(&self, kind: OperationKind) -> Option<&KindStats> {
        self.kinds.iter().find(|k| k.kind == kind)
    }

    /// Total samples across all kinds.
    pub fn total_count(&self) -> u64 {
        self.kinds.iter().map(|k| k.count).sum()
    }
}

/// Thread-safe per-kind latency samples.
#[derive(Debug)]
pub struct LatencyAggregator {
    samples: Mutex<[Vec<Duration>; 4]>,
    counters: Arc<OperationCounters>,
}

impl LatencyAggregator {
    pub fn new(counters: Arc<OperationCounters>) -> Self {
        Self {
            samples: Mutex::new(Default::default()),
            counters,
        }
    }

    /// Append one sample.
    pub fn record(&self, kind: OperationKind, duration: Duration) {
        let mut samples = self
            .samples
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        samples[kind.index()].push(duration);
    }

    pub fn counters(&self) -> &Arc<OperationCounters> {
        &self.counters
    }

    /// Copy the samples under the lock, then summarize outside it.
    pub fn snapshot(&self) -> StatsSnapshot {
        let copied = self
            .samples
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        let kinds = OperationKind::ALL
            .iter()
            .zip(copied)
            .map(|(&kind, mut samples)| KindStats {
                kind,
                count: samples.len() as u64,
                failures: self.counters.failures(kind),
                latency: summarize(&mut samples),
            })
            .collect();

        StatsSnapshot {
            taken_at: Utc::now(),
            kinds,
        }
    }
}

/// Sort `samples` and compute the distribution; `None` if empty.
///
/// Percentiles index the sorted samples at `floor(len * q)`, clamped to the
/// last index.
pub fn summarize(samples: &mut [Duration]) -> Option<LatencySummary> {
    if samples.is_empty() {
        return None;
    }
    samples.sort_unstable();

    let total: Duration = samples.iter().sum();
    let average = Duration::from_nanos((total.as_nanos() / samples.len() as u128) as u64);

    Some(LatencySummary {
        average,
        p50: percentile(samples, 0.50),
        p95: percentile(samples, 0.95),
        p99: percentile(samples, 0.99),
        max: samples[samples.len() - 1],
    })
}

fn percentile(sorted: &[Duration], quantile: f64) -> Duration {
    let index = ((sorted.len() as f64) * quantile).floor() as usize;
    sorted[index.min(sorted.len() - 1)]
}
