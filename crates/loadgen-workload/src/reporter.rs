//! Periodic and final latency reports.

use crate::stats::{LatencyAggregator, LatencySummary, StatsSnapshot};
use comfy_table::{presets::UTF8_FULL, Cell, Color, Table};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Default time between periodic reports.
pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(10);

const NOT_AVAILABLE: &str = "N/A";

/// Whether a report is an interim one or the last one of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPhase {
    Periodic,
    Final,
}

/// Destination for reports.
pub trait StatsSink: Send + Sync {
    fn emit(&self, snapshot: &StatsSnapshot, phase: ReportPhase);
}

/// Prints each report as a table on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TableSink;

impl StatsSink for TableSink {
    fn emit(&self, snapshot: &StatsSnapshot, phase: ReportPhase) {
        let heading = match phase {
            ReportPhase::Periodic => "Latency report",
            ReportPhase::Final => "Final latency report",
        };
        println!("\n{heading}\n{}", format_table(snapshot));
    }
}

/// Keeps every report in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    reports: Mutex<Vec<(ReportPhase, StatsSnapshot)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All reports received so far, oldest first.
    pub fn reports(&self) -> Vec<(ReportPhase, StatsSnapshot)> {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn periodic_count(&self) -> usize {
        self.reports()
            .iter()
            .filter(|(phase, _)| *phase == ReportPhase::Periodic)
            .count()
    }

    pub fn final_report(&self) -> Option<StatsSnapshot> {
        self.reports()
            .into_iter()
            .find(|(phase, _)| *phase == ReportPhase::Final)
            .map(|(_, snapshot)| snapshot)
    }
}

impl StatsSink for MemorySink {
    fn emit(&self, snapshot: &StatsSnapshot, phase: ReportPhase) {
        self.reports
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((phase, snapshot.clone()));
    }
}

/// Render a snapshot with one row per operation kind.
pub fn format_table(snapshot: &StatsSnapshot) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Operation",
        "Count",
        "Failures",
        "Avg Latency",
        "p50",
        "p95",
        "p99",
        "Max Latency",
        "Timestamp",
    ]);

    let timestamp = snapshot.taken_at.format("%Y-%m-%d %H:%M:%S UTC").to_string();
    for stats in &snapshot.kinds {
        let failures = if stats.failures > 0 {
            Cell::new(stats.failures).fg(Color::Red)
        } else {
            Cell::new(stats.failures)
        };

        let mut row = vec![
            Cell::new(stats.kind.label()),
            Cell::new(stats.count),
            failures,
        ];
        row.extend(latency_cells(stats.latency.as_ref()));
        row.push(Cell::new(&timestamp));
        table.add_row(row);
    }

    table.to_string()
}

fn latency_cells(latency: Option<&LatencySummary>) -> Vec<Cell> {
    match latency {
        Some(l) => [l.average, l.p50, l.p95, l.p99, l.max]
            .into_iter()
            .map(|d| Cell::new(format_latency(d)))
            .collect(),
        None => (0..5).map(|_| Cell::new(NOT_AVAILABLE)).collect(),
    }
}

/// Milliseconds with two decimals.
pub fn format_latency(duration: Duration) -> String {
    format!("{:.2} ms", duration.as_secs_f64() * 1000.0)
}

/// Background task emitting periodic reports until stopped.
pub struct StatsReporter {
    stop: oneshot::Sender<()>,
    task: JoinHandle<StatsSnapshot>,
}

impl StatsReporter {
    /// Spawn the reporting task on the current runtime.
    ///
    /// The first report is emitted one `interval` after start. A zero
    /// interval disables periodic reports; the final report is still emitted.
    pub fn start(
        aggregator: Arc<LatencyAggregator>,
        sink: Arc<dyn StatsSink>,
        interval: Duration,
    ) -> Self {
        let (stop, mut stopped) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            if interval.is_zero() {
                let _ = stopped.await;
            } else {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                ticker.tick().await;

                loop {
                    tokio::select! {
                        _ = &mut stopped => break,
                        _ = ticker.tick() => {
                            debug!("Emitting periodic report");
                            sink.emit(&aggregator.snapshot(), ReportPhase::Periodic);
                        }
                    }
                }
            }

            let last = aggregator.snapshot();
            sink.emit(&last, ReportPhase::Final);
            last
        });

        Self { stop, task }
    }

    /// Stop periodic reporting and emit the final report.
    pub async fn stop(self) -> Result<StatsSnapshot, tokio::task::JoinError> {
        // The task also stops if the receiver sees the sender dropped.
        let _ = self.stop.send(());
        self.task.await
    }
}
