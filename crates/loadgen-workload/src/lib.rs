//! Concurrent workload engine for doc-loadgen.
//!
//! # Architecture
//!
//! ```text
//! SchemaDefinition ──► CompiledPlan (read-only, shared)
//!                           │
//!                           ▼
//!                 run_workload (N tokio workers)
//!                           │ select → execute
//!                           ▼
//!  OperationExecutor ──► CollectionHandle (MongoDB / in-memory)
//!          │
//!          ▼
//!  LatencyAggregator ◄── StatsReporter ──► StatsSink (table / memory)
//! ```
//!
//! The database is reached only through [`DocumentStore`] and
//! [`CollectionHandle`]; [`MemoryStore`] implements both for dry runs and
//! tests.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use loadgen_core::{CandidatePool, SchemaDefinition};
//! use loadgen_generator::DocumentSynthesizer;
//! use loadgen_workload::{
//!     run_workload, CompiledPlan, DocumentStore, FsFilterLoader, LatencyAggregator, MemoryStore,
//!     OperationCounters, OperationExecutor, TableSink, WorkloadConfig,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let schema = Arc::new(SchemaDefinition::from_file("schema.json")?);
//! let pool = Arc::new(CandidatePool::empty());
//! let plan = CompiledPlan::compile(&schema, &FsFilterLoader::new("."), &pool)?;
//!
//! let store = MemoryStore::connected();
//! let counters = Arc::new(OperationCounters::new());
//! let executor = OperationExecutor::new(
//!     store.collection("orders", "test")?,
//!     Arc::new(DocumentSynthesizer::new(Arc::clone(&schema))),
//!     pool,
//!     Arc::clone(&counters),
//! );
//!
//! let summary = run_workload(
//!     WorkloadConfig::default(),
//!     Arc::new(plan),
//!     Arc::new(executor),
//!     Arc::new(LatencyAggregator::new(counters)),
//!     Arc::new(TableSink),
//! )
//! .await?;
//! println!("{} requests succeeded", summary.total_successes());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod executor;
pub mod memory;
pub mod plan;
pub mod reporter;
pub mod runner;
pub mod select;
pub mod stats;

pub use client::{ClientError, CollectionHandle, DocumentStore};
pub use executor::{ExecuteError, OperationExecutor, OperationOutcome, DEFAULT_REQUEST_TIMEOUT};
pub use memory::{MemoryCollection, MemoryStore};
pub use plan::{
    CompiledPlan, DateRange, FilterLoader, FilterTemplate, FsFilterLoader, PlanEntry, PlanError,
    UpdateTemplate,
};
pub use reporter::{
    format_table, MemorySink, ReportPhase, StatsReporter, StatsSink, TableSink,
    DEFAULT_REPORT_INTERVAL,
};
pub use runner::{partition_requests, run_workload, RunError, RunSummary, WorkloadConfig};
pub use select::SelectionError;
pub use stats::{
    KindStats, LatencyAggregator, LatencySummary, OperationCounters, StatsSnapshot,
};
