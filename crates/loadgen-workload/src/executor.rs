//! Operation execution against a collection handle.

use crate::client::{ClientError, CollectionHandle};
use crate::plan::{PlanEntry, UpdateTemplate};
use crate::stats::OperationCounters;
use loadgen_core::{CandidatePool, OperationKind, OperationType};
use loadgen_generator::{DocumentSynthesizer, GeneratorError};
use rand::Rng;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Default bound on a single request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(100);

/// A request that did not complete.
#[derive(Debug, thiserror::Error)]
pub enum ExecuteError {
    /// Plan entry with a type the executor cannot run
    #[error("unsupported operation type: {0}")]
    Unsupported(String),

    /// Insert or update payload could not be generated
    #[error("{kind} payload generation failed: {source}")]
    Generation {
        kind: OperationKind,
        #[source]
        source: GeneratorError,
    },

    /// The database rejected or failed the request
    #[error("{kind} failed: {source}")]
    Client {
        kind: OperationKind,
        #[source]
        source: ClientError,
    },

    /// The request exceeded its timeout
    #[error("{kind} timed out after {timeout:?}")]
    Timeout {
        kind: OperationKind,
        timeout: Duration,
    },
}

impl ExecuteError {
    /// Kind the failure is counted against; `None` for unsupported entries.
    pub fn kind(&self) -> Option<OperationKind> {
        match self {
            ExecuteError::Unsupported(_) => None,
            ExecuteError::Generation { kind, .. }
            | ExecuteError::Client { kind, .. }
            | ExecuteError::Timeout { kind, .. } => Some(*kind),
        }
    }
}

/// A completed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationOutcome {
    pub kind: OperationKind,
    /// Documents read, inserted, modified or deleted
    pub affected: u64,
    /// Wall-clock time of the whole execution, payload generation included
    pub elapsed: Duration,
}

/// Runs plan entries against one collection.
pub struct OperationExecutor {
    collection: Arc<dyn CollectionHandle>,
    synthesizer: Arc<DocumentSynthesizer>,
    pool: Arc<CandidatePool>,
    counters: Arc<OperationCounters>,
    request_timeout: Duration,
}

impl OperationExecutor {
    pub fn new(
        collection: Arc<dyn CollectionHandle>,
        synthesizer: Arc<DocumentSynthesizer>,
        pool: Arc<CandidatePool>,
        counters: Arc<OperationCounters>,
    ) -> Self {
        Self {
            collection,
            synthesizer,
            pool,
            counters,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn counters(&self) -> &Arc<OperationCounters> {
        &self.counters
    }

    /// Execute one plan entry.
    ///
    /// Success and failure are counted against the entry's kind. Unsupported
    /// entries return an error without touching the counters.
    pub async fn execute<R: Rng + Send>(
        &self,
        entry: &PlanEntry,
        rng: &mut R,
    ) -> Result<OperationOutcome, ExecuteError> {
        let kind = match entry.op_type.kind() {
            Some(kind) => kind,
            None => return Err(ExecuteError::Unsupported(entry.op_type.to_string())),
        };

        let start = Instant::now();
        let result = self.dispatch(kind, entry, rng).await;
        let elapsed = start.elapsed();

        match result {
            Ok(affected) => {
                self.counters.record_success(kind);
                debug!(
                    "{} on plan {} affected {} documents in {:?}",
                    kind, entry.id, affected, elapsed
                );
                Ok(OperationOutcome {
                    kind,
                    affected,
                    elapsed,
                })
            }
            Err(e) => {
                self.counters.record_failure(kind);
                Err(e)
            }
        }
    }

    async fn dispatch<R: Rng + Send>(
        &self,
        kind: OperationKind,
        entry: &PlanEntry,
        rng: &mut R,
    ) -> Result<u64, ExecuteError> {
        match entry.op_type {
            OperationType::Find => {
                let filter = entry.filter.render(&self.pool, rng);
                self.bounded(kind, self.collection.find(filter)).await
            }
            OperationType::Insert => {
                let document = self
                    .synthesizer
                    .synthesize(rng)
                    .map_err(|source| ExecuteError::Generation { kind, source })?;
                self.bounded(kind, self.collection.insert_one(document))
                    .await
            }
            OperationType::Update => {
                let filter = entry.filter.render(&self.pool, rng);
                let stamp_only = UpdateTemplate::default();
                let update = entry
                    .update
                    .as_ref()
                    .unwrap_or(&stamp_only)
                    .render(&self.synthesizer, rng)
                    .map_err(|source| ExecuteError::Generation { kind, source })?;
                self.bounded(kind, self.collection.update_many(filter, update))
                    .await
            }
            OperationType::Delete => {
                let filter = entry.filter.render(&self.pool, rng);
                self.bounded(kind, self.collection.delete_many(filter))
                    .await
            }
            OperationType::Unsupported(ref name) => Err(ExecuteError::Unsupported(name.clone())),
        }
    }

    async fn bounded<F>(&self, kind: OperationKind, request: F) -> Result<u64, ExecuteError>
    where
        F: Future<Output = Result<u64, ClientError>>,
    {
        match tokio::time::timeout(self.request_timeout, request).await {
            Ok(result) => result.map_err(|source| ExecuteError::Client { kind, source }),
            Err(_) => Err(ExecuteError::Timeout {
                kind,
                timeout: self.request_timeout,
            }),
        }
    }
}
