//! MongoDB document store for doc-loadgen.
//!
//! Implements [`loadgen_workload::DocumentStore`] on top of the official
//! driver. `find` drains the returned cursor so its latency covers the whole
//! result set.

pub mod args;
pub mod error;
pub mod store;

pub use args::MongoConnectionArgs;
pub use error::MongoClientError;
pub use store::{with_read_preference, MongoCollection, MongoStore, DEFAULT_CONNECT_TIMEOUT};
