//! Database client boundary.
//!
//! The workload engine talks to the target store only through these traits.
//! Implementations live outside this crate (MongoDB) or in [`crate::memory`].

use async_trait::async_trait;
use bson::Document;
use std::sync::Arc;

/// Errors reported by a database client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Operation attempted before `connect` or after `disconnect`
    #[error("Client is not connected")]
    NotConnected,

    /// Connecting or disconnecting failed
    #[error("Connection error: {0}")]
    Connection(String),

    /// A single request failed
    #[error("Operation error: {0}")]
    Operation(String),
}

/// A document store that hands out collection handles.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Connect to `endpoint`.
    async fn connect(&mut self, endpoint: &str) -> Result<(), ClientError>;

    /// Close the connection.
    async fn disconnect(&mut self) -> Result<(), ClientError>;

    /// Handle to `name` in `database`.
    fn collection(
        &self,
        name: &str,
        database: &str,
    ) -> Result<Arc<dyn CollectionHandle>, ClientError>;
}

/// Request primitives against one collection.
///
/// Each call returns the number of documents read or affected.
#[async_trait]
pub trait CollectionHandle: Send + Sync {
    async fn find(&self, filter: Document) -> Result<u64, ClientError>;

    async fn insert_one(&self, document: Document) -> Result<u64, ClientError>;

    async fn update_many(&self, filter: Document, update: Document) -> Result<u64, ClientError>;

    async fn delete_many(&self, filter: Document) -> Result<u64, ClientError>;
}
