//! Error types for the MongoDB store.

use loadgen_workload::ClientError;
use thiserror::Error;

/// Errors raised by [`crate::MongoStore`].
#[derive(Error, Debug)]
pub enum MongoClientError {
    /// Driver error while connecting or running a request.
    #[error("MongoDB error: {0}")]
    MongoDB(#[from] mongodb::error::Error),

    /// Connection string could not be used.
    #[error("Invalid connection string '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },
}

impl MongoClientError {
    /// Classify as a connection-level client error.
    pub fn into_connection_error(self) -> ClientError {
        ClientError::Connection(self.to_string())
    }

    /// Classify as a per-request client error.
    pub fn into_operation_error(self) -> ClientError {
        ClientError::Operation(self.to_string())
    }
}

impl From<MongoClientError> for ClientError {
    fn from(err: MongoClientError) -> Self {
        err.into_operation_error()
    }
}
