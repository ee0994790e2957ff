//! Candidate-value pool for field-selector filters.
//!
//! The pool is loaded once at startup, never mutated afterwards, and shared by
//! reference (`Arc<CandidatePool>`) with every worker.

use crate::schema::SchemaError;
use bson::Bson;
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs;
use std::path::Path;

/// Immutable list of scalar values that filter selectors draw from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidatePool {
    values: Vec<Bson>,
}

impl CandidatePool {
    /// An empty pool.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a pool from scalar values.
    pub fn new(values: Vec<Bson>) -> Result<Self, SchemaError> {
        for (index, value) in values.iter().enumerate() {
            if matches!(value, Bson::Document(_) | Bson::Array(_)) {
                return Err(SchemaError::InvalidPoolEntry {
                    index,
                    found: format!("{:?}", value.element_type()),
                });
            }
        }
        Ok(Self { values })
    }

    /// Parse a pool from a JSON array.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let values: Vec<Bson> = serde_json::from_str(json)?;
        Self::new(values)
    }

    /// Load a pool from a JSON array file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Draw one value uniformly; `None` if the pool is empty.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Bson> {
        self.values.choose(rng)
    }
}
