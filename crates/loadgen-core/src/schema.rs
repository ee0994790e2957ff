//! Schema definitions for the load generator.
//!
//! A schema file is a JSON object with three parts:
//!
//! - `type` - informational, usually `"object"`
//! - `properties` - field name to [`PropertySpec`]
//! - `operations` - ordered list of [`OperationSpec`]
//!
//! The schema is loaded once at startup and is read-only for the rest of the run.
//! Property specs carry no mutable state; monotonic counters live in the generator
//! context, keyed by property name.

use crate::operation::OperationSpec;
use bson::Bson;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema and pool loading.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading a file
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error parsing JSON
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Candidate pool contained something other than a scalar
    #[error("Invalid candidate pool entry at index {index}: expected a scalar, got {found}")]
    InvalidPoolEntry { index: usize, found: String },
}

// ============================================================================
// Property Types
// ============================================================================

/// Type tag of a schema property.
///
/// Unrecognised tags are kept as [`TypeTag::Unknown`] so that a schema using a
/// type the generator does not know still loads; such fields generate `null`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TypeTag {
    ObjectId,
    String,
    Int,
    Array,
    Enum,
    Date,
    Unknown(String),
}

impl From<String> for TypeTag {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "objectId" => TypeTag::ObjectId,
            "string" => TypeTag::String,
            "int" | "long" | "integer" => TypeTag::Int,
            "array" => TypeTag::Array,
            "enum" => TypeTag::Enum,
            "date" => TypeTag::Date,
            _ => TypeTag::Unknown(tag),
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeTag::ObjectId => write!(f, "objectId"),
            TypeTag::String => write!(f, "string"),
            TypeTag::Int => write!(f, "int"),
            TypeTag::Array => write!(f, "array"),
            TypeTag::Enum => write!(f, "enum"),
            TypeTag::Date => write!(f, "date"),
            TypeTag::Unknown(tag) => write!(f, "{tag}"),
        }
    }
}

/// Description of a single schema field.
///
/// Constraint validity (`unique` on a non-string, an empty `values` list) is
/// checked at generation time, not here.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PropertySpec {
    /// Type tag (`bsonType` in schema files, `type` accepted as an alias)
    #[serde(rename = "bsonType", alias = "type")]
    pub type_tag: TypeTag,

    /// Free-form description, ignored by the generator
    #[serde(default)]
    pub description: Option<String>,

    /// Values must be collision resistant (string only)
    #[serde(default)]
    pub unique: bool,

    /// Values must never decrease over the life of a run (int only)
    #[serde(default)]
    pub monotonic: bool,

    /// Lower bound for integer generation (0 = unset)
    #[serde(default)]
    pub minimum: i64,

    /// Upper bound for integer generation (0 = unset)
    #[serde(default)]
    pub maximum: i64,

    /// Element spec for arrays
    #[serde(default)]
    pub items: Option<Box<PropertySpec>>,

    /// Candidate values for enums, in declaration order
    #[serde(default)]
    pub values: Vec<Bson>,
}

impl PropertySpec {
    /// Create an unconstrained property of the given type.
    pub fn new(type_tag: TypeTag) -> Self {
        Self {
            type_tag,
            description: None,
            unique: false,
            monotonic: false,
            minimum: 0,
            maximum: 0,
            items: None,
            values: Vec::new(),
        }
    }

    /// Mark the property as unique.
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Mark the property as monotonic.
    pub fn monotonic(mut self) -> Self {
        self.monotonic = true;
        self
    }

    /// Set the integer bounds.
    pub fn with_range(mut self, minimum: i64, maximum: i64) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    /// Set the array element spec.
    pub fn with_items(mut self, items: PropertySpec) -> Self {
        self.items = Some(Box::new(items));
        self
    }

    /// Set the enum values.
    pub fn with_values(mut self, values: Vec<Bson>) -> Self {
        self.values = values;
        self
    }
}

// ============================================================================
// Schema
// ============================================================================

/// A complete workload schema: document shape plus the operation mix.
#[derive(Debug, Clone, Deserialize)]
pub struct SchemaDefinition {
    /// Informational document type (usually `"object"`)
    #[serde(rename = "type", default)]
    pub schema_type: Option<String>,

    /// Field name to property spec
    #[serde(default)]
    pub properties: HashMap<String, PropertySpec>,

    /// Operation mix, in declaration order
    #[serde(default)]
    pub operations: Vec<OperationSpec>,
}

impl SchemaDefinition {
    /// Parse a schema from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a schema from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Get a property spec by field name.
    pub fn get_property(&self, name: &str) -> Option<&PropertySpec> {
        self.properties.get(name)
    }

    /// Property names, sorted for stable output.
    pub fn property_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.properties.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}
