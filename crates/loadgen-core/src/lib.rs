//! Core types for the doc-loadgen workload generator.
//!
//! This crate holds the parts of a run that are loaded once and never mutated:
//!
//! - [`SchemaDefinition`] - document shape and operation mix
//! - [`PropertySpec`] - one field's type tag and constraints
//! - [`OperationSpec`] / [`OperationKind`] - the operation mix
//! - [`CandidatePool`] - values drawn into field-selector filters
//!
//! # Example
//!
//! ```rust
//! use loadgen_core::{OperationType, SchemaDefinition, TypeTag};
//!
//! let schema = SchemaDefinition::from_json(r#"{
//!     "type": "object",
//!     "properties": { "age": { "bsonType": "int", "minimum": 18, "maximum": 80 } },
//!     "operations": [ { "type": "insert", "ratio": 1 } ]
//! }"#).unwrap();
//!
//! assert_eq!(schema.get_property("age").unwrap().type_tag, TypeTag::Int);
//! assert_eq!(schema.operations[0].op_type, OperationType::Insert);
//! ```

pub mod operation;
pub mod pool;
pub mod schema;

pub use operation::{OperationKind, OperationSpec, OperationType};
pub use pool::CandidatePool;
pub use schema::{PropertySpec, SchemaDefinition, SchemaError, TypeTag};
