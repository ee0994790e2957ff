//! Constraint-aware value generator for the doc-loadgen workload engine.
//!
//! # Architecture
//!
//! ```text
//! SchemaDefinition (read-only)
//!        │
//!        ▼
//! ┌──────────────────────┐
//! │ DocumentSynthesizer  │
//! │                      │
//! │  - schema            │
//! │  - GeneratorContext  │──► monotonic slots (Mutex, keyed by property)
//! └──────────┬───────────┘
//!            │ generate_value(name, spec, context, rng)
//!            ▼
//!       bson::Document
//! ```
//!
//! # Generators
//!
//! - `objectId` - fresh 12-byte ObjectId
//! - `string` - `random<N>_bar<M>`, or `random_<24 hex>` when `unique`
//! - `int` - uniform in `[minimum, maximum]` or `[0, 10000)`; clock-seeded
//!   saturating sequence when `monotonic`
//! - `array` - two independent generations of `items`
//! - `enum` - uniform choice from `values`
//! - `date` - current UTC time
//! - anything else - `null`
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use loadgen_core::SchemaDefinition;
//! use loadgen_generator::DocumentSynthesizer;
//!
//! let schema = SchemaDefinition::from_json(r#"{
//!     "properties": { "status": { "bsonType": "enum", "values": ["a", "b"] } }
//! }"#).unwrap();
//!
//! let synthesizer = DocumentSynthesizer::new(Arc::new(schema));
//! let doc = synthesizer.synthesize(&mut rand::thread_rng()).unwrap();
//! assert!(doc.contains_key("status"));
//! ```

pub mod context;
pub mod error;
pub mod generators;
pub mod synthesizer;

pub use context::GeneratorContext;
pub use error::GeneratorError;
pub use generators::generate_value;
pub use synthesizer::DocumentSynthesizer;
