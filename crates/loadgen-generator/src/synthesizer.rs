//! Document synthesis from a schema.

use crate::context::GeneratorContext;
use crate::error::GeneratorError;
use crate::generators::generate_value;
use bson::{Bson, Document};
use loadgen_core::SchemaDefinition;
use rand::Rng;
use std::sync::Arc;

/// Builds documents from a schema, owning the run's generator context.
///
/// One synthesizer is shared by every worker; the schema is read-only and the
/// context serializes its own mutation.
#[derive(Debug)]
pub struct DocumentSynthesizer {
    schema: Arc<SchemaDefinition>,
    context: GeneratorContext,
}

impl DocumentSynthesizer {
    pub fn new(schema: Arc<SchemaDefinition>) -> Self {
        Self {
            schema,
            context: GeneratorContext::new(),
        }
    }

    /// Generate one value for every property in the schema.
    ///
    /// The first property that fails aborts the whole document.
    pub fn synthesize<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Document, GeneratorError> {
        let mut document = Document::new();
        for (name, spec) in &self.schema.properties {
            let value = generate_value(name, spec, &self.context, rng)
                .map_err(|e| GeneratorError::for_property(name, e))?;
            document.insert(name.clone(), value);
        }
        Ok(document)
    }

    /// Generate a value for a single named property.
    pub fn generate_field<R: Rng + ?Sized>(
        &self,
        name: &str,
        rng: &mut R,
    ) -> Result<Bson, GeneratorError> {
        let spec = self
            .schema
            .get_property(name)
            .ok_or_else(|| GeneratorError::PropertyNotFound(name.to_string()))?;
        generate_value(name, spec, &self.context, rng)
            .map_err(|e| GeneratorError::for_property(name, e))
    }

    pub fn schema(&self) -> &SchemaDefinition {
        &self.schema
    }

    pub fn context(&self) -> &GeneratorContext {
        &self.context
    }
}
