//! Error types for value generation.

/// Errors raised while generating a value or document.
///
/// Every variant is a hard failure: a property that cannot be generated never
/// degrades to a `null` field.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// `unique` set on a property that is not a string
    #[error("unique is only supported for string properties, found {type_tag}")]
    UniqueRequiresString { type_tag: String },

    /// `monotonic` set on a property that is not an integer
    #[error("monotonic is only supported for int properties, found {type_tag}")]
    MonotonicRequiresInteger { type_tag: String },

    /// Enum with no values to choose from
    #[error("enum has no values")]
    EmptyEnum,

    /// Array without an element spec
    #[error("array has no items spec")]
    MissingItems,

    /// Integer bounds that cannot be satisfied
    #[error("invalid integer range: minimum {minimum} > maximum {maximum}")]
    InvalidRange { minimum: i64, maximum: i64 },

    /// Field not declared in the schema
    #[error("property not found in schema: {0}")]
    PropertyNotFound(String),

    /// Generation failed for a named property
    #[error("property '{property}': {source}")]
    Property {
        property: String,
        #[source]
        source: Box<GeneratorError>,
    },
}

impl GeneratorError {
    /// Attach the property name to an error.
    pub fn for_property(property: impl Into<String>, source: GeneratorError) -> Self {
        GeneratorError::Property {
            property: property.into(),
            source: Box::new(source),
        }
    }
}
