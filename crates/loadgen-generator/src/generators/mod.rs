//! Individual value generators for each property type.
//!
//! [`generate_value`] checks the property's constraints and dispatches to the
//! generator for its type tag.

pub mod array;
pub mod choice;
pub mod identifier;
pub mod numeric;
pub mod text;
pub mod timestamp;

use crate::context::GeneratorContext;
use crate::error::GeneratorError;
use bson::Bson;
use loadgen_core::{PropertySpec, TypeTag};
use rand::Rng;

/// Generate one value for `spec`.
///
/// `key` names the monotonic slot in `context`; it is the property name, or
/// `name[]` for array elements.
pub fn generate_value<R: Rng + ?Sized>(
    key: &str,
    spec: &PropertySpec,
    context: &GeneratorContext,
    rng: &mut R,
) -> Result<Bson, GeneratorError> {
    if spec.monotonic {
        if spec.type_tag != TypeTag::Int {
            return Err(GeneratorError::MonotonicRequiresInteger {
                type_tag: spec.type_tag.to_string(),
            });
        }
        return Ok(Bson::Int64(context.next_monotonic(key, spec)));
    }

    if spec.unique {
        if spec.type_tag != TypeTag::String {
            return Err(GeneratorError::UniqueRequiresString {
                type_tag: spec.type_tag.to_string(),
            });
        }
        return Ok(text::generate_unique_string());
    }

    match &spec.type_tag {
        TypeTag::ObjectId => Ok(identifier::generate_object_id()),
        TypeTag::String => Ok(text::generate_low_entropy_string(rng)),
        TypeTag::Int => numeric::generate_int(rng, spec.minimum, spec.maximum),
        TypeTag::Array => array::generate_pair(key, spec, context, rng),
        TypeTag::Enum => choice::generate_one_of(rng, &spec.values),
        TypeTag::Date => Ok(timestamp::generate_now()),
        TypeTag::Unknown(_) => Ok(Bson::Null),
    }
}
