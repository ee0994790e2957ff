//! Enum value generators.

use crate::error::GeneratorError;
use bson::Bson;
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick one of `values` uniformly.
pub fn generate_one_of<R: Rng + ?Sized>(rng: &mut R, values: &[Bson]) -> Result<Bson, GeneratorError> {
    values.choose(rng).cloned().ok_or(GeneratorError::EmptyEnum)
}
