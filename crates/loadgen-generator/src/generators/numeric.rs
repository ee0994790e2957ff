//! Numeric value generators.

use crate::error::GeneratorError;
use bson::Bson;
use rand::Rng;

/// Upper bound (exclusive) used when a property has no usable range.
pub const DEFAULT_INT_CEILING: i64 = 10_000;

/// Generate an integer for a property with the given bounds.
///
/// When both bounds are non-zero the value is uniform in `[minimum, maximum]`;
/// otherwise it is uniform in `[0, 10000)`.
pub fn generate_int<R: Rng + ?Sized>(
    rng: &mut R,
    minimum: i64,
    maximum: i64,
) -> Result<Bson, GeneratorError> {
    if minimum != 0 && maximum != 0 {
        if minimum > maximum {
            return Err(GeneratorError::InvalidRange { minimum, maximum });
        }
        return Ok(Bson::Int64(rng.gen_range(minimum..=maximum)));
    }
    Ok(Bson::Int64(rng.gen_range(0..DEFAULT_INT_CEILING)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn as_i64(value: Bson) -> i64 {
        match value {
            Bson::Int64(v) => v,
            other => panic!("Expected Int64 value, got {other:?}"),
        }
    }

    #[test]
    fn test_generate_in_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1_000 {
            let v = as_i64(generate_int(&mut rng, 10, 20).unwrap());
            assert!((10..=20).contains(&v));
        }
    }

    #[test]
    fn test_range_is_inclusive() {
        let mut rng = StdRng::seed_from_u64(7);
        let values: Vec<i64> = (0..2_000)
            .map(|_| as_i64(generate_int(&mut rng, 1, 3).unwrap()))
            .collect();
        assert!(values.contains(&1));
        assert!(values.contains(&3));
    }

    #[test]
    fn test_zero_bound_falls_back_to_default() {
        let mut rng = StdRng::seed_from_u64(42);
        for (min, max) in [(0, 0), (0, 50), (5, 0)] {
            for _ in 0..200 {
                let v = as_i64(generate_int(&mut rng, min, max).unwrap());
                assert!((0..DEFAULT_INT_CEILING).contains(&v));
            }
        }
    }

    #[test]
    fn test_negative_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let v = as_i64(generate_int(&mut rng, -10, -5).unwrap());
        assert!((-10..=-5).contains(&v));
    }

    #[test]
    fn test_inverted_range() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(matches!(
            generate_int(&mut rng, 20, 10),
            Err(GeneratorError::InvalidRange {
                minimum: 20,
                maximum: 10
            })
        ));
    }
}
