//! Array value generators.

use crate::context::GeneratorContext;
use crate::error::GeneratorError;
use crate::generators::generate_value;
use bson::Bson;
use loadgen_core::PropertySpec;
use rand::Rng;

/// Number of elements in a generated array.
pub const ARRAY_LENGTH: usize = 2;

/// Generate a two-element array from the property's `items` spec.
///
/// Each element is an independent generation. Unique and monotonic element
/// specs advance their shared state once per element.
pub fn generate_pair<R: Rng + ?Sized>(
    key: &str,
    spec: &PropertySpec,
    context: &GeneratorContext,
    rng: &mut R,
) -> Result<Bson, GeneratorError> {
    let items = spec.items.as_deref().ok_or(GeneratorError::MissingItems)?;
    let item_key = format!("{key}[]");

    let elements = (0..ARRAY_LENGTH)
        .map(|_| generate_value(&item_key, items, context, rng))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Bson::Array(elements))
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadgen_core::TypeTag;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_pair_of_items() {
        let ctx = GeneratorContext::new();
        let mut rng = StdRng::seed_from_u64(42);
        let spec = PropertySpec::new(TypeTag::Array)
            .with_items(PropertySpec::new(TypeTag::Int).with_range(1, 9));

        let value = generate_pair("nums", &spec, &ctx, &mut rng).unwrap();
        let Bson::Array(elements) = value else {
            panic!("Expected Array value");
        };
        assert_eq!(elements.len(), 2);
        for element in elements {
            assert!(matches!(element, Bson::Int64(v) if (1..=9).contains(&v)));
        }
    }

    #[test]
    fn test_unique_items_differ() {
        let ctx = GeneratorContext::new();
        let mut rng = StdRng::seed_from_u64(42);
        let spec = PropertySpec::new(TypeTag::Array)
            .with_items(PropertySpec::new(TypeTag::String).unique());

        let Bson::Array(elements) = generate_pair("codes", &spec, &ctx, &mut rng).unwrap() else {
            panic!("Expected Array value");
        };
        assert_ne!(elements[0], elements[1]);
    }

    #[test]
    fn test_monotonic_items_advance_twice() {
        let ctx = GeneratorContext::new();
        let mut rng = StdRng::seed_from_u64(42);
        let spec = PropertySpec::new(TypeTag::Array).with_items(
            PropertySpec::new(TypeTag::Int)
                .monotonic()
                .with_range(1, 1_000_000),
        );

        let Bson::Array(elements) = generate_pair("seqs", &spec, &ctx, &mut rng).unwrap() else {
            panic!("Expected Array value");
        };
        match (&elements[0], &elements[1]) {
            (Bson::Int64(a), Bson::Int64(b)) => assert!(*b == a + 1 || *b == 1_000_000),
            other => panic!("Expected Int64 elements, got {other:?}"),
        }
        assert_eq!(
            ctx.current_monotonic("seqs[]"),
            match elements[1] {
                Bson::Int64(v) => Some(v),
                _ => None,
            }
        );
    }

    #[test]
    fn test_missing_items() {
        let ctx = GeneratorContext::new();
        let mut rng = StdRng::seed_from_u64(42);
        let spec = PropertySpec::new(TypeTag::Array);

        assert!(matches!(
            generate_pair("tags", &spec, &ctx, &mut rng),
            Err(GeneratorError::MissingItems)
        ));
    }

    #[test]
    fn test_item_errors_propagate() {
        let ctx = GeneratorContext::new();
        let mut rng = StdRng::seed_from_u64(42);
        let spec = PropertySpec::new(TypeTag::Array)
            .with_items(PropertySpec::new(TypeTag::Enum));

        assert!(matches!(
            generate_pair("states", &spec, &ctx, &mut rng),
            Err(GeneratorError::EmptyEnum)
        ));
    }
}
