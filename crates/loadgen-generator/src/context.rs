//! Mutable generator state shared across concurrent generation calls.
//!
//! The only state a run accumulates during generation is the last value handed
//! out for each monotonic property. It lives here, keyed by property name, and
//! never inside a [`PropertySpec`], which stays read-only and shareable.

use loadgen_core::PropertySpec;
use rand::rngs::OsRng;
use rand::RngCore;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Per-run monotonic counters, one slot per property name.
///
/// All reads and writes of a slot happen under one lock, so concurrent callers
/// observe a single non-decreasing sequence per property.
#[derive(Debug, Default)]
pub struct GeneratorContext {
    monotonic: Mutex<HashMap<String, i64>>,
}

impl GeneratorContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next value of the monotonic sequence for `key`.
    ///
    /// The first call seeds the slot from the clock; later calls add one until
    /// the upper bound is reached, after which the bound is returned unchanged.
    pub fn next_monotonic(&self, key: &str, spec: &PropertySpec) -> i64 {
        let (lower, upper) = monotonic_bounds(spec);
        // A poisoned slot still holds a valid integer.
        let mut slots = self
            .monotonic
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        match slots.get_mut(key) {
            Some(current) => {
                if *current < upper {
                    *current += 1;
                }
                *current
            }
            None => {
                let seed = clamp_seed(monotonic_seed(), lower, upper);
                slots.insert(key.to_string(), seed);
                seed
            }
        }
    }

    /// Last value handed out for `key`, if any.
    pub fn current_monotonic(&self, key: &str) -> Option<i64> {
        self.monotonic
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .copied()
    }
}

/// Inclusive bounds of a monotonic sequence. A zero maximum means unbounded.
fn monotonic_bounds(spec: &PropertySpec) -> (i64, i64) {
    let upper = if spec.maximum != 0 {
        spec.maximum
    } else {
        i64::MAX
    };
    let lower = spec.minimum.min(upper);
    (lower, upper)
}

/// Clock-derived seed with the low 16 bits mixed with OS randomness.
fn monotonic_seed() -> i64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut salt = [0u8; 2];
    OsRng.fill_bytes(&mut salt);
    let mixed = nanos ^ u64::from(u16::from_le_bytes(salt));
    (mixed & i64::MAX as u64) as i64
}

/// Fold a seed into `[lower, upper]`.
fn clamp_seed(seed: i64, lower: i64, upper: i64) -> i64 {
    if (lower..=upper).contains(&seed) {
        return seed;
    }
    let span = i128::from(upper) - i128::from(lower) + 1;
    let offset = i128::from(seed).rem_euclid(span);
    (i128::from(lower) + offset) as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use loadgen_core::TypeTag;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    fn monotonic_int(minimum: i64, maximum: i64) -> PropertySpec {
        PropertySpec::new(TypeTag::Int)
            .monotonic()
            .with_range(minimum, maximum)
    }

    #[test]
    fn test_clamp_seed() {
        assert_eq!(clamp_seed(5, 1, 10), 5);
        assert_eq!(clamp_seed(15, 1, 10), 6);
        assert_eq!(clamp_seed(i64::MAX, 0, i64::MAX), i64::MAX);
        let folded = clamp_seed(1_700_000_000_000_000_000, 100, 200);
        assert!((100..=200).contains(&folded));
    }

    #[test]
    fn test_sequence_increments() {
        let ctx = GeneratorContext::new();
        let spec = monotonic_int(0, 0);

        let first = ctx.next_monotonic("seq", &spec);
        let second = ctx.next_monotonic("seq", &spec);
        let third = ctx.next_monotonic("seq", &spec);

        assert_eq!(second, first + 1);
        assert_eq!(third, first + 2);
        assert_eq!(ctx.current_monotonic("seq"), Some(third));
    }

    #[test]
    fn test_sequence_saturates_at_maximum() {
        let ctx = GeneratorContext::new();
        let spec = monotonic_int(1, 5);

        let values: Vec<i64> = (0..20).map(|_| ctx.next_monotonic("seq", &spec)).collect();

        assert!(values.iter().all(|v| (1..=5).contains(v)));
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(*values.last().unwrap(), 5);
        assert_eq!(values[values.len() - 2], 5);
    }

    #[test]
    fn test_slots_are_independent() {
        let ctx = GeneratorContext::new();
        let small = monotonic_int(1, 3);
        let large = monotonic_int(1_000, 2_000);

        for _ in 0..10 {
            ctx.next_monotonic("small", &small);
        }
        let value = ctx.next_monotonic("large", &large);

        assert_eq!(ctx.current_monotonic("small"), Some(3));
        assert!((1_000..=2_000).contains(&value));
    }

    #[test]
    fn test_concurrent_callers_never_observe_a_decrease() {
        const THREADS: usize = 8;
        const CALLS: usize = 2_000;

        let ctx = Arc::new(GeneratorContext::new());
        let spec = Arc::new(monotonic_int(0, 0));
        // Holding the log lock across each call makes log order completion order.
        let log = Arc::new(Mutex::new(Vec::with_capacity(THREADS * CALLS)));

        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let ctx = Arc::clone(&ctx);
                let spec = Arc::clone(&spec);
                let log = Arc::clone(&log);
                thread::spawn(move || {
                    let mut own = Vec::with_capacity(CALLS);
                    for _ in 0..CALLS {
                        let mut entries = log.lock().unwrap();
                        let value = ctx.next_monotonic("seq", &spec);
                        entries.push(value);
                        own.push(value);
                    }
                    own
                })
            })
            .collect();

        let mut all = HashSet::new();
        for handle in handles {
            let own = handle.join().unwrap();
            assert!(own.windows(2).all(|w| w[0] < w[1]));
            all.extend(own);
        }

        // Every call advanced the shared slot exactly once.
        assert_eq!(all.len(), THREADS * CALLS);

        let log = log.lock().unwrap();
        assert!(log.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_concurrent_callers_saturate() {
        let ctx = Arc::new(GeneratorContext::new());
        let spec = Arc::new(monotonic_int(1, 50));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let ctx = Arc::clone(&ctx);
                let spec = Arc::clone(&spec);
                thread::spawn(move || {
                    (0..100)
                        .map(|_| ctx.next_monotonic("seq", &spec))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for handle in handles {
            let values = handle.join().unwrap();
            assert!(values.windows(2).all(|w| w[0] <= w[1]));
            assert!(values.iter().all(|v| *v <= 50));
        }
        assert_eq!(ctx.current_monotonic("seq"), Some(50));
    }
}
