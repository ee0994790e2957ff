//! String value generators.

use bson::Bson;
use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use std::fmt::Write;

/// Random bytes behind a unique string.
pub const UNIQUE_BYTES: usize = 12;

/// Generate `random_` followed by 24 hex characters from the OS CSPRNG.
pub fn generate_unique_string() -> Bson {
    let mut bytes = [0u8; UNIQUE_BYTES];
    OsRng.fill_bytes(&mut bytes);

    let mut value = String::with_capacity("random_".len() + UNIQUE_BYTES * 2);
    value.push_str("random_");
    for byte in bytes {
        let _ = write!(value, "{byte:02x}");
    }
    Bson::String(value)
}

/// Generate a collidable string of the form `random<N>_bar<M>`, N and M in `[0, 1000)`.
pub fn generate_low_entropy_string<R: Rng + ?Sized>(rng: &mut R) -> Bson {
    let n: u32 = rng.gen_range(0..1000);
    let m: u32 = rng.gen_range(0..1000);
    Bson::String(format!("random{n}_bar{m}"))
}
