//! Timestamp value generators.

use bson::{Bson, DateTime};
use chrono::Utc;

/// The current UTC time.
pub fn generate_now() -> Bson {
    Bson::DateTime(DateTime::from_chrono(Utc::now()))
}
