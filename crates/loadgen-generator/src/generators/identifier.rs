//! Identifier generators.

use bson::oid::ObjectId;
use bson::Bson;

/// Generate a fresh 12-byte document identifier.
pub fn generate_object_id() -> Bson {
    Bson::ObjectId(ObjectId::new())
}
