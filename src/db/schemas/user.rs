//! User collection schema
//!
//! Stores login credentials. Password constraints are shared by both
//! schema variants; the minimum username length is not.

use super::validator::{CollectionSchema, FieldSpec};
use super::SchemaVariant;

/// Collection name for users
pub const USER_COLLECTION: &str = "users";

pub const USERNAME_MAX_LEN: i32 = 30;
pub const PASSWORD_MIN_LEN: i32 = 8;
pub const PASSWORD_MAX_LEN: i32 = 30;

/// Minimum username length for the given variant
pub fn username_min_len(variant: SchemaVariant) -> i32 {
    match variant {
        SchemaVariant::Compact => 8,
        SchemaVariant::Denormalized => 6,
    }
}

pub fn schema(variant: SchemaVariant) -> CollectionSchema {
    CollectionSchema::new(
        USER_COLLECTION,
        vec![
            FieldSpec::bounded("username", username_min_len(variant), USERNAME_MAX_LEN),
            FieldSpec::bounded("password", PASSWORD_MIN_LEN, PASSWORD_MAX_LEN),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_bounds_per_variant() {
        let compact = schema(SchemaVariant::Compact);
        let username = compact.field("username").unwrap();
        assert_eq!(username.min_length, Some(8));
        assert_eq!(username.max_length, Some(30));

        let denormalized = schema(SchemaVariant::Denormalized);
        assert_eq!(denormalized.field("username").unwrap().min_length, Some(6));
    }

    #[test]
    fn test_password_bounds_shared() {
        for variant in SchemaVariant::ALL {
            let password = schema(variant).field("password").cloned().unwrap();
            assert_eq!(password.min_length, Some(8));
            assert_eq!(password.max_length, Some(30));
        }
    }
}
