//! Follow-relation collection schema
//!
//! The compact variant stores only the two user IDs in `followers`. The
//! denormalized variant stores `follows` with each side's username copied
//! alongside its ID so listings need no lookup into `users`.

use super::validator::{CollectionSchema, FieldSpec};
use super::SchemaVariant;

pub const FOLLOWERS_COLLECTION: &str = "followers";
pub const FOLLOWS_COLLECTION: &str = "follows";

const FOLLOWER_ID_NOTE: &str =
    "user ID of the follower; references the _id of a user in the \"users\" collection";
const FOLLOWEE_ID_NOTE: &str = concat!(
    "user ID of the person being followed; ",
    "references the _id of a user in the \"users\" collection"
);
const FOLLOWER_NAME_NOTE: &str =
    "username of the follower; references the username of a user in the \"users\" collection";
const FOLLOWEE_NAME_NOTE: &str =
    "username of the followee; references the username of a user in the \"users\" collection";

/// Collection name of the follow relation for the given variant
pub fn collection_name(variant: SchemaVariant) -> &'static str {
    match variant {
        SchemaVariant::Compact => FOLLOWERS_COLLECTION,
        SchemaVariant::Denormalized => FOLLOWS_COLLECTION,
    }
}

pub fn schema(variant: SchemaVariant) -> CollectionSchema {
    let fields = match variant {
        SchemaVariant::Compact => vec![
            FieldSpec::string("followerUserID", FOLLOWER_ID_NOTE),
            FieldSpec::string("followeeUserID", FOLLOWEE_ID_NOTE),
        ],
        SchemaVariant::Denormalized => vec![
            FieldSpec::string("followerUserID", FOLLOWER_ID_NOTE),
            FieldSpec::string("followerUsername", FOLLOWER_NAME_NOTE),
            FieldSpec::string("followeeUserID", FOLLOWEE_ID_NOTE),
            FieldSpec::string("followeeUsername", FOLLOWEE_NAME_NOTE),
        ],
    };

    CollectionSchema::new(collection_name(variant), fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_follow_relation() {
        let s = schema(SchemaVariant::Compact);
        assert_eq!(s.name, "followers");
        assert_eq!(s.required(), vec!["followerUserID", "followeeUserID"]);
    }

    #[test]
    fn test_denormalized_follow_relation() {
        let s = schema(SchemaVariant::Denormalized);
        assert_eq!(s.name, "follows");
        assert_eq!(
            s.required(),
            vec!["followerUserID", "followerUsername", "followeeUserID", "followeeUsername"]
        );
        assert!(s.fields.iter().all(|f| f.min_length.is_none() && f.max_length.is_none()));
    }
}
