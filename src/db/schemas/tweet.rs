//! Tweet collection schema

use super::validator::{CollectionSchema, FieldSpec};

/// Collection name for tweets
pub const TWEET_COLLECTION: &str = "tweets";

pub const TEXT_MIN_LEN: i32 = 1;
pub const TEXT_MAX_LEN: i32 = 100;

pub fn schema() -> CollectionSchema {
    CollectionSchema::new(
        TWEET_COLLECTION,
        vec![
            FieldSpec::string(
                "userID",
                "references the _id of a user in the \"users\" collection",
            ),
            FieldSpec::string("username", "is the username of the user with the given userID"),
            FieldSpec::bounded("text", TEXT_MIN_LEN, TEXT_MAX_LEN),
        ],
    )
}
