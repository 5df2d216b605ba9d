//! Collection schemas for the tweet service database
//!
//! Defines the validator-carrying collections created at provisioning time:
//! users, the follow relation, and tweets.

mod follow;
mod tweet;
mod user;
pub mod validator;

use clap::ValueEnum;
use serde_json::{json, Value};
use std::fmt;

pub use follow::{FOLLOWERS_COLLECTION, FOLLOWS_COLLECTION};
pub use tweet::{TEXT_MAX_LEN, TEXT_MIN_LEN, TWEET_COLLECTION};
pub use user::{PASSWORD_MAX_LEN, PASSWORD_MIN_LEN, USERNAME_MAX_LEN, USER_COLLECTION};
pub use validator::{check_document, CollectionSchema, FieldSpec};

/// Which of the two deployed schema layouts to provision.
///
/// They are not interchangeable; pick one per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum SchemaVariant {
    /// `followers` holds only user IDs; usernames need at least 8 characters
    Compact,
    /// `follows` also copies both usernames; usernames need at least 6 characters
    #[default]
    Denormalized,
}

impl SchemaVariant {
    pub const ALL: [SchemaVariant; 2] = [SchemaVariant::Compact, SchemaVariant::Denormalized];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVariant::Compact => "compact",
            SchemaVariant::Denormalized => "denormalized",
        }
    }

    /// Name of the follow-relation collection in this variant
    pub fn follow_collection(&self) -> &'static str {
        follow::collection_name(*self)
    }
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ordered collection catalog for a variant: users, follow relation, tweets
pub fn catalog(variant: SchemaVariant) -> Vec<CollectionSchema> {
    vec![user::schema(variant), follow::schema(variant), tweet::schema()]
}

/// Catalog rendered as relaxed extended JSON, one entry per collection
pub fn catalog_json(variant: SchemaVariant) -> Value {
    let collections: Vec<Value> = catalog(variant)
        .iter()
        .map(|schema| {
            json!({
                "collection": schema.name,
                "validator": bson::Bson::Document(schema.validator()).into_relaxed_extjson(),
            })
        })
        .collect();

    json!({
        "variant": variant.as_str(),
        "collections": collections,
    })
}
