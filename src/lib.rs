//! tweetdb-provision - schema provisioning for the tweet service
//!
//! Creates the `users`, follow-relation, and `tweets` collections with
//! `$jsonSchema` validators the first time a database name is seen.
//!
//! ## Modules
//!
//! - **db**: administrative interface (`SchemaAdmin`), MongoDB and in-memory
//!   backends, and the declarative schema catalog
//! - **provisioner**: the idempotent check-then-create sequence
//! - **config**: CLI and environment configuration

pub mod config;
pub mod db;
pub mod provisioner;
pub mod types;

pub use config::Args;
pub use db::schemas::SchemaVariant;
pub use provisioner::{report, ProvisionOutcome, SchemaProvisioner};
pub use types::{ProvisionError, Result};
