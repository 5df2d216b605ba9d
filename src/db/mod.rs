//! Database administration layer
//!
//! `SchemaAdmin` is the privileged surface the provisioner needs: list the
//! databases on the engine and create a collection with a validator.

pub mod memory;
pub mod mongo;
pub mod schemas;

use bson::Document;

use crate::types::Result;

pub use memory::{AdminCommand, InMemoryAdmin};
pub use mongo::MongoAdmin;

/// Administrative interface of a document database engine
#[async_trait::async_trait]
pub trait SchemaAdmin: Send + Sync {
    /// Names of every database the engine reports.
    ///
    /// Fails with `ProvisionError::Connection` if the listing cannot complete.
    async fn list_database_names(&self) -> Result<Vec<String>>;

    /// Create `collection` in `db_name` with `validator` attached.
    ///
    /// Fails with `ProvisionError::SchemaCreation` if the engine rejects it,
    /// including when the collection already exists.
    async fn create_collection(
        &self,
        db_name: &str,
        collection: &str,
        validator: Document,
    ) -> Result<()>;
}
