//! Schema Provisioner — creates the tweet service collections once per database
//!
//! Provisioning a database:
//! 1. Lists the databases the engine knows about
//! 2. Skips entirely if the target name is already listed
//! 3. Otherwise creates each catalog collection with its validator, in order
//!
//! The existence check is by name only. A listed database is never touched,
//! even if it holds none of the expected collections. There is no retry and
//! no rollback: a failure leaves earlier collections in place.

use tracing::{error, info};

use crate::db::schemas::{self, CollectionSchema, SchemaVariant};
use crate::db::SchemaAdmin;
use crate::types::{ProvisionError, Result};

/// What a provisioning run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// The database was already listed; no commands were issued
    AlreadyProvisioned,
    /// The listed collections were created, in this order
    Provisioned { collections: Vec<String> },
}

/// Creates validator-carrying collections through a `SchemaAdmin`
pub struct SchemaProvisioner<A: SchemaAdmin> {
    admin: A,
    schemas: Vec<CollectionSchema>,
}

impl<A: SchemaAdmin> SchemaProvisioner<A> {
    /// Provisioner for the catalog of the given schema variant
    pub fn new(admin: A, variant: SchemaVariant) -> Self {
        Self::with_schemas(admin, schemas::catalog(variant))
    }

    /// Provisioner for an explicit collection list
    pub fn with_schemas(admin: A, schemas: Vec<CollectionSchema>) -> Self {
        Self { admin, schemas }
    }

    pub fn schemas(&self) -> &[CollectionSchema] {
        &self.schemas
    }

    pub fn admin(&self) -> &A {
        &self.admin
    }

    /// Provision `target_db` unless the engine already lists it (idempotent).
    pub async fn provision_if_absent(&self, target_db: &str) -> Result<ProvisionOutcome> {
        if target_db.is_empty() || target_db.trim() != target_db {
            return Err(ProvisionError::InvalidDatabaseName(target_db.to_string()));
        }

        let existing = self.admin.list_database_names().await?;

        if existing.iter().any(|name| name == target_db) {
            info!(db = %target_db, "Database already exists, skipping provisioning");
            return Ok(ProvisionOutcome::AlreadyProvisioned);
        }

        info!(
            db = %target_db,
            collections = self.schemas.len(),
            "Provisioning database"
        );

        let mut created = Vec::with_capacity(self.schemas.len());
        for schema in &self.schemas {
            if let Err(e) = self
                .admin
                .create_collection(target_db, schema.name, schema.validator())
                .await
            {
                error!(
                    db = %target_db,
                    collection = %schema.name,
                    created = ?created,
                    "Collection creation failed: {}",
                    e
                );
                return Err(e);
            }

            info!(
                db = %target_db,
                collection = %schema.name,
                required = ?schema.required(),
                "Created collection with validator"
            );
            created.push(schema.name.to_string());
        }

        Ok(ProvisionOutcome::Provisioned {
            collections: created,
        })
    }
}

/// Log how a run ended and return the process exit status for it.
///
/// Both outcomes exit 0. Any error exits 1, and a failed collection is named
/// in the log record.
pub fn report(target_db: &str, result: &Result<ProvisionOutcome>) -> i32 {
    match result {
        Ok(ProvisionOutcome::AlreadyProvisioned) => {
            info!(db = %target_db, "Nothing to do, database already provisioned");
            0
        }
        Ok(ProvisionOutcome::Provisioned { collections }) => {
            info!(db = %target_db, collections = ?collections, "Provisioning complete");
            0
        }
        Err(e) => {
            match e.collection() {
                Some(collection) => {
                    error!(db = %target_db, collection = %collection, "Provisioning failed: {}", e)
                }
                None => error!(db = %target_db, "Provisioning failed: {}", e),
            }
            1
        }
    }
}
