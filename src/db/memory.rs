//! In-memory administrative backend
//!
//! Keeps a catalog of databases and validator-carrying collections, records
//! every command it receives, and enforces validators on insert. Collection
//! creation follows the engine's rule that an existing name is rejected.

use bson::Document;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::db::schemas::check_document;
use crate::db::SchemaAdmin;
use crate::types::{ProvisionError, Result};

/// A command received by the in-memory admin
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    ListDatabases,
    CreateCollection { db: String, collection: String },
}

#[derive(Default)]
struct Engine {
    /// database -> collection -> validator (None for implicitly created)
    databases: BTreeMap<String, BTreeMap<String, Option<Document>>>,
    documents: HashMap<(String, String), Vec<Document>>,
    commands: Vec<AdminCommand>,
    listing_failure: Option<String>,
    rejections: HashMap<String, String>,
}

/// In-memory stand-in for a MongoDB deployment
#[derive(Clone, Default)]
pub struct InMemoryAdmin {
    engine: Arc<RwLock<Engine>>,
}

impl InMemoryAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given databases present and empty
    pub fn with_databases<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut engine = Engine::default();
        for name in names {
            engine.databases.entry(name.into()).or_default();
        }
        Self {
            engine: Arc::new(RwLock::new(engine)),
        }
    }

    /// Make every subsequent database listing fail
    pub async fn fail_listing(&self, message: &str) {
        self.engine.write().await.listing_failure = Some(message.to_string());
    }

    /// Make creation of `collection` fail with `message`
    pub async fn reject_collection(&self, collection: &str, message: &str) {
        self.engine
            .write()
            .await
            .rejections
            .insert(collection.to_string(), message.to_string());
    }

    /// Every command received, in order
    pub async fn commands(&self) -> Vec<AdminCommand> {
        self.engine.read().await.commands.clone()
    }

    /// Number of create-collection commands received
    pub async fn create_count(&self) -> usize {
        self.engine
            .read()
            .await
            .commands
            .iter()
            .filter(|c| matches!(c, AdminCommand::CreateCollection { .. }))
            .count()
    }

    /// Collection names in `db_name`, sorted
    pub async fn collections(&self, db_name: &str) -> Vec<String> {
        self.engine
            .read()
            .await
            .databases
            .get(db_name)
            .map(|collections| collections.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Validator attached to a collection, if it exists and has one
    pub async fn validator(&self, db_name: &str, collection: &str) -> Option<Document> {
        self.engine
            .read()
            .await
            .databases
            .get(db_name)?
            .get(collection)?
            .clone()
    }

    /// Insert a document, enforcing the collection's validator.
    ///
    /// A missing collection is created implicitly without a validator, as the
    /// engine does. Rejections carry the list of violations.
    pub async fn insert_one(
        &self,
        db_name: &str,
        collection: &str,
        document: Document,
    ) -> std::result::Result<(), Vec<String>> {
        let mut engine = self.engine.write().await;

        let validator = engine
            .databases
            .entry(db_name.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_insert(None)
            .clone();

        if let Some(validator) = validator {
            check_document(&validator, &document)?;
        }

        engine
            .documents
            .entry((db_name.to_string(), collection.to_string()))
            .or_default()
            .push(document);

        Ok(())
    }

    /// Number of stored documents in a collection
    pub async fn count_documents(&self, db_name: &str, collection: &str) -> usize {
        self.engine
            .read()
            .await
            .documents
            .get(&(db_name.to_string(), collection.to_string()))
            .map_or(0, Vec::len)
    }
}

#[async_trait::async_trait]
impl SchemaAdmin for InMemoryAdmin {
    async fn list_database_names(&self) -> Result<Vec<String>> {
        let mut engine = self.engine.write().await;
        engine.commands.push(AdminCommand::ListDatabases);

        if let Some(message) = &engine.listing_failure {
            return Err(ProvisionError::Connection(message.clone()));
        }

        Ok(engine.databases.keys().cloned().collect())
    }

    async fn create_collection(
        &self,
        db_name: &str,
        collection: &str,
        validator: Document,
    ) -> Result<()> {
        let mut engine = self.engine.write().await;
        engine.commands.push(AdminCommand::CreateCollection {
            db: db_name.to_string(),
            collection: collection.to_string(),
        });

        if let Some(message) = engine.rejections.get(collection) {
            return Err(ProvisionError::SchemaCreation {
                collection: collection.to_string(),
                message: message.clone(),
            });
        }

        let collections = engine.databases.entry(db_name.to_string()).or_default();
        if collections.contains_key(collection) {
            return Err(ProvisionError::SchemaCreation {
                collection: collection.to_string(),
                message: format!("Collection {}.{} already exists.", db_name, collection),
            });
        }
        collections.insert(collection.to_string(), Some(validator));

        Ok(())
    }
}
