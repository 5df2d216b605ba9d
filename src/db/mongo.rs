//! MongoDB administrative client

use bson::{doc, Document};
use mongodb::Client;
use tracing::{debug, info};

use crate::db::SchemaAdmin;
use crate::types::{ProvisionError, Result};

/// MongoDB client wrapper used for provisioning
#[derive(Clone)]
pub struct MongoAdmin {
    client: Client,
}

impl MongoAdmin {
    /// Connect to MongoDB and verify the server answers a ping.
    ///
    /// `timeout_ms` bounds server selection and the initial connect so an
    /// unreachable host fails fast instead of hanging.
    pub async fn connect(uri: &str, timeout_ms: u64) -> Result<Self> {
        info!("Connecting to MongoDB at {}", uri);

        let client = Client::with_uri_str(with_timeouts(uri, timeout_ms))
            .await
            .map_err(|e| {
                ProvisionError::Connection(format!("Failed to connect to MongoDB: {}", e))
            })?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| ProvisionError::Connection(format!("MongoDB ping failed: {}", e)))?;

        info!("Connected to MongoDB");

        Ok(Self { client })
    }

    /// Get the raw MongoDB client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait::async_trait]
impl SchemaAdmin for MongoAdmin {
    async fn list_database_names(&self) -> Result<Vec<String>> {
        self.client
            .list_database_names()
            .await
            .map_err(|e| ProvisionError::Connection(format!("listDatabases failed: {}", e)))
    }

    async fn create_collection(
        &self,
        db_name: &str,
        collection: &str,
        validator: Document,
    ) -> Result<()> {
        debug!(db = %db_name, collection = %collection, "Issuing createCollection");

        self.client
            .database(db_name)
            .create_collection(collection)
            .validator(validator)
            .await
            .map_err(|e| ProvisionError::SchemaCreation {
                collection: collection.to_string(),
                message: e.to_string(),
            })
    }
}

/// Append server selection and connect timeouts to a connection string
fn with_timeouts(uri: &str, timeout_ms: u64) -> String {
    let separator = if uri.contains('?') {
        '&'
    } else if uri.ends_with('/') || uri.matches('/').count() > 2 {
        // mongodb://host/ or mongodb://host/authdb
        '?'
    } else {
        return format!(
            "{}/?serverSelectionTimeoutMS={}&connectTimeoutMS={}",
            uri, timeout_ms, timeout_ms
        );
    };

    format!(
        "{}{}serverSelectionTimeoutMS={}&connectTimeoutMS={}",
        uri, separator, timeout_ms, timeout_ms
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_timeouts_bare_host() {
        assert_eq!(
            with_timeouts("mongodb://localhost:27017", 3000),
            "mongodb://localhost:27017/?serverSelectionTimeoutMS=3000&connectTimeoutMS=3000"
        );
    }

    #[test]
    fn test_with_timeouts_trailing_slash() {
        assert_eq!(
            with_timeouts("mongodb://db:27017/", 500),
            "mongodb://db:27017/?serverSelectionTimeoutMS=500&connectTimeoutMS=500"
        );
    }

    #[test]
    fn test_with_timeouts_existing_options() {
        assert_eq!(
            with_timeouts("mongodb://db:27017/?replicaSet=rs0", 1000),
            "mongodb://db:27017/?replicaSet=rs0&serverSelectionTimeoutMS=1000&connectTimeoutMS=1000"
        );
    }

    #[test]
    fn test_with_timeouts_auth_db_path() {
        assert_eq!(
            with_timeouts("mongodb://db:27017/admin", 1000),
            "mongodb://db:27017/admin?serverSelectionTimeoutMS=1000&connectTimeoutMS=1000"
        );
    }

    // Live-engine coverage is in tests/mongo_validators_test.rs (needs MONGODB_TEST_URI)
}
