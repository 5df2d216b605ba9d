//! Shared error and result types

use thiserror::Error;

/// Errors surfaced by the provisioner and its administrative backends
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProvisionError {
    /// The engine could not be reached, authenticated, or listed
    #[error("Connection error: {0}")]
    Connection(String),

    /// A create-collection command was rejected by the engine
    #[error("Failed to create collection '{collection}': {message}")]
    SchemaCreation { collection: String, message: String },

    #[error("Invalid database name: {0:?}")]
    InvalidDatabaseName(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ProvisionError {
    /// Collection whose creation failed, if this error came from one
    pub fn collection(&self) -> Option<&str> {
        match self {
            ProvisionError::SchemaCreation { collection, .. } => Some(collection),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;
