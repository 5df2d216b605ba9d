//! Configuration for the provisioner
//!
//! CLI arguments and environment variable handling using clap. A `.env`
//! file is loaded by the binary before parsing.

use clap::Parser;

use crate::db::schemas::SchemaVariant;
use crate::types::{ProvisionError, Result};

/// tweetdb-provision - create the tweet service collections if the database is new
#[derive(Parser, Debug, Clone)]
#[command(name = "tweetdb-provision")]
#[command(about = "Idempotently create validated collections for the tweet service database")]
#[command(version)]
pub struct Args {
    /// Full MongoDB connection URI (overrides DB_HOST/DB_PORT)
    #[arg(long, env = "MONGODB_URI")]
    pub mongodb_uri: Option<String>,

    /// MongoDB host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// MongoDB port
    #[arg(long, env = "DB_PORT", default_value = "27017")]
    pub db_port: u16,

    /// Name of the database to provision
    #[arg(long, env = "DB_NAME")]
    pub db_name: Option<String>,

    /// Schema layout to create
    #[arg(long, env = "SCHEMA_VARIANT", value_enum, default_value_t = SchemaVariant::Denormalized)]
    pub schema_variant: SchemaVariant,

    /// Server selection / connect timeout in milliseconds
    #[arg(long, env = "CONNECT_TIMEOUT_MS", default_value = "3000")]
    pub connect_timeout_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "LOG_JSON", default_value = "false")]
    pub log_json: bool,

    /// Print the validator catalog as JSON and exit without connecting
    #[arg(long)]
    pub print_schema: bool,
}

impl Args {
    /// MONGODB_URI, trimmed; None when unset or blank
    pub fn explicit_uri(&self) -> Option<&str> {
        self.mongodb_uri
            .as_deref()
            .map(str::trim)
            .filter(|uri| !uri.is_empty())
    }

    /// Connection string to use: MONGODB_URI if set, else built from host and port
    pub fn connection_uri(&self) -> String {
        match self.explicit_uri() {
            Some(uri) => uri.to_string(),
            None => format!("mongodb://{}:{}/", self.db_host, self.db_port),
        }
    }

    /// Target database name, trimmed; empty if unset
    pub fn target_db(&self) -> &str {
        self.db_name.as_deref().map(str::trim).unwrap_or("")
    }

    /// Validate configuration before connecting
    pub fn validate(&self) -> Result<()> {
        if self.print_schema {
            return Ok(());
        }

        if self.target_db().is_empty() {
            return Err(ProvisionError::Config(
                "DB_NAME is required (set it in the environment, .env, or --db-name)".to_string(),
            ));
        }

        if self.explicit_uri().is_none() {
            if self.db_host.trim().is_empty() {
                return Err(ProvisionError::Config("DB_HOST must not be empty".to_string()));
            }
            if self.db_port == 0 {
                return Err(ProvisionError::Config("DB_PORT must be non-zero".to_string()));
            }
        }

        if self.connect_timeout_ms == 0 {
            return Err(ProvisionError::Config(
                "CONNECT_TIMEOUT_MS must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
