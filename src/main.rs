//! tweetdb-provision - create the tweet service collections on first run
//!
//! Exits 0 when the database was provisioned or already existed, 1 on any
//! configuration, connection, or collection creation failure.

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tweetdb_provision::{
    config::Args,
    db::{schemas, MongoAdmin},
    report, SchemaProvisioner,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("tweetdb_provision={},info", args.log_level).into());
    let registry = tracing_subscriber::registry().with(filter);
    if args.log_json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    if let Err(e) = args.validate() {
        error!("{}", e);
        std::process::exit(1);
    }

    if args.print_schema {
        let catalog = schemas::catalog_json(args.schema_variant);
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    let target_db = args.target_db();
    info!(
        db = %target_db,
        variant = %args.schema_variant,
        follow_collection = %args.schema_variant.follow_collection(),
        "Starting schema provisioning"
    );

    let admin = match MongoAdmin::connect(&args.connection_uri(), args.connect_timeout_ms).await {
        Ok(admin) => admin,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    let provisioner = SchemaProvisioner::new(admin, args.schema_variant);
    let result = provisioner.provision_if_absent(target_db).await;

    let code = report(target_db, &result);
    if code != 0 {
        std::process::exit(code);
    }

    Ok(())
}
