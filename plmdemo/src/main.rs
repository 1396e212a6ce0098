use std::fs::File;

use plm_axum::{openapi, start_server};
use plm_sqlite::Db;
use plmdemo::{AppConfig, Cli, impls::DemoApp, seed::seed};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // By convention, we leverage `tracing` to instrument and log various
    // operations throughout this project.
    // Accordingly, we likely want to subscribe to these events so we can
    // write them to stdio and possibly some durable location.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;

    // If requested, dump the schema and exit.
    if let Some(path) = cli.schema {
        let schema = openapi::<DemoApp>();
        serde_json::to_writer_pretty(File::create(path)?, &schema)?;
        return Ok(());
    }

    // Create config with proper layering of CLI args
    let AppConfig { server, database } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;
    let app = DemoApp { db };

    if cli.seed {
        seed(&app).await?;
    }

    start_server(server, app).await?;
    Ok(())
}
