use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use placement_import::{load_definition, load_export, run_import, ImportOptions};

/// Import placement activity logs from a survey response export.
#[derive(Debug, Parser)]
#[command(name = "placement-import")]
#[command(version)]
#[command(about = "Import placement activity logs from a survey export", long_about = None)]
struct Args {
    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Survey definition JSON (question ids and texts)
    #[arg(long, env = "SURVEY_DEFINITION_PATH")]
    definition: PathBuf,

    /// Survey response export JSON
    #[arg(long, env = "SURVEY_EXPORT_PATH")]
    export: PathBuf,

    /// Unit name attached to every imported log
    #[arg(long, env = "IMPORT_UNIT")]
    unit: Option<String>,

    /// Parse and resolve everything, then roll back
    #[arg(long)]
    dry_run: bool,

    /// Connection pool size
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "placement_import=info,placement_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let definition = load_definition(&args.definition)?;
    let export = load_export(&args.export)?;
    tracing::info!(
        questions = definition.result.questions.len(),
        responses = export.responses.len(),
        "Loaded survey files"
    );

    let pool = placement_db::create_pool(&args.database_url, args.max_connections)
        .await
        .context("Failed to connect to database")?;
    placement_db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    let options = ImportOptions {
        unit: args.unit,
        dry_run: args.dry_run,
    };
    let summary = run_import(&pool, &definition, &export, &options).await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
