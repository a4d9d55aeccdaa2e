mod commands;

use clap::{Parser, Subcommand};

use mandi_catalog::FileCatalog;
use mandi_recipes::{RecipeClient, RetryPolicy};

#[derive(Debug, Parser)]
#[command(name = "mandi-cli")]
#[command(about = "Mandi storefront matching command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a recipe and match its ingredients against shop catalogs.
    Suggest { query: String },
    /// Quick stock check of ingredient names against the flat catalog.
    Stock { ingredients: Vec<String> },
    /// List shops within a radius of a point, nearest first.
    Nearby {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lng: f64,
        #[arg(long)]
        zoom: Option<f64>,
        #[arg(long)]
        radius_km: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = mandi_core::load_app_config()?;
    let catalog = FileCatalog::load(&config.catalog_path)?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Suggest { query } => {
            let client = match &config.recipe_base_url {
                Some(base_url) => RecipeClient::with_base_url(
                    config.recipe_api_key.as_deref(),
                    config.recipe_request_timeout_secs,
                    base_url,
                )?,
                None => RecipeClient::new(
                    config.recipe_api_key.as_deref(),
                    config.recipe_request_timeout_secs,
                )?,
            };
            let retry = RetryPolicy {
                max_retries: config.recipe_max_retries,
                backoff_base_ms: config.recipe_retry_backoff_base_ms,
            };
            print!(
                "{}",
                commands::run_suggest(&catalog, &client, retry, &query).await?
            );
        }
        Commands::Stock { ingredients } => {
            anyhow::ensure!(!ingredients.is_empty(), "provide at least one ingredient");
            print!("{}", commands::run_stock(&catalog, &ingredients).await);
        }
        Commands::Nearby {
            lat,
            lng,
            zoom,
            radius_km,
        } => {
            print!(
                "{}",
                commands::run_nearby(&catalog, lat, lng, zoom, radius_km).await
            );
        }
    }

    Ok(())
}
