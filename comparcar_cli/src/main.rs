mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use comparcar_lib::Config;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "comparcar")]
#[command(about = "Browse, filter and edit the used-car catalog")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Backend base URL including the /api prefix (overrides COMPARCAR_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List cars one page at a time, with optional filters
    List(Box<commands::list::ListArgs>),
    /// List every car without pagination
    All,
    /// Show a single car
    Get(commands::cars::GetArgs),
    /// Add a new car
    Create(commands::form::CarFieldArgs),
    /// Change fields of an existing car
    Update(commands::form::UpdateArgs),
    /// Delete a car
    Delete(commands::delete::DeleteArgs),
    /// List the body types the backend accepts
    BodyTypes,
    /// List the fuel types the backend accepts
    FuelTypes,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("comparcar=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::from_name(&cli.output);

    let mut config = Config::from_env();
    if let Some(ref url) = cli.api_url {
        config = config.with_api_url(url);
    }
    tracing::debug!("Using backend at {}", config.api_base_url);
    let client = config.build_client();

    match &cli.command {
        Commands::List(args) => commands::list::run(args.as_ref(), &client, &format).await?,
        Commands::All => commands::cars::run_all(&client, &format).await?,
        Commands::Get(args) => commands::cars::run_get(args, &client, &format).await?,
        Commands::Create(args) => commands::form::run_create(args, &client, &format).await?,
        Commands::Update(args) => commands::form::run_update(args, &client, &format).await?,
        Commands::Delete(args) => commands::delete::run(args, &client).await?,
        Commands::BodyTypes => commands::reference::run_body_types(&client, &format).await?,
        Commands::FuelTypes => commands::reference::run_fuel_types(&client, &format).await?,
    }

    Ok(())
}
