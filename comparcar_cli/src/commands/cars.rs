use anyhow::{bail, Result};
use clap::Args;
use comparcar_lib::CachedClient;

use crate::output::{print_car, print_cars, OutputFormat};

#[derive(Args)]
pub struct GetArgs {
    /// Car ID
    pub id: i64,
}

/// Prints every car without pagination.
pub async fn run_all(client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let cars = client.list_all_cars().await?;
    eprintln!("{} cars", cars.len());
    print_cars(&cars, format)
}

pub async fn run_get(args: &GetArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    match client.get_car(args.id).await {
        Ok(car) => print_car(&car, format),
        Err(e) if e.is_not_found() => bail!("Car {} not found", args.id),
        Err(e) => Err(e.into()),
    }
}
