use anyhow::Result;
use comparcar_lib::reference::{reconcile_body_types, reconcile_fuel_types};
use comparcar_lib::CachedClient;

use crate::output::{print_body_types, print_fuel_types, OutputFormat};

pub async fn run_body_types(client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let tokens = client.list_body_types().await?;
    print_body_types(&reconcile_body_types(&tokens), format)
}

pub async fn run_fuel_types(client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let tokens = client.list_fuel_types().await?;
    print_fuel_types(&reconcile_fuel_types(&tokens), format)
}
