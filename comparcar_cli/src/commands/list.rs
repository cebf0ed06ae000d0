use anyhow::{bail, Result};
use clap::Args;
use comparcar_lib::validation;
use comparcar_lib::{CachedClient, CarQuery, ListView, Query, SortDirection};

use crate::output::{print_cars, OutputFormat};

#[derive(Args, Default)]
pub struct ListArgs {
    /// Search by model name
    #[arg(long)]
    pub model: Option<String>,

    /// Earliest manufacturing year
    #[arg(long)]
    pub year_from: Option<i32>,

    /// Latest manufacturing year
    #[arg(long)]
    pub year_to: Option<i32>,

    /// Minimum engine volume in liters
    #[arg(long)]
    pub engine_from: Option<f64>,

    /// Maximum engine volume in liters
    #[arg(long)]
    pub engine_to: Option<f64>,

    /// Filter by body type (e.g. sedan, station-wagon, SUV)
    #[arg(long)]
    pub body_type: Option<String>,

    /// Filter by fuel type (e.g. diesel, plug-in-hybrid)
    #[arg(long)]
    pub fuel_type: Option<String>,

    /// Minimum trunk size in liters
    #[arg(long)]
    pub trunk_from: Option<i32>,

    /// Maximum trunk size in liters
    #[arg(long)]
    pub trunk_to: Option<i32>,

    /// Minimum fuel consumption (L/100km)
    #[arg(long)]
    pub consumption_from: Option<f64>,

    /// Maximum fuel consumption (L/100km)
    #[arg(long)]
    pub consumption_to: Option<f64>,

    /// Minimum average service price (EUR)
    #[arg(long)]
    pub service_price_from: Option<f64>,

    /// Maximum average service price (EUR)
    #[arg(long)]
    pub service_price_to: Option<f64>,

    /// Minimum price (EUR)
    #[arg(long)]
    pub price_from: Option<f64>,

    /// Maximum price (EUR)
    #[arg(long)]
    pub price_to: Option<f64>,

    /// Minimum mileage (km)
    #[arg(long)]
    pub mileage_from: Option<i32>,

    /// Maximum mileage (km)
    #[arg(long)]
    pub mileage_to: Option<i32>,

    /// Page number, starting at 0
    #[arg(long, default_value = "0")]
    pub page: i64,

    /// Results per page
    #[arg(long, default_value = "20")]
    pub size: i64,

    /// Sort field: id, model, year, engine, trunk, consumption, service-price, price, mileage
    #[arg(long, default_value = "id")]
    pub sort_by: String,

    /// Sort direction: asc or desc
    #[arg(long, conflicts_with = "desc")]
    pub sort_direction: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long)]
    pub desc: bool,
}

/// Translates command-line filters into a list query.
pub fn build_query(args: &ListArgs) -> Result<CarQuery> {
    if args.page < 0 {
        bail!("Page must be 0 or greater");
    }
    if args.size < 1 {
        bail!("Page size must be at least 1");
    }

    let mut query = CarQuery::default()
        .with_page(args.page)
        .with_page_size(args.size)
        .with_sort_by(validation::parse_sort_by(&args.sort_by)?);

    if args.desc {
        query = query.with_sort_direction(SortDirection::Desc);
    } else if let Some(ref direction) = args.sort_direction {
        query = query.with_sort_direction(validation::parse_sort_direction(direction)?);
    }

    if let Some(ref model) = args.model {
        if let Some(search) = validation::validate_search(model)? {
            query = query.with_model(&search);
        }
    }
    if let Some(ref body) = args.body_type {
        query = query.with_body_type(validation::parse_body_type(body)?);
    }
    if let Some(ref fuel) = args.fuel_type {
        query = query.with_fuel_type(validation::parse_fuel_type(fuel)?);
    }

    query.manufacturing_year.from = args.year_from;
    query.manufacturing_year.to = args.year_to;
    query.engine_volume.from = args.engine_from;
    query.engine_volume.to = args.engine_to;
    query.trunk_size.from = args.trunk_from;
    query.trunk_size.to = args.trunk_to;
    query.fuel_consumption.from = args.consumption_from;
    query.fuel_consumption.to = args.consumption_to;
    query.average_service_price.from = args.service_price_from;
    query.average_service_price.to = args.service_price_to;
    query.price.from = args.price_from;
    query.price.to = args.price_to;
    query.mileage.from = args.mileage_from;
    query.mileage.to = args.mileage_to;

    Ok(query)
}

pub async fn run(args: &ListArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let query = build_query(args)?;
    let mut view = ListView::with_criteria(query);
    view.mount(client).await;

    if let Some(notice) = view.error() {
        bail!("{}", notice);
    }

    if let Some(page) = view.page() {
        if let Some(summary) = view.summary() {
            eprintln!(
                "{} (page {}/{})",
                summary,
                page.number + 1,
                page.total_pages.max(1)
            );
        }
        if page.is_empty() {
            eprintln!("No cars found");
        }
        print_cars(&page.content, format)?;
    }

    Ok(())
}
