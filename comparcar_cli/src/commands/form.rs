use anyhow::{bail, Result};
use clap::Args;
use comparcar_lib::validation::{self, CarField};
use comparcar_lib::{CachedClient, FormPhase, FormView, SubmitOutcome};

use crate::output::{print_car, OutputFormat};

/// Car inputs shared by `create` and `update`. Values are passed to the form
/// as typed; the form's validation reports anything out of range.
#[derive(Args, Default)]
pub struct CarFieldArgs {
    /// Model name (letters, digits, spaces and hyphens)
    #[arg(long)]
    pub model: Option<String>,

    /// Manufacturing year
    #[arg(long)]
    pub year: Option<String>,

    /// Engine volume in liters (0.5 to 10.0)
    #[arg(long)]
    pub engine_volume: Option<String>,

    /// Body type (e.g. SEDAN, station-wagon)
    #[arg(long)]
    pub body_type: Option<String>,

    /// Fuel type (e.g. DIESEL, plug-in-hybrid)
    #[arg(long)]
    pub fuel_type: Option<String>,

    /// Trunk size in liters (100 to 3000)
    #[arg(long)]
    pub trunk_size: Option<String>,

    /// Fuel consumption in L/100km (1.0 to 30.0)
    #[arg(long)]
    pub fuel_consumption: Option<String>,

    /// Average yearly service price in EUR
    #[arg(long)]
    pub service_price: Option<String>,

    /// Price in EUR
    #[arg(long)]
    pub price: Option<String>,

    /// Mileage in km
    #[arg(long)]
    pub mileage: Option<String>,
}

impl CarFieldArgs {
    fn values(&self) -> [(CarField, Option<&String>); 10] {
        [
            (CarField::Model, self.model.as_ref()),
            (CarField::ManufacturingYear, self.year.as_ref()),
            (CarField::EngineVolume, self.engine_volume.as_ref()),
            (CarField::BodyType, self.body_type.as_ref()),
            (CarField::FuelType, self.fuel_type.as_ref()),
            (CarField::TrunkSize, self.trunk_size.as_ref()),
            (CarField::FuelConsumption, self.fuel_consumption.as_ref()),
            (CarField::AverageServicePrice, self.service_price.as_ref()),
            (CarField::Price, self.price.as_ref()),
            (CarField::Mileage, self.mileage.as_ref()),
        ]
    }

    fn is_empty(&self) -> bool {
        self.values().iter().all(|(_, v)| v.is_none())
    }
}

#[derive(Args)]
pub struct UpdateArgs {
    /// Car ID
    pub id: i64,

    #[command(flatten)]
    pub fields: CarFieldArgs,
}

/// Normalizes lenient category spellings to backend tokens. Anything that
/// does not parse is left for the form to reject.
fn normalize(field: CarField, value: &str) -> String {
    let parsed = match field {
        CarField::BodyType => validation::parse_body_type(value).map(|b| b.as_str()),
        CarField::FuelType => validation::parse_fuel_type(value).map(|f| f.as_str()),
        _ => return value.to_string(),
    };
    parsed.map(str::to_string).unwrap_or_else(|_| value.to_string())
}

fn apply_fields(form: &mut FormView, fields: &CarFieldArgs) {
    for (field, value) in fields.values() {
        if let Some(value) = value {
            form.set_field(field, &normalize(field, value));
        }
    }
}

pub async fn run_create(
    args: &CarFieldArgs,
    client: &CachedClient,
    format: &OutputFormat,
) -> Result<()> {
    let mut form = FormView::create();
    form.load(client).await;
    apply_fields(&mut form, args);
    submit(form, client, format).await
}

pub async fn run_update(
    args: &UpdateArgs,
    client: &CachedClient,
    format: &OutputFormat,
) -> Result<()> {
    if args.fields.is_empty() {
        bail!("Nothing to update: pass at least one field");
    }

    let mut form = FormView::edit(args.id);
    form.load(client).await;
    if let FormPhase::LoadFailed(notice) = form.phase() {
        bail!("{}", notice);
    }
    apply_fields(&mut form, &args.fields);
    submit(form, client, format).await
}

async fn submit(mut form: FormView, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    match form.submit(client).await {
        SubmitOutcome::Saved { record, notice } => {
            eprintln!("{}", notice);
            print_car(&record, format)
        }
        SubmitOutcome::Invalid => {
            for error in form.errors().iter() {
                eprintln!("  {}: {}", error.field.label(), error.message);
            }
            bail!("{} field(s) failed validation", form.errors().len())
        }
        SubmitOutcome::Failed(notice) => bail!("{}", notice),
        SubmitOutcome::Busy => bail!("{} is not ready", form.title()),
    }
}
