use anyhow::Result;
use comparcar_lib::format::{format_consumption, format_engine, format_mileage, format_price};
use comparcar_lib::types::{BodyType, CarRecord, FuelType};
use comparcar_lib::CarRow;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    /// Unrecognized names fall back to a table.
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct CarTableRow {
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
    #[tabled(rename = "Model")]
    #[serde(rename = "Model")]
    model: String,
    #[tabled(rename = "Year")]
    #[serde(rename = "Year")]
    year: i32,
    #[tabled(rename = "Engine")]
    #[serde(rename = "Engine")]
    engine: String,
    #[tabled(rename = "Body Type")]
    #[serde(rename = "Body Type")]
    body: String,
    #[tabled(rename = "Fuel Type")]
    #[serde(rename = "Fuel Type")]
    fuel: String,
    #[tabled(rename = "Price")]
    #[serde(rename = "Price")]
    price: String,
    #[tabled(rename = "Mileage")]
    #[serde(rename = "Mileage")]
    mileage: String,
}

#[derive(Tabled, Serialize)]
struct DetailRow {
    #[tabled(rename = "Field")]
    #[serde(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    #[serde(rename = "Value")]
    value: String,
}

#[derive(Tabled, Serialize)]
struct ChoiceRow {
    #[tabled(rename = "Token")]
    #[serde(rename = "Token")]
    token: &'static str,
    #[tabled(rename = "Label")]
    #[serde(rename = "Label")]
    label: String,
}

// -- Row builders --

fn build_car_rows(cars: &[CarRecord]) -> Vec<CarTableRow> {
    cars.iter()
        .map(CarRow::from_record)
        .map(|r| CarTableRow {
            id: r.id.map(|id| id.to_string()).unwrap_or_default(),
            model: r.model,
            year: r.year,
            engine: r.engine,
            body: r.body,
            fuel: r.fuel,
            price: r.price,
            mileage: r.mileage,
        })
        .collect()
}

fn build_detail_rows(car: &CarRecord) -> Vec<DetailRow> {
    vec![
        DetailRow {
            field: "ID",
            value: car.id.map(|id| id.to_string()).unwrap_or_default(),
        },
        DetailRow {
            field: "Model",
            value: car.model.clone(),
        },
        DetailRow {
            field: "Manufacturing Year",
            value: car.manufacturing_year.to_string(),
        },
        DetailRow {
            field: "Engine Volume",
            value: format_engine(car.engine_volume),
        },
        DetailRow {
            field: "Body Type",
            value: car.body_type.label(),
        },
        DetailRow {
            field: "Fuel Type",
            value: car.fuel_type.label(),
        },
        DetailRow {
            field: "Trunk Size",
            value: format!("{} L", car.trunk_size),
        },
        DetailRow {
            field: "Fuel Consumption",
            value: format_consumption(car.fuel_consumption),
        },
        DetailRow {
            field: "Average Service Price",
            value: format_price(car.average_service_price),
        },
        DetailRow {
            field: "Price",
            value: format_price(car.price),
        },
        DetailRow {
            field: "Mileage",
            value: format_mileage(car.mileage),
        },
    ]
}

fn build_body_type_rows(body_types: &[BodyType]) -> Vec<ChoiceRow> {
    body_types
        .iter()
        .map(|b| ChoiceRow {
            token: b.as_str(),
            label: b.label(),
        })
        .collect()
}

fn build_fuel_type_rows(fuel_types: &[FuelType]) -> Vec<ChoiceRow> {
    fuel_types
        .iter()
        .map(|f| ChoiceRow {
            token: f.as_str(),
            label: f.label(),
        })
        .collect()
}

// -- Generic renderers --

fn print_rows<R: Tabled + Serialize>(rows: Vec<R>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        OutputFormat::Json => print_json(&rows),
    }
    Ok(())
}

// -- Cars --

/// Prints cars as rows. JSON output carries the raw records.
pub fn print_cars(cars: &[CarRecord], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&cars);
            Ok(())
        }
        _ => print_rows(build_car_rows(cars), format),
    }
}

/// Prints one car as field/value pairs.
pub fn print_car(car: &CarRecord, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(car);
            Ok(())
        }
        _ => print_rows(build_detail_rows(car), format),
    }
}

// -- Reference lists --

pub fn print_body_types(body_types: &[BodyType], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&body_types);
            Ok(())
        }
        _ => print_rows(build_body_type_rows(body_types), format),
    }
}

pub fn print_fuel_types(fuel_types: &[FuelType], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(&fuel_types);
            Ok(())
        }
        _ => print_rows(build_fuel_type_rows(fuel_types), format),
    }
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}
