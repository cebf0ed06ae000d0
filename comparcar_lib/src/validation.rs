//! Client-side validation of car forms and filter input.
//!
//! Form validation runs entirely locally: a draft with any violation is
//! never turned into a request.

use std::fmt;
use std::sync::OnceLock;

use chrono::{Datelike, Utc};
use comparcar_api::types::{BodyType, CarRecord, FuelType};
use comparcar_api::{CarSortBy, SortDirection};
use regex::Regex;

use crate::error::ComparcarError;

pub const MAX_MODEL_LENGTH: usize = 100;
/// A search longer than any stored model name can never match.
pub const MAX_SEARCH_LENGTH: usize = MAX_MODEL_LENGTH;

pub const MIN_YEAR: i32 = 1900;
pub const MIN_ENGINE_VOLUME: f64 = 0.5;
pub const MAX_ENGINE_VOLUME: f64 = 10.0;
pub const MIN_TRUNK_SIZE: i64 = 100;
pub const MAX_TRUNK_SIZE: i64 = 3000;
pub const MIN_FUEL_CONSUMPTION: f64 = 1.0;
pub const MAX_FUEL_CONSUMPTION: f64 = 30.0;
pub const MIN_SERVICE_PRICE: f64 = 0.0;
pub const MAX_SERVICE_PRICE: f64 = 10_000.0;
pub const MIN_PRICE: f64 = 100.0;
pub const MAX_PRICE: f64 = 1_000_000.0;
pub const MIN_MILEAGE: i64 = 0;
pub const MAX_MILEAGE: i64 = 1_000_000;

/// Decimal precision the backend stores, as (integer digits, fraction digits).
pub const ENGINE_VOLUME_DIGITS: (usize, usize) = (2, 1);
pub const FUEL_CONSUMPTION_DIGITS: (usize, usize) = (2, 1);
pub const SERVICE_PRICE_DIGITS: (usize, usize) = (5, 2);
pub const PRICE_DIGITS: (usize, usize) = (7, 2);

/// Latest accepted manufacturing year: next calendar year.
pub fn max_year() -> i32 {
    Utc::now().year() + 1
}

/// Years offered by the year selector, newest first.
pub fn year_options() -> Vec<i32> {
    (MIN_YEAR..=max_year()).rev().collect()
}

/// The editable fields of a car form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CarField {
    Model,
    ManufacturingYear,
    EngineVolume,
    BodyType,
    FuelType,
    TrunkSize,
    FuelConsumption,
    AverageServicePrice,
    Price,
    Mileage,
}

impl CarField {
    pub const ALL: [CarField; 10] = [
        CarField::Model,
        CarField::ManufacturingYear,
        CarField::EngineVolume,
        CarField::BodyType,
        CarField::FuelType,
        CarField::TrunkSize,
        CarField::FuelConsumption,
        CarField::AverageServicePrice,
        CarField::Price,
        CarField::Mileage,
    ];

    /// Form label, e.g. "Engine Volume (L)".
    pub fn label(&self) -> &'static str {
        match self {
            CarField::Model => "Car Model",
            CarField::ManufacturingYear => "Manufacturing Year",
            CarField::EngineVolume => "Engine Volume (L)",
            CarField::BodyType => "Body Type",
            CarField::FuelType => "Fuel Type",
            CarField::TrunkSize => "Trunk Size (L)",
            CarField::FuelConsumption => "Fuel Consumption (L/100km)",
            CarField::AverageServicePrice => "Average Service Price (EUR)",
            CarField::Price => "Price (EUR)",
            CarField::Mileage => "Mileage (km)",
        }
    }

    /// Subject used at the start of error messages.
    fn subject(&self) -> &'static str {
        match self {
            CarField::Model => "Car model",
            CarField::ManufacturingYear => "Manufacturing year",
            CarField::EngineVolume => "Engine volume",
            CarField::BodyType => "Body type",
            CarField::FuelType => "Fuel type",
            CarField::TrunkSize => "Trunk size",
            CarField::FuelConsumption => "Fuel consumption",
            CarField::AverageServicePrice => "Average service price",
            CarField::Price => "Car price",
            CarField::Mileage => "Mileage",
        }
    }
}

impl fmt::Display for CarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw text of every form input, before parsing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CarDraft {
    pub model: String,
    pub manufacturing_year: String,
    pub engine_volume: String,
    pub body_type: String,
    pub fuel_type: String,
    pub trunk_size: String,
    pub fuel_consumption: String,
    pub average_service_price: String,
    pub price: String,
    pub mileage: String,
}

impl CarDraft {
    /// Populates every input from an existing record.
    pub fn from_record(record: &CarRecord) -> Self {
        Self {
            model: record.model.clone(),
            manufacturing_year: record.manufacturing_year.to_string(),
            engine_volume: record.engine_volume.to_string(),
            body_type: record.body_type.to_string(),
            fuel_type: record.fuel_type.to_string(),
            trunk_size: record.trunk_size.to_string(),
            fuel_consumption: record.fuel_consumption.to_string(),
            average_service_price: record.average_service_price.to_string(),
            price: record.price.to_string(),
            mileage: record.mileage.to_string(),
        }
    }

    pub fn get(&self, field: CarField) -> &str {
        match field {
            CarField::Model => &self.model,
            CarField::ManufacturingYear => &self.manufacturing_year,
            CarField::EngineVolume => &self.engine_volume,
            CarField::BodyType => &self.body_type,
            CarField::FuelType => &self.fuel_type,
            CarField::TrunkSize => &self.trunk_size,
            CarField::FuelConsumption => &self.fuel_consumption,
            CarField::AverageServicePrice => &self.average_service_price,
            CarField::Price => &self.price,
            CarField::Mileage => &self.mileage,
        }
    }

    pub fn set(&mut self, field: CarField, value: &str) {
        let slot = match field {
            CarField::Model => &mut self.model,
            CarField::ManufacturingYear => &mut self.manufacturing_year,
            CarField::EngineVolume => &mut self.engine_volume,
            CarField::BodyType => &mut self.body_type,
            CarField::FuelType => &mut self.fuel_type,
            CarField::TrunkSize => &mut self.trunk_size,
            CarField::FuelConsumption => &mut self.fuel_consumption,
            CarField::AverageServicePrice => &mut self.average_service_price,
            CarField::Price => &mut self.price,
            CarField::Mileage => &mut self.mileage,
        };
        *slot = value.to_string();
    }
}

/// One violated constraint on one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: CarField,
    pub message: String,
}

/// Every violation found in a draft, at most one per field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The message for `field`, if it failed validation.
    pub fn get(&self, field: CarField) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Clears the error for `field`, e.g. after the user edits it.
    pub fn remove(&mut self, field: CarField) {
        self.errors.retain(|e| e.field != field);
    }

    fn push(&mut self, field: CarField, message: String) {
        self.errors.push(FieldError { field, message });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field.label(), e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

fn model_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| match Regex::new(r"^[a-zA-Z0-9\s\-]+$") {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::error!("Failed to compile model pattern: {}", e);
                None
            }
        })
        .as_ref()
}

/// Parses and checks every field of `draft`, collecting all violations.
pub fn validate_car(draft: &CarDraft) -> Result<CarRecord, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let model = check_model(&draft.model, &mut errors);
    let manufacturing_year = check_integer(
        CarField::ManufacturingYear,
        &draft.manufacturing_year,
        i64::from(MIN_YEAR),
        i64::from(max_year()),
        &mut errors,
        |min, max| {
            (
                format!("must be at least {}", min),
                format!("cannot be later than {}", max),
            )
        },
    );
    let engine_volume = check_decimal(
        CarField::EngineVolume,
        &draft.engine_volume,
        MIN_ENGINE_VOLUME,
        MAX_ENGINE_VOLUME,
        ENGINE_VOLUME_DIGITS,
        &mut errors,
        ("must be at least 0.5L", "cannot exceed 10.0L"),
    );
    let body_type = check_choice(CarField::BodyType, &draft.body_type, parse_body_type, &mut errors);
    let fuel_type = check_choice(CarField::FuelType, &draft.fuel_type, parse_fuel_type, &mut errors);
    let trunk_size = check_integer(
        CarField::TrunkSize,
        &draft.trunk_size,
        MIN_TRUNK_SIZE,
        MAX_TRUNK_SIZE,
        &mut errors,
        |min, max| {
            (
                format!("must be at least {}L", min),
                format!("cannot exceed {}L", max),
            )
        },
    );
    let fuel_consumption = check_decimal(
        CarField::FuelConsumption,
        &draft.fuel_consumption,
        MIN_FUEL_CONSUMPTION,
        MAX_FUEL_CONSUMPTION,
        FUEL_CONSUMPTION_DIGITS,
        &mut errors,
        ("must be at least 1.0L/100km", "cannot exceed 30.0L/100km"),
    );
    let average_service_price = check_decimal(
        CarField::AverageServicePrice,
        &draft.average_service_price,
        MIN_SERVICE_PRICE,
        MAX_SERVICE_PRICE,
        SERVICE_PRICE_DIGITS,
        &mut errors,
        ("cannot be negative", "cannot exceed 10000 EUR"),
    );
    let price = check_decimal(
        CarField::Price,
        &draft.price,
        MIN_PRICE,
        MAX_PRICE,
        PRICE_DIGITS,
        &mut errors,
        ("must be at least 100 EUR", "cannot exceed 1000000 EUR"),
    );
    let mileage = check_integer(
        CarField::Mileage,
        &draft.mileage,
        MIN_MILEAGE,
        MAX_MILEAGE,
        &mut errors,
        |_, max| ("cannot be negative".to_string(), format!("cannot exceed {} km", max)),
    );

    match (
        model,
        manufacturing_year,
        engine_volume,
        body_type,
        fuel_type,
        trunk_size,
        fuel_consumption,
        average_service_price,
        price,
        mileage,
    ) {
        (
            Some(model),
            Some(manufacturing_year),
            Some(engine_volume),
            Some(body_type),
            Some(fuel_type),
            Some(trunk_size),
            Some(fuel_consumption),
            Some(average_service_price),
            Some(price),
            Some(mileage),
        ) if errors.is_empty() => Ok(CarRecord {
            id: None,
            model,
            manufacturing_year: manufacturing_year as i32,
            engine_volume,
            body_type,
            fuel_type,
            trunk_size: trunk_size as i32,
            fuel_consumption,
            average_service_price,
            price,
            mileage: mileage as i32,
        }),
        _ => Err(errors),
    }
}

/// Checks an already-typed record against the same constraints as the form.
pub fn validate_record(record: &CarRecord) -> Result<(), ValidationErrors> {
    validate_car(&CarDraft::from_record(record)).map(|_| ())
}

fn required(field: CarField, raw: &str, errors: &mut ValidationErrors) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(field, format!("{} is required", field.subject()));
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn check_model(raw: &str, errors: &mut ValidationErrors) -> Option<String> {
    let model = required(CarField::Model, raw, errors)?;
    if model.chars().count() > MAX_MODEL_LENGTH {
        errors.push(
            CarField::Model,
            format!("Car model must be between 1 and {} characters", MAX_MODEL_LENGTH),
        );
        return None;
    }
    if let Some(pattern) = model_pattern() {
        if !pattern.is_match(&model) {
            errors.push(
                CarField::Model,
                "Car model can only contain letters, numbers, spaces, and hyphens".to_string(),
            );
            return None;
        }
    }
    Some(model)
}

fn check_integer<F>(
    field: CarField,
    raw: &str,
    min: i64,
    max: i64,
    errors: &mut ValidationErrors,
    messages: F,
) -> Option<i64>
where
    F: Fn(i64, i64) -> (String, String),
{
    let text = required(field, raw, errors)?;
    let Ok(value) = text.parse::<i64>() else {
        errors.push(field, format!("{} must be a whole number", field.subject()));
        return None;
    };
    let (too_low, too_high) = messages(min, max);
    if value < min {
        errors.push(field, format!("{} {}", field.subject(), too_low));
        return None;
    }
    if value > max {
        errors.push(field, format!("{} {}", field.subject(), too_high));
        return None;
    }
    Some(value)
}

fn check_decimal(
    field: CarField,
    raw: &str,
    min: f64,
    max: f64,
    (max_integer_digits, max_fraction_digits): (usize, usize),
    errors: &mut ValidationErrors,
    (too_low, too_high): (&str, &str),
) -> Option<f64> {
    let text = required(field, raw, errors)?;
    let parsed = decimal_digits(&text).and_then(|digits| {
        text.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| (v, digits))
    });
    let Some((value, (integer_digits, fraction_digits))) = parsed else {
        errors.push(field, format!("{} must be a number", field.subject()));
        return None;
    };
    if value < min {
        errors.push(field, format!("{} {}", field.subject(), too_low));
        return None;
    }
    if value > max {
        errors.push(field, format!("{} {}", field.subject(), too_high));
        return None;
    }
    if integer_digits > max_integer_digits || fraction_digits > max_fraction_digits {
        errors.push(
            field,
            format!(
                "{} must have at most {} digits before decimal and {} after",
                field.subject(),
                max_integer_digits,
                max_fraction_digits
            ),
        );
        return None;
    }
    Some(value)
}

/// Counts the significant integer digits and the fraction digits of a plain
/// decimal literal (`-12.50` is (2, 2)). Exponents and anything else that is
/// not `[+-]digits[.digits]` yield `None`.
fn decimal_digits(text: &str) -> Option<(usize, usize)> {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    if !all_digits(integer) || !all_digits(fraction) {
        return None;
    }
    Some((integer.trim_start_matches('0').len(), fraction.len()))
}

fn check_choice<T, P>(
    field: CarField,
    raw: &str,
    parse: P,
    errors: &mut ValidationErrors,
) -> Option<T>
where
    P: Fn(&str) -> Result<T, ComparcarError>,
{
    let text = required(field, raw, errors)?;
    match parse(&text) {
        Ok(value) => Some(value),
        Err(_) => {
            errors.push(field, format!("Unknown {} '{}'", field.subject().to_lowercase(), text));
            None
        }
    }
}

/// Cleans a model search: control characters are dropped, whitespace runs
/// collapse to one space and the ends are trimmed. A blank search means no
/// model constraint and yields `None`. Searches longer than the longest
/// storable model name are rejected.
pub fn validate_search(input: &str) -> Result<Option<String>, ComparcarError> {
    let cleaned = input
        .split_whitespace()
        .map(|word| word.chars().filter(|c| !c.is_control()).collect::<String>())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if cleaned.is_empty() {
        return Ok(None);
    }
    if cleaned.chars().count() > MAX_SEARCH_LENGTH {
        return Err(ComparcarError::InvalidInput(format!(
            "model search exceeds {} characters",
            MAX_SEARCH_LENGTH
        )));
    }
    Ok(Some(cleaned))
}

/// Normalizes free-form enum input: `station wagon`, `station-wagon` and
/// `STATION_WAGON` all become `STATION_WAGON`.
fn normalize_token(input: &str) -> String {
    input
        .trim()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c.to_ascii_uppercase() })
        .collect()
}

/// Validate a body type: case-insensitive, spaces or hyphens for underscores.
pub fn parse_body_type(input: &str) -> Result<BodyType, ComparcarError> {
    normalize_token(input).parse::<BodyType>().map_err(|_| {
        ComparcarError::InvalidInput(format!(
            "unknown body type '{}'. Valid values: {}",
            input,
            BodyType::ALL.map(|b| b.as_str()).join(", ")
        ))
    })
}

/// Validate a fuel type: case-insensitive, spaces or hyphens for underscores.
pub fn parse_fuel_type(input: &str) -> Result<FuelType, ComparcarError> {
    normalize_token(input).parse::<FuelType>().map_err(|_| {
        ComparcarError::InvalidInput(format!(
            "unknown fuel type '{}'. Valid values: {}",
            input,
            FuelType::ALL.map(|f| f.as_str()).join(", ")
        ))
    })
}

/// Validate a sort field name as the backend spells it, plus the short
/// aliases `year` and `service-price`.
pub fn parse_sort_by(input: &str) -> Result<CarSortBy, ComparcarError> {
    let trimmed = input.trim();
    let canonical = match trimmed {
        "year" => "manufacturingYear",
        "engine" => "engineVolume",
        "trunk" => "trunkSize",
        "consumption" => "fuelConsumption",
        "service-price" => "averageServicePrice",
        other => other,
    };
    canonical.parse::<CarSortBy>().map_err(|_| {
        ComparcarError::InvalidInput(format!(
            "unknown sort field '{}'. Valid values: id, model, year, engine, trunk, \
             consumption, service-price, price, mileage",
            input
        ))
    })
}

/// Validate a sort direction: `asc` or `desc`, case-insensitive.
pub fn parse_sort_direction(input: &str) -> Result<SortDirection, ComparcarError> {
    input.trim().parse::<SortDirection>().map_err(|_| {
        ComparcarError::InvalidInput(format!(
            "unknown sort direction '{}'. Valid values: asc, desc",
            input
        ))
    })
}
