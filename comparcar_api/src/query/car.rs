use std::str::FromStr;

use url::Url;

use crate::types::{BodyType, FuelType};

use super::{common::QueryCommon, Query};

/// Inclusive lower/upper bounds on a numeric field. An unset bound imposes
/// no constraint.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RangeFilter<T> {
    pub from: Option<T>,
    pub to: Option<T>,
}

impl<T: std::fmt::Display> RangeFilter<T> {
    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Appends `{name}From` / `{name}To` for whichever bounds are set.
    fn append_to(&self, url: &mut Url, name: &str) {
        if let Some(from) = &self.from {
            url.query_pairs_mut()
                .append_pair(&format!("{}From", name), &from.to_string());
        }
        if let Some(to) = &self.to {
            url.query_pairs_mut()
                .append_pair(&format!("{}To", name), &to.to_string());
        }
    }
}

/// Filter, pagination and sort parameters for `GET /cars`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CarQuery {
    pub common: QueryCommon,
    /// Case-insensitive substring match on the model name.
    pub model: Option<String>,
    pub manufacturing_year: RangeFilter<i32>,
    pub engine_volume: RangeFilter<f64>,
    pub body_type: Option<BodyType>,
    pub fuel_type: Option<FuelType>,
    pub trunk_size: RangeFilter<i32>,
    pub fuel_consumption: RangeFilter<f64>,
    pub average_service_price: RangeFilter<f64>,
    pub price: RangeFilter<f64>,
    pub mileage: RangeFilter<i32>,
    pub sort_by: CarSortBy,
}

impl Query for CarQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(model) = &self.model {
            let model = model.trim();
            if !model.is_empty() {
                url.query_pairs_mut().append_pair("model", model);
            }
        }
        self.manufacturing_year
            .append_to(&mut url, "manufacturingYear");
        self.engine_volume.append_to(&mut url, "engineVolume");
        if let Some(body_type) = &self.body_type {
            url.query_pairs_mut()
                .append_pair("bodyType", body_type.as_str());
        }
        if let Some(fuel_type) = &self.fuel_type {
            url.query_pairs_mut()
                .append_pair("fuelType", fuel_type.as_str());
        }
        self.trunk_size.append_to(&mut url, "trunkSize");
        self.fuel_consumption.append_to(&mut url, "fuelConsumption");
        self.average_service_price
            .append_to(&mut url, "averageServicePrice");
        self.price.append_to(&mut url, "price");
        self.mileage.append_to(&mut url, "mileage");

        let mut url = self.common.add_to_url(&url);
        url.query_pairs_mut()
            .append_pair("sortBy", &self.sort_by.to_string())
            .append_pair("sortDirection", &self.common.sort_direction.to_string());
        url
    }
}

impl CarQuery {
    /// Returns `true` when no filter field is set. Pagination and sort are
    /// not filters.
    pub fn has_no_filters(&self) -> bool {
        self.model.as_deref().map_or(true, |m| m.trim().is_empty())
            && self.manufacturing_year.is_unbounded()
            && self.engine_volume.is_unbounded()
            && self.body_type.is_none()
            && self.fuel_type.is_none()
            && self.trunk_size.is_unbounded()
            && self.fuel_consumption.is_unbounded()
            && self.average_service_price.is_unbounded()
            && self.price.is_unbounded()
            && self.mileage.is_unbounded()
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    pub fn with_manufacturing_year_from(mut self, year: i32) -> Self {
        self.manufacturing_year.from = Some(year);
        self
    }
    pub fn with_manufacturing_year_to(mut self, year: i32) -> Self {
        self.manufacturing_year.to = Some(year);
        self
    }

    pub fn with_engine_volume_from(mut self, liters: f64) -> Self {
        self.engine_volume.from = Some(liters);
        self
    }
    pub fn with_engine_volume_to(mut self, liters: f64) -> Self {
        self.engine_volume.to = Some(liters);
        self
    }

    pub fn with_body_type(mut self, body_type: BodyType) -> Self {
        self.body_type = Some(body_type);
        self
    }

    pub fn with_fuel_type(mut self, fuel_type: FuelType) -> Self {
        self.fuel_type = Some(fuel_type);
        self
    }

    pub fn with_trunk_size_from(mut self, liters: i32) -> Self {
        self.trunk_size.from = Some(liters);
        self
    }
    pub fn with_trunk_size_to(mut self, liters: i32) -> Self {
        self.trunk_size.to = Some(liters);
        self
    }

    pub fn with_fuel_consumption_from(mut self, per_100km: f64) -> Self {
        self.fuel_consumption.from = Some(per_100km);
        self
    }
    pub fn with_fuel_consumption_to(mut self, per_100km: f64) -> Self {
        self.fuel_consumption.to = Some(per_100km);
        self
    }

    pub fn with_average_service_price_from(mut self, eur: f64) -> Self {
        self.average_service_price.from = Some(eur);
        self
    }
    pub fn with_average_service_price_to(mut self, eur: f64) -> Self {
        self.average_service_price.to = Some(eur);
        self
    }

    pub fn with_price_from(mut self, eur: f64) -> Self {
        self.price.from = Some(eur);
        self
    }
    pub fn with_price_to(mut self, eur: f64) -> Self {
        self.price.to = Some(eur);
        self
    }

    pub fn with_mileage_from(mut self, km: i32) -> Self {
        self.mileage.from = Some(km);
        self
    }
    pub fn with_mileage_to(mut self, km: i32) -> Self {
        self.mileage.to = Some(km);
        self
    }

    pub fn with_sort_by(mut self, sort_by: CarSortBy) -> Self {
        self.sort_by = sort_by;
        self
    }
}

/// Field the backend orders results by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CarSortBy {
    #[default]
    Id,
    Model,
    ManufacturingYear,
    EngineVolume,
    TrunkSize,
    FuelConsumption,
    AverageServicePrice,
    Price,
    Mileage,
}

impl std::fmt::Display for CarSortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                CarSortBy::Id => "id",
                CarSortBy::Model => "model",
                CarSortBy::ManufacturingYear => "manufacturingYear",
                CarSortBy::EngineVolume => "engineVolume",
                CarSortBy::TrunkSize => "trunkSize",
                CarSortBy::FuelConsumption => "fuelConsumption",
                CarSortBy::AverageServicePrice => "averageServicePrice",
                CarSortBy::Price => "price",
                CarSortBy::Mileage => "mileage",
            }
        )?;
        Ok(())
    }
}

impl FromStr for CarSortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(CarSortBy::Id),
            "model" => Ok(CarSortBy::Model),
            "manufacturingYear" => Ok(CarSortBy::ManufacturingYear),
            "engineVolume" => Ok(CarSortBy::EngineVolume),
            "trunkSize" => Ok(CarSortBy::TrunkSize),
            "fuelConsumption" => Ok(CarSortBy::FuelConsumption),
            "averageServicePrice" => Ok(CarSortBy::AverageServicePrice),
            "price" => Ok(CarSortBy::Price),
            "mileage" => Ok(CarSortBy::Mileage),
            _ => Err(()),
        }
    }
}
