//! The car listing record exchanged with the `/cars` endpoints.

use serde::{Deserialize, Serialize};

use super::{BodyType, FuelType};

/// Backend-assigned numeric identifier for a car listing.
pub type CarID = i64;

/// One vehicle listing.
///
/// `id` is `None` until the backend has stored the record and is never sent
/// on creation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CarRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CarID>,

    /// Model name, e.g. "BMW X5".
    pub model: String,

    pub manufacturing_year: i32,

    /// Engine displacement in liters.
    pub engine_volume: f64,

    pub body_type: BodyType,

    pub fuel_type: FuelType,

    /// Trunk capacity in liters.
    pub trunk_size: i32,

    /// Liters per 100 km.
    pub fuel_consumption: f64,

    /// Average yearly service cost in EUR.
    pub average_service_price: f64,

    /// Asking price in EUR.
    pub price: f64,

    /// Odometer reading in km.
    pub mileage: i32,
}

impl CarRecord {
    /// Returns a copy with the identifier removed, as sent on creation.
    pub fn without_id(&self) -> CarRecord {
        CarRecord {
            id: None,
            ..self.clone()
        }
    }

    /// Returns a copy carrying `id`, as sent on update.
    pub fn with_id(&self, id: CarID) -> CarRecord {
        CarRecord {
            id: Some(id),
            ..self.clone()
        }
    }
}
