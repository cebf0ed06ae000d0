//! Closed categorical fields of a car listing. Serialized as the
//! SCREAMING_SNAKE_CASE tokens the backend uses.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A token that is not a member of the enumeration it was parsed into.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown token '{0}'")]
pub struct UnknownToken(pub String);

/// Vehicle body style.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BodyType {
    Sedan,
    Hatchback,
    StationWagon,
    Crossover,
    Suv,
    Coupe,
    Convertible,
    Minivan,
    Pickup,
    Van,
    Wagon,
    Liftback,
    Fastback,
    ShootingBrake,
    Microcar,
    Limousine,
    Roadster,
    Targa,
    Hardtop,
    Other,
}

impl BodyType {
    /// Every body type, in declaration order.
    pub const ALL: [BodyType; 20] = [
        BodyType::Sedan,
        BodyType::Hatchback,
        BodyType::StationWagon,
        BodyType::Crossover,
        BodyType::Suv,
        BodyType::Coupe,
        BodyType::Convertible,
        BodyType::Minivan,
        BodyType::Pickup,
        BodyType::Van,
        BodyType::Wagon,
        BodyType::Liftback,
        BodyType::Fastback,
        BodyType::ShootingBrake,
        BodyType::Microcar,
        BodyType::Limousine,
        BodyType::Roadster,
        BodyType::Targa,
        BodyType::Hardtop,
        BodyType::Other,
    ];

    /// The wire token, e.g. `STATION_WAGON`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyType::Sedan => "SEDAN",
            BodyType::Hatchback => "HATCHBACK",
            BodyType::StationWagon => "STATION_WAGON",
            BodyType::Crossover => "CROSSOVER",
            BodyType::Suv => "SUV",
            BodyType::Coupe => "COUPE",
            BodyType::Convertible => "CONVERTIBLE",
            BodyType::Minivan => "MINIVAN",
            BodyType::Pickup => "PICKUP",
            BodyType::Van => "VAN",
            BodyType::Wagon => "WAGON",
            BodyType::Liftback => "LIFTBACK",
            BodyType::Fastback => "FASTBACK",
            BodyType::ShootingBrake => "SHOOTING_BRAKE",
            BodyType::Microcar => "MICROCAR",
            BodyType::Limousine => "LIMOUSINE",
            BodyType::Roadster => "ROADSTER",
            BodyType::Targa => "TARGA",
            BodyType::Hardtop => "HARDTOP",
            BodyType::Other => "OTHER",
        }
    }

    /// Human-readable form shown in tables and selection lists.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl std::fmt::Display for BodyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BodyType::ALL
            .iter()
            .copied()
            .find(|b| b.as_str() == s)
            .ok_or_else(|| UnknownToken(s.to_string()))
    }
}

/// Fuel or energy source.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Hybrid,
    Electric,
    PlugInHybrid,
    Hydrogen,
    Lpg,
    Cng,
    Ethanol,
    Biodiesel,
    Other,
}

impl FuelType {
    /// Every fuel type, in declaration order.
    pub const ALL: [FuelType; 11] = [
        FuelType::Gasoline,
        FuelType::Diesel,
        FuelType::Hybrid,
        FuelType::Electric,
        FuelType::PlugInHybrid,
        FuelType::Hydrogen,
        FuelType::Lpg,
        FuelType::Cng,
        FuelType::Ethanol,
        FuelType::Biodiesel,
        FuelType::Other,
    ];

    /// The wire token, e.g. `PLUG_IN_HYBRID`.
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "GASOLINE",
            FuelType::Diesel => "DIESEL",
            FuelType::Hybrid => "HYBRID",
            FuelType::Electric => "ELECTRIC",
            FuelType::PlugInHybrid => "PLUG_IN_HYBRID",
            FuelType::Hydrogen => "HYDROGEN",
            FuelType::Lpg => "LPG",
            FuelType::Cng => "CNG",
            FuelType::Ethanol => "ETHANOL",
            FuelType::Biodiesel => "BIODIESEL",
            FuelType::Other => "OTHER",
        }
    }

    /// Human-readable form shown in tables and selection lists.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FuelType {
    type Err = UnknownToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelType::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownToken(s.to_string()))
    }
}
