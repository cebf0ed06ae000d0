//! Reconciles backend-supplied enumeration tokens with the static client
//! enumerations.

use std::collections::HashSet;
use std::hash::Hash;
use std::str::FromStr;

use comparcar_api::types::{BodyType, FuelType};

/// Selection choices for the body and fuel type controls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReferenceData {
    pub body_types: Vec<BodyType>,
    pub fuel_types: Vec<FuelType>,
}

/// Maps backend tokens onto [`BodyType`], keeping backend order. Unknown and
/// repeated tokens are dropped.
pub fn reconcile_body_types(tokens: &[String]) -> Vec<BodyType> {
    reconcile(tokens, "body type")
}

/// Maps backend tokens onto [`FuelType`], keeping backend order. Unknown and
/// repeated tokens are dropped.
pub fn reconcile_fuel_types(tokens: &[String]) -> Vec<FuelType> {
    reconcile(tokens, "fuel type")
}

fn reconcile<T>(tokens: &[String], what: &str) -> Vec<T>
where
    T: FromStr + Copy + Eq + Hash,
{
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token.parse::<T>() {
            Ok(value) => {
                if seen.insert(value) {
                    out.push(value);
                }
            }
            Err(_) => tracing::warn!("Ignoring unknown {} token from backend: {}", what, token),
        }
    }
    out
}
