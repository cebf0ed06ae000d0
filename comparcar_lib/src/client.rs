//! Memoizing wrapper around the API client.

use std::future::Future;

use comparcar_api::types::{CarID, CarRecord, PageEnvelope};
use comparcar_api::{CarQuery, Client, Query};
use serde::{de::DeserializeOwned, Serialize};

use crate::cache::MemoryCache;
use crate::error::ComparcarError;
use crate::reference::{reconcile_body_types, reconcile_fuel_types, ReferenceData};
use crate::validation::validate_record;

const LIST_PREFIX: &str = "cars?";
const ALL_KEY: &str = "cars/all";
const BODY_TYPES_KEY: &str = "cars/body-types";
const FUEL_TYPES_KEY: &str = "cars/fuel-types";

/// API client wrapper that memoizes reads by request signature.
///
/// Reads are served from the cache while fresh. Successful mutations
/// invalidate every list query and the affected record, so the next read
/// goes to the backend. Failures are never cached and never retried.
pub struct CachedClient {
    inner: Client,
    cache: MemoryCache,
}

impl CachedClient {
    /// Creates a new cached client using the default API URL.
    pub fn new(cache: MemoryCache) -> Self {
        Self::from_client(Client::new(), cache)
    }

    /// Creates a new cached client with a custom base URL. Used for testing.
    pub fn with_base_url(base_url: &str, cache: MemoryCache) -> Self {
        Self::from_client(Client::with_base_url(base_url), cache)
    }

    pub fn from_client(inner: Client, cache: MemoryCache) -> Self {
        Self { inner, cache }
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    async fn cached<T, F, Fut>(&self, key: String, fetch: F) -> Result<T, ComparcarError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, comparcar_api::Error>>,
    {
        if let Some(cached) = self.cache.get(&key) {
            tracing::debug!("cache hit: {}", key);
            let value: T = serde_json::from_str(&cached)?;
            return Ok(value);
        }

        tracing::debug!("cache miss: {}", key);
        let value = fetch().await?;
        if let Ok(json) = serde_json::to_string(&value) {
            self.cache.set(key, json);
        }
        Ok(value)
    }

    /// Fetches one page of cars, returning cached results when available.
    pub async fn list_cars(
        &self,
        query: &CarQuery,
    ) -> Result<PageEnvelope<CarRecord>, ComparcarError> {
        let key = list_key(query);
        self.cached(key, || self.inner.list_cars(query)).await
    }

    /// Fetches every car, returning cached results when available.
    pub async fn list_all_cars(&self) -> Result<Vec<CarRecord>, ComparcarError> {
        self.cached(ALL_KEY.to_string(), || self.inner.list_all_cars())
            .await
    }

    /// Fetches a single car, returning cached results when available.
    pub async fn get_car(&self, id: CarID) -> Result<CarRecord, ComparcarError> {
        self.cached(car_key(id), || self.inner.get_car(id)).await
    }

    pub async fn list_body_types(&self) -> Result<Vec<String>, ComparcarError> {
        self.cached(BODY_TYPES_KEY.to_string(), || self.inner.list_body_types())
            .await
    }

    pub async fn list_fuel_types(&self) -> Result<Vec<String>, ComparcarError> {
        self.cached(FUEL_TYPES_KEY.to_string(), || self.inner.list_fuel_types())
            .await
    }

    /// Fetches both reference lists and maps them onto the client enumerations.
    ///
    /// A failed fetch yields an empty choice list for that control rather
    /// than an error.
    pub async fn reference_data(&self) -> ReferenceData {
        let body_types = match self.list_body_types().await {
            Ok(tokens) => reconcile_body_types(&tokens),
            Err(e) => {
                tracing::warn!("Body types unavailable: {}", e);
                Vec::new()
            }
        };
        let fuel_types = match self.list_fuel_types().await {
            Ok(tokens) => reconcile_fuel_types(&tokens),
            Err(e) => {
                tracing::warn!("Fuel types unavailable: {}", e);
                Vec::new()
            }
        };
        ReferenceData {
            body_types,
            fuel_types,
        }
    }

    /// Creates a car and invalidates cached list queries. A record that
    /// fails validation is rejected without a request.
    pub async fn create_car(&self, record: &CarRecord) -> Result<CarRecord, ComparcarError> {
        validate_record(record)?;
        let created = self.inner.create_car(record).await?;
        self.invalidate_lists();
        Ok(created)
    }

    /// Replaces car `id` and invalidates cached list queries and that record.
    pub async fn update_car(
        &self,
        id: CarID,
        record: &CarRecord,
    ) -> Result<CarRecord, ComparcarError> {
        validate_record(record)?;
        let updated = self.inner.update_car(id, record).await?;
        self.invalidate_car(id);
        Ok(updated)
    }

    /// Deletes car `id` and invalidates cached list queries and that record.
    pub async fn delete_car(&self, id: CarID) -> Result<(), ComparcarError> {
        self.inner.delete_car(id).await?;
        self.invalidate_car(id);
        Ok(())
    }

    /// Drops every cached list page and the unpaginated listing.
    pub fn invalidate_lists(&self) {
        let dropped = self.cache.invalidate_prefix(LIST_PREFIX);
        self.cache.remove(ALL_KEY);
        tracing::debug!("invalidated {} cached list pages", dropped);
    }

    fn invalidate_car(&self, id: CarID) {
        self.cache.remove(&car_key(id));
        self.invalidate_lists();
    }

    /// Removes all entries from the cache.
    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}

fn list_key(query: &CarQuery) -> String {
    format!("{}{}", LIST_PREFIX, query.query_string())
}

fn car_key(id: CarID) -> String {
    format!("cars/{}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_keys_follow_parameters() {
        let a = list_key(&CarQuery::default());
        assert_eq!(a, "cars?page=0&size=20&sortBy=id&sortDirection=ASC");
        let b = list_key(&CarQuery::default().with_model("Golf"));
        assert_ne!(a, b);
        assert!(b.starts_with(LIST_PREFIX));
    }

    #[tokio::test]
    async fn undecodable_cache_entry_is_a_serialization_error() {
        let cache = MemoryCache::new(std::time::Duration::from_secs(60));
        cache.set(ALL_KEY.to_string(), "{not json".to_string());
        // port 9 (discard) is never reached: the cached entry answers first
        let client = CachedClient::with_base_url("http://127.0.0.1:9/api", cache);

        let err = client.list_all_cars().await.unwrap_err();
        assert!(matches!(err, ComparcarError::Serialization(_)));
    }

    #[test]
    fn record_keys_do_not_collide_with_lists() {
        assert!(!car_key(1).starts_with(LIST_PREFIX));
        assert_ne!(car_key(1), ALL_KEY);
    }
}
