//! HTTP client for the car catalog REST API.

use std::time::Duration;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{CarQuery, Query},
    types::{CarID, CarRecord, PageEnvelope},
    Error,
};

/// HTTP client for the car catalog REST API.
///
/// Every method maps to exactly one request. Failures are returned to the
/// caller as-is: there is no retry, backoff or caching at this layer.
pub struct Client {
    /// Base URL including the `/api` prefix. Defaults to `http://localhost:8080/api`.
    base_api_url: String,
    http: reqwest::Client,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8080/api";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a new client pointing at a locally running backend.
    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            http: build_http_client(Self::DEFAULT_TIMEOUT),
        }
    }

    /// Replaces the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = build_http_client(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url<Q: Query>(&self, path: &str, query: Option<&Q>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("accept", "application/json, text/plain, */*")
    }

    /// Sends the request and returns the raw body of a success response.
    async fn execute(&self, request: RequestBuilder) -> Result<String, Error> {
        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to reach backend: {}", e);
            Error::RequestFailed
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;

        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::error!("Resource not found: {}", truncate_body(&body));
            return Err(Error::NotFound);
        }
        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }
        Ok(body)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let body = self.execute(request).await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::InvalidResponse(e.to_string())
        })
    }

    /// Fetches one page of cars matching the given filters.
    pub async fn list_cars(&self, query: &CarQuery) -> Result<PageEnvelope<CarRecord>, Error> {
        let url = self.get_url("/cars", Some(query))?;
        self.fetch(self.request(Method::GET, url)).await
    }

    /// Fetches every car without pagination.
    pub async fn list_all_cars(&self) -> Result<Vec<CarRecord>, Error> {
        let url = self.get_url::<CarQuery>("/cars/all", None)?;
        self.fetch(self.request(Method::GET, url)).await
    }

    /// Fetches a single car by its identifier.
    pub async fn get_car(&self, id: CarID) -> Result<CarRecord, Error> {
        let url = self.get_url::<CarQuery>(format!("/cars/{}", id).as_str(), None)?;
        self.fetch(self.request(Method::GET, url)).await
    }

    /// Creates a car. Any identifier on `record` is stripped before sending;
    /// the returned record carries the backend-assigned one.
    pub async fn create_car(&self, record: &CarRecord) -> Result<CarRecord, Error> {
        let url = self.get_url::<CarQuery>("/cars", None)?;
        let body = record.without_id();
        self.fetch(self.request(Method::POST, url).json(&body)).await
    }

    /// Replaces every field of car `id`. The payload identifier is forced to
    /// match the path.
    pub async fn update_car(&self, id: CarID, record: &CarRecord) -> Result<CarRecord, Error> {
        let url = self.get_url::<CarQuery>(format!("/cars/{}", id).as_str(), None)?;
        let body = record.with_id(id);
        self.fetch(self.request(Method::PUT, url).json(&body)).await
    }

    /// Deletes car `id`. A missing identifier surfaces as [`Error::NotFound`].
    pub async fn delete_car(&self, id: CarID) -> Result<(), Error> {
        let url = self.get_url::<CarQuery>(format!("/cars/{}", id).as_str(), None)?;
        self.execute(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    /// Fetches the body type tokens the backend accepts.
    pub async fn list_body_types(&self) -> Result<Vec<String>, Error> {
        let url = self.get_url::<CarQuery>("/cars/body-types", None)?;
        self.fetch(self.request(Method::GET, url)).await
    }

    /// Fetches the fuel type tokens the backend accepts.
    pub async fn list_fuel_types(&self) -> Result<Vec<String>, Error> {
        let url = self.get_url::<CarQuery>("/cars/fuel-types", None)?;
        self.fetch(self.request(Method::GET, url)).await
    }
}

fn build_http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            tracing::error!("Failed to build HTTP client, using defaults: {}", e);
            reqwest::Client::new()
        })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
