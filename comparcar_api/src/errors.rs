//! Error types for the API client.

/// Errors that can occur when making API requests.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never produced a usable response (connection refused,
    /// timeout, or an unreadable body).
    #[error("Request failed")]
    RequestFailed,
    /// The backend answered 404 for the requested resource.
    #[error("Resource not found")]
    NotFound,
    /// The API returned a non-success status with a body snippet.
    #[error("Request failed with status {status}")]
    HttpStatus { status: u16, body: String },
    /// A success response whose body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    InvalidResponse(String),
}

impl Error {
    /// Returns `true` when the backend reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}
