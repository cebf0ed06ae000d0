//! Library layer for the car catalog front end: memoizing API client,
//! validation, formatting, and the list and form view controllers.
//!
//! Wraps the `comparcar_api` crate with an in-memory TTL cache that is
//! invalidated by mutations, plus request sequencing for list queries.

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod form_view;
pub mod format;
pub mod list_view;
pub mod notice;
pub mod reference;
pub mod sequence;
pub mod validation;

pub use comparcar_api;
pub use comparcar_api::types;
pub use comparcar_api::{CarQuery, CarSortBy, Query, RangeFilter, SortDirection};

pub use client::CachedClient;
pub use config::Config;
pub use error::ComparcarError;
pub use form_view::{FormMode, FormPhase, FormView, Navigation, SubmitOutcome};
pub use list_view::{CarRow, ListView};
pub use notice::{Notice, NoticeLevel};
pub use reference::ReferenceData;
pub use validation::{CarDraft, CarField, ValidationErrors};
