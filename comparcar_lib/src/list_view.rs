//! State controller for the filterable, paginated car list.
//!
//! The view owns the current [`CarQuery`]. State-changing methods are
//! synchronous and report whether the query changed; the driver then calls
//! [`ListView::refresh`] to fetch the matching page. Responses are sequenced,
//! so a slow response to a superseded query can never overwrite a newer one.

use comparcar_api::types::{BodyType, CarID, CarRecord, FuelType, PageEnvelope};
use comparcar_api::CarQuery;
use serde::Serialize;

use crate::client::CachedClient;
use crate::error::ComparcarError;
use crate::format::{format_engine, format_mileage, format_price};
use crate::notice::Notice;
use crate::reference::ReferenceData;
use crate::sequence::{QueryKind, RequestSequencer, Ticket};

/// Prompt shown before a car is deleted.
pub const DELETE_PROMPT: &str = "Are you sure you want to delete this car?";

/// One rendered table row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CarRow {
    pub id: Option<CarID>,
    pub model: String,
    pub year: i32,
    pub engine: String,
    pub body: String,
    pub fuel: String,
    pub price: String,
    pub mileage: String,
}

impl CarRow {
    pub fn from_record(car: &CarRecord) -> Self {
        Self {
            id: car.id,
            model: car.model.clone(),
            year: car.manufacturing_year,
            engine: format_engine(car.engine_volume),
            body: car.body_type.label(),
            fuel: car.fuel_type.label(),
            price: format_price(car.price),
            mileage: format_mileage(car.mileage),
        }
    }
}

pub struct ListView {
    criteria: CarQuery,
    show_filters: bool,
    page: Option<PageEnvelope<CarRecord>>,
    loading: bool,
    error: Option<Notice>,
    reference: Option<ReferenceData>,
    sequencer: RequestSequencer,
}

impl Default for ListView {
    fn default() -> Self {
        Self::new()
    }
}

impl ListView {
    /// A list showing page 0, 20 per page, sorted by id ascending.
    pub fn new() -> Self {
        Self::with_criteria(CarQuery::default())
    }

    pub fn with_criteria(criteria: CarQuery) -> Self {
        Self {
            criteria,
            show_filters: false,
            page: None,
            loading: false,
            error: None,
            reference: None,
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn criteria(&self) -> &CarQuery {
        &self.criteria
    }

    pub fn show_filters(&self) -> bool {
        self.show_filters
    }

    /// The most recently applied page, kept across failed refreshes.
    pub fn page(&self) -> Option<&PageEnvelope<CarRecord>> {
        self.page.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// The notice from the last failed refresh, cleared by a successful one.
    pub fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    pub fn body_types(&self) -> &[BodyType] {
        self.reference
            .as_ref()
            .map(|r| r.body_types.as_slice())
            .unwrap_or(&[])
    }

    pub fn fuel_types(&self) -> &[FuelType] {
        self.reference
            .as_ref()
            .map(|r| r.fuel_types.as_slice())
            .unwrap_or(&[])
    }

    /// Loads reference data (once) and the first page.
    pub async fn mount(&mut self, client: &CachedClient) -> bool {
        self.load_reference_data(client).await;
        self.refresh(client).await
    }

    /// Fetches the filter dropdown choices. Later calls reuse the first result.
    pub async fn load_reference_data(&mut self, client: &CachedClient) {
        if self.reference.is_none() {
            self.reference = Some(client.reference_data().await);
        }
    }

    /// Marks the view as loading and tags a snapshot of the current query.
    pub fn begin_refresh(&mut self) -> (Ticket, CarQuery) {
        self.loading = true;
        (
            self.sequencer.issue(QueryKind::CarList),
            self.criteria.clone(),
        )
    }

    /// Applies a response if `ticket` is still the newest list request.
    /// Returns whether the response was applied.
    ///
    /// A failure keeps the previously rendered page and records a notice.
    pub fn complete_refresh(
        &mut self,
        ticket: Ticket,
        result: Result<PageEnvelope<CarRecord>, ComparcarError>,
    ) -> bool {
        if !self.sequencer.is_latest(&ticket) {
            tracing::debug!("Discarding stale car list response #{}", ticket.seq);
            return false;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.page = Some(page);
                self.error = None;
            }
            Err(e) => {
                tracing::error!("Failed to load cars: {}", e);
                self.error = Some(Notice::list_failed());
            }
        }
        true
    }

    /// Fetches the page for the current query.
    pub async fn refresh(&mut self, client: &CachedClient) -> bool {
        let (ticket, query) = self.begin_refresh();
        let result = client.list_cars(&query).await;
        self.complete_refresh(ticket, result)
    }

    /// Applies a filter edit. Any edit sends the list back to page 0.
    /// Returns whether the query changed.
    pub fn update_filters<F>(&mut self, edit: F) -> bool
    where
        F: FnOnce(&mut CarQuery),
    {
        let before = self.criteria.clone();
        edit(&mut self.criteria);
        self.criteria.common.page = 0;
        self.criteria != before
    }

    /// Resets every filter, pagination and sort to the defaults.
    pub fn clear_filters(&mut self) -> bool {
        let changed = self.criteria != CarQuery::default();
        self.criteria = CarQuery::default();
        changed
    }

    /// Shows or hides the filter panel. Returns the new visibility.
    pub fn toggle_filters(&mut self) -> bool {
        self.show_filters = !self.show_filters;
        self.show_filters
    }

    pub fn can_go_next(&self) -> bool {
        self.page.as_ref().and_then(|p| p.next_page()).is_some()
    }

    pub fn can_go_previous(&self) -> bool {
        self.page.as_ref().and_then(|p| p.previous_page()).is_some()
    }

    /// Moves to the following page unless the current one is the last.
    pub fn next_page(&mut self) -> bool {
        match self.page.as_ref().and_then(|p| p.next_page()) {
            Some(next) => {
                self.criteria.common.page = next;
                true
            }
            None => false,
        }
    }

    /// Moves to the preceding page unless the current one is the first.
    pub fn previous_page(&mut self) -> bool {
        match self.page.as_ref().and_then(|p| p.previous_page()) {
            Some(previous) => {
                self.criteria.common.page = previous;
                true
            }
            None => false,
        }
    }

    /// Deletes car `id` after `confirm` approves [`DELETE_PROMPT`].
    ///
    /// Returns `None` when the user declines. On success the current query is
    /// fetched again; on failure the rendered page is left as it was.
    pub async fn delete_car<C>(
        &mut self,
        client: &CachedClient,
        id: CarID,
        confirm: C,
    ) -> Option<Notice>
    where
        C: FnOnce(&str) -> bool,
    {
        if !confirm(DELETE_PROMPT) {
            return None;
        }
        match client.delete_car(id).await {
            Ok(()) => {
                tracing::info!("Deleted car {}", id);
                self.refresh(client).await;
                Some(Notice::car_deleted())
            }
            Err(e) => {
                tracing::error!("Failed to delete car {}: {}", id, e);
                Some(Notice::delete_failed())
            }
        }
    }

    /// Table rows for the current page.
    pub fn rows(&self) -> Vec<CarRow> {
        self.page
            .as_ref()
            .map(|p| p.content.iter().map(CarRow::from_record).collect())
            .unwrap_or_default()
    }

    /// "Showing X to Y of Z results" for the current page.
    pub fn summary(&self) -> Option<String> {
        let page = self.page.as_ref()?;
        Some(format!(
            "Showing {} to {} of {} results",
            page.range_start(),
            page.range_end(),
            page.total_elements
        ))
    }
}
