//! State controller for the create/edit car form.

use comparcar_api::types::{BodyType, CarID, CarRecord, FuelType};

use crate::client::CachedClient;
use crate::error::ComparcarError;
use crate::notice::Notice;
use crate::reference::ReferenceData;
use crate::sequence::{QueryKind, RequestSequencer, Ticket};
use crate::validation::{self, validate_car, CarDraft, CarField, ValidationErrors};

/// Whether the form creates a new car or edits an existing one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(CarID),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormPhase {
    /// Waiting for the record being edited.
    Loading,
    /// Fields are editable.
    Ready,
    /// The record being edited could not be fetched. The user may
    /// [`FormView::retry`] or go back to the list.
    LoadFailed(Notice),
    /// A create/update request is in flight; submit is disabled.
    Submitting,
}

/// Where the driver should go after an action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Stay,
    List,
}

/// Result of [`FormView::submit`].
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent. Messages are on [`FormView::errors`].
    Invalid,
    /// A submission is already in flight, or the form has not loaded.
    Busy,
    /// The backend accepted the record.
    Saved { record: CarRecord, notice: Notice },
    /// The backend or network rejected the request. Fields are kept.
    Failed(Notice),
}

impl SubmitOutcome {
    pub fn navigation(&self) -> Navigation {
        match self {
            SubmitOutcome::Saved { .. } => Navigation::List,
            _ => Navigation::Stay,
        }
    }
}

pub struct FormView {
    mode: FormMode,
    draft: CarDraft,
    phase: FormPhase,
    errors: ValidationErrors,
    reference: ReferenceData,
    sequencer: RequestSequencer,
}

impl FormView {
    /// An empty form for a new car.
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            draft: CarDraft::default(),
            phase: FormPhase::Ready,
            errors: ValidationErrors::default(),
            reference: ReferenceData::default(),
            sequencer: RequestSequencer::new(),
        }
    }

    /// A form for car `id`. Fields stay unavailable until [`FormView::load`] succeeds.
    pub fn edit(id: CarID) -> Self {
        Self {
            mode: FormMode::Edit(id),
            phase: FormPhase::Loading,
            ..Self::create()
        }
    }

    /// Picks the mode from an optional route identifier.
    pub fn for_target(id: Option<CarID>) -> Self {
        match id {
            Some(id) => Self::edit(id),
            None => Self::create(),
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add New Car",
            FormMode::Edit(_) => "Edit Car",
        }
    }

    pub fn draft(&self) -> &CarDraft {
        &self.draft
    }

    pub fn phase(&self) -> &FormPhase {
        &self.phase
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn body_types(&self) -> &[BodyType] {
        &self.reference.body_types
    }

    pub fn fuel_types(&self) -> &[FuelType] {
        &self.reference.fuel_types
    }

    pub fn year_options(&self) -> Vec<i32> {
        validation::year_options()
    }

    pub fn can_submit(&self) -> bool {
        self.phase == FormPhase::Ready
    }

    /// Fetches selection choices and, when editing, the record itself.
    pub async fn load(&mut self, client: &CachedClient) {
        self.reference = client.reference_data().await;

        let Some((ticket, id)) = self.begin_load() else {
            return;
        };
        let result = client.get_car(id).await;
        self.complete_load(ticket, result);
    }

    /// Enters [`FormPhase::Loading`] and tags the record fetch. Returns `None`
    /// in create mode, where there is nothing to fetch and the form is ready.
    pub fn begin_load(&mut self) -> Option<(Ticket, CarID)> {
        let FormMode::Edit(id) = self.mode else {
            self.phase = FormPhase::Ready;
            return None;
        };
        self.phase = FormPhase::Loading;
        Some((self.sequencer.issue(QueryKind::CarDetail), id))
    }

    /// Applies a record fetch if `ticket` is still the newest one.
    /// Returns whether the response was applied.
    pub fn complete_load(
        &mut self,
        ticket: Ticket,
        result: Result<CarRecord, ComparcarError>,
    ) -> bool {
        if !self.sequencer.is_latest(&ticket) {
            tracing::debug!("Discarding stale car load #{}", ticket.seq);
            return false;
        }
        match result {
            Ok(car) => {
                self.draft = CarDraft::from_record(&car);
                self.errors = ValidationErrors::default();
                self.phase = FormPhase::Ready;
            }
            Err(e) => {
                tracing::error!("Failed to load car: {}", e);
                self.phase = FormPhase::LoadFailed(Notice::car_load_failed());
            }
        }
        true
    }

    /// Loads again after a failed load. Does nothing in any other phase.
    pub async fn retry(&mut self, client: &CachedClient) {
        if matches!(self.phase, FormPhase::LoadFailed(_)) {
            self.load(client).await;
        }
    }

    /// Leaves the form without saving.
    pub fn back(&self) -> Navigation {
        Navigation::List
    }

    /// Replaces one input and clears its error message.
    pub fn set_field(&mut self, field: CarField, value: &str) {
        self.draft.set(field, value);
        self.errors.remove(field);
    }

    /// Validates every field, keeping the messages for display.
    pub fn validate(&mut self) -> Option<CarRecord> {
        match validate_car(&self.draft) {
            Ok(record) => {
                self.errors = ValidationErrors::default();
                Some(record)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Validates and enters [`FormPhase::Submitting`]. `Err` carries the
    /// outcome when nothing should be sent.
    pub fn begin_submit(&mut self) -> Result<CarRecord, SubmitOutcome> {
        if !self.can_submit() {
            return Err(SubmitOutcome::Busy);
        }
        let record = self.validate().ok_or(SubmitOutcome::Invalid)?;
        self.phase = FormPhase::Submitting;
        Ok(record)
    }

    /// Leaves [`FormPhase::Submitting`] with the backend's answer.
    pub fn finish_submit(&mut self, result: Result<CarRecord, ComparcarError>) -> SubmitOutcome {
        self.phase = FormPhase::Ready;
        match (self.mode, result) {
            (FormMode::Create, Ok(record)) => {
                tracing::info!("Created car {:?}", record.id);
                SubmitOutcome::Saved {
                    record,
                    notice: Notice::car_created(),
                }
            }
            (FormMode::Edit(id), Ok(record)) => {
                tracing::info!("Updated car {}", id);
                SubmitOutcome::Saved {
                    record,
                    notice: Notice::car_updated(),
                }
            }
            (FormMode::Create, Err(e)) => {
                tracing::error!("Failed to create car: {}", e);
                SubmitOutcome::Failed(Notice::create_failed())
            }
            (FormMode::Edit(id), Err(e)) => {
                tracing::error!("Failed to update car {}: {}", id, e);
                SubmitOutcome::Failed(Notice::update_failed())
            }
        }
    }

    /// Validates, then creates or updates. Invalid drafts never reach the client.
    pub async fn submit(&mut self, client: &CachedClient) -> SubmitOutcome {
        let record = match self.begin_submit() {
            Ok(record) => record,
            Err(outcome) => return outcome,
        };
        let result = match self.mode {
            FormMode::Create => client.create_car(&record).await,
            FormMode::Edit(id) => client.update_car(id, &record).await,
        };
        self.finish_submit(result)
    }
}
