//! Track list controller
//!
//! Owns the rendered rows and the selection set, and turns user events into
//! record store requests. Everything here runs on the UI thread; queries that
//! may take time go through [`super::TrackLoader`] and come back through
//! [`TrackListController::finish_load`].

use crate::core::{TrackId, TrackRecord, TrackRow};
use crate::recording::RecordingService;
use crate::store::{IdFilter, StoreAddress, StoreError, TrackStore};

/// Column used for batched id filters
const FIELD_ID: &str = "id";

/// Events sent from the view to the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackListEvent {
    /// Eye icon clicked
    ToggleVisibility(TrackId),
    /// Checkbox set to a specific state
    SetSelected(TrackId, bool),
    /// Row body clicked
    ToggleSelected(TrackId),
    SelectAll,
    DeleteSelected,
    Reload,
}

/// Informational conditions for the user (not errors)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Delete requested with nothing selected
    NothingSelected,
    /// The recorder was running and had to be stopped before deleting
    UnclosedTrackDeleted,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::NothingSelected => "Nothing selected",
            Notice::UnclosedTrackDeleted => "Recording was stopped, the unclosed track was deleted",
        }
    }
}

/// Result of a bulk delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    NothingSelected,
    Deleted {
        /// Number of ids sent to the store
        requested: usize,
        /// Number of tracks the store reported as deleted
        deleted: usize,
        /// Whether a running recorder was stopped first
        interrupted_recording: bool,
    },
}

impl DeleteOutcome {
    pub fn notices(&self) -> Vec<Notice> {
        match self {
            DeleteOutcome::NothingSelected => vec![Notice::NothingSelected],
            DeleteOutcome::Deleted {
                interrupted_recording: true,
                ..
            } => vec![Notice::UnclosedTrackDeleted],
            DeleteOutcome::Deleted { .. } => Vec::new(),
        }
    }
}

/// Identifies one load request; only the latest one is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(pub u64);

pub struct TrackListController<S, R> {
    store: S,
    recorder: R,
    address: StoreAddress,
    /// Rows in store order, each carrying its own visible/selected state
    rows: Vec<TrackRow>,
    /// Selected ids in the order they were selected
    selected: Vec<TrackId>,
    /// Whether the view should show the empty-list message
    show_empty: bool,
    latest_ticket: u64,
    /// Last ticket whose result was delivered (applied or failed)
    settled_ticket: u64,
    detached: bool,
}

impl<S: TrackStore, R: RecordingService> TrackListController<S, R> {
    pub fn new(store: S, recorder: R, address: StoreAddress) -> Self {
        Self {
            store,
            recorder,
            address,
            rows: Vec::new(),
            selected: Vec::new(),
            show_empty: false,
            latest_ticket: 0,
            settled_ticket: 0,
            detached: false,
        }
    }

    /// Query the store synchronously and replace the rendered list
    pub fn load(&mut self) -> Result<(), StoreError> {
        // A synchronous load supersedes anything still in flight
        self.latest_ticket += 1;
        self.settled_ticket = self.latest_ticket;
        let records = self.store.query_tracks()?;
        self.replace_rows(records);
        Ok(())
    }

    /// Start an asynchronous load. Any earlier pending load becomes stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        LoadTicket(self.latest_ticket)
    }

    /// Deliver the result of an asynchronous load
    ///
    /// Returns `Ok(true)` when the rows were replaced and `Ok(false)` when the
    /// result was discarded because it was superseded or the controller was
    /// detached. Errors from a discarded load are dropped too.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<TrackRecord>, StoreError>,
    ) -> Result<bool, StoreError> {
        if self.detached {
            log::debug!("Discarding load {:?}: controller detached", ticket);
            return Ok(false);
        }
        if ticket.0 != self.latest_ticket {
            log::debug!(
                "Discarding load {:?}: superseded by {}",
                ticket,
                self.latest_ticket
            );
            return Ok(false);
        }

        self.settled_ticket = ticket.0;
        self.replace_rows(result?);
        Ok(true)
    }

    /// Whether the latest asynchronous load has not been delivered yet
    ///
    /// A snapshot still in flight may predate local writes, so callers
    /// re-request after writing.
    pub fn has_pending_load(&self) -> bool {
        !self.detached && self.settled_ticket != self.latest_ticket
    }

    /// Tear down; results delivered afterwards are ignored
    pub fn detach(&mut self) {
        self.detached = true;
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    fn replace_rows(&mut self, records: Vec<TrackRecord>) {
        self.selected
            .retain(|id| records.iter().any(|record| &record.id == id));

        self.rows = records
            .into_iter()
            .map(|record| {
                let selected = self.selected.contains(&record.id);
                TrackRow::from_record(record, selected)
            })
            .collect();
        self.show_empty = self.rows.is_empty();

        log::debug!(
            "Loaded {} tracks from {} ({} selected)",
            self.rows.len(),
            self.address,
            self.selected.len()
        );
    }

    fn row_mut(&mut self, id: &TrackId) -> Option<&mut TrackRow> {
        self.rows.iter_mut().find(|row| &row.id == id)
    }

    /// Flip the visible flag of one track, writing it through to the store
    ///
    /// Returns the new visibility, or `None` when the id is not in the list.
    pub fn toggle_visibility(&mut self, id: &TrackId) -> Result<Option<bool>, StoreError> {
        let Some(current) = self.row_mut(id).map(|row| row.visible) else {
            log::debug!("Ignoring visibility toggle for unknown track {}", id);
            return Ok(None);
        };

        let visible = !current;
        self.store.update_visible(id, visible)?;
        log::debug!("{} visible={}", self.address.record(id), visible);

        if let Some(row) = self.row_mut(id) {
            row.visible = visible;
        }
        Ok(Some(visible))
    }

    /// Add or remove a track from the selection set
    ///
    /// Returns false when the id is not in the list.
    pub fn set_selected(&mut self, id: &TrackId, selected: bool) -> bool {
        let Some(row) = self.row_mut(id) else {
            return false;
        };
        row.selected = selected;

        if selected {
            if !self.selected.contains(id) {
                self.selected.push(id.clone());
            }
        } else {
            self.selected.retain(|s| s != id);
        }
        true
    }

    /// Flip the selection of a track (row click)
    pub fn toggle_selected(&mut self, id: &TrackId) -> Option<bool> {
        let selected = !self.rows.iter().find(|row| &row.id == id)?.selected;
        self.set_selected(id, selected);
        Some(selected)
    }

    /// Select every rendered track
    pub fn select_all(&mut self) {
        for row in &mut self.rows {
            row.selected = true;
            if !self.selected.contains(&row.id) {
                self.selected.push(row.id.clone());
            }
        }
    }

    /// Delete all selected tracks in one store request
    ///
    /// A running recorder is stopped first since it may be writing into one
    /// of the selected tracks.
    pub fn delete_selected(&mut self) -> Result<DeleteOutcome, StoreError> {
        if self.selected.is_empty() {
            return Ok(DeleteOutcome::NothingSelected);
        }

        let interrupted_recording = self.recorder.is_running();
        if interrupted_recording {
            log::info!("Stopping recorder before deleting tracks");
            self.recorder.stop();
        }

        let filter = IdFilter::new(FIELD_ID, &self.selected)?;
        let deleted = self.store.delete(&filter)?;
        log::info!(
            "Deleted {} of {} selected tracks from {}",
            deleted,
            filter.len(),
            self.address
        );

        let removed = std::mem::take(&mut self.selected);
        self.rows.retain(|row| !removed.contains(&row.id));
        self.show_empty = self.rows.is_empty();

        Ok(DeleteOutcome::Deleted {
            requested: filter.len(),
            deleted,
            interrupted_recording,
        })
    }

    /// Apply a view event
    pub fn dispatch(&mut self, event: TrackListEvent) -> Result<Vec<Notice>, StoreError> {
        match event {
            TrackListEvent::ToggleVisibility(id) => {
                self.toggle_visibility(&id)?;
            }
            TrackListEvent::SetSelected(id, selected) => {
                self.set_selected(&id, selected);
            }
            TrackListEvent::ToggleSelected(id) => {
                self.toggle_selected(&id);
            }
            TrackListEvent::SelectAll => self.select_all(),
            TrackListEvent::DeleteSelected => return Ok(self.delete_selected()?.notices()),
            TrackListEvent::Reload => self.load()?,
        }
        Ok(Vec::new())
    }

    pub fn rows(&self) -> &[TrackRow] {
        &self.rows
    }

    pub fn selected_ids(&self) -> &[TrackId] {
        &self.selected
    }

    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty_state(&self) -> bool {
        self.show_empty
    }

    pub fn address(&self) -> &StoreAddress {
        &self.address
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn recorder(&self) -> &R {
        &self.recorder
    }

    pub fn set_recorder(&mut self, recorder: R) {
        self.recorder = recorder;
    }
}
