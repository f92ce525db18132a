//! TrackListView component - the main window listing recorded tracks
//!
//! The view owns the list controller and forwards user events to it as
//! [`TrackListEvent`]s. Loads run on the [`TrackLoader`] and are polled back
//! on the UI thread.

mod render;
#[cfg(test)]
mod tests;

use std::path::{Path, PathBuf};
use std::time::Duration;

use gpui::{AsyncApp, Context, FocusHandle, ScrollHandle, Timer, WeakEntity};

use crate::core::AppSettings;
use crate::recording::{RecordingService, Tracker, TrackerHandle, nmea};
use crate::store::{SqliteTrackStore, StoreAddress, StoreError};
use crate::tracks::{Notice, TrackListController, TrackListEvent, TrackLoader};

type Controller = TrackListController<SqliteTrackStore, Option<TrackerHandle>>;

/// How often load results and recorder progress are polled
const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct TrackListView {
    pub(crate) controller: Controller,
    pub(crate) loader: TrackLoader<SqliteTrackStore>,
    /// Database file backing the store (the recorder opens its own connection)
    pub(crate) db_path: PathBuf,
    pub(crate) settings: AppSettings,
    /// Whether we've subscribed to appearance changes
    pub(crate) appearance_subscription_set: bool,
    pub(crate) scroll_handle: ScrollHandle,
    /// Focus handle for receiving actions (None in tests)
    pub(crate) focus_handle: Option<FocusHandle>,
    /// Whether we need to grab initial focus (for menu items to work)
    pub(crate) needs_initial_focus: bool,
    /// Informational message waiting to be shown
    pub(crate) pending_notice: Option<Notice>,
    /// Error message waiting to be shown
    pub(crate) pending_error: Option<String>,
}

impl TrackListView {
    pub fn new(
        store: SqliteTrackStore,
        db_path: PathBuf,
        settings: AppSettings,
        cx: &mut Context<Self>,
    ) -> Self {
        let mut view = Self::build(store, db_path, settings, Some(cx.focus_handle()));
        view.request_load();

        cx.on_release(|this, _cx| this.shutdown()).detach();
        Self::start_polling(cx);

        view
    }

    /// Create a view without a GPUI context
    #[cfg(test)]
    pub fn new_for_test(db_path: PathBuf) -> Result<Self, StoreError> {
        let store = Self::open_store(&db_path)?;
        let mut view = Self::build(store, db_path, AppSettings::default(), None);
        view.needs_initial_focus = false;
        Ok(view)
    }

    /// Open the track database, closing tracks a previous session left open
    pub fn open_store(db_path: &Path) -> Result<SqliteTrackStore, StoreError> {
        let store = SqliteTrackStore::open(db_path)?;
        store.close_stale_tracks()?;
        Ok(store)
    }

    fn build(
        store: SqliteTrackStore,
        db_path: PathBuf,
        settings: AppSettings,
        focus_handle: Option<FocusHandle>,
    ) -> Self {
        let address = StoreAddress::from_settings(&settings);
        let controller = TrackListController::new(store, None, address);

        let loader_path = db_path.clone();
        let loader = TrackLoader::new(move || SqliteTrackStore::open(&loader_path));

        Self {
            controller,
            loader,
            db_path,
            settings,
            appearance_subscription_set: false,
            scroll_handle: ScrollHandle::new(),
            focus_handle,
            needs_initial_focus: true,
            pending_notice: None,
            pending_error: None,
        }
    }

    /// Ask the loader for a fresh copy of the track list
    pub fn request_load(&mut self) {
        let ticket = self.controller.begin_load();
        self.loader.request(ticket);
    }

    /// Apply delivered load results. Returns true if the rows changed.
    pub fn poll_loader(&mut self) -> bool {
        let mut changed = false;
        for delivered in self.loader.poll() {
            match self.controller.finish_load(delivered.ticket, delivered.result) {
                Ok(applied) => changed |= applied,
                Err(e) => {
                    log::error!("Failed to load tracks: {}", e);
                    self.pending_error = Some(format!("Failed to load tracks: {}", e));
                    changed = true;
                }
            }
        }
        changed
    }

    /// Forward a view event to the controller
    pub fn apply_event(&mut self, event: TrackListEvent) {
        // Reloads go through the loader instead of blocking the UI thread
        if event == TrackListEvent::Reload {
            self.request_load();
            return;
        }
        // A pending snapshot may predate a visibility write
        let reload = event == TrackListEvent::DeleteSelected
            || (matches!(event, TrackListEvent::ToggleVisibility(_))
                && self.controller.has_pending_load());

        match self.controller.dispatch(event) {
            Ok(notices) => {
                if let Some(notice) = notices.first() {
                    self.pending_notice = Some(*notice);
                }
            }
            Err(e) => {
                log::error!("Track store request failed: {}", e);
                self.pending_error = Some(e.to_string());
            }
        }

        // Re-read the store rather than trust rows an older snapshot could overwrite
        if reload {
            self.request_load();
        }
    }

    pub fn handle_event(&mut self, event: TrackListEvent, cx: &mut Context<Self>) {
        self.apply_event(event);
        cx.notify();
    }

    pub fn is_recording(&self) -> bool {
        self.controller.recorder().is_running()
    }

    /// Start recording into a new track
    pub fn start_recording(&mut self) {
        if self.is_recording() {
            log::debug!("Recording already in progress");
            return;
        }

        let name = format!("Track {}", chrono::Local::now().format("%Y-%m-%d %H:%M"));
        match Tracker::start(&self.db_path, &name) {
            Ok(handle) => {
                if let Some(device) = &self.settings.gps_device
                    && let Err(e) = nmea::spawn_reader(Path::new(device), handle.clone())
                {
                    log::warn!("Could not open position source {}: {}", device, e);
                }
                self.controller.set_recorder(Some(handle));
                self.request_load();
            }
            Err(e) => {
                log::error!("Failed to start recording: {}", e);
                self.pending_error = Some(format!("Failed to start recording: {}", e));
            }
        }
    }

    pub fn stop_recording(&mut self) {
        if !self.is_recording() {
            return;
        }
        self.controller.recorder().stop();
        self.request_load();
    }

    /// Detach from the loader and stop the recorder
    pub fn shutdown(&mut self) {
        self.controller.detach();
        self.controller.recorder().stop();
    }

    /// Poll loader results and recorder progress until the view goes away
    fn start_polling(cx: &mut Context<Self>) {
        cx.spawn(|this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let mut async_cx = cx.clone();
            async move {
                loop {
                    Timer::after(POLL_INTERVAL).await;

                    let should_continue = this
                        .update(&mut async_cx, |this, cx| {
                            let changed = this.poll_loader();
                            if changed || this.is_recording() {
                                cx.notify();
                            }
                            !this.controller.is_detached()
                        })
                        .unwrap_or(false);

                    if !should_continue {
                        break;
                    }
                }
            }
        })
        .detach();
    }
}
