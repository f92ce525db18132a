//! Thread-backed track recorder
//!
//! `Tracker::start` opens a new track and spawns a worker that owns its own
//! store connection. Fixes are sent to the worker over a channel; stopping
//! closes the track and joins the worker.

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, mpsc};
use std::thread::{self, JoinHandle};

use super::RecordingService;
use crate::core::{Fix, TrackId};
use crate::store::{SqliteTrackStore, StoreError};

enum TrackerCommand {
    Record(Fix),
    Stop,
}

/// Shared recorder state (for the UI to read)
struct TrackerState {
    running: AtomicBool,
    points: AtomicUsize,
    last_fix: Mutex<Option<Fix>>,
}

pub struct Tracker;

impl Tracker {
    /// Create a new track in the database at `db_path` and start recording into it
    pub fn start(db_path: &Path, name: &str) -> Result<TrackerHandle, StoreError> {
        let store = SqliteTrackStore::open(db_path)?;
        let track_id = store.create_track(name)?;
        log::info!("Recording started: {} ({})", name, track_id);

        let state = Arc::new(TrackerState {
            running: AtomicBool::new(true),
            points: AtomicUsize::new(0),
            last_fix: Mutex::new(None),
        });
        let (tx, rx) = mpsc::channel();

        let worker_state = state.clone();
        let worker_id = track_id.clone();
        let worker = thread::spawn(move || {
            recording_loop(store, worker_id, rx, worker_state);
        });

        Ok(TrackerHandle {
            track_id,
            tx,
            state,
            worker: Arc::new(Mutex::new(Some(worker))),
        })
    }
}

fn recording_loop(
    store: SqliteTrackStore,
    track_id: TrackId,
    rx: mpsc::Receiver<TrackerCommand>,
    state: Arc<TrackerState>,
) {
    // A dropped sender ends the recording the same way as an explicit stop
    while let Ok(TrackerCommand::Record(fix)) = rx.recv() {
        match store.append_fix(&track_id, &fix) {
            Ok(()) => {
                state.points.fetch_add(1, Ordering::SeqCst);
                if let Ok(mut last) = state.last_fix.lock() {
                    *last = Some(fix);
                }
            }
            Err(e) => log::error!("Failed to record fix for {}: {}", track_id, e),
        }
    }

    if let Err(e) = store.close_track(&track_id) {
        log::error!("Failed to close track {}: {}", track_id, e);
    }
    state.running.store(false, Ordering::SeqCst);
    log::info!(
        "Recording stopped: {} ({} points)",
        track_id,
        state.points.load(Ordering::SeqCst)
    );
}

/// Handle for controlling a running recorder
#[derive(Clone)]
pub struct TrackerHandle {
    track_id: TrackId,
    tx: mpsc::Sender<TrackerCommand>,
    state: Arc<TrackerState>,
    worker: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl TrackerHandle {
    /// The track being recorded
    pub fn track_id(&self) -> &TrackId {
        &self.track_id
    }

    /// Queue a fix for writing
    pub fn record(&self, fix: Fix) -> Result<(), StoreError> {
        if !self.is_running() {
            return Err(StoreError::RecorderGone);
        }
        self.tx
            .send(TrackerCommand::Record(fix))
            .map_err(|_| StoreError::RecorderGone)
    }

    /// Number of fixes written so far
    pub fn point_count(&self) -> usize {
        self.state.points.load(Ordering::SeqCst)
    }

    pub fn last_fix(&self) -> Option<Fix> {
        self.state.last_fix.lock().ok().and_then(|f| *f)
    }
}

impl RecordingService for TrackerHandle {
    fn is_running(&self) -> bool {
        self.state.running.load(Ordering::SeqCst)
    }

    /// Stop recording and wait for the worker to close the track
    fn stop(&self) {
        let _ = self.tx.send(TrackerCommand::Stop);

        let worker = self.worker.lock().ok().and_then(|mut w| w.take());
        if let Some(worker) = worker
            && worker.join().is_err()
        {
            log::error!("Recorder thread for {} panicked", self.track_id);
        }
        self.state.running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TrackStore;

    #[test]
    fn test_start_creates_open_track() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("tracks.sqlite");

        let handle = Tracker::start(&db, "Hike").unwrap();
        assert!(handle.is_running());

        let store = SqliteTrackStore::open(&db).unwrap();
        let tracks = store.query_tracks().unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name, "Hike");
        assert_eq!(store.is_closed(handle.track_id()).unwrap(), Some(false));

        handle.stop();
    }

    #[test]
    fn test_fixes_written_before_stop() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("tracks.sqlite");

        let handle = Tracker::start(&db, "Ride").unwrap();
        handle.record(Fix::now(55.0, 37.0, None)).unwrap();
        handle.record(Fix::now(55.1, 37.1, Some(120.0))).unwrap();
        handle.stop();

        assert_eq!(handle.point_count(), 2);
        assert_eq!(handle.last_fix().map(|f| f.lat), Some(55.1));

        let store = SqliteTrackStore::open(&db).unwrap();
        assert_eq!(store.point_count(handle.track_id()).unwrap(), 2);
        assert_eq!(store.is_closed(handle.track_id()).unwrap(), Some(true));
    }

    #[test]
    fn test_stop_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let handle = Tracker::start(&dir.path().join("t.sqlite"), "Walk").unwrap();
        let clone = handle.clone();

        handle.stop();
        clone.stop();

        assert!(!handle.is_running());
        assert!(!clone.is_running());
    }

    #[test]
    fn test_record_after_stop_fails() {
        let dir = tempfile::tempdir().unwrap();
        let handle = Tracker::start(&dir.path().join("t.sqlite"), "Walk").unwrap();
        handle.stop();

        assert!(matches!(
            handle.record(Fix::now(1.0, 2.0, None)),
            Err(StoreError::RecorderGone)
        ));
    }

    #[test]
    fn test_option_recorder() {
        let none: Option<TrackerHandle> = None;
        assert!(!none.is_running());
        none.stop();
    }
}
