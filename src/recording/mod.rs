//! Background track recording
//!
//! The recorder keeps one track open while it runs. Deleting that track
//! requires stopping the recorder first. Positions come from an NMEA
//! source (`nmea.rs`) or any caller holding a [`TrackerHandle`].

pub mod nmea;
mod tracker;

pub use tracker::{Tracker, TrackerHandle};

/// A background recording process as seen by the track list
pub trait RecordingService {
    fn is_running(&self) -> bool;

    /// Request the recorder to stop. Stopping a stopped recorder is a no-op.
    fn stop(&self);
}

/// Used when no recorder has been started
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRecorder;

impl RecordingService for NoRecorder {
    fn is_running(&self) -> bool {
        false
    }

    fn stop(&self) {}
}

impl<R: RecordingService> RecordingService for Option<R> {
    fn is_running(&self) -> bool {
        self.as_ref().is_some_and(|r| r.is_running())
    }

    fn stop(&self) {
        if let Some(r) = self {
            r.stop();
        }
    }
}
