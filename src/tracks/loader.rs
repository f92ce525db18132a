//! Off-thread track queries
//!
//! Each request opens its own store on a worker thread, runs the query and
//! sends the result back over a channel. The view polls the channel and
//! hands results to the controller, which decides whether they are stale.

use std::sync::{Arc, mpsc};
use std::thread;

use super::LoadTicket;
use crate::core::TrackRecord;
use crate::store::{StoreError, TrackStore};

type StoreOpener<S> = dyn Fn() -> Result<S, StoreError> + Send + Sync;

/// A finished query
#[derive(Debug)]
pub struct LoadResult {
    pub ticket: LoadTicket,
    pub result: Result<Vec<TrackRecord>, StoreError>,
}

pub struct TrackLoader<S> {
    open: Arc<StoreOpener<S>>,
    tx: mpsc::Sender<LoadResult>,
    rx: mpsc::Receiver<LoadResult>,
}

impl<S: TrackStore + 'static> TrackLoader<S> {
    pub fn new(open: impl Fn() -> Result<S, StoreError> + Send + Sync + 'static) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            open: Arc::new(open),
            tx,
            rx,
        }
    }

    /// Run a query for `ticket` in the background
    pub fn request(&self, ticket: LoadTicket) {
        let open = self.open.clone();
        let tx = self.tx.clone();

        thread::spawn(move || {
            let result = open().and_then(|store| store.query_tracks());
            if let Err(ref e) = result {
                log::warn!("Track query {:?} failed: {}", ticket, e);
            }
            // Receiver gone means the view was closed
            let _ = tx.send(LoadResult { ticket, result });
        });
    }

    /// Take every result delivered so far without blocking
    pub fn poll(&self) -> Vec<LoadResult> {
        self.rx.try_iter().collect()
    }

    /// Block until the next result arrives
    #[cfg(test)]
    pub fn wait(&self) -> Option<LoadResult> {
        self.rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TrackRecord;
    use crate::store::SqliteTrackStore;
    use crate::test_fixtures::TrackFixture;

    #[test]
    fn test_request_delivers_records() {
        let fixture = TrackFixture::with_tracks(&[("A", true), ("B", false)]);
        let db = fixture.db_path().to_path_buf();

        let loader = TrackLoader::new(move || SqliteTrackStore::open(&db));
        loader.request(LoadTicket(7));

        let delivered = loader.wait().expect("load result");
        assert_eq!(delivered.ticket, LoadTicket(7));
        assert_eq!(
            delivered.result.unwrap(),
            vec![
                TrackRecord::new("fixture-0", "A", true),
                TrackRecord::new("fixture-1", "B", false),
            ]
        );
    }

    #[test]
    fn test_open_failure_is_delivered() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a database file
        let path = dir.path().to_path_buf();

        let loader = TrackLoader::new(move || SqliteTrackStore::open(&path));
        loader.request(LoadTicket(1));

        let delivered = loader.wait().expect("load result");
        assert!(delivered.result.is_err());
    }

    #[test]
    fn test_poll_is_empty_without_requests() {
        let loader = TrackLoader::new(SqliteTrackStore::open_in_memory);
        assert!(loader.poll().is_empty());
    }
}
