//! Track list logic
//!
//! - `controller` - selection, visibility and deletion over the rendered list
//! - `loader` - off-thread queries delivered back to the UI thread

mod controller;
mod loader;

pub use controller::{DeleteOutcome, LoadTicket, Notice, TrackListController, TrackListEvent};
pub use loader::{LoadResult, TrackLoader};
