//! UI components

mod track_list;
mod track_row;

pub use track_list::TrackListView;
