//! Track Manager
//!
//! Track list controller, SQLite record store and background recorder,
//! plus the GPUI views the desktop binary is built from.

pub mod actions;
pub mod core;
pub mod logging;
pub mod recording;
pub mod store;
#[cfg(test)]
mod test_fixtures;
pub mod tracks;
pub mod ui;
