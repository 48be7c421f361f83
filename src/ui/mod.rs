//! UI module for handling user interactions and UI updates.
//!
//! Threading model:
//! - UI thread: every pointer/key callback, directory scan, move, delete and
//!   apply. These work on in-memory state or touch a few files and stay short.
//! - `slint::spawn_local`: the folder dialog, which must run on the main thread.
//! - Thumbnail pool (rayon): image decoding and scaling.
//! - `slint::invoke_from_event_loop`: returns thumbnails to the UI thread.

pub mod grid;
pub mod handlers;
mod state_helpers;
pub mod tiles;

pub use handlers::{setup_handlers, show_directory};
pub use state_helpers::*;
pub use tiles::SlintTiles;
