//! Service layer for business logic.
//!
//! Separates the list operations from UI handlers so they can be tested
//! against any tile container.

pub mod commit_service;
pub mod desktop_service;
pub mod directory_service;
pub mod reorder_controller;

pub use reorder_controller::{PointerAction, PointerButton, PointerInput, ReorderController};
