//! State management for the image reorder application.

use crate::services::ReorderController;
use crate::thumbnail::ThumbnailPool;
use crate::ui::SlintTiles;
use std::cell::RefCell;
use std::rc::Rc;

pub mod board;
pub mod selection;
pub mod tiles;

pub use board::{Board, ImageEntry};
pub use selection::Selection;
pub use tiles::{TileContainer, TileId};

/// Application-wide state container.
///
/// Lives on the UI thread only: the tile container wraps a slint model. The
/// board borrow is the exclusive scope for scan, move, delete, highlight and
/// commit.
#[derive(Clone)]
pub struct AppState {
    pub board: Rc<RefCell<Board<SlintTiles>>>,
    pub controller: Rc<RefCell<ReorderController>>,
    /// Background thumbnail rendering, recreated for every directory.
    pub thumbnails: Rc<RefCell<ThumbnailPool>>,
}

impl AppState {
    pub fn new(tiles: SlintTiles) -> Self {
        Self {
            board: Rc::new(RefCell::new(Board::new(tiles))),
            controller: Rc::new(RefCell::new(ReorderController::new())),
            thumbnails: Rc::new(RefCell::new(ThumbnailPool::new())),
        }
    }
}
