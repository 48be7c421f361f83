//! Turns pointer and key input into selection changes, moves and deletions.

use crate::state::{Board, Selection, TileContainer, TileId};
use log::{debug, info};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerAction {
    Press,
    Release,
}

/// One pointer event, already hit-tested against the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerInput {
    pub button: PointerButton,
    pub action: PointerAction,
    /// Grid position under the pointer, `None` over empty space.
    pub hit: Option<usize>,
}

/// Selection state machine driving the board.
#[derive(Debug, Default)]
pub struct ReorderController {
    selection: Selection,
    /// Secondary or middle button held down over this tile.
    click_start: Option<(PointerButton, TileId)>,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Forgets the selection, e.g. after the board was repopulated.
    pub fn reset<C: TileContainer>(&mut self, board: &mut Board<C>) {
        self.selection = Selection::Idle;
        self.redraw(board);
    }

    /// Handles a pointer event.
    ///
    /// Secondary and middle buttons act on a click: press and release over
    /// the same tile. Returns the file to hand to the desktop when the middle
    /// button was clicked on a tile.
    pub fn handle_pointer<C: TileContainer>(
        &mut self,
        board: &mut Board<C>,
        input: PointerInput,
    ) -> Option<PathBuf> {
        let target = input.hit.and_then(|index| board.tile_at(index));
        match (input.button, input.action) {
            (PointerButton::Primary, PointerAction::Press) => {
                self.selection = self.selection.press(target);
                self.redraw(board);
            }
            (PointerButton::Primary, PointerAction::Release) => {
                self.selection = self.selection.release(target);
                self.redraw(board);
            }
            (button, PointerAction::Press) => {
                self.click_start = target.map(|tile| (button, tile));
            }
            (button, PointerAction::Release) => {
                let clicked = target.filter(|&tile| self.click_start == Some((button, tile)));
                self.click_start = None;
                if clicked.is_none() && target.is_some() {
                    debug!("{:?} released away from where it was pressed", button);
                }
                match button {
                    PointerButton::Secondary => self.move_selection(board, clicked),
                    _ => {
                        return clicked
                            .and_then(|tile| board.path_of(tile))
                            .map(|path| path.to_path_buf());
                    }
                }
            }
        }
        None
    }

    /// Moves the selected block in front of `destination`.
    ///
    /// Only acts when a full range is selected and the destination is a tile;
    /// the selection is then cleared even if an anchor no longer resolves.
    pub fn move_selection<C: TileContainer>(
        &mut self,
        board: &mut Board<C>,
        destination: Option<TileId>,
    ) {
        let (Selection::RangeSet { .. }, Some(destination)) = (self.selection, destination) else {
            return;
        };

        if let Some(dest) = board.index_of(destination) {
            if let Some((begin, end)) = self.selection.resolve(board) {
                info!("Move {}..={} to {}", begin, end, dest);
                board.move_range(begin, end, dest);
            }
        }

        self.selection = Selection::Idle;
        self.redraw(board);
    }

    /// Stages the selected block for deletion.
    pub fn delete_selection<C: TileContainer>(&mut self, board: &mut Board<C>) {
        if let Some((begin, end)) = self.selection.resolve(board) {
            info!("Delete {}..={}", begin, end);
            board.delete_range(begin, end);
        } else {
            debug!("Delete ignored, no complete selection");
        }
        self.redraw(board);
    }

    fn redraw<C: TileContainer>(&self, board: &mut Board<C>) {
        let range = self.selection.highlighted_range(board);
        board.highlight(range);
    }
}
