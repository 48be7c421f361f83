//! Selection anchors set by primary button press and release.

use crate::state::board::Board;
use crate::state::tiles::{TileContainer, TileId};
use std::ops::RangeInclusive;

/// Selection state.
///
/// Anchors are tile handles, not indices: they are resolved against the
/// board at the moment an action runs, so they survive earlier moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    /// Primary button pressed on a tile, not released on one yet.
    AnchorSet { begin: TileId },
    /// Both ends known.
    RangeSet { begin: TileId, end: TileId },
}

impl Selection {
    /// Primary button pressed over `target` (none for empty area).
    pub fn press(self, target: Option<TileId>) -> Self {
        match target {
            Some(begin) => Selection::AnchorSet { begin },
            None => Selection::Idle,
        }
    }

    /// Primary button released over `target` (none for empty area).
    pub fn release(self, target: Option<TileId>) -> Self {
        let begin = match self {
            Selection::Idle => return Selection::Idle,
            Selection::AnchorSet { begin } | Selection::RangeSet { begin, .. } => begin,
        };
        match target {
            Some(end) => Selection::RangeSet { begin, end },
            None => Selection::AnchorSet { begin },
        }
    }

    /// Resolves both anchors to an ordered index pair.
    ///
    /// Returns `None` unless both ends are set and still on the board.
    pub fn resolve<C: TileContainer>(&self, board: &Board<C>) -> Option<(usize, usize)> {
        let Selection::RangeSet { begin, end } = *self else {
            return None;
        };
        let begin = board.index_of(begin)?;
        let end = board.index_of(end)?;
        Some((begin.min(end), begin.max(end)))
    }

    /// Indices to draw as selected.
    pub fn highlighted_range<C: TileContainer>(
        &self,
        board: &Board<C>,
    ) -> Option<RangeInclusive<usize>> {
        match *self {
            Selection::Idle => None,
            Selection::AnchorSet { begin } => board.index_of(begin).map(|index| index..=index),
            Selection::RangeSet { .. } => self.resolve(board).map(|(begin, end)| begin..=end),
        }
    }
}
