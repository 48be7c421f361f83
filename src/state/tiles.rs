//! Visual tile container abstraction.

/// Opaque handle of one tile in the grid.
///
/// Shared with the UI tile record so that thumbnail results can find their
/// tile again whatever its current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(pub i32);

/// Ordered on-screen representation of the image list.
///
/// Implementations are only ever driven through [`crate::state::Board`],
/// which keeps their row order identical to the entry order.
pub trait TileContainer {
    /// Removes every tile.
    fn clear(&mut self);
    /// Appends a tile showing `label` and no thumbnail.
    fn push(&mut self, tile: TileId, label: &str);
    /// Drops the tile at `index`.
    fn remove(&mut self, index: usize);
    /// Takes the tile at `from` out and re-inserts it at `to`, keeping its
    /// thumbnail. `to` is interpreted after the removal.
    fn move_tile(&mut self, from: usize, to: usize);
    fn set_label(&mut self, index: usize, label: &str);
    fn set_highlighted(&mut self, index: usize, highlighted: bool);
    fn len(&self) -> usize;
}
