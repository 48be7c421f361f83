//! Tile grid geometry, shared by the slint layout and pointer hit testing.

use crate::config::{THUMBNAIL_HEIGHT, THUMBNAIL_WIDTH, TILE_LABEL_HEIGHT, TILE_SPACING};

/// Wrapping grid layout: tiles left to right, `columns` per row, with
/// `spacing` around every tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub tile_width: f32,
    pub tile_height: f32,
    pub spacing: f32,
    pub columns: usize,
}

impl GridGeometry {
    /// Geometry of the application grid with the column count computed by
    /// the UI for the current window width.
    pub fn with_columns(columns: i32) -> Self {
        Self {
            tile_width: THUMBNAIL_WIDTH as f32,
            tile_height: THUMBNAIL_HEIGHT as f32 + TILE_LABEL_HEIGHT,
            spacing: TILE_SPACING,
            columns: columns.max(1) as usize,
        }
    }

    /// Grid position of the tile under `(x, y)`, in content coordinates.
    ///
    /// Gaps between tiles and the area right of the last column give `None`.
    /// The returned index may lie past the last tile.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let x = x - self.spacing;
        let y = y - self.spacing;
        if x < 0.0 || y < 0.0 {
            return None;
        }

        let cell_width = self.tile_width + self.spacing;
        let cell_height = self.tile_height + self.spacing;
        let column = (x / cell_width).floor() as usize;
        let row = (y / cell_height).floor() as usize;
        if column >= self.columns {
            return None;
        }
        if x - column as f32 * cell_width >= self.tile_width
            || y - row as f32 * cell_height >= self.tile_height
        {
            return None;
        }

        Some(row * self.columns + column)
    }
}
