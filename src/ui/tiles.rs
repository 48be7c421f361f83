//! Slint-backed tile container.

use crate::state::{TileContainer, TileId};
use crate::thumbnail::Thumbnail;
use crate::TileData;
use slint::{Image, Model, ModelRc, Rgba8Pixel, SharedPixelBuffer, VecModel};
use std::rc::Rc;

/// Tile rows shown by the grid, in display order.
pub struct SlintTiles {
    model: Rc<VecModel<TileData>>,
}

impl SlintTiles {
    pub fn new() -> Self {
        Self {
            model: Rc::new(VecModel::default()),
        }
    }

    /// Handle to bind to `ViewState.tiles`.
    pub fn model_rc(&self) -> ModelRc<TileData> {
        ModelRc::from(self.model.clone())
    }
}

impl Default for SlintTiles {
    fn default() -> Self {
        Self::new()
    }
}

impl TileContainer for SlintTiles {
    fn clear(&mut self) {
        self.model.set_vec(Vec::new());
    }

    fn push(&mut self, tile: TileId, label: &str) {
        self.model.push(TileData {
            id: tile.0,
            name: label.into(),
            thumbnail: Image::default(),
            has_thumbnail: false,
            highlighted: false,
        });
    }

    fn remove(&mut self, index: usize) {
        self.model.remove(index);
    }

    fn move_tile(&mut self, from: usize, to: usize) {
        let tile = self.model.remove(from);
        self.model.insert(to, tile);
    }

    fn set_label(&mut self, index: usize, label: &str) {
        if let Some(mut tile) = self.model.row_data(index) {
            tile.name = label.into();
            self.model.set_row_data(index, tile);
        }
    }

    fn set_highlighted(&mut self, index: usize, highlighted: bool) {
        if let Some(mut tile) = self.model.row_data(index) {
            if tile.highlighted != highlighted {
                tile.highlighted = highlighted;
                self.model.set_row_data(index, tile);
            }
        }
    }

    fn len(&self) -> usize {
        self.model.row_count()
    }
}

/// Converts thumbnail pixels into a slint image.
pub fn create_slint_image(thumbnail: Thumbnail) -> Image {
    let buffer = SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(
        &thumbnail.rgba,
        thumbnail.width,
        thumbnail.height,
    );
    Image::from_rgba8(buffer)
}

/// Shows `image` on the tile with handle `tile`, wherever it currently is.
///
/// Touches only that row's picture; tiles removed in the meantime are
/// ignored.
pub fn set_tile_thumbnail(tiles: &ModelRc<TileData>, tile: TileId, image: Image) {
    let Some(index) = (0..tiles.row_count())
        .find(|&index| tiles.row_data(index).is_some_and(|data| data.id == tile.0))
    else {
        return;
    };
    if let Some(mut data) = tiles.row_data(index) {
        data.thumbnail = image;
        data.has_thumbnail = true;
        tiles.set_row_data(index, data);
    }
}
