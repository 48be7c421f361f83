//! Ordered image list kept in lockstep with its tile container.

use crate::file_utils::PathExt;
use crate::state::tiles::{TileContainer, TileId};
use log::{debug, warn};
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// One image of the current directory and the tile that shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    pub path: PathBuf,
    pub tile: TileId,
}

/// Owns the ordered image list, its tile container and the files staged for
/// deletion.
///
/// Entry order is display order and rename order. Every mutating method
/// updates the entries and the container together, so row `i` of the
/// container always shows entry `i`.
pub struct Board<C: TileContainer> {
    entries: Vec<ImageEntry>,
    tiles: C,
    pending_deletions: BTreeSet<PathBuf>,
    directory: Option<PathBuf>,
    next_tile_id: i32,
}

impl<C: TileContainer> Board<C> {
    pub fn new(tiles: C) -> Self {
        Self {
            entries: Vec::new(),
            tiles,
            pending_deletions: BTreeSet::new(),
            directory: None,
            next_tile_id: 0,
        }
    }

    /// Replaces the whole content with `paths`, in the given order.
    ///
    /// Pending deletions of the previous directory are forgotten. Returns the
    /// new entries so the caller can schedule their thumbnails.
    pub fn populate(&mut self, directory: PathBuf, paths: Vec<PathBuf>) -> Vec<ImageEntry> {
        self.entries.clear();
        self.tiles.clear();
        self.pending_deletions.clear();

        for path in paths {
            let tile = self.allocate_tile_id();
            self.tiles.push(tile, &path.file_name_lossy());
            self.entries.push(ImageEntry { path, tile });
        }

        debug!(
            "Board populated with {} images from {}",
            self.entries.len(),
            directory.format_for_log()
        );
        self.directory = Some(directory);
        self.entries.clone()
    }

    fn allocate_tile_id(&mut self) -> TileId {
        let id = TileId(self.next_tile_id);
        self.next_tile_id = self.next_tile_id.wrapping_add(1);
        id
    }

    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn tiles(&self) -> &C {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current position of a tile, by linear scan.
    pub fn index_of(&self, tile: TileId) -> Option<usize> {
        self.entries.iter().position(|entry| entry.tile == tile)
    }

    pub fn tile_at(&self, index: usize) -> Option<TileId> {
        self.entries.get(index).map(|entry| entry.tile)
    }

    pub fn path_of(&self, tile: TileId) -> Option<&Path> {
        self.entries
            .iter()
            .find(|entry| entry.tile == tile)
            .map(|entry| entry.path.as_path())
    }

    /// Relocates the block `begin..=end` to `dest`.
    ///
    /// `dest` is the index of the destination tile before anything moves.
    /// One entry is taken out at a time and re-inserted; when moving towards
    /// the front both cursors advance after each step, otherwise the remaining
    /// source entries slide down on their own. A `dest` inside the block is
    /// accepted and yields whatever that arithmetic produces.
    pub fn move_range(&mut self, begin: usize, end: usize, dest: usize) {
        if begin > end || end >= self.entries.len() || dest >= self.entries.len() {
            warn!(
                "Ignoring move of {}..={} to {} on {} entries",
                begin,
                end,
                dest,
                self.entries.len()
            );
            return;
        }

        let mut current_source = begin;
        let mut current_dest = dest;
        for _ in begin..=end {
            let entry = self.entries.remove(current_source);
            self.entries.insert(current_dest, entry);
            self.tiles.move_tile(current_source, current_dest);
            if current_source > current_dest {
                current_source += 1;
                current_dest += 1;
            }
        }
        debug!("Moved {}..={} to {}", begin, end, dest);
    }

    /// Removes `begin..=end` and stages their files for deletion.
    pub fn delete_range(&mut self, begin: usize, end: usize) {
        if begin > end || end >= self.entries.len() {
            warn!(
                "Ignoring deletion of {}..={} on {} entries",
                begin,
                end,
                self.entries.len()
            );
            return;
        }

        for index in (begin..=end).rev() {
            let entry = self.entries.remove(index);
            self.tiles.remove(index);
            debug!("Staged for deletion: {}", entry.path.format_for_log());
            self.pending_deletions.insert(entry.path);
        }
    }

    /// Redraws the selection: every tile neutral, then `range` highlighted.
    pub fn highlight(&mut self, range: Option<RangeInclusive<usize>>) {
        for index in 0..self.tiles.len() {
            self.tiles.set_highlighted(index, false);
        }
        if let Some(range) = range {
            for index in range {
                if index < self.tiles.len() {
                    self.tiles.set_highlighted(index, true);
                }
            }
        }
    }

    #[cfg(test)]
    pub fn pending_deletions(&self) -> &BTreeSet<PathBuf> {
        &self.pending_deletions
    }

    /// Empties the pending deletions, returning them.
    pub fn take_pending_deletions(&mut self) -> BTreeSet<PathBuf> {
        std::mem::take(&mut self.pending_deletions)
    }

    /// Records that the file of entry `index` now lives at `path`.
    pub fn set_path(&mut self, index: usize, path: PathBuf) {
        let Some(entry) = self.entries.get_mut(index) else {
            warn!("No entry at {} to update", index);
            return;
        };
        self.tiles.set_label(index, &path.file_name_lossy());
        entry.path = path;
    }
}
