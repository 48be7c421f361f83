//! Service for loading a directory into the board.
//!
//! Scans the directory, rebuilds the ordered list and its tiles, then queues
//! one thumbnail job per image.

use crate::error::{AppError, Result};
use crate::file_utils::{self, PathExt};
use crate::state::{Board, TileContainer};
use crate::thumbnail::{ThumbnailPool, ThumbnailSink};
use log::{debug, info};
use std::path::Path;

/// Replaces the board content with the images of `dir`.
///
/// Work still queued for the previous directory is discarded. Returns the
/// number of images found.
pub fn open_directory<C: TileContainer>(
    board: &mut Board<C>,
    pool: &mut ThumbnailPool,
    dir: &Path,
    sink: &ThumbnailSink,
) -> Result<usize> {
    if !dir.is_dir() {
        return Err(AppError::NotADirectory(dir.to_path_buf()));
    }
    let start = std::time::Instant::now();
    let dir = std::path::absolute(dir)?;

    let files = file_utils::scan_directory(&dir)?;
    pool.reset();
    let entries = board.populate(dir.clone(), files);

    for entry in &entries {
        pool.schedule(entry.tile, entry.path.clone(), sink.clone());
    }

    info!(
        "Opened {} with {} images",
        dir.format_for_log(),
        entries.len()
    );
    debug!("Directory scan took {:?}", start.elapsed());
    Ok(entries.len())
}

/// Scans the board's current directory again.
pub fn rescan<C: TileContainer>(
    board: &mut Board<C>,
    pool: &mut ThumbnailPool,
    sink: &ThumbnailSink,
) -> Result<usize> {
    let Some(dir) = board.directory().map(Path::to_path_buf) else {
        return Ok(0);
    };
    open_directory(board, pool, &dir, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tiles::test_support::VecTiles;
    use crate::state::TileId;
    use std::fs::{self, File};
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};
    use tempfile::TempDir;

    fn noop_sink() -> ThumbnailSink {
        Arc::new(|_, _| {})
    }

    fn labels(board: &Board<VecTiles>) -> Vec<&str> {
        board.tiles().labels()
    }

    #[test]
    fn test_open_directory_lists_images_in_name_order() {
        let temp = TempDir::new().unwrap();
        for name in ["b.png", "a.jpg", "c.jpg", "readme.md"] {
            File::create(temp.path().join(name)).unwrap();
        }
        let mut board = Board::new(VecTiles::default());
        let mut pool = ThumbnailPool::new();

        let count = open_directory(&mut board, &mut pool, temp.path(), &noop_sink()).unwrap();

        assert_eq!(count, 3);
        assert_eq!(labels(&board), vec!["a.jpg", "b.png", "c.jpg"]);
        assert_eq!(board.entries()[0].path, temp.path().join("a.jpg"));
        assert!(board.entries().iter().all(|entry| entry.path.is_absolute()));
        assert_eq!(board.directory(), Some(temp.path()));
    }

    #[test]
    fn test_open_directory_rejects_files_and_missing_paths() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("a.jpg");
        File::create(&file).unwrap();
        let mut board = Board::new(VecTiles::default());
        let mut pool = ThumbnailPool::new();

        let err = open_directory(&mut board, &mut pool, &file, &noop_sink()).unwrap_err();
        assert!(matches!(err, AppError::NotADirectory(_)));
        let err = open_directory(&mut board, &mut pool, &temp.path().join("missing"), &noop_sink())
            .unwrap_err();
        assert!(matches!(err, AppError::NotADirectory(_)));
        assert!(board.is_empty());
        assert_eq!(board.directory(), None);
    }

    #[test]
    fn test_open_directory_queues_thumbnails_for_every_image() {
        let temp = TempDir::new().unwrap();
        for name in ["a.png", "b.png"] {
            image::RgbImage::new(20, 20)
                .save(temp.path().join(name))
                .unwrap();
        }
        fs::write(temp.path().join("c.jpg"), b"broken").unwrap();

        let delivered = Arc::new(Mutex::new(Vec::<TileId>::new()));
        let sink_delivered = delivered.clone();
        let sink: ThumbnailSink = Arc::new(move |tile, _| {
            sink_delivered.lock().unwrap().push(tile);
        });

        let mut board = Board::new(VecTiles::default());
        let mut pool = ThumbnailPool::new();
        open_directory(&mut board, &mut pool, temp.path(), &sink).unwrap();

        let deadline = Instant::now() + Duration::from_secs(10);
        while delivered.lock().unwrap().len() < 2 && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }
        // The broken file keeps its tile without a thumbnail.
        let mut tiles = delivered.lock().unwrap().clone();
        tiles.sort_by_key(|tile| tile.0);
        assert_eq!(
            tiles,
            vec![board.tile_at(0).unwrap(), board.tile_at(1).unwrap()]
        );
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn test_rescan_picks_up_disk_changes() {
        let temp = TempDir::new().unwrap();
        File::create(temp.path().join("a.jpg")).unwrap();
        let mut board = Board::new(VecTiles::default());
        let mut pool = ThumbnailPool::new();
        open_directory(&mut board, &mut pool, temp.path(), &noop_sink()).unwrap();
        board.delete_range(0, 0);

        File::create(temp.path().join("b.jpg")).unwrap();
        let count = rescan(&mut board, &mut pool, &noop_sink()).unwrap();

        assert_eq!(count, 2);
        assert_eq!(labels(&board), vec!["a.jpg", "b.jpg"]);
        assert!(board.pending_deletions().is_empty());
    }

    #[test]
    fn test_rescan_without_directory_is_noop() {
        let mut board = Board::new(VecTiles::default());
        let mut pool = ThumbnailPool::new();
        assert_eq!(rescan(&mut board, &mut pool, &noop_sink()).unwrap(), 0);
    }
}
