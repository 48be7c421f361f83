//! Service writing the edited order back to disk.
//!
//! Staged deletions are removed first, then every remaining image is renamed
//! with its position as a zero-padded prefix.

use crate::error::{AppError, Result};
use crate::file_utils::{self, PathExt};
use crate::services::directory_service;
use crate::state::{Board, TileContainer};
use crate::thumbnail::{ThumbnailPool, ThumbnailSink};
use log::{error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// What an apply pass did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommitReport {
    pub deleted: usize,
    pub renamed: usize,
    /// At least one file kept its old name.
    pub rename_failed: bool,
}

/// Deletes staged files, then renames every entry to its sequence name.
pub fn apply<C: TileContainer>(board: &mut Board<C>) -> CommitReport {
    let deleted = delete_pending(board);
    let (renamed, rename_failed) = rename_in_order(board);

    let report = CommitReport {
        deleted,
        renamed,
        rename_failed,
    };
    info!(
        "Apply finished: {} deleted, {} renamed, rename failure: {}",
        report.deleted, report.renamed, report.rename_failed
    );
    report
}

/// Runs [`apply`] and rescans the directory when a rename failed, so that
/// the grid matches what is really on disk.
pub fn apply_and_reconcile<C: TileContainer>(
    board: &mut Board<C>,
    pool: &mut ThumbnailPool,
    sink: &ThumbnailSink,
) -> Result<CommitReport> {
    let report = apply(board);
    if report.rename_failed {
        warn!("Some files were not renamed, reloading directory");
        directory_service::rescan(board, pool, sink)?;
    }
    Ok(report)
}

fn delete_pending<C: TileContainer>(board: &mut Board<C>) -> usize {
    let mut deleted = 0;
    for path in board.take_pending_deletions() {
        info!("Delete: {}", path.format_for_log());
        match fs::remove_file(&path) {
            Ok(()) => deleted += 1,
            Err(e) => warn!("Failed to delete {}: {}", path.format_for_log(), e),
        }
    }
    deleted
}

fn rename_file(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        return Err(AppError::RenameTargetExists {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
        });
    }
    fs::rename(from, to).map_err(|source| AppError::Rename {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })
}

/// Returns the number of renamed files and whether any rename failed.
fn rename_in_order<C: TileContainer>(board: &mut Board<C>) -> (usize, bool) {
    let Some(dir) = board.directory().map(Path::to_path_buf) else {
        return (0, false);
    };
    if !dir.is_dir() {
        warn!("{} is gone, nothing renamed", dir.format_for_log());
        return (0, false);
    }

    let mut renamed = 0;
    let mut failed = false;
    for index in 0..board.len() {
        let source = board.entries()[index].path.clone();
        let file_name = source.file_name().unwrap_or_default();
        let target: PathBuf = dir.join(file_utils::sequence_name(index, file_name));
        if source == target {
            continue;
        }

        match rename_file(&source, &target) {
            Ok(()) => {
                board.set_path(index, target);
                renamed += 1;
            }
            Err(e) => {
                error!("{}", e);
                failed = true;
            }
        }
    }
    (renamed, failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tiles::test_support::VecTiles;
    use std::fs::File;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn noop_sink() -> ThumbnailSink {
        Arc::new(|_, _| {})
    }

    fn setup(names: &[&str]) -> (TempDir, Board<VecTiles>, ThumbnailPool) {
        let temp = TempDir::new().unwrap();
        for name in names {
            File::create(temp.path().join(name)).unwrap();
        }
        let mut board = Board::new(VecTiles::default());
        let mut pool = ThumbnailPool::new();
        directory_service::open_directory(&mut board, &mut pool, temp.path(), &noop_sink())
            .unwrap();
        (temp, board, pool)
    }

    fn disk_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    fn entry_names(board: &Board<VecTiles>) -> Vec<String> {
        board
            .entries()
            .iter()
            .map(|entry| entry.path.file_name_lossy())
            .collect()
    }

    #[test]
    fn test_apply_numbers_in_scan_order() {
        let (temp, mut board, _pool) = setup(&["b.png", "a.jpg", "c.jpg"]);

        let report = apply(&mut board);

        assert_eq!(report.renamed, 3);
        assert!(!report.rename_failed);
        assert_eq!(
            disk_names(temp.path()),
            vec!["0000_a.jpg", "0001_b.png", "0002_c.jpg"]
        );
        assert_eq!(
            entry_names(&board),
            vec!["0000_a.jpg", "0001_b.png", "0002_c.jpg"]
        );
        assert_eq!(
            board.tiles().labels(),
            vec!["0000_a.jpg", "0001_b.png", "0002_c.jpg"]
        );
        assert_eq!(board.entries()[1].path, temp.path().join("0001_b.png"));
    }

    #[test]
    fn test_apply_twice_renames_nothing_the_second_time() {
        let (temp, mut board, _pool) = setup(&["x.jpg", "y.jpg"]);
        apply(&mut board);
        let first = disk_names(temp.path());

        let report = apply(&mut board);

        assert_eq!(report, CommitReport::default());
        assert_eq!(disk_names(temp.path()), first);
    }

    #[test]
    fn test_apply_follows_moved_order() {
        let (temp, mut board, _pool) = setup(&["A.jpg", "B.jpg", "C.jpg", "D.jpg"]);
        board.move_range(1, 2, 3);

        apply(&mut board);

        assert_eq!(
            entry_names(&board),
            vec!["0000_A.jpg", "0001_D.jpg", "0002_B.jpg", "0003_C.jpg"]
        );
        assert_eq!(
            disk_names(temp.path()),
            vec!["0000_A.jpg", "0001_D.jpg", "0002_B.jpg", "0003_C.jpg"]
        );
    }

    #[test]
    fn test_apply_renumbers_existing_prefixes() {
        let (temp, mut board, _pool) = setup(&["0000_a.jpg", "0001_b.jpg", "0002_c.jpg"]);
        board.move_range(2, 2, 0);

        let report = apply(&mut board);

        assert!(!report.rename_failed);
        assert_eq!(
            disk_names(temp.path()),
            vec!["0000_c.jpg", "0001_a.jpg", "0002_b.jpg"]
        );
    }

    #[test]
    fn test_apply_deletes_staged_files_then_renames() {
        let (temp, mut board, _pool) = setup(&["A.jpg", "B.jpg", "C.jpg", "D.jpg"]);
        board.delete_range(0, 0);

        let report = apply(&mut board);

        assert_eq!(report.deleted, 1);
        assert!(board.pending_deletions().is_empty());
        assert_eq!(
            disk_names(temp.path()),
            vec!["0000_B.jpg", "0001_C.jpg", "0002_D.jpg"]
        );
    }

    #[test]
    fn test_delete_of_missing_file_is_not_a_failure() {
        let (temp, mut board, _pool) = setup(&["A.jpg", "B.jpg"]);
        board.delete_range(0, 0);
        fs::remove_file(temp.path().join("A.jpg")).unwrap();

        let report = apply(&mut board);

        assert_eq!(report.deleted, 0);
        assert!(!report.rename_failed);
        assert_eq!(disk_names(temp.path()), vec!["0000_B.jpg"]);
    }

    #[test]
    fn test_existing_target_marks_failure_and_continues() {
        // "5_a.jpg" moved first wants "0000_a.jpg", which is taken.
        let (temp, mut board, _pool) = setup(&["0000_a.jpg", "5_a.jpg", "z.jpg"]);
        board.move_range(1, 1, 0);

        let report = apply(&mut board);

        assert!(report.rename_failed);
        assert_eq!(report.renamed, 2);
        assert_eq!(
            disk_names(temp.path()),
            vec!["0001_a.jpg", "0002_z.jpg", "5_a.jpg"]
        );
        assert_eq!(board.entries()[0].path, temp.path().join("5_a.jpg"));
    }

    #[test]
    fn test_failed_rename_triggers_rescan() {
        let (temp, mut board, mut pool) = setup(&["0000_a.jpg", "5_a.jpg"]);
        board.move_range(1, 1, 0);

        let report = apply_and_reconcile(&mut board, &mut pool, &noop_sink()).unwrap();

        assert!(report.rename_failed);
        assert_eq!(entry_names(&board), disk_names(temp.path()));
        assert_eq!(entry_names(&board), vec!["0001_a.jpg", "5_a.jpg"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_apply_keeps_non_utf8_bytes() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let temp = TempDir::new().unwrap();
        File::create(temp.path().join(OsStr::from_bytes(b"caf\xe9.jpg"))).unwrap();
        File::create(temp.path().join(OsStr::from_bytes(b"caf\xe8.jpg"))).unwrap();
        let mut board = Board::new(VecTiles::default());
        let mut pool = ThumbnailPool::new();
        directory_service::open_directory(&mut board, &mut pool, temp.path(), &noop_sink())
            .unwrap();

        let report = apply(&mut board);

        assert!(!report.rename_failed);
        assert_eq!(report.renamed, 2);
        let mut on_disk: Vec<Vec<u8>> = fs::read_dir(temp.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_vec())
            .collect();
        on_disk.sort();
        assert_eq!(
            on_disk,
            vec![b"0000_caf\xe8.jpg".to_vec(), b"0001_caf\xe9.jpg".to_vec()]
        );
    }

    #[test]
    fn test_apply_without_directory_only_deletes() {
        let mut board = Board::new(VecTiles::default());
        assert_eq!(apply(&mut board), CommitReport::default());
    }

    #[test]
    fn test_apply_when_directory_vanished() {
        let (temp, mut board, _pool) = setup(&["a.jpg"]);
        let dir = temp.path().to_path_buf();
        drop(temp);
        assert!(!dir.exists());

        let report = apply(&mut board);
        assert_eq!(report.renamed, 0);
        assert!(!report.rename_failed);
    }
}
