//! Hands files to the desktop environment.

use crate::error::{AppError, Result};
use crate::file_utils::PathExt;
use log::info;
use std::path::Path;

/// Opens `path` with the default application of the desktop.
pub fn open_file(path: &Path) -> Result<()> {
    info!("Open: {}", path.format_for_log());
    open::that_detached(path).map_err(|source| AppError::Open {
        path: path.to_path_buf(),
        source,
    })
}
