//! Unified error types for the image reorder application.

use std::path::PathBuf;
use thiserror::Error;

/// Application-specific errors.
#[derive(Debug, Error)]
pub enum AppError {
    /// Error listing the content of a directory
    #[error("Failed to scan directory: {0}")]
    DirectoryScan(#[from] std::io::Error),
    /// The path to open is missing or is not a directory
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
    /// Error decoding an image file
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),
    /// Error producing a thumbnail that is not a decoding error
    #[error("Failed to build thumbnail: {0}")]
    Thumbnail(String),
    /// The rename target already exists on disk
    #[error("Can't rename {} to {}: target exists", .from.display(), .to.display())]
    RenameTargetExists { from: PathBuf, to: PathBuf },
    /// The operating system refused the rename
    #[error("Can't rename {} to {}: {source}", .from.display(), .to.display())]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
    /// The desktop could not open the file
    #[error("Can't open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Type alias for Results in this application.
pub type Result<T> = std::result::Result<T, AppError>;
