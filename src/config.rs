//! Application configuration constants.
//!
//! Tile geometry values must match the ones in `ui/app-window.slint`.

/// Supported image file extensions for scanning directories.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// Maximum thumbnail width in pixels.
pub const THUMBNAIL_WIDTH: u32 = 150;

/// Maximum thumbnail height in pixels.
pub const THUMBNAIL_HEIGHT: u32 = 120;

/// Upper bound for the thumbnail worker pool size.
pub const THUMBNAIL_POOL_MAX_THREADS: usize = 4;

/// Number of digits in the sequence prefix written by the rename pass.
pub const SEQUENCE_PREFIX_WIDTH: usize = 4;

/// Space between two tiles of the grid, in logical pixels.
pub const TILE_SPACING: f32 = 6.0;

/// Height of the file name line drawn under each thumbnail.
pub const TILE_LABEL_HEIGHT: f32 = 18.0;
