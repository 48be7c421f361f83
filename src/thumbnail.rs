//! Thumbnail rendering off the UI thread.
//!
//! Jobs run on a small dedicated rayon pool. Each job decodes one file,
//! scales it down and hands the RGBA pixels to a sink; it never touches the
//! ordered image list. Resetting the pool bumps a generation counter so that
//! queued or running jobs for the previous directory neither decode nor
//! deliver.

use crate::config::{THUMBNAIL_HEIGHT, THUMBNAIL_POOL_MAX_THREADS, THUMBNAIL_WIDTH};
use crate::error::{AppError, Result};
use crate::file_utils::PathExt;
use crate::state::TileId;
use log::{debug, error};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Scaled-down RGBA8 pixels of one image.
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Receives finished thumbnails, from a worker thread.
pub type ThumbnailSink = Arc<dyn Fn(TileId, Thumbnail) + Send + Sync>;

/// Decodes `path` and scales it to fit the tile, keeping the aspect ratio.
pub fn render_thumbnail(path: &Path) -> Result<Thumbnail> {
    let image = image::ImageReader::open(path)
        .map_err(|e| AppError::Thumbnail(format!("{}: {}", path.display(), e)))?
        .with_guessed_format()
        .map_err(|e| AppError::Thumbnail(format!("{}: {}", path.display(), e)))?
        .decode()?;

    let scaled = image.thumbnail(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT).to_rgba8();
    let (width, height) = scaled.dimensions();
    Ok(Thumbnail {
        rgba: scaled.into_raw(),
        width,
        height,
    })
}

fn pool_size() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(THUMBNAIL_POOL_MAX_THREADS)
}

fn build_pool() -> Option<rayon::ThreadPool> {
    let threads = pool_size();
    match rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|index| format!("thumbnail-{index}"))
        .build()
    {
        Ok(pool) => {
            debug!("Thumbnail pool started with {} threads", threads);
            Some(pool)
        }
        Err(e) => {
            error!("Failed to start thumbnail pool, using the global one: {}", e);
            None
        }
    }
}

/// Bounded worker pool for thumbnail jobs.
pub struct ThumbnailPool {
    pool: Option<rayon::ThreadPool>,
    generation: Arc<AtomicU64>,
}

impl ThumbnailPool {
    pub fn new() -> Self {
        Self {
            pool: build_pool(),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current generation; jobs from older generations are discarded.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Discards pending work and starts a fresh pool.
    pub fn reset(&mut self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        // Dropping the old pool lets its threads exit once their queue drains.
        self.pool = build_pool();
        debug!("Thumbnail pool reset, generation {}", generation);
    }

    /// Queues the thumbnail of `path` for `tile`.
    pub fn schedule(&self, tile: TileId, path: PathBuf, sink: ThumbnailSink) {
        let job = self.job(tile, path, sink);
        match &self.pool {
            Some(pool) => pool.spawn(job),
            None => rayon::spawn(job),
        }
    }

    fn job(
        &self,
        tile: TileId,
        path: PathBuf,
        sink: ThumbnailSink,
    ) -> impl FnOnce() + Send + use<> {
        let generation = self.generation.clone();
        let token = self.generation();
        move || {
            let is_current = || generation.load(Ordering::SeqCst) == token;
            if !is_current() {
                return;
            }
            match render_thumbnail(&path) {
                Ok(thumbnail) if is_current() => sink(tile, thumbnail),
                Ok(_) => debug!("Dropping stale thumbnail of {}", path.format_for_log()),
                Err(e) => error!(
                    "Unable to build preview of {}: {}",
                    path.format_for_log(),
                    e
                ),
            }
        }
    }
}

impl Default for ThumbnailPool {
    fn default() -> Self {
        Self::new()
    }
}
