use crate::config::{SEQUENCE_PREFIX_WIDTH, SUPPORTED_IMAGE_EXTENSIONS};
use crate::error::Result;
use once_cell::sync::Lazy;
use regex::bytes::Regex;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};

/// Leading sequence number written by a previous rename pass.
///
/// Matched on the encoded bytes so that names which are not valid UTF-8
/// keep every byte through a rename.
static SEQUENCE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+_").expect("sequence prefix pattern is valid"));

/// Extension trait for path display helpers.
pub trait PathExt {
    /// Returns the file name component as a lossy string, or an empty string.
    fn file_name_lossy(&self) -> String;
    /// Returns a representation suitable for log messages.
    fn format_for_log(&self) -> String;
}

impl PathExt for Path {
    fn file_name_lossy(&self) -> String {
        self.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    fn format_for_log(&self) -> String {
        format!("\"{}\"", self.display())
    }
}

/// Returns true when the file name carries one of the supported extensions.
///
/// The comparison is made on the lowercased name, so `IMG.JPG` matches.
pub fn has_supported_extension(path: &Path) -> bool {
    let name = path.file_name_lossy().to_lowercase();
    SUPPORTED_IMAGE_EXTENSIONS
        .iter()
        .any(|ext| name.ends_with(&format!(".{ext}")))
}

/// Returns true for regular files with a supported image extension.
pub fn is_supported_image(path: &Path) -> bool {
    path.is_file() && has_supported_extension(path)
}

/// Lists the supported images of `dir`, sorted by file name.
pub fn scan_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut image_files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| is_supported_image(path))
        .collect();

    image_files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(image_files)
}

/// Strips a leading `NNN_` sequence prefix from a file name.
pub fn strip_sequence_prefix(file_name: &OsStr) -> &OsStr {
    let bytes = file_name.as_encoded_bytes();
    match SEQUENCE_PREFIX.find(bytes) {
        // SAFETY: the prefix is non-empty ASCII, so the rest starts on a
        // valid boundary of the platform encoding.
        Some(prefix) => unsafe { OsStr::from_encoded_bytes_unchecked(&bytes[prefix.end()..]) },
        None => file_name,
    }
}

/// Builds the file name an image gets at `position` in the ordered list.
pub fn sequence_name(position: usize, file_name: &OsStr) -> OsString {
    let mut name = OsString::from(format!("{position:0width$}_", width = SEQUENCE_PREFIX_WIDTH));
    name.push(strip_sequence_prefix(file_name));
    name
}

/// Picks the directory to show at startup.
///
/// A file resolves to its parent, a missing path to its nearest existing
/// ancestor. Without an argument, or when nothing on the way exists, the
/// working directory is used.
pub fn resolve_start_directory(arg: Option<PathBuf>, working_dir: &Path) -> PathBuf {
    let Some(path) = arg else {
        return working_dir.to_path_buf();
    };

    let path = if path.is_relative() {
        working_dir.join(path)
    } else {
        path
    };

    path.ancestors()
        .find(|candidate| candidate.is_dir())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| working_dir.to_path_buf())
}
