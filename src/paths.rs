use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

/// First counter tried when the requested path is taken (`results (2).csv`).
pub const DEFAULT_RENAME_START: u32 = 2;

/// Return `path` if nothing exists there, otherwise the lowest free `stem (n).ext` sibling.
///
/// Counting starts at [`DEFAULT_RENAME_START`]. The check happens before the caller
/// opens the file, so another process can still grab the name in between.
///
/// # Example
///
/// ```rust,no_run
/// use exif_csv::paths::resolve;
/// use std::path::Path;
///
/// // With `out.csv` and `out (2).csv` already present:
/// let path = resolve(Path::new("out.csv")).unwrap();
/// assert_eq!(path, Path::new("out (3).csv"));
/// ```
pub fn resolve(path: &Path) -> io::Result<PathBuf> {
    resolve_from(path, DEFAULT_RENAME_START)
}

/// Same as [`resolve`], with an explicit first counter.
pub fn resolve_from(path: &Path, start: u32) -> io::Result<PathBuf> {
    if !path.try_exists()? {
        return Ok(path.to_path_buf());
    }

    let mut counter = start;
    loop {
        let candidate = numbered(path, counter);
        if !candidate.try_exists()? {
            log::debug!(
                "{} exists, using {} instead",
                path.display(),
                candidate.display()
            );
            return Ok(candidate);
        }
        counter += 1;
    }
}

/// Build `stem (n).ext` next to `path`.
fn numbered(path: &Path, counter: u32) -> PathBuf {
    // `file_stem` keeps a leading dot, so `.env` becomes `.env (2)`.
    let mut name = OsString::from(path.file_stem().unwrap_or_default());
    name.push(format!(" ({counter})"));
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name)
}
