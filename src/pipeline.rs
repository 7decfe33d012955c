use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::ExtractorConfig;
use crate::exif::{self, ExifTags};

/// Message printed for an image the decoder found nothing in.
pub const NO_METADATA: &str = "No EXIF metadata found!";

/// How `exif-extractor` handles each image.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// CSV log to append tags to. `None` means console only.
    pub output: Option<PathBuf>,
    /// Print tags to the console even when logging to a file.
    pub show: bool,
    /// Width of the right-aligned tag column.
    pub tag_width: usize,
}

impl ExtractOptions {
    /// Build options from the `-o` and `-s` flags.
    ///
    /// `output` mirrors the optional-value flag: `None` when `-o` is absent,
    /// `Some(None)` for a bare `-o` (the configured default log), and
    /// `Some(Some(path))` for `-o path`.
    pub fn from_flags(output: Option<Option<PathBuf>>, show: bool, config: &ExtractorConfig) -> Self {
        let output = output.map(|o| o.unwrap_or_else(|| PathBuf::from(&config.default_output)));
        Self {
            output,
            show,
            tag_width: config.tag_width,
        }
    }

    /// Tags go to the console unless they are only being logged to a file.
    pub fn should_display(&self) -> bool {
        self.output.is_none() || self.show
    }
}

/// What happened to a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResult {
    pub path: PathBuf,
    pub tag_count: usize,
    /// Rows were appended to the CSV log.
    pub logged: bool,
    /// Tags were printed to the console.
    pub displayed: bool,
}

/// Read the tags of `path` and report them according to `options`.
///
/// Fails only if the image cannot be opened or the log cannot be written.
pub fn process_image(path: &Path, options: &ExtractOptions, out: &mut impl Write) -> Result<ProcessResult> {
    writeln!(out, "\n ===== Processing {} =====", path.display())?;
    let tags = exif::read_exif(path)?;
    report_tags(path, &tags, options, out)
}

/// Report already decoded tags: log them, print them, or say there are none.
///
/// An empty map prints [`NO_METADATA`] and never touches the log.
pub fn report_tags(
    path: &Path,
    tags: &ExifTags,
    options: &ExtractOptions,
    out: &mut impl Write,
) -> Result<ProcessResult> {
    let mut result = ProcessResult {
        path: path.to_path_buf(),
        tag_count: tags.len(),
        logged: false,
        displayed: false,
    };

    if tags.is_empty() {
        writeln!(out, "{NO_METADATA}")?;
        return Ok(result);
    }

    if let Some(ref log_path) = options.output {
        exif::append_log(log_path, path, tags)?;
        result.logged = true;
    }

    if options.should_display() {
        for entry in tags {
            writeln!(out, "{}", format_row(&entry.name, &entry.value, options.tag_width))?;
        }
        result.displayed = true;
    }

    Ok(result)
}

/// One console line: tag name right-aligned to `width`, then the value.
pub fn format_row(name: &str, value: &str, width: usize) -> String {
    format!("{name:>width$} : {value}")
}
