//! CSV row deduplication.
//!
//! Rows are compared as whole field tuples: two rows are duplicates only if every
//! field is byte-for-byte equal. The header row is always kept, and the first
//! occurrence of each distinct data row is written in its original position.

use anyhow::{Context, Result, bail};
use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::paths::{self, DEFAULT_RENAME_START};

/// Options for [`dedupe_csv`].
#[derive(Debug, Clone)]
pub struct DedupeOptions {
    /// First counter tried when the output path is taken (see [`paths::resolve_from`]).
    pub rename_start: u32,
}

impl Default for DedupeOptions {
    fn default() -> Self {
        Self {
            rename_start: DEFAULT_RENAME_START,
        }
    }
}

/// Outcome of a [`dedupe_csv`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DedupeReport {
    /// Where the result was actually written. Differs from the requested outfile
    /// when that path already existed.
    pub output: PathBuf,
    /// Rows written, header included.
    pub rows_written: usize,
    /// Data rows dropped as duplicates.
    pub duplicates: usize,
}

/// Remove duplicate rows from `infile` and write the result.
///
/// When `outfile` is the same path as `infile` the input is overwritten (in-place
/// mode). Otherwise an existing `outfile` is never touched: the result goes to the
/// first free `outfile (n).ext` instead, and [`DedupeReport::output`] says where.
///
/// Fails if `infile` is missing, unreadable, not valid CSV/UTF-8, or empty (no header).
pub fn dedupe_csv(infile: &Path, outfile: &Path, options: &DedupeOptions) -> Result<DedupeReport> {
    let (rows, duplicates) = read_distinct_rows(infile)?;

    let output = if infile == outfile {
        log::debug!("Writing {} in place", infile.display());
        outfile.to_path_buf()
    } else {
        paths::resolve_from(outfile, options.rename_start)
            .with_context(|| format!("Failed to probe output path {}", outfile.display()))?
    };

    write_rows(&output, &rows)?;

    Ok(DedupeReport {
        output,
        rows_written: rows.len(),
        duplicates,
    })
}

/// Read `infile` fully, returning the header plus first-occurrence rows and the
/// number of duplicates dropped. The file is closed before returning.
///
/// A blank line is a row with no fields: it takes part in deduplication like any
/// other row instead of being skipped.
fn read_distinct_rows(infile: &Path) -> Result<(Vec<Vec<String>>, usize)> {
    let text = std::fs::read_to_string(infile)
        .with_context(|| format!("Failed to read {}", infile.display()))?;

    let mut records = split_records(&text).into_iter();

    let header = match records.next() {
        Some(line) => parse_record(line)
            .with_context(|| format!("Failed to read header of {}", infile.display()))?,
        None => bail!("{} is empty: no header row to read", infile.display()),
    };

    let mut seen: HashSet<Vec<String>> = HashSet::new();
    let mut rows = vec![header];
    let mut duplicates = 0;

    for line in records {
        let fields =
            parse_record(line).with_context(|| format!("Failed to read {}", infile.display()))?;

        if seen.contains(&fields) {
            duplicates += 1;
        } else {
            seen.insert(fields.clone());
            rows.push(fields);
        }
    }

    log::debug!(
        "{}: {} distinct rows, {} duplicates",
        infile.display(),
        rows.len() - 1,
        duplicates
    );

    Ok((rows, duplicates))
}

/// Split CSV text into the raw text of each record, without line terminators.
///
/// Newlines inside quoted fields stay part of their record. A trailing newline
/// does not start another record.
fn split_records(text: &str) -> Vec<&str> {
    let mut records = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;

    for (i, b) in text.bytes().enumerate() {
        match b {
            // `""` escapes toggle twice, so the state stays right.
            b'"' => in_quotes = !in_quotes,
            b'\n' if !in_quotes => {
                records.push(trim_cr(&text[start..i]));
                start = i + 1;
            }
            _ => {}
        }
    }
    if start < text.len() {
        records.push(trim_cr(&text[start..]));
    }

    records
}

fn trim_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

/// Parse the text of one record. Blank text is the empty row.
fn parse_record(line: &str) -> Result<Vec<String>> {
    if line.is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());
    let mut record = csv::StringRecord::new();
    reader.read_record(&mut record)?;

    Ok(record.iter().map(str::to_owned).collect())
}

/// Write `rows` to `path`, replacing anything already there.
fn write_rows(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    for row in rows {
        if row.is_empty() {
            // The csv writer has no encoding for a record without fields.
            writer.flush()?;
            writer
                .get_ref()
                .write_all(b"\n")
                .with_context(|| format!("Failed to write {}", path.display()))?;
            continue;
        }
        writer
            .write_record(row)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}

/// Printed when both `--inplace` and `-o/--outfile` are given.
pub const INPLACE_IGNORED: &str = "-o/--outfile detected with --inplace. Ignoring --inplace";

/// Output path chosen by [`select_outfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutfileChoice {
    pub path: PathBuf,
    /// `--inplace` was given but overridden by an explicit outfile.
    pub inplace_ignored: bool,
}

/// Pick the output path from the `--infile`, `--outfile` and `--inplace` flags.
///
/// An explicit outfile always wins over `--inplace`, since that is the
/// non-destructive choice. With neither, there is nowhere to write.
pub fn select_outfile(infile: &Path, outfile: Option<&Path>, inplace: bool) -> Result<OutfileChoice> {
    let (path, inplace_ignored) = match (outfile, inplace) {
        (Some(out), true) => (out.to_path_buf(), true),
        (Some(out), false) => (out.to_path_buf(), false),
        (None, true) => (infile.to_path_buf(), false),
        (None, false) => bail!("-o/--outfile required when not using --inplace."),
    };
    Ok(OutfileChoice {
        path,
        inplace_ignored,
    })
}
