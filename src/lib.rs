//! # exif-csv
//!
//! Two small OSINT helpers built on one library:
//!
//! - `csv-dedupe` — removes duplicate rows from a CSV file, keeping the header and the
//!   first occurrence of every distinct row in the original order.
//! - `exif-extractor` — reads EXIF tags from images and prints them to the console,
//!   appends them to a CSV log, or both.
//!
//! ## Deduplicating a CSV file
//!
//! ```rust,no_run
//! use exif_csv::dedupe::{dedupe_csv, DedupeOptions};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let report = dedupe_csv(
//!         Path::new("contacts.csv"),
//!         Path::new("contacts_clean.csv"),
//!         &DedupeOptions::default(),
//!     )?;
//!
//!     // The output path may differ from the requested one if that file already existed.
//!     println!("{} written.", report.output.display());
//!     println!("{} duplicates removed.", report.duplicates);
//!     Ok(())
//! }
//! ```
//!
//! ## Extracting EXIF tags
//!
//! ```rust,no_run
//! use exif_csv::exif::{append_log, read_exif};
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let image = Path::new("Canon_40D.jpg");
//!     let tags = read_exif(image)?;
//!
//!     if tags.is_empty() {
//!         println!("No EXIF metadata found!");
//!     } else {
//!         append_log(Path::new("results.csv"), image, &tags)?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`config`] — Optional JSON configuration shared by both binaries
//! - [`dedupe`] — CSV row deduplication
//! - [`exif`] — EXIF tag reading and the CSV tag log
//! - [`paths`] — Non-destructive output path selection (`name (2).ext`, ...)
//! - [`pipeline`] — Per-image extraction flow used by `exif-extractor`

pub mod config;
pub mod dedupe;
pub mod exif;
pub mod paths;
pub mod pipeline;
