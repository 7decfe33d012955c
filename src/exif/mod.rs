//! EXIF tag reading and the CSV tag log.
//!
//! This module provides two main functions:
//!
//! - [`read_exif`] — Read every decodable EXIF tag of an image into an ordered [`ExifTags`] map
//! - [`append_log`] — Append `(image, tag, value)` rows for one image to a CSV log
//!
//! Decoding is done by `nom-exif`. Anything it cannot make sense of (unsupported
//! format, corrupt file, no EXIF block) comes back as an empty map rather than an error.

mod reader;
mod writer;

#[cfg(test)]
pub(crate) mod testdata;

pub use reader::{ExifTags, TagEntry, read_exif};
pub use writer::{LOG_HEADER, append_log};
