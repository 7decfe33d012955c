use anyhow::{Context, Result};
use nom_exif::{ExifIter, MediaParser, MediaSource};
use std::fs::File;
use std::path::Path;

/// A single decoded tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagEntry {
    pub name: String,
    pub value: String,
}

/// EXIF tags of one image, in the order the decoder produced them.
///
/// Names are unique: inserting a name that is already present replaces its value
/// but keeps the original position. An empty map means no metadata was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExifTags {
    entries: Vec<TagEntry>,
}

impl ExifTags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.value = value,
            None => self.entries.push(TagEntry { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagEntry> {
        self.entries.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for ExifTags {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut tags = Self::new();
        for (name, value) in iter {
            tags.insert(name, value);
        }
        tags
    }
}

impl<'a> IntoIterator for &'a ExifTags {
    type Item = &'a TagEntry;
    type IntoIter = std::slice::Iter<'a, TagEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Read all EXIF tags from an image file.
///
/// Only failing to open the file is an error. A file the decoder rejects
/// (unsupported format, corrupt data, no EXIF block) yields an empty map, so
/// "valid image without tags" and "unreadable image" look the same to callers.
pub fn read_exif(path: &Path) -> Result<ExifTags> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;

    let ms = match MediaSource::file(file) {
        Ok(ms) => ms,
        Err(e) => {
            log::debug!("Unsupported media {}: {e}", path.display());
            return Ok(ExifTags::default());
        }
    };

    let mut parser = MediaParser::new();
    let iter: ExifIter = match parser.parse(ms) {
        Ok(iter) => iter,
        Err(e) => {
            log::debug!("No EXIF data found in {}: {e}", path.display());
            return Ok(ExifTags::default());
        }
    };

    let mut tags = ExifTags::new();
    for entry in iter {
        let Some(value) = entry.get_value() else {
            log::debug!(
                "Skipping undecodable tag 0x{:04x} in {}",
                entry.tag_code(),
                path.display()
            );
            continue;
        };

        let name = match entry.tag() {
            Some(tag) => format!("{tag:?}"),
            None => format!("Tag0x{:04X}", entry.tag_code()),
        };
        tags.insert(
            format!("{} {name}", tag_group(entry.ifd_index(), entry.tag_code(), &name)),
            clean_value(&value.to_string()),
        );
    }

    log::debug!("{} tag(s) read from {}", tags.len(), path.display());
    Ok(tags)
}

/// Tag codes stored in the Exif sub-IFD rather than IFD0 itself.
const EXIF_SUB_IFD: &[(u16, u16)] = &[
    (0x829A, 0x829D), // ExposureTime, FNumber
    (0x8822, 0x8824), // ExposureProgram .. SpectralSensitivity
    (0x8827, 0x8835), // ISO .. ISOSpeedLatitudeZZZ
    (0x9000, 0x9292), // ExifVersion .. SubSecTimeDigitized
    (0xA000, 0xA5FF), // FlashpixVersion .. Gamma
];

/// Group prefix used in tag names, named after the directory the tag lives in.
///
/// The decoder reports sub-IFD entries under their parent IFD index, so Exif and
/// GPS tags of IFD0 are told apart by tag code.
fn tag_group(ifd_index: usize, code: u16, name: &str) -> String {
    match ifd_index {
        0 if code <= 0x001F && name.starts_with("GPS") => "GPS".to_string(),
        0 if EXIF_SUB_IFD
            .iter()
            .any(|&(lo, hi)| (lo..=hi).contains(&code)) =>
        {
            "EXIF".to_string()
        }
        0 => "Image".to_string(),
        1 => "Thumbnail".to_string(),
        n => format!("IFD{n}"),
    }
}

/// Strip padding the decoder leaves around string values.
fn clean_value(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\0')
        .to_string()
}
