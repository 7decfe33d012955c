use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;

use super::ExifTags;

/// Header row written once, when the log file is created.
pub const LOG_HEADER: [&str; 3] = ["image", "tag", "value"];

/// Append one `(image, tag, value)` row per tag to the CSV log at `log_path`.
///
/// The log is created with a header if it does not exist yet. Existing content
/// is never truncated, so running the extractor repeatedly keeps growing the log.
pub fn append_log(log_path: &Path, image: &Path, tags: &ExifTags) -> Result<()> {
    let exists = log_path
        .try_exists()
        .with_context(|| format!("Failed to probe {}", log_path.display()))?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(file);

    if !exists {
        writer
            .write_record(LOG_HEADER)
            .with_context(|| format!("Failed to write header to {}", log_path.display()))?;
    }

    let image = image.to_string_lossy().into_owned();
    for entry in tags {
        writer
            .write_record([image.as_str(), entry.name.as_str(), entry.value.as_str()])
            .with_context(|| format!("Failed to write to {}", log_path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to write to {}", log_path.display()))?;

    log::debug!(
        "Appended {} row(s) for {} to {}",
        tags.len(),
        image,
        log_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn tags(pairs: &[(&str, &str)]) -> ExifTags {
        pairs.iter().copied().collect()
    }

    #[test]
    fn creates_log_with_header() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("results.csv");

        append_log(&log, Path::new("a.jpg"), &tags(&[("Image Make", "Canon")])).unwrap();

        assert_eq!(
            fs::read_to_string(&log).unwrap(),
            "image,tag,value\na.jpg,Image Make,Canon\n"
        );
    }

    #[test]
    fn two_images_share_one_header() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("results.csv");

        append_log(
            &log,
            Path::new("a.jpg"),
            &tags(&[("Image Make", "Canon"), ("Image Model", "Canon EOS 40D")]),
        )
        .unwrap();
        append_log(&log, Path::new("b.tiff"), &tags(&[("Image Make", "NIKON")])).unwrap();

        assert_eq!(
            fs::read_to_string(&log).unwrap(),
            "image,tag,value\n\
             a.jpg,Image Make,Canon\n\
             a.jpg,Image Model,Canon EOS 40D\n\
             b.tiff,Image Make,NIKON\n"
        );
    }

    #[test]
    fn existing_file_is_appended_without_header() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("results.csv");
        fs::write(&log, "older,content,here\n").unwrap();

        append_log(&log, Path::new("c.jpg"), &tags(&[("Image Software", "GIMP")])).unwrap();

        assert_eq!(
            fs::read_to_string(&log).unwrap(),
            "older,content,here\nc.jpg,Image Software,GIMP\n"
        );
    }

    #[test]
    fn values_are_quoted_when_needed() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("results.csv");

        append_log(&log, Path::new("d.jpg"), &tags(&[("Image XResolution", "72, 72")])).unwrap();

        let content = fs::read_to_string(&log).unwrap();
        assert!(content.ends_with("d.jpg,Image XResolution,\"72, 72\"\n"));
    }

    #[test]
    fn missing_directory_is_error() {
        let dir = TempDir::new().unwrap();
        let log = dir.path().join("no/such/dir/results.csv");

        assert!(append_log(&log, Path::new("a.jpg"), &tags(&[("A", "1")])).is_err());
    }
}
