use anyhow::Result;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use exif_csv::config;
use exif_csv::pipeline::{self, ExtractOptions};

#[derive(Parser, Debug)]
#[command(
    name = "exif-extractor",
    version,
    about = "Extract EXIF metadata from images."
)]
struct Cli {
    /// One or more image files to process
    #[arg(
        short,
        long,
        value_name = "PATH",
        num_args = 1..,
        required_unless_present = "init"
    )]
    images: Vec<PathBuf>,

    /// Display the extracted data on the console. Default: on when not writing an output file (-o)
    #[arg(short, long)]
    show: bool,

    /// Optional CSV output file, `results.csv` if no path is given. Always appends, never overwrites
    #[arg(short, long, value_name = "PATH", num_args = 0..=1)]
    output: Option<Option<PathBuf>>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let path = config::Config::default().save(cli.config.as_deref())?;
        println!("Default config written to {}", path.display());
        return Ok(());
    }

    let config = config::Config::load(cli.config.as_deref())?;
    let options = ExtractOptions::from_flags(cli.output, cli.show, &config.extractor);

    if let Some(ref log_path) = options.output {
        log::debug!("Appending tags to {}", log_path.display());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let total = cli.images.len();
    let mut with_tags = 0;

    for image_path in &cli.images {
        let result = pipeline::process_image(image_path, &options, &mut out)?;
        if result.tag_count > 0 {
            with_tags += 1;
        }
    }
    out.flush()?;

    log::debug!("Done: {with_tags} of {total} image(s) had EXIF metadata");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("exif-extractor").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_absent() {
        let cli = parse(&["-i", "a.jpg"]);
        assert_eq!(cli.output, None);
        assert!(!cli.show);
    }

    #[test]
    fn output_bare() {
        let cli = parse(&["-i", "a.jpg", "-o"]);
        assert_eq!(cli.output, Some(None));
    }

    #[test]
    fn output_with_path() {
        let cli = parse(&["-o", "tags.csv", "-i", "a.jpg"]);
        assert_eq!(cli.output, Some(Some(PathBuf::from("tags.csv"))));
    }

    #[test]
    fn bare_output_followed_by_show() {
        let cli = parse(&["-i", "a.jpg", "-o", "-s"]);
        assert_eq!(cli.output, Some(None));
        assert!(cli.show);
    }

    #[test]
    fn several_images_before_output() {
        let cli = parse(&["-i", "BSG1.tiff", "IMG_5195.HEIC", "Canon_40D.jpg", "-o", "output.csv"]);
        assert_eq!(cli.images.len(), 3);
        assert_eq!(cli.output, Some(Some(PathBuf::from("output.csv"))));
    }

    #[test]
    fn images_are_required() {
        let args = ["exif-extractor", "-s"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
