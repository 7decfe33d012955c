use anyhow::Result;
use clap::{CommandFactory, Parser, error::ErrorKind};
use std::path::PathBuf;

use exif_csv::config;
use exif_csv::dedupe::{self, DedupeOptions};

#[derive(Parser, Debug)]
#[command(
    name = "csv-dedupe",
    version,
    about = "Remove duplicate rows from a CSV file."
)]
struct Cli {
    /// Input CSV file to dedupe
    #[arg(short, long, value_name = "PATH", required_unless_present = "init")]
    infile: Option<PathBuf>,

    /// Output CSV file. Required unless --inplace is used
    #[arg(short, long, value_name = "PATH")]
    outfile: Option<PathBuf>,

    /// Overwrite the input file with the deduped output. Ignored if -o/--outfile is also given
    #[arg(long)]
    inplace: bool,

    /// Suppress the stats display
    #[arg(short, long)]
    quiet: bool,

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

    let Some(infile) = cli.infile else {
        Cli::command()
            .error(ErrorKind::MissingRequiredArgument, "-i/--infile is required")
            .exit();
    };

    let choice = match dedupe::select_outfile(&infile, cli.outfile.as_deref(), cli.inplace) {
        Ok(choice) => choice,
        Err(e) => Cli::command()
            .error(ErrorKind::MissingRequiredArgument, e.to_string())
            .exit(),
    };
    if choice.inplace_ignored {
        println!("{}", dedupe::INPLACE_IGNORED);
    }
    let outfile = choice.path;

    let config = config::Config::load(cli.config.as_deref())?;
    let options = DedupeOptions {
        rename_start: config.dedupe.rename_start,
    };

    let report = dedupe::dedupe_csv(&infile, &outfile, &options)?;

    // Always reported: the resolver may have picked a different name.
    println!("{} written.", report.output.display());
    if !cli.quiet && config.dedupe.show_stats {
        println!("{} duplicates removed.", report.duplicates);
    }

    Ok(())
}
