use std::path::PathBuf;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use imagefilters::{run, Filter, ImageFilterError, RunConfig, DEFAULT_OPERATION};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "imageprocessing")]
#[command(version, about = "Apply a pixel filter to an image", long_about = None)]
struct Cli {
    /// Filename of the image to be loaded and modified
    #[arg(long, value_name = "FILE")]
    img: Option<PathBuf>,

    /// Output format. Possible options are png or jpg
    #[arg(long, value_name = "FORMAT")]
    fmt: Option<String>,

    /// Output filename without trailing .png or .jpeg
    #[arg(long, value_name = "NAME")]
    out: Option<String>,

    /// Filter operation to apply
    #[arg(long, value_name = "OPERATION", default_value = DEFAULT_OPERATION)]
    op: String,

    /// List the known operations and exit
    #[arg(long)]
    list: bool,
}

fn init_tracing() {
    // RUST_LOG sets the level, info if unset
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() -> Result<()> {
    Cli::command().print_help()?;
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            eprintln!("{e}");
            return print_usage();
        }
    };

    if cli.list {
        for name in Filter::names() {
            println!("{name}");
        }
        return Ok(());
    }

    // missing or invalid required flags are a no-op exit, not a failure
    let (Some(img), Some(fmt), Some(out)) = (cli.img, cli.fmt, cli.out) else {
        return print_usage();
    };

    let config = match RunConfig::new(img, &fmt, out, &cli.op) {
        Ok(config) => config,
        Err(ImageFilterError::MissingArgument(_) | ImageFilterError::InvalidOutputFormat(_)) => {
            return print_usage()
        }
        Err(e) => {
            error!("{e}");
            return Err(e.into());
        }
    };

    info!("applying {} to {}", config.filter, config.input.display());
    match run(&config) {
        Ok(path) => {
            info!("wrote {}", path.display());
            Ok(())
        }
        Err(e) => {
            error!("{e}");
            Err(e.into())
        }
    }
}
