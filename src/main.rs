use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgGroup, Command};
use tracing_subscriber::EnvFilter;

use pydocmd::config::absolute_path;
use pydocmd::{CollisionPolicy, Extractor, ExtractorConfig, InputSource};

fn cli() -> Command {
    Command::new("pydocmd")
        .about("Extract Python docstrings into simple Markdown files")
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .help("The directory to output generated files")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value("./"),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Search in the input directory recursively")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("input-dir")
                .short('i')
                .long("input-dir")
                .help("The directory to search *.py files to extract documentation from")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("The file to extract documentation from")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .group(
            ArgGroup::new("input")
                .args(["input-dir", "file"])
                .required(true),
        )
        .arg(
            Arg::new("on-collision")
                .long("on-collision")
                .help("What to do when two modules map to the same output file")
                .value_parser(clap::value_parser!(CollisionPolicy))
                .default_value("error"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v info, -vv debug)")
                .action(ArgAction::Count),
        )
}

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    let input = if let Some(dir) = matches.get_one::<PathBuf>("input-dir") {
        InputSource::Directory(absolute_path(dir).context("Failed to resolve input directory")?)
    } else if let Some(file) = matches.get_one::<PathBuf>("file") {
        InputSource::File(absolute_path(file).context("Failed to resolve input file")?)
    } else {
        anyhow::bail!("either --file or --input-dir is required");
    };

    let output_dir = matches
        .get_one::<PathBuf>("output-dir")
        .map(|dir| absolute_path(dir))
        .transpose()
        .context("Failed to resolve output directory")?
        .unwrap_or_else(|| PathBuf::from("."));

    let policy = matches
        .get_one::<CollisionPolicy>("on-collision")
        .copied()
        .unwrap_or_default();

    let config = ExtractorConfig::new(input, output_dir)
        .recursive(matches.get_flag("recursive"))
        .collision_policy(policy);

    let report = Extractor::new(config)
        .extract()
        .context("Documentation extraction failed")?;

    tracing::info!(files = report.files.len(), "done");
    Ok(())
}
