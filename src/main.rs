use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use huffsize::{Dictionary, encode_file};
use log::LevelFilter;

/// Reports the size a text file would have once Huffman encoded.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Text file to analyse
    file: PathBuf,

    /// Do not print the generated dictionary
    #[arg(long)]
    no_dictionary: bool,

    /// Log more, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let (huffman, report) = encode_file(&args.file)
        .with_context(|| format!("analyse {}", args.file.display()))?;

    if !args.no_dictionary {
        println!("{}", Dictionary(huffman.codes()));
    }
    println!("\n{report}");

    Ok(())
}
