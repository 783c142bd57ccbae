use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use tenc::{Encoding, Recoder};

#[derive(Debug, Parser)]
#[clap(version, about)]
pub struct Args {
    #[clap(help = "A text file to re-encode", value_name = "FILE")]
    pub input: PathBuf,
    #[clap(
        short,
        long,
        default_value = "utf-8",
        help = "Target encoding. One of: utf-8, utf-16, utf-32, ascii, latin-1, cp1252, \
                iso-8859-1, windows-1252, big5, gb2312, shift_jis",
        value_name = "NAME"
    )]
    pub encoding: Encoding,
    #[clap(
        short,
        long,
        help = "Saves the result to FILE. If no path is specified, the output is written \
                to '<input stem>_encoded<ext>' next to the input",
        value_name = "FILE"
    )]
    pub output: Option<PathBuf>,
    #[clap(
        short,
        long,
        action = ArgAction::SetTrue,
        default_value = "false",
        help = "Print progress lines to standard output"
    )]
    pub verbose: bool,
}

/// Initializes logging for the CLI. Progress lines go to standard output:
/// info level with `--verbose`, warnings only otherwise.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .target(env_logger::Target::Stdout)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

/// Runs a re-encoding request parsed from the command line and prints the
/// path of the written file.
pub fn run(args: &Args) -> anyhow::Result<()> {
    log::info!("input file: '{}'", args.input.display());
    log::info!("target encoding: {}", args.encoding);
    if let Some(output) = &args.output {
        log::info!("output file: '{}'", output.display());
    }

    let recoder = Recoder::new();
    if log::log_enabled!(log::Level::Info) {
        let detected = recoder.detect(&args.input)?;
        log::info!(
            "detected source encoding: {} (confidence {:.2})",
            detected.name,
            detected.confidence
        );
    }
    let output = recoder.encode_file(&args.input, args.output.as_deref(), args.encoding)?;
    println!("File encoded successfully: {}", output.display());
    Ok(())
}
