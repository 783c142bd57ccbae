use clap::Parser;

use tenc_cli::{init_logging, run, Args};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    run(&args)
}
