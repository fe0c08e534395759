//! CLI entry point for the socket-matching tile solver

use clap::Parser;
use wavetile::io::cli::{Cli, FileProcessor};
use wavetile::io::logging;

fn main() -> wavetile::Result<()> {
    let cli = Cli::parse();
    logging::init(logging::level_for(cli.quiet, cli.debug));
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
