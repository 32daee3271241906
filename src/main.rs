//! CLI entry point for the random carpet generator

use clap::Parser;
use randompicks::io::cli::{CarpetProcessor, Cli};

fn main() -> randompicks::Result<()> {
    let cli = Cli::parse();
    let mut processor = CarpetProcessor::new(cli);
    processor.process()
}
