//! CLI entry point for the four-way grid partitioning tool

use clap::Parser;
use quadsplit::io::cli::{Cli, Runner};
use quadsplit::io::logging::init_tracing;

fn main() -> quadsplit::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    Runner::new(cli).run()
}
