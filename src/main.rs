// Entrypoint for the CLI application.
// - Keeps `main` small: parse flags, set up logging, hand over to `Cli::run`.
// - Returns `anyhow::Result`, so any failure prints its cause chain and
//   exits with status 1.

use clap::Parser;
use kth_cover_cli::{cli::Cli, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    cli.run()
}
