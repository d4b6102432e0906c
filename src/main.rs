use clap::Parser;

use imagemapper::cli::{run, Cli};
use imagemapper::init_logging;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;

    run(cli)
}
