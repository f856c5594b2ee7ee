mod args;
mod logging;
mod output;
mod run;

use anyhow::Result;
use tracing::error;

use crate::args::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_file.as_deref())?;

    let outcome = match &cli.cmd {
        Commands::Run(args) => run::run_batch(args),
        Commands::Check(args) => run::run_check(args),
    };
    if let Err(err) = &outcome {
        error!(error = %format!("{err:#}"), "run aborted");
    }
    outcome
}
