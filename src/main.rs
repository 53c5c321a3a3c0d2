use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing::error;

use crawlstats::analyzer;
use crawlstats::args::{Args, Command, DEFAULT_ARTIFACT};
use crawlstats::spider;
use crawlstats::utils;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    utils::setup_logging(args.verbose);
    utils::validate_args(&args)?;

    let outcome = match args.command {
        Some(Command::Crawl {
            seed,
            limit,
            output,
        }) => spider::run(&seed, limit, &output).await,
        Some(Command::Analyze { input }) => analyzer::analyze_crawl_data(&input),
        None => analyzer::analyze_crawl_data(Path::new(DEFAULT_ARTIFACT)),
    };

    match outcome {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}
