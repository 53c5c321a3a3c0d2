use anyhow::Result;
use tracing_subscriber::EnvFilter;

use crate::args::{Args, Command};

pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "error" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

pub fn validate_args(args: &Args) -> Result<()> {
    if let Some(Command::Crawl { limit, .. }) = &args.command {
        if *limit == 0 {
            anyhow::bail!("--limit must be greater than 0");
        }
    }

    Ok(())
}
