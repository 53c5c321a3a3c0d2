use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default location of the crawl artifact, shared by both subcommands.
pub const DEFAULT_ARTIFACT: &str = "output.json";

const DEFAULT_SEED: &str = "https://en.wikipedia.org/wiki/Main_Page";

#[derive(Parser, Debug)]
#[command(
    name = "crawlstats",
    about = "Crawl the web from a seed URL and report link/word frequency statistics",
    version,
    long_about = None
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Crawl pages breadth-first from a seed URL and write the JSON artifact
    Crawl {
        /// Seed URL to start crawling from
        #[arg(short, long, default_value = DEFAULT_SEED)]
        seed: String,

        /// Maximum number of pages to fetch
        #[arg(short, long, default_value_t = 50)]
        limit: usize,

        /// Path of the JSON artifact to write
        #[arg(short, long, default_value = DEFAULT_ARTIFACT)]
        output: PathBuf,
    },
    /// Analyze a crawl artifact and write the report and charts (default)
    Analyze {
        /// Path of the crawl artifact to analyze
        #[arg(default_value = DEFAULT_ARTIFACT)]
        input: PathBuf,
    },
}
