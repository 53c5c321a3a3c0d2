pub mod aggregate;
pub mod analyzer;
pub mod args;
pub mod chart;
pub mod normalize;
pub mod record;
pub mod report;
pub mod spider;
pub mod utils;

pub use aggregate::{Analysis, FrequencyTable, Summary};
pub use analyzer::analyze_crawl_data;
pub use args::Args;
pub use record::{CrawlRecord, PageRecord};
pub use report::Report;
