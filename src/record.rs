use serde::{Deserialize, Serialize};

/// One crawled page exactly as the spider serializes it into the artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlRecord {
    pub url: String,
    pub text: String,
    pub images: Vec<String>,
    pub links: Vec<String>,
}

/// One page-like unit after normalization, ready for aggregation.
///
/// Every field is best-effort: a missing or type-mismatched field in the
/// input degrades to `None` / empty / zero instead of failing the record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageRecord {
    pub text: Option<String>,
    pub links: Vec<String>,
    pub image_count: usize,
}
