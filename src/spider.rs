use std::collections::VecDeque;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::{info, warn};
use url::Url;

use crate::record::CrawlRecord;

/// Page text is truncated to this many characters before serialization.
const TEXT_LIMIT: usize = 500;

const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Breadth-first crawl from a seed URL, bounded only by the page limit.
///
/// Every discovered link goes straight back onto the queue: there is no
/// visited set and no depth tracking, so the same page may be fetched more
/// than once. Fetch failures are logged and skipped.
pub async fn crawl(seed: &str, limit: usize) -> Result<Vec<CrawlRecord>> {
    Url::parse(seed).with_context(|| format!("Invalid seed URL '{seed}'"))?;

    let client = Client::builder()
        .user_agent(concat!("crawlstats/", env!("CARGO_PKG_VERSION")))
        .timeout(FETCH_TIMEOUT)
        .build()?;

    let mut queue = VecDeque::from([seed.to_string()]);
    let mut records = Vec::new();

    while records.len() < limit {
        let Some(url) = queue.pop_front() else { break };

        info!(action = "fetch", component = "spider", url = %url, "Crawling page");
        let html = match fetch_page(&client, &url).await {
            Ok(html) => html,
            Err(e) => {
                warn!(action = "skip", component = "spider", url = %url, error = %e, "Failed to fetch page");
                continue;
            }
        };

        let record = extract_page(&url, &html);
        info!(
            action = "extract",
            component = "spider",
            url = %url,
            links = record.links.len(),
            images = record.images.len(),
            "Extracted page content"
        );

        queue.extend(record.links.iter().cloned());
        records.push(record);
    }

    Ok(records)
}

async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.text().await?)
}

/// Pull text, image URLs, and link URLs out of one page.
///
/// Relative `src`/`href` values are resolved against the page URL; ones
/// that still fail to join are dropped.
fn extract_page(url: &str, html: &str) -> CrawlRecord {
    let base = Url::parse(url).ok();
    let document = Html::parse_document(html);

    let text = truncate_chars(&visible_text(&document), TEXT_LIMIT);
    let images = joined_attr_values(&document, &base, "img[src]", "src");
    let links = joined_attr_values(&document, &base, "a[href]", "href");

    CrawlRecord {
        url: url.to_string(),
        text,
        images,
        links,
    }
}

fn visible_text(document: &Html) -> String {
    document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn joined_attr_values(
    document: &Html,
    base: &Option<Url>,
    selector: &str,
    attr: &str,
) -> Vec<String> {
    // Selectors here are compile-time literals.
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .filter_map(|value| match base {
            Some(base) => base.join(value).ok().map(|joined| joined.to_string()),
            None => Url::parse(value).ok().map(|parsed| parsed.to_string()),
        })
        .collect()
}

fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => text[..byte_index].to_string(),
        None => text.to_string(),
    }
}

/// Crawl and serialize the records to one JSON artifact.
pub async fn run(seed: &str, limit: usize, output: &Path) -> Result<()> {
    let start_time = Instant::now();
    println!("Starting crawl from {seed} (limit: {limit} pages)...");

    let records = crawl(seed, limit).await?;

    let file = File::create(output)
        .with_context(|| format!("Failed to create crawl artifact {:?}", output))?;
    serde_json::to_writer(BufWriter::new(file), &records)
        .with_context(|| format!("Failed to serialize crawl artifact {:?}", output))?;

    info!(
        action = "complete",
        component = "spider",
        pages = records.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Crawl complete"
    );
    println!(
        "Crawled {} pages. Artifact written to {:?}",
        records.len(),
        output
    );
    Ok(())
}
