use std::collections::HashMap;
use std::time::Instant;

use tracing::info;
use url::Url;

use crate::record::PageRecord;

/// Tokens this short carry no signal and are dropped from word counts.
pub const MIN_WORD_CHARS: usize = 4;

/// Occurrence counts with explicit first-seen ordering.
///
/// Ranking ties are broken by the order keys were first inserted, so the
/// same input always produces the same top-N listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u32>,
    order: Vec<String>,
}

impl FrequencyTable {
    pub fn increment(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_string(), 1);
                self.order.push(key.to_string());
            }
        }
    }

    pub fn get(&self, key: &str) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Top `n` entries, count descending, first-seen order on ties.
    pub fn ranked(&self, n: usize) -> Vec<(String, u32)> {
        let mut entries: Vec<(usize, &String)> = self.order.iter().enumerate().collect();
        entries.sort_by(|(ia, ka), (ib, kb)| {
            self.counts[*kb].cmp(&self.counts[*ka]).then(ia.cmp(ib))
        });
        entries
            .into_iter()
            .take(n)
            .map(|(_, key)| (key.clone(), self.counts[key]))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_pages: usize,
    pub total_links: usize,
    pub total_images: usize,
}

/// Everything computed from one pass over the normalized records.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub summary: Summary,
    pub domain_counts: FrequencyTable,
    pub word_counts: FrequencyTable,
}

/// Authority (host, plus `:port` when present) of a link.
///
/// A link that does not parse as an absolute URL, or parses without a host,
/// yields the empty string; it is still counted so the domain table covers
/// every non-empty link.
pub fn link_authority(link: &str) -> String {
    match Url::parse(link) {
        Ok(url) => match url.host_str() {
            Some(host) => match url.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_string(),
            },
            None => String::new(),
        },
        Err(_) => String::new(),
    }
}

pub fn analyze_records(records: &[PageRecord]) -> Analysis {
    let start_time = Instant::now();
    let mut analysis = Analysis {
        summary: Summary {
            total_pages: records.len(),
            ..Summary::default()
        },
        ..Analysis::default()
    };

    for record in records {
        analysis.summary.total_links += record.links.len();
        analysis.summary.total_images += record.image_count;

        for link in &record.links {
            if link.is_empty() {
                continue;
            }
            analysis.domain_counts.increment(&link_authority(link));
        }
    }

    let all_text: Vec<&str> = records.iter().filter_map(|r| r.text.as_deref()).collect();
    for word in all_text.join(" ").to_lowercase().split_whitespace() {
        if word.chars().count() >= MIN_WORD_CHARS {
            analysis.word_counts.increment(word);
        }
    }

    info!(
        component = "aggregator",
        pages = analysis.summary.total_pages,
        links = analysis.summary.total_links,
        images = analysis.summary.total_images,
        domains = analysis.domain_counts.len(),
        words = analysis.word_counts.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Aggregation complete"
    );
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(text: Option<&str>, links: &[&str], image_count: usize) -> PageRecord {
        PageRecord {
            text: text.map(str::to_string),
            links: links.iter().map(|s| s.to_string()).collect(),
            image_count,
        }
    }

    #[test]
    fn totals_sum_over_records() {
        let records = vec![
            page(Some("Hello world test"), &["http://a.com/x", "http://a.com/y"], 1),
            page(None, &["http://b.com/z"], 2),
        ];
        let analysis = analyze_records(&records);
        assert_eq!(analysis.summary.total_pages, 2);
        assert_eq!(analysis.summary.total_links, 3);
        assert_eq!(analysis.summary.total_images, 3);
    }

    #[test]
    fn scenario_a_counts() {
        let records = vec![page(
            Some("Hello world test"),
            &["http://a.com/x", "http://a.com/y"],
            1,
        )];
        let analysis = analyze_records(&records);
        assert_eq!(analysis.summary.total_pages, 1);
        assert_eq!(analysis.summary.total_links, 2);
        assert_eq!(analysis.summary.total_images, 1);
        assert_eq!(analysis.domain_counts.get("a.com"), 2);
        assert_eq!(analysis.domain_counts.len(), 1);
        assert_eq!(analysis.word_counts.get("hello"), 1);
        assert_eq!(analysis.word_counts.get("world"), 1);
        assert_eq!(analysis.word_counts.get("test"), 1);
        assert_eq!(analysis.word_counts.len(), 3);
    }

    #[test]
    fn authority_keeps_explicit_port() {
        assert_eq!(link_authority("http://example.com:8080/p"), "example.com:8080");
        assert_eq!(link_authority("https://example.com/p"), "example.com");
    }

    #[test]
    fn unparsable_link_counts_empty_authority() {
        let records = vec![page(None, &["/relative/path", "not a url"], 0)];
        let analysis = analyze_records(&records);
        assert_eq!(analysis.summary.total_links, 2);
        assert_eq!(analysis.domain_counts.get(""), 2);
    }

    #[test]
    fn empty_link_string_contributes_nothing() {
        let records = vec![page(None, &[""], 0)];
        let analysis = analyze_records(&records);
        assert_eq!(analysis.summary.total_links, 1);
        assert!(analysis.domain_counts.is_empty());
    }

    #[test]
    fn short_words_are_filtered() {
        let records = vec![page(Some("a to the word words it of"), &[], 0)];
        let analysis = analyze_records(&records);
        assert_eq!(analysis.word_counts.len(), 2);
        assert_eq!(analysis.word_counts.get("word"), 1);
        assert_eq!(analysis.word_counts.get("words"), 1);
        assert_eq!(analysis.word_counts.get("the"), 0);
    }

    #[test]
    fn words_are_lowercased_and_counted_across_pages() {
        let records = vec![
            page(Some("Rust RUST"), &[], 0),
            page(Some("rust"), &[], 0),
        ];
        let analysis = analyze_records(&records);
        assert_eq!(analysis.word_counts.get("rust"), 3);
    }

    #[test]
    fn ranked_orders_by_count_then_first_seen() {
        let mut table = FrequencyTable::default();
        for key in ["b.com", "a.com", "c.com", "a.com", "c.com"] {
            table.increment(key);
        }
        // a.com and c.com both have 2; b.com was seen first among the ties at 1.
        assert_eq!(
            table.ranked(10),
            vec![
                ("a.com".to_string(), 2),
                ("c.com".to_string(), 2),
                ("b.com".to_string(), 1),
            ]
        );
    }

    #[test]
    fn ranked_truncates_to_n() {
        let mut table = FrequencyTable::default();
        for key in ["a", "b", "c", "d"] {
            table.increment(key);
        }
        assert_eq!(table.ranked(2).len(), 2);
    }

    #[test]
    fn empty_records_yield_empty_analysis() {
        let analysis = analyze_records(&[]);
        assert_eq!(analysis.summary.total_pages, 0);
        assert!(analysis.domain_counts.is_empty());
        assert!(analysis.word_counts.is_empty());
    }

    #[test]
    fn analysis_is_deterministic() {
        let records = vec![
            page(Some("alpha beta alpha"), &["http://a.com/1", "http://b.com/2"], 0),
            page(Some("beta gamma"), &["http://b.com/3"], 1),
        ];
        let first = analyze_records(&records);
        let second = analyze_records(&records);
        assert_eq!(first.summary, second.summary);
        assert_eq!(first.domain_counts.ranked(10), second.domain_counts.ranked(10));
        assert_eq!(first.word_counts.ranked(20), second.word_counts.ranked(20));
    }
}
