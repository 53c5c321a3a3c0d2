use crate::aggregate::Analysis;

pub const TOP_DOMAINS: usize = 10;
pub const TOP_WORDS: usize = 20;

/// The full textual report as a plain value, computed once from an
/// [`Analysis`] so rendering needs no further arithmetic and no I/O.
#[derive(Debug, Clone)]
pub struct Report {
    pub total_pages: usize,
    pub total_links: usize,
    pub total_images: usize,
    pub avg_links_per_page: Option<f64>,
    pub avg_images_per_page: Option<f64>,
    pub top_domains: Vec<(String, u32)>,
    pub top_words: Vec<(String, u32)>,
}

impl Report {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        let pages = analysis.summary.total_pages;
        // Averages only exist when at least one page was crawled.
        let average = |total: usize| (pages > 0).then(|| total as f64 / pages as f64);

        Report {
            total_pages: pages,
            total_links: analysis.summary.total_links,
            total_images: analysis.summary.total_images,
            avg_links_per_page: average(analysis.summary.total_links),
            avg_images_per_page: average(analysis.summary.total_images),
            top_domains: analysis.domain_counts.ranked(TOP_DOMAINS),
            top_words: analysis.word_counts.ranked(TOP_WORDS),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Analyzing {} crawled pages...\n", self.total_pages));

        out.push_str("\n=== BASIC STATISTICS ===\n");
        out.push_str(&format!("Total pages crawled: {}\n", self.total_pages));
        out.push_str(&format!("Total links found: {}\n", self.total_links));
        out.push_str(&format!("Total images found: {}\n", self.total_images));
        if let Some(avg) = self.avg_links_per_page {
            out.push_str(&format!("Average links per page: {avg:.2}\n"));
        }
        if let Some(avg) = self.avg_images_per_page {
            out.push_str(&format!("Average images per page: {avg:.2}\n"));
        }

        out.push_str("\n=== TOP DOMAINS ===\n");
        for (domain, count) in &self.top_domains {
            out.push_str(&format!("{domain}: {count} links\n"));
        }

        out.push_str("\n=== COMMON WORDS ===\n");
        for (word, count) in &self.top_words {
            out.push_str(&format!("{word}: {count}\n"));
        }

        out
    }
}
