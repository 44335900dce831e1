//! `scrape` command: URLs in, normalized ferias JSON out.

use std::collections::BTreeMap;
use std::path::Path;

use ferias_core::{AppConfig, Day, FeriaRecord};
use ferias_scraper::{harvest, is_valid_page_url, PageFetcher, PatternExtractor};

use crate::{progress, store};

/// Page fetches get a small retry budget; geocoding has its own settings.
const FETCH_MAX_RETRIES: u32 = 2;
const FETCH_BACKOFF_BASE_SECS: u64 = 1;

/// Merges `--url` values with the lines of `--url-file` and drops anything
/// that is not an absolute http(s) URL.
///
/// # Errors
///
/// Returns an error if the URL file cannot be read or no valid URL remains.
pub(crate) fn collect_urls(urls: &[String], url_file: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let mut all: Vec<String> = urls.iter().map(|u| u.trim().to_owned()).collect();

    if let Some(path) = url_file {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read URL file {}: {e}", path.display()))?;
        all.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty() && !l.starts_with('#'))
                .map(str::to_owned),
        );
    }

    if all.is_empty() {
        anyhow::bail!("no URLs provided; use --url or --url-file");
    }

    let (valid, invalid): (Vec<String>, Vec<String>) =
        all.into_iter().partition(|u| is_valid_page_url(u));
    for url in &invalid {
        tracing::warn!(url = %url, "skipping invalid URL");
    }
    if valid.is_empty() {
        anyhow::bail!("none of the {} URL(s) provided is valid", invalid.len());
    }

    Ok(valid)
}

/// Fetches `urls`, extracts and deduplicates ferias, writes them to `output`,
/// and prints a per-day summary.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built, every page fails to
/// download, no valid feria is found, or the output cannot be written.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    urls: &[String],
    output: &Path,
) -> anyhow::Result<Vec<FeriaRecord>> {
    let fetcher = PageFetcher::new(
        config.request_timeout_secs,
        &config.user_agent,
        FETCH_MAX_RETRIES,
        FETCH_BACKOFF_BASE_SECS,
    )
    .map_err(|e| anyhow::anyhow!("failed to build page fetcher: {e}"))?;

    tracing::info!(count = urls.len(), "scraping pages");
    let pb = progress::spinner(format!("fetching {} page(s)", urls.len()));
    let pages = fetcher.fetch_all(urls, config.page_delay_ms).await;
    pb.finish_and_clear();
    let pages = pages?;

    let extractor = PatternExtractor::new();
    let result = harvest(&extractor, &pages)?;

    store::write_json(output, &result.records)?;
    println!(
        "saved {} ferias to {} ({} rejected, {} duplicates)",
        result.records.len(),
        output.display(),
        result.summary.rejected,
        result.summary.duplicates
    );
    print_day_summary(&result.records);

    Ok(result.records)
}

pub(crate) fn count_by_day(records: &[FeriaRecord]) -> BTreeMap<Day, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.day).or_insert(0) += 1;
    }
    counts
}

fn print_day_summary(records: &[FeriaRecord]) {
    for (day, count) in count_by_day(records) {
        println!("  {:<10} {count}", day.as_str());
    }
}
