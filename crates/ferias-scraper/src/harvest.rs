//! Page-to-records pipeline: extract, normalize, deduplicate.

use ferias_core::{FeriaRecord, ValidationError};

use crate::dedupe::Deduplicator;
use crate::error::ScraperError;
use crate::extract::PatternExtractor;
use crate::normalize::normalize;

/// Counters for one harvest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    pub pages: usize,
    /// Candidates produced by the extractor.
    pub extracted: usize,
    /// Candidates that passed validation, duplicates included.
    pub normalized: usize,
    pub rejected: usize,
    pub duplicates: usize,
}

#[derive(Debug)]
pub struct Harvest {
    /// Unique records in first-seen order across all pages.
    pub records: Vec<FeriaRecord>,
    /// Every rejected candidate with the reason it was dropped.
    pub rejections: Vec<ValidationError>,
    pub summary: HarvestSummary,
}

/// Runs every page through `extractor`, normalizes each candidate, and
/// deduplicates the survivors across pages.
///
/// Pages are processed in order; within a page, candidates keep document
/// order. Rejected candidates are logged at warn level and collected.
///
/// # Errors
///
/// [`ScraperError::NoRecordsFound`] when no valid record survives.
pub fn harvest<I, P>(extractor: &PatternExtractor, pages: I) -> Result<Harvest, ScraperError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<str>,
{
    let mut summary = HarvestSummary::default();
    let mut dedup = Deduplicator::new();
    let mut rejections = Vec::new();

    for page in pages {
        summary.pages += 1;
        let before = summary.extracted;
        for candidate in extractor.extract(page.as_ref()) {
            summary.extracted += 1;
            let strategy = candidate.strategy;
            match normalize(candidate) {
                Ok(record) => {
                    summary.normalized += 1;
                    dedup.insert(record);
                }
                Err(e) => {
                    tracing::warn!(strategy, error = %e, "rejected feria candidate");
                    rejections.push(e);
                }
            }
        }
        tracing::debug!(
            page = summary.pages,
            candidates = summary.extracted - before,
            "page processed"
        );
    }

    summary.rejected = rejections.len();
    summary.duplicates = dedup.duplicates();

    if dedup.is_empty() {
        return Err(ScraperError::NoRecordsFound {
            pages: summary.pages,
            extracted: summary.extracted,
            rejected: summary.rejected,
        });
    }

    tracing::info!(
        pages = summary.pages,
        extracted = summary.extracted,
        kept = dedup.len(),
        rejected = summary.rejected,
        duplicates = summary.duplicates,
        "harvest complete"
    );

    Ok(Harvest {
        records: dedup.into_records(),
        rejections,
        summary,
    })
}
