//! Candidate extraction from municipal feria pages.
//!
//! A page is split into segments (see [`Segment`]) and every segment is
//! offered to an ordered list of [`Matcher`]s. The first matcher that finds
//! anything wins; the rest are not consulted for that segment. Headings
//! between segments set the barrio for candidates that do not name one.

mod phrase;
mod segment;
mod structural;

use std::sync::LazyLock;

use ferias_core::FeriaCandidate;

pub use segment::Segment;

use phrase::PhraseMatcher;
use segment::{split_page, Block};
use structural::StructuralMatcher;

/// One extraction strategy.
pub trait Matcher {
    /// Strategy tag recorded on every candidate this matcher produces.
    fn name(&self) -> &'static str;

    /// Every candidate found in `segment`, or an empty vec when the segment
    /// does not look like anything this strategy understands.
    fn try_extract(&self, segment: &Segment) -> Vec<FeriaCandidate>;
}

/// Ordered set of strategies applied to each page segment.
pub struct PatternExtractor {
    matchers: Vec<Box<dyn Matcher + Send + Sync>>,
}

impl Default for PatternExtractor {
    /// Regex phrasing first, then table/list structure.
    fn default() -> Self {
        Self::with_matchers(vec![
            Box::new(PhraseMatcher::new()),
            Box::new(StructuralMatcher),
        ])
    }
}

impl PatternExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an extractor from a custom strategy list, tried in order.
    #[must_use]
    pub fn with_matchers(matchers: Vec<Box<dyn Matcher + Send + Sync>>) -> Self {
        Self { matchers }
    }

    /// Names of the configured strategies, in the order they are tried.
    pub fn strategies(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.matchers.iter().map(|m| m.name())
    }

    /// Yields candidates in page order.
    ///
    /// The page is parsed and split into segments up front; matchers run on
    /// each segment only as the iterator reaches it.
    ///
    /// Never fails: text that matches nothing is skipped, and a page with no
    /// ferias yields an empty sequence.
    pub fn extract<'a>(&'a self, page: &str) -> impl Iterator<Item = FeriaCandidate> + 'a {
        let mut barrio: Option<String> = None;
        split_page(page)
            .into_iter()
            .flat_map(move |block| match block {
                Block::Heading(text) => {
                    if is_barrio_heading(&text) {
                        barrio = Some(text);
                    }
                    Vec::new()
                }
                Block::Segment(segment) if segment.header => Vec::new(),
                Block::Segment(segment) => {
                    let mut found = self.match_segment(&segment);
                    for candidate in &mut found {
                        if candidate.barrio.is_none() {
                            candidate.barrio.clone_from(&barrio);
                        }
                    }
                    found
                }
            })
    }

    fn match_segment(&self, segment: &Segment) -> Vec<FeriaCandidate> {
        for matcher in &self.matchers {
            let found = matcher.try_extract(segment);
            if !found.is_empty() {
                tracing::trace!(
                    strategy = matcher.name(),
                    count = found.len(),
                    "segment matched"
                );
                return found;
            }
        }
        Vec::new()
    }
}

/// Section headings name a barrio unless they are council-zone labels
/// (`CCZ 1`), page titles mentioning ferias, or too short to mean anything.
fn is_barrio_heading(text: &str) -> bool {
    let lower = text.to_lowercase();
    text.chars().count() >= 3 && !lower.starts_with("ccz") && !lower.contains("feria")
}

static DEFAULT_EXTRACTOR: LazyLock<PatternExtractor> = LazyLock::new(PatternExtractor::default);

/// Extracts candidates from `page` with the default strategies.
pub fn extract(page: &str) -> impl Iterator<Item = FeriaCandidate> {
    DEFAULT_EXTRACTOR.extract(page)
}
