pub mod dedupe;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod harvest;
pub mod normalize;
mod rate_limit;

pub use dedupe::{dedupe, Deduplicator};
pub use error::ScraperError;
pub use extract::{extract, Matcher, PatternExtractor, Segment};
pub use fetch::{is_valid_page_url, PageFetcher};
pub use harvest::{harvest, Harvest, HarvestSummary};
pub use normalize::normalize;
