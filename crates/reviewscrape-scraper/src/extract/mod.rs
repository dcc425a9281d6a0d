//! Per-category review extraction from rendered listing pages.

mod dining;
mod lodging;

use reviewscrape_core::{Category, RawReview};

use crate::error::ScraperError;
use crate::page::RenderedPage;

pub use dining::{parse_bubble_rating, DiningExtractor};
pub use lodging::LodgingExtractor;

/// Reads every review on one listing page, in page order.
///
/// Extraction is read-only over the page. A review whose expected
/// sub-element is missing fails the whole page.
pub trait ReviewExtractor: Send + Sync {
    fn category(&self) -> Category;

    /// # Errors
    ///
    /// Returns [`ScraperError::Extraction`] when an expected element is absent.
    fn extract(&self, page: &RenderedPage) -> Result<Vec<RawReview>, ScraperError>;
}

static LODGING: LodgingExtractor = LodgingExtractor;
static DINING: DiningExtractor = DiningExtractor;

#[must_use]
pub fn for_category(category: Category) -> &'static dyn ReviewExtractor {
    match category {
        Category::Lodging => &LODGING,
        Category::Dining => &DINING,
    }
}
