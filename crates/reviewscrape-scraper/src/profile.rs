//! Per-category page behavior: which element carries the review count and
//! which interactions must run before a page is ready to read.

use std::num::NonZeroU32;

use reviewscrape_core::Category;

use crate::browser::PageSession;
use crate::error::ScraperError;
use crate::extract::{self, ReviewExtractor};

/// Lodging language filter label, e.g. `English (1,234)`.
const LODGING_COUNT_SELECTOR: &str = "[for=LanguageFilter_1]";

/// Dining header count, e.g. `(1,234)`.
const DINING_COUNT_SELECTOR: &str = ".reviews_header_count";

const DINING_ALL_LANGUAGES: &str = "[id=filters_detail_language_filterLang_ALL]";
const DINING_ALL_LANGUAGES_CHECKED: &str = "[id=filters_detail_language_filterLang_ALL]:checked";
const DINING_EXPAND_REVIEWS: &str = ".taLnk.ulBlueLinks";
const DINING_EXPANDED_MARKER: &str = "Show less";

/// Link elements of the numbered page switcher. The second one leads to
/// page two and serves as the pagination template.
pub const PAGE_LINK_SELECTOR: &str = ".pageNum";

/// A browser interaction, applied to the currently loaded page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Click(&'static str),
    WaitForSelector(&'static str),
    WaitForText(&'static str),
}

/// Which visit a page load is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// The seed page, read for the review count and page links.
    Metadata,
    /// Any page in the plan, read for reviews.
    Reviews,
}

#[derive(Debug)]
pub struct CategoryProfile {
    pub category: Category,
    pub page_size: NonZeroU32,
    pub count_selector: &'static str,
    metadata_steps: &'static [Interaction],
    review_steps: &'static [Interaction],
}

static LODGING: CategoryProfile = CategoryProfile {
    category: Category::Lodging,
    page_size: Category::Lodging.page_size(),
    count_selector: LODGING_COUNT_SELECTOR,
    metadata_steps: &[Interaction::WaitForSelector(LODGING_COUNT_SELECTOR)],
    review_steps: &[Interaction::WaitForSelector(LODGING_COUNT_SELECTOR)],
};

static DINING: CategoryProfile = CategoryProfile {
    category: Category::Dining,
    page_size: Category::Dining.page_size(),
    count_selector: DINING_COUNT_SELECTOR,
    metadata_steps: &[
        Interaction::Click(DINING_ALL_LANGUAGES),
        Interaction::WaitForSelector(DINING_ALL_LANGUAGES_CHECKED),
        Interaction::Click(DINING_EXPAND_REVIEWS),
        Interaction::WaitForText(DINING_EXPANDED_MARKER),
    ],
    review_steps: &[
        Interaction::Click(DINING_ALL_LANGUAGES),
        Interaction::WaitForSelector(DINING_ALL_LANGUAGES_CHECKED),
    ],
};

impl CategoryProfile {
    #[must_use]
    pub fn for_category(category: Category) -> &'static CategoryProfile {
        match category {
            Category::Lodging => &LODGING,
            Category::Dining => &DINING,
        }
    }

    #[must_use]
    pub fn steps(&self, visit: Visit) -> &'static [Interaction] {
        match visit {
            Visit::Metadata => self.metadata_steps,
            Visit::Reviews => self.review_steps,
        }
    }

    #[must_use]
    pub fn extractor(&self) -> &'static dyn ReviewExtractor {
        extract::for_category(self.category)
    }

    /// Runs this category's interactions for `visit` on the loaded page.
    ///
    /// # Errors
    ///
    /// Propagates the session's error for the first interaction that fails.
    pub async fn prepare(
        &self,
        session: &mut dyn PageSession,
        visit: Visit,
    ) -> Result<(), ScraperError> {
        for step in self.steps(visit) {
            match *step {
                Interaction::Click(selector) => session.click(selector).await?,
                Interaction::WaitForSelector(selector) => {
                    session.wait_for_selector(selector).await?;
                }
                Interaction::WaitForText(text) => session.wait_for_text(text).await?,
            }
        }
        Ok(())
    }
}
