//! Reading the review count and the second-page link from a seed page.

use std::num::NonZeroU32;

use scraper::Selector;

use crate::error::ScraperError;
use crate::page::{element_text, RenderedPage};
use crate::profile::{CategoryProfile, PAGE_LINK_SELECTOR};

/// What the seed page says about the review listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPageMetadata {
    pub total_review_count: u32,
    pub page_size: NonZeroU32,
    /// Absolute URL of page two, when the page switcher has one.
    pub second_page_url: Option<String>,
}

/// Parses a count label such as `English (1,234)` or `(87)`.
///
/// The number is taken from between the first `(` and the following `)`,
/// with thousands separators removed.
#[must_use]
pub fn parse_count_text(text: &str) -> Option<u32> {
    let (_, after_open) = text.split_once('(')?;
    let (inner, _) = after_open.split_once(')')?;
    let digits: String = inner.chars().filter(|c| *c != ',').collect();
    digits.trim().parse().ok()
}

/// Reads [`ReviewPageMetadata`] from a rendered seed page.
///
/// # Errors
///
/// Returns [`ScraperError::MetadataParse`] if the count element is absent or
/// its text has no parenthesized number, or if the page switcher has a
/// second link without an `href`.
pub fn read_metadata(
    page: &RenderedPage,
    profile: &CategoryProfile,
) -> Result<ReviewPageMetadata, ScraperError> {
    let parse_failure = |reason: String| ScraperError::MetadataParse {
        url: page.url().to_owned(),
        reason,
    };

    let count_selector = Selector::parse(profile.count_selector)
        .map_err(|e| parse_failure(format!("bad count selector: {e}")))?;
    let page_links = Selector::parse(PAGE_LINK_SELECTOR)
        .map_err(|e| parse_failure(format!("bad page link selector: {e}")))?;

    let document = page.document();

    let count_element = document
        .select(&count_selector)
        .next()
        .ok_or_else(|| parse_failure(format!("no element matches {}", profile.count_selector)))?;
    let count_text = element_text(count_element);
    let total_review_count = parse_count_text(&count_text)
        .ok_or_else(|| parse_failure(format!("unreadable review count {count_text:?}")))?;

    let second_page_url = match document.select(&page_links).nth(1) {
        None => None,
        Some(link) => {
            let href = link
                .value()
                .attr("href")
                .ok_or_else(|| parse_failure("second page link has no href".to_owned()))?;
            Some(page.resolve(href))
        }
    };

    Ok(ReviewPageMetadata {
        total_review_count,
        page_size: profile.page_size,
        second_page_url,
    })
}

#[cfg(test)]
mod tests {
    use reviewscrape_core::Category;

    use super::*;

    const SEED: &str =
        "https://www.tripadvisor.com/Hotel_Review-g188107-d231860-Reviews-Beau_Rivage_Palace-Lausanne.html";

    fn lodging() -> &'static CategoryProfile {
        CategoryProfile::for_category(Category::Lodging)
    }

    #[test]
    fn parse_count_text_removes_every_separator() {
        assert_eq!(parse_count_text("English (1,234)"), Some(1234));
        assert_eq!(parse_count_text("(1,234,567)"), Some(1_234_567));
        assert_eq!(parse_count_text("( 87 )"), Some(87));
        assert_eq!(parse_count_text("English (0)"), Some(0));
    }

    #[test]
    fn parse_count_text_rejects_malformed_labels() {
        assert_eq!(parse_count_text("English"), None);
        assert_eq!(parse_count_text("English (many)"), None);
        assert_eq!(parse_count_text("English (12"), None);
        assert_eq!(parse_count_text("()"), None);
    }

    #[test]
    fn reads_count_and_resolves_second_page_link() {
        let html = r#"<html><body>
            <label for="LanguageFilter_1">English <span>(2,301)</span></label>
            <div class="pageNumbers">
              <span class="pageNum current">1</span>
              <a class="pageNum" href="/Hotel_Review-g188107-d231860-Reviews-or10-Beau_Rivage_Palace-Lausanne.html">2</a>
              <a class="pageNum" href="/Hotel_Review-g188107-d231860-Reviews-or20-Beau_Rivage_Palace-Lausanne.html">3</a>
            </div>
        </body></html>"#;
        let meta = read_metadata(&RenderedPage::new(SEED, html), lodging()).unwrap();
        assert_eq!(meta.total_review_count, 2301);
        assert_eq!(meta.page_size.get(), 10);
        assert_eq!(
            meta.second_page_url.as_deref(),
            Some("https://www.tripadvisor.com/Hotel_Review-g188107-d231860-Reviews-or10-Beau_Rivage_Palace-Lausanne.html")
        );
    }

    #[test]
    fn single_page_link_means_no_second_page() {
        let html = r#"<label for="LanguageFilter_1">English (4)</label>
            <span class="pageNum current">1</span>"#;
        let meta = read_metadata(&RenderedPage::new(SEED, html), lodging()).unwrap();
        assert_eq!(meta.total_review_count, 4);
        assert!(meta.second_page_url.is_none());
    }

    #[test]
    fn missing_count_element_is_a_metadata_failure() {
        let err = read_metadata(&RenderedPage::new(SEED, "<p>nothing</p>"), lodging()).unwrap_err();
        assert!(matches!(err, ScraperError::MetadataParse { .. }));
    }

    #[test]
    fn second_link_without_href_is_a_metadata_failure() {
        let html = r#"<label for="LanguageFilter_1">English (40)</label>
            <span class="pageNum">1</span><span class="pageNum">2</span>"#;
        let err = read_metadata(&RenderedPage::new(SEED, html), lodging()).unwrap_err();
        assert!(err.to_string().contains("no href"));
    }

    #[test]
    fn dining_count_comes_from_header() {
        let html = r#"<span class="reviews_header_count">(1,052)</span>"#;
        let meta = read_metadata(
            &RenderedPage::new(SEED, html),
            CategoryProfile::for_category(Category::Dining),
        )
        .unwrap();
        assert_eq!(meta.total_review_count, 1052);
        assert_eq!(meta.page_size.get(), 15);
    }
}
