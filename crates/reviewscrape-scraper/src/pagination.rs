//! Review-page pagination via the `-or<N>` offset token.
//!
//! Listing pages encode the index of their first review in the URL:
//!
//! ```text
//! .../Hotel_Review-g188107-d231860-Reviews-Beau_Rivage_Palace-Lausanne.html        offset 0
//! .../Hotel_Review-g188107-d231860-Reviews-or10-Beau_Rivage_Palace-Lausanne.html   offset 10
//! .../Hotel_Review-g188107-d231860-Reviews-or20-Beau_Rivage_Palace-Lausanne.html   offset 20
//! ```
//!
//! The seed URL is always page 0. The link to page 2 found on the seed page
//! is used as a template for every later page: only the token digits change.

use std::num::NonZeroU32;
use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::error::ScraperError;

static OFFSET_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-or(\d+)").expect("valid offset token regex"));

/// Number of review pages needed to show `total_review_count` reviews.
///
/// Integer ceiling division. Zero reviews gives zero pages; callers still
/// visit the seed page in that case.
#[must_use]
pub fn page_count(total_review_count: u32, page_size: NonZeroU32) -> u32 {
    let size = page_size.get();
    let full_pages = total_review_count / size;
    if total_review_count % size == 0 {
        full_pages
    } else {
        full_pages + 1
    }
}

/// Ordered list of review-page URLs for one entity.
///
/// Never empty: the first URL is always the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationPlan {
    page_urls: Vec<String>,
}

impl PaginationPlan {
    #[must_use]
    pub fn page_urls(&self) -> &[String] {
        &self.page_urls
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.page_urls.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.page_urls.is_empty()
    }
}

/// Builds the URL of every review page.
///
/// With a second-page template the plan is
/// `[seed, url(size), url(2*size), ..., url((page_count-1)*size)]`.
/// Without one the plan is `[seed]` whatever `page_count` says: the page
/// link on the seed page is the authority on whether more pages exist.
///
/// # Errors
///
/// Returns [`ScraperError::MetadataParse`] if more than one page is needed
/// and the template carries no offset token.
pub fn build_page_urls(
    seed_url: &str,
    second_page_url: Option<&str>,
    page_size: NonZeroU32,
    page_count: u32,
) -> Result<PaginationPlan, ScraperError> {
    let mut page_urls = vec![seed_url.to_owned()];

    let Some(template) = second_page_url else {
        return Ok(PaginationPlan { page_urls });
    };
    if page_count <= 1 {
        return Ok(PaginationPlan { page_urls });
    }

    if !OFFSET_TOKEN_RE.is_match(template) {
        return Err(ScraperError::MetadataParse {
            url: template.to_owned(),
            reason: "second-page URL has no -or<N> offset token".to_owned(),
        });
    }

    for page in 1..page_count {
        let offset = u64::from(page) * u64::from(page_size.get());
        let token = format!("-or{offset}");
        page_urls.push(
            OFFSET_TOKEN_RE
                .replace_all(template, NoExpand(&token))
                .into_owned(),
        );
    }

    Ok(PaginationPlan { page_urls })
}

/// Reads the review offset encoded in a page URL. URLs without a token are
/// the first page.
#[must_use]
pub fn offset_of(url: &str) -> u64 {
    OFFSET_TOKEN_RE
        .captures(url)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}
