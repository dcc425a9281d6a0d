pub mod aggregate;
pub mod browser;
pub mod coordinator;
pub mod error;
pub mod extract;
pub mod metadata;
pub mod page;
pub mod pagination;
pub mod profile;
pub mod store;
pub mod table;

pub use aggregate::aggregate;
pub use browser::{Browser, BrowserlessBrowser, BrowserlessOptions, PageSession};
pub use coordinator::{EntityScrapeCoordinator, ScrapeStage};
pub use error::ScraperError;
pub use extract::ReviewExtractor;
pub use metadata::ReviewPageMetadata;
pub use page::RenderedPage;
pub use pagination::{build_page_urls, page_count, PaginationPlan};
pub use table::{serialize, serialize_with, TableSchema, ToRow};

use reviewscrape_core::{Category, CoreError, EntityBundle, EntityTarget, RawReview, SeedUrl};

/// Scrapes one entity into a bundle.
///
/// # Errors
///
/// Returns the first error hit; no partial bundle is produced.
pub async fn scrape_entity(
    browser: &dyn Browser,
    target: &EntityTarget,
) -> Result<EntityBundle, ScraperError> {
    EntityScrapeCoordinator::new(browser).scrape(target).await
}

/// Scrapes a lodging entity and returns its reviews as a `title,content`
/// CSV table. An entity without reviews gives a header-only table.
///
/// # Errors
///
/// Returns [`ScraperError::Core`] if `seed_url` is not a lodging review
/// page, otherwise the first scrape or serialization error.
pub async fn scrape_lodging_csv(
    browser: &dyn Browser,
    seed_url: &str,
) -> Result<String, ScraperError> {
    let seed = SeedUrl::parse(seed_url)?;
    if seed.category() != Category::Lodging {
        return Err(CoreError::InvalidSeedUrl {
            url: seed.as_str().to_owned(),
            reason: "expected a lodging (Hotel_Review) page".to_owned(),
        }
        .into());
    }

    let scraped = EntityScrapeCoordinator::new(browser)
        .scrape_reviews(seed.as_str(), Category::Lodging, seed.slug())
        .await?;
    let reviews: Vec<_> = scraped
        .reviews
        .into_iter()
        .filter_map(|review| match review {
            RawReview::Lodging(r) => Some(r),
            RawReview::Dining(_) => None,
        })
        .collect();

    serialize_with(&TableSchema::new(["title", "content"]), &reviews)
}
