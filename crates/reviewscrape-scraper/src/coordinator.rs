//! Scrapes one entity end to end on a single browser session.

use reviewscrape_core::{Category, EntityBundle, EntityTarget, RawReview};

use crate::browser::{Browser, PageSession};
use crate::error::ScraperError;
use crate::metadata::{read_metadata, ReviewPageMetadata};
use crate::pagination::{build_page_urls, page_count, PaginationPlan};
use crate::profile::{CategoryProfile, Visit};

/// How far an entity scrape got. Reported when a scrape aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrapeStage {
    Init,
    MetadataDiscovered,
    PaginationPlanned,
    /// Number of pages whose reviews have been extracted.
    PagesExtracted(usize),
    BundleAssembled,
}

/// Reviews of one entity along with the count its seed page declared.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapedReviews {
    pub metadata: ReviewPageMetadata,
    pub reviews: Vec<RawReview>,
}

/// Drives metadata discovery, pagination, and per-page extraction for one
/// entity at a time.
///
/// Each scrape opens its own session and closes it before returning, on
/// success and on every error path. Pages are visited strictly in plan
/// order; any failure aborts the entity without a partial result.
pub struct EntityScrapeCoordinator<'a> {
    browser: &'a dyn Browser,
}

impl<'a> EntityScrapeCoordinator<'a> {
    #[must_use]
    pub fn new(browser: &'a dyn Browser) -> Self {
        Self { browser }
    }

    /// Scrapes `target` into an [`EntityBundle`].
    ///
    /// # Errors
    ///
    /// Returns the first navigation, metadata, or extraction error hit.
    pub async fn scrape(&self, target: &EntityTarget) -> Result<EntityBundle, ScraperError> {
        let scraped = self
            .scrape_reviews(&target.seed_url, target.category, &target.slug)
            .await?;
        let bundle = EntityBundle::new(target, scraped.metadata.total_review_count, scraped.reviews);

        if bundle.actual_count() != bundle.declared_count() as usize {
            tracing::info!(
                entity = %target.slug,
                declared = bundle.declared_count(),
                actual = bundle.actual_count(),
                "extracted review count differs from declared count"
            );
        }
        tracing::info!(
            entity = %target.slug,
            url = %bundle.seed_url(),
            stage = ?ScrapeStage::BundleAssembled,
            reviews = bundle.actual_count(),
            "entity scraped"
        );
        Ok(bundle)
    }

    /// Scrapes every review page reachable from `seed_url`.
    ///
    /// `label` names the entity in log lines.
    ///
    /// # Errors
    ///
    /// Returns the first navigation, metadata, or extraction error hit.
    pub async fn scrape_reviews(
        &self,
        seed_url: &str,
        category: Category,
        label: &str,
    ) -> Result<ScrapedReviews, ScraperError> {
        let mut session = self.browser.open().await?;
        let mut stage = ScrapeStage::Init;

        let result = Self::run(
            session.as_mut(),
            CategoryProfile::for_category(category),
            seed_url,
            label,
            &mut stage,
        )
        .await;
        let closed = session.close().await;

        match (result, closed) {
            (Ok(scraped), Ok(())) => Ok(scraped),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), close_result) => {
                if let Err(close_err) = close_result {
                    tracing::warn!(entity = %label, error = %close_err, "failed to close session");
                }
                tracing::error!(entity = %label, stage = ?stage, error = %e, "entity scrape aborted");
                Err(e)
            }
        }
    }

    async fn run(
        session: &mut dyn PageSession,
        profile: &CategoryProfile,
        seed_url: &str,
        label: &str,
        stage: &mut ScrapeStage,
    ) -> Result<ScrapedReviews, ScraperError> {
        tracing::info!(entity = %label, url = %seed_url, "gathering info");
        let metadata = discover(session, profile, seed_url).await?;
        *stage = ScrapeStage::MetadataDiscovered;

        let pages = page_count(metadata.total_review_count, metadata.page_size);
        let plan = build_page_urls(
            seed_url,
            metadata.second_page_url.as_deref(),
            metadata.page_size,
            pages,
        )?;
        *stage = ScrapeStage::PaginationPlanned;
        tracing::info!(
            entity = %label,
            declared = metadata.total_review_count,
            pages = plan.len(),
            "pagination planned"
        );

        let reviews = extract_pages(session, profile, &plan, label, stage).await?;
        Ok(ScrapedReviews { metadata, reviews })
    }
}

/// Loads the seed page, prepares it, and reads its review metadata.
///
/// # Errors
///
/// Propagates session errors and [`ScraperError::MetadataParse`].
pub async fn discover(
    session: &mut dyn PageSession,
    profile: &CategoryProfile,
    seed_url: &str,
) -> Result<ReviewPageMetadata, ScraperError> {
    session.goto(seed_url).await?;
    profile.prepare(session, Visit::Metadata).await?;
    let page = session.content().await?;
    read_metadata(&page, profile)
}

async fn extract_pages(
    session: &mut dyn PageSession,
    profile: &CategoryProfile,
    plan: &PaginationPlan,
    label: &str,
    stage: &mut ScrapeStage,
) -> Result<Vec<RawReview>, ScraperError> {
    let extractor = profile.extractor();
    let total = plan.len();
    let mut reviews = Vec::new();

    for (index, url) in plan.page_urls().iter().enumerate() {
        session.goto(url).await?;
        profile.prepare(session, Visit::Reviews).await?;
        let page = session.content().await?;

        let done = index + 1;
        tracing::info!(
            entity = %label,
            url = %url,
            page = done,
            pages_left = total - done,
            progress_pct = done * 100 / total,
            bytes = page.html().len(),
            "scraping"
        );

        reviews.extend(extractor.extract(&page)?);
        *stage = ScrapeStage::PagesExtracted(done);
    }

    Ok(reviews)
}
