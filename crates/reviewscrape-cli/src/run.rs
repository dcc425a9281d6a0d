//! `run`: scrape every configured entity concurrently, then combine.
//!
//! Entities are scraped through a bounded pool. One entity failing is
//! logged and skipped; it never cancels the others. Combining starts only
//! after every scrape has finished.

use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use reviewscrape_core::{AppConfig, EntityBundle, EntityTarget};
use reviewscrape_scraper::{scrape_entity, store, Browser, BrowserlessBrowser, ScraperError};

pub(crate) struct BatchPaths {
    pub entities: PathBuf,
    pub data_dir: PathBuf,
    pub out: PathBuf,
}

/// Scrapes `targets` with at most `concurrency` scrapes in flight and
/// returns every outcome once all have completed.
pub(crate) async fn scrape_all<'t>(
    browser: &dyn Browser,
    targets: &'t [EntityTarget],
    concurrency: usize,
) -> Vec<(&'t EntityTarget, Result<EntityBundle, ScraperError>)> {
    stream::iter(targets)
        .map(|target| async move { (target, scrape_entity(browser, target).await) })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await
}

/// Persists each successful bundle and collects them. Failed entities are
/// logged; so are bundles that could not be written, which are dropped.
///
/// # Errors
///
/// Fails only when no entity succeeded.
pub(crate) fn collect_successes(
    outcomes: Vec<(&EntityTarget, Result<EntityBundle, ScraperError>)>,
    data_dir: &Path,
) -> anyhow::Result<Vec<EntityBundle>> {
    let total = outcomes.len();
    let mut bundles = Vec::with_capacity(total);

    for (target, outcome) in outcomes {
        let bundle = match outcome {
            Ok(bundle) => bundle,
            Err(e) => {
                tracing::error!(entity = %target.slug, position = target.position, error = %e, "entity failed");
                continue;
            }
        };
        match store::write_bundle(data_dir, &bundle) {
            Ok(path) => {
                tracing::info!(entity = %target.slug, path = %path.display(), "bundle written");
                bundles.push(bundle);
            }
            Err(e) => {
                tracing::error!(entity = %target.slug, error = %e, "failed to persist bundle");
            }
        }
    }

    let failed = total - bundles.len();
    if bundles.is_empty() {
        anyhow::bail!("all {total} entities failed");
    }
    if failed > 0 {
        tracing::warn!(failed, total, "some entities failed during the run");
    }
    Ok(bundles)
}

pub(crate) async fn run_batch(config: &AppConfig, paths: &BatchPaths) -> anyhow::Result<()> {
    let targets = reviewscrape_core::load_entities(&paths.entities)?;
    if targets.is_empty() {
        anyhow::bail!("no entities listed in {}", paths.entities.display());
    }

    let browser = BrowserlessBrowser::from_config(config)?;
    tracing::info!(
        entities = targets.len(),
        concurrency = config.concurrency,
        "starting run"
    );

    let outcomes = scrape_all(&browser, &targets, config.concurrency).await;
    let bundles = collect_successes(outcomes, &paths.data_dir)?;
    crate::combine::write_combined(bundles, &paths.out)?;
    Ok(())
}
