//! Single-entity commands: `hotel` and `resto`.

use std::path::Path;

use anyhow::Context;
use reviewscrape_core::{AppConfig, Category, EntityTarget, SeedUrl};
use reviewscrape_scraper::{store, BrowserlessBrowser};

/// Arguments of the `resto` command.
#[derive(Debug, Clone)]
pub(crate) struct RestoRequest {
    pub url: String,
    pub name: Option<String>,
    pub id: Option<String>,
    pub position: i64,
}

impl RestoRequest {
    /// Resolves the request into a dining target, filling name and id from
    /// the URL when not given.
    pub(crate) fn target(&self) -> anyhow::Result<EntityTarget> {
        let seed = SeedUrl::parse(&self.url)?;
        if seed.category() != Category::Dining {
            anyhow::bail!("'{}' is not a restaurant review page", self.url);
        }

        let defaults = EntityTarget::from_seed(&seed, self.position);
        let name = self
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(&defaults.name);
        let id = self.id.as_deref().unwrap_or(&defaults.id);
        Ok(EntityTarget::new(
            seed.as_str(),
            name,
            id,
            Category::Dining,
            self.position,
        ))
    }
}

pub(crate) async fn run_hotel(
    config: &AppConfig,
    url: &str,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let browser = BrowserlessBrowser::from_config(config)?;
    let csv = reviewscrape_scraper::scrape_lodging_csv(&browser, url)
        .await
        .with_context(|| format!("failed to scrape hotel reviews from {url}"))?;

    match out {
        Some(path) => {
            store::write_table(path, &csv)?;
            tracing::info!(path = %path.display(), "hotel reviews written");
        }
        None => print!("{csv}"),
    }
    Ok(())
}

pub(crate) async fn run_resto(
    config: &AppConfig,
    request: RestoRequest,
    data_dir: &Path,
) -> anyhow::Result<()> {
    let target = request.target()?;
    let browser = BrowserlessBrowser::from_config(config)?;
    let bundle = reviewscrape_scraper::scrape_entity(&browser, &target)
        .await
        .with_context(|| format!("failed to scrape restaurant '{}'", target.name))?;

    let path = store::write_bundle(data_dir, &bundle)?;
    tracing::info!(
        entity = %target.slug,
        reviews = bundle.actual_count(),
        path = %path.display(),
        "bundle written"
    );
    println!("{}", path.display());
    Ok(())
}
