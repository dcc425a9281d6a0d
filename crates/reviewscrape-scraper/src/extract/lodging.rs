use std::sync::LazyLock;

use reviewscrape_core::{Category, LodgingReview, RawReview};
use scraper::{Html, Selector};

use super::ReviewExtractor;
use crate::error::ScraperError;
use crate::page::{element_text, extraction_error, first_element_child, RenderedPage};

static TITLE_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".fCitC").expect("valid title selector"));
static CONTENT_BLOCK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("q").expect("valid content selector"));

/// Lodging pages list titles and bodies in separate blocks; the n-th title
/// belongs to the n-th body.
#[derive(Debug, Clone, Copy, Default)]
pub struct LodgingExtractor;

impl LodgingExtractor {
    fn child_texts(
        page: &RenderedPage,
        document: &Html,
        selector: &Selector,
        what: &str,
    ) -> Result<Vec<String>, ScraperError> {
        document
            .select(selector)
            .enumerate()
            .map(|(index, block)| {
                first_element_child(block)
                    .map(element_text)
                    .ok_or_else(|| extraction_error(page, format!("{what} block {index} is empty")))
            })
            .collect()
    }
}

impl ReviewExtractor for LodgingExtractor {
    fn category(&self) -> Category {
        Category::Lodging
    }

    fn extract(&self, page: &RenderedPage) -> Result<Vec<RawReview>, ScraperError> {
        let document = page.document();
        let titles = Self::child_texts(page, &document, &TITLE_BLOCK, "title")?;
        let contents = Self::child_texts(page, &document, &CONTENT_BLOCK, "content")?;

        if titles.len() != contents.len() {
            return Err(extraction_error(
                page,
                format!(
                    "found {} titles but {} review bodies",
                    titles.len(),
                    contents.len()
                ),
            ));
        }

        Ok(titles
            .into_iter()
            .zip(contents)
            .map(|(title, content)| RawReview::Lodging(LodgingReview { title, content }))
            .collect())
    }
}
