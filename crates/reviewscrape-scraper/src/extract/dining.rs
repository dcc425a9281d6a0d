use std::sync::LazyLock;

use reviewscrape_core::{Category, DiningReview, RawReview};
use scraper::{ElementRef, Selector};

use super::ReviewExtractor;
use crate::error::ScraperError;
use crate::page::{element_text, extraction_error, RenderedPage};

const DATE_OF_VISIT_LABEL: &str = "Date of visit:";

static REVIEW_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".review-container").expect("valid container selector"));
static BUBBLE_RATING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ui_bubble_rating").expect("valid rating selector"));
static DATE_OF_VISIT: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".prw_rup.prw_reviews_stay_date_hsx").expect("valid visit date selector")
});
static RATING_DATE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".ratingDate").expect("valid rating date selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".noQuotes").expect("valid title selector"));
static CONTENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".partial_entry").expect("valid content selector"));

/// Dining pages wrap each review in its own container.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiningExtractor;

/// Converts a bubble rating class list such as `ui_bubble_rating bubble_45`
/// to a score: the digits it contains, divided by ten.
#[must_use]
pub fn parse_bubble_rating(class_attr: &str) -> Option<f64> {
    let digits: String = class_attr.chars().filter(char::is_ascii_digit).collect();
    digits.parse::<u32>().ok().map(|n| f64::from(n) / 10.0)
}

fn select_first<'a>(
    page: &RenderedPage,
    index: usize,
    container: ElementRef<'a>,
    selector: &Selector,
    what: &str,
) -> Result<ElementRef<'a>, ScraperError> {
    container
        .select(selector)
        .next()
        .ok_or_else(|| extraction_error(page, format!("review {index} has no {what}")))
}

impl DiningExtractor {
    fn review(
        page: &RenderedPage,
        index: usize,
        container: ElementRef<'_>,
    ) -> Result<DiningReview, ScraperError> {
        let find = |selector: &Selector, what: &str| {
            select_first(page, index, container, selector, what)
        };

        let class_attr = find(&BUBBLE_RATING, "rating")?
            .value()
            .attr("class")
            .unwrap_or_default();
        let rating = parse_bubble_rating(class_attr).ok_or_else(|| {
            extraction_error(page, format!("review {index} has unreadable rating {class_attr:?}"))
        })?;

        let date_of_visit = element_text(find(&DATE_OF_VISIT, "date of visit")?)
            .replacen(DATE_OF_VISIT_LABEL, "", 1)
            .trim()
            .to_owned();

        let rating_date = find(&RATING_DATE, "rating date")?
            .value()
            .attr("title")
            .ok_or_else(|| {
                extraction_error(page, format!("review {index} rating date has no title"))
            })?
            .to_owned();

        Ok(DiningReview {
            title: element_text(find(&TITLE, "title")?),
            content: element_text(find(&CONTENT, "content")?),
            rating,
            date_of_visit,
            rating_date,
        })
    }
}

impl ReviewExtractor for DiningExtractor {
    fn category(&self) -> Category {
        Category::Dining
    }

    fn extract(&self, page: &RenderedPage) -> Result<Vec<RawReview>, ScraperError> {
        let document = page.document();
        document
            .select(&REVIEW_CONTAINER)
            .enumerate()
            .map(|(index, container)| Self::review(page, index, container).map(RawReview::Dining))
            .collect()
    }
}
