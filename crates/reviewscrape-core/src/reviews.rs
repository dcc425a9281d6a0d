//! Review records: the per-category raw shapes, the per-entity bundle, and
//! the category-agnostic output projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Category, EntityTarget};

/// A lodging review as it appears on the listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LodgingReview {
    pub title: String,
    pub content: String,
}

/// A dining review as it appears on the listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiningReview {
    pub title: String,
    pub content: String,
    /// Bubble score in steps of `0.5`, e.g. `4.5`.
    pub rating: f64,
    /// Visit month with the `"Date of visit:"` label removed, e.g. `"March 2023"`.
    pub date_of_visit: String,
    /// Value of the rating element's `title` attribute, e.g. `"April 2, 2023"`.
    pub rating_date: String,
}

/// One extracted review in its category's native schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawReview {
    Lodging(LodgingReview),
    Dining(DiningReview),
}

impl RawReview {
    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            RawReview::Lodging(r) => &r.title,
            RawReview::Dining(r) => &r.title,
        }
    }

    #[must_use]
    pub fn content(&self) -> &str {
        match self {
            RawReview::Lodging(r) => &r.content,
            RawReview::Dining(r) => &r.content,
        }
    }
}

/// The complete result of scraping one entity.
///
/// Fields are private: a bundle is assembled once by [`EntityBundle::new`]
/// and only read afterwards. `actual_count` always equals the number of
/// reviews carried; it is recomputed when a bundle is loaded from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "BundleFile")]
pub struct EntityBundle {
    entity_id: String,
    entity_name: String,
    position: i64,
    category: Category,
    seed_url: String,
    slug: String,
    /// Review count printed on the entity page.
    declared_count: u32,
    /// Reviews actually extracted; may differ from `declared_count`.
    actual_count: usize,
    reviews: Vec<RawReview>,
    scraped_at: DateTime<Utc>,
}

/// On-disk shape of a bundle. A stored `actualCount` is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BundleFile {
    entity_id: String,
    entity_name: String,
    position: i64,
    category: Category,
    seed_url: String,
    slug: String,
    declared_count: u32,
    reviews: Vec<RawReview>,
    scraped_at: DateTime<Utc>,
}

impl From<BundleFile> for EntityBundle {
    fn from(file: BundleFile) -> Self {
        Self {
            entity_id: file.entity_id,
            entity_name: file.entity_name,
            position: file.position,
            category: file.category,
            seed_url: file.seed_url,
            slug: file.slug,
            declared_count: file.declared_count,
            actual_count: file.reviews.len(),
            reviews: file.reviews,
            scraped_at: file.scraped_at,
        }
    }
}

impl EntityBundle {
    #[must_use]
    pub fn new(target: &EntityTarget, declared_count: u32, reviews: Vec<RawReview>) -> Self {
        Self::with_timestamp(target, declared_count, reviews, Utc::now())
    }

    #[must_use]
    pub fn with_timestamp(
        target: &EntityTarget,
        declared_count: u32,
        reviews: Vec<RawReview>,
        scraped_at: DateTime<Utc>,
    ) -> Self {
        Self {
            entity_id: target.id.clone(),
            entity_name: target.name.clone(),
            position: target.position,
            category: target.category,
            seed_url: target.seed_url.clone(),
            slug: target.slug.clone(),
            declared_count,
            actual_count: reviews.len(),
            reviews,
            scraped_at,
        }
    }

    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    #[must_use]
    pub fn position(&self) -> i64 {
        self.position
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn seed_url(&self) -> &str {
        &self.seed_url
    }

    #[must_use]
    pub fn declared_count(&self) -> u32 {
        self.declared_count
    }

    #[must_use]
    pub fn actual_count(&self) -> usize {
        self.actual_count
    }

    #[must_use]
    pub fn reviews(&self) -> &[RawReview] {
        &self.reviews
    }

    #[must_use]
    pub fn scraped_at(&self) -> DateTime<Utc> {
        self.scraped_at
    }

    /// File stem used when persisting the bundle: `{position}_{slug}`.
    #[must_use]
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.position, self.slug)
    }

    /// Consumes the bundle, yielding its reviews in extraction order.
    #[must_use]
    pub fn into_reviews(self) -> Vec<RawReview> {
        self.reviews
    }
}

/// A review projected into the category-agnostic output schema.
///
/// Every record carries every field; fields a category does not have are
/// `None` and serialize as empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedReviewRecord {
    pub entity_name: String,
    pub entity_id: String,
    pub title: String,
    pub content: String,
    pub rating: Option<f64>,
    pub date_of_visit: Option<String>,
    pub rating_date: Option<String>,
}

impl NormalizedReviewRecord {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 7] = [
        "entityName",
        "entityId",
        "title",
        "content",
        "rating",
        "dateOfVisit",
        "ratingDate",
    ];

    #[must_use]
    pub fn from_review(entity_name: &str, entity_id: &str, review: RawReview) -> Self {
        match review {
            RawReview::Lodging(r) => Self {
                entity_name: entity_name.to_string(),
                entity_id: entity_id.to_string(),
                title: r.title,
                content: r.content,
                rating: None,
                date_of_visit: None,
                rating_date: None,
            },
            RawReview::Dining(r) => Self {
                entity_name: entity_name.to_string(),
                entity_id: entity_id.to_string(),
                title: r.title,
                content: r.content,
                rating: Some(r.rating),
                date_of_visit: Some(r.date_of_visit),
                rating_date: Some(r.rating_date),
            },
        }
    }
}
