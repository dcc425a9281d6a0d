//! Parsing of entity review-page URLs.
//!
//! Review URLs follow one fixed shape:
//!
//! ```text
//! https://www.tripadvisor.com/Hotel_Review-g188107-d231860-Reviews-Beau_Rivage_Palace-Lausanne.html
//! https://www.tripadvisor.com/Restaurant_Review-g187147-d1751525-Reviews-or15-Le_Cinq-Paris.html
//! ```
//!
//! The listing kind selects the [`Category`], `d<digits>` is the entity id,
//! and the segment after `Reviews` (skipping an `-or<N>` offset token) is the
//! entity slug used for logging and bundle file names.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Category, CoreError};

static REVIEW_URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^https?://[^/\s]+/(Hotel|Restaurant)_Review-g(\d+)-d(\d+)-Reviews(?:-or\d+)?-([^-/]+?)(?:-[^/]*)?\.html(?:[?#].*)?$",
    )
    .expect("valid review url regex")
});

/// A validated entity review-page URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUrl {
    url: String,
    category: Category,
    entity_id: String,
    slug: String,
}

impl SeedUrl {
    /// Parses and validates a review-page URL.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidSeedUrl`] if the URL is not a lodging or
    /// dining review page.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let url = raw.trim();
        let caps = REVIEW_URL_RE
            .captures(url)
            .ok_or_else(|| CoreError::InvalidSeedUrl {
                url: url.to_string(),
                reason: "expected a Hotel_Review or Restaurant_Review page URL".to_string(),
            })?;

        let category = match &caps[1] {
            "Hotel" => Category::Lodging,
            _ => Category::Dining,
        };

        Ok(Self {
            url: url.to_string(),
            category,
            entity_id: format!("d{}", &caps[3]),
            slug: caps[4].to_string(),
        })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Entity id as it appears in the URL, e.g. `"d231860"`.
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    /// Entity slug, e.g. `"Beau_Rivage_Palace"`.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl std::fmt::Display for SeedUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.url)
    }
}
