use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Reviews shown per page on a lodging review listing.
pub const LODGING_PAGE_SIZE: NonZeroU32 = NonZeroU32::new(10).unwrap();

/// Reviews shown per page on a dining review listing.
pub const DINING_PAGE_SIZE: NonZeroU32 = NonZeroU32::new(15).unwrap();

/// The kind of venue an entity page describes.
///
/// The category fixes both the review page size (which gives the `-or<N>`
/// offset token its meaning) and the review schema extracted from each page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Lodging,
    Dining,
}

impl Category {
    #[must_use]
    pub const fn page_size(self) -> NonZeroU32 {
        match self {
            Category::Lodging => LODGING_PAGE_SIZE,
            Category::Dining => DINING_PAGE_SIZE,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Lodging => write!(f, "lodging"),
            Category::Dining => write!(f, "dining"),
        }
    }
}
