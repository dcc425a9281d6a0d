use reviewscrape_core::{EntityBundle, NormalizedReviewRecord};

/// Merges bundles into one record list.
///
/// Bundles are ordered by position (a stable sort, so equal positions keep
/// their input order); reviews keep their extraction order within a bundle.
#[must_use]
pub fn aggregate(mut bundles: Vec<EntityBundle>) -> Vec<NormalizedReviewRecord> {
    bundles.sort_by_key(EntityBundle::position);
    bundles
        .into_iter()
        .flat_map(|bundle| {
            let name = bundle.entity_name().to_owned();
            let id = bundle.entity_id().to_owned();
            bundle
                .into_reviews()
                .into_iter()
                .map(move |review| NormalizedReviewRecord::from_review(&name, &id, review))
        })
        .collect()
}
