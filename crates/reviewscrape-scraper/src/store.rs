//! On-disk persistence: one JSON file per entity bundle, one CSV table.

use std::fs;
use std::path::{Path, PathBuf};

use reviewscrape_core::EntityBundle;

use crate::error::ScraperError;

fn io_error(path: &Path, source: std::io::Error) -> ScraperError {
    ScraperError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Writes `bundle` to `{dir}/{position}_{slug}.json`, creating `dir` if
/// needed, and returns the file path. An existing file is replaced.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] or [`ScraperError::Json`] on failure.
pub fn write_bundle(dir: &Path, bundle: &EntityBundle) -> Result<PathBuf, ScraperError> {
    fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
    let path = dir.join(format!("{}.json", bundle.file_stem()));
    let json = serde_json::to_vec_pretty(bundle).map_err(|source| ScraperError::Json {
        context: path.display().to_string(),
        source,
    })?;
    fs::write(&path, json).map_err(|e| io_error(&path, e))?;
    Ok(path)
}

/// Loads every `*.json` bundle in `dir`, in file-name order.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] if `dir` cannot be read and
/// [`ScraperError::Json`] naming the first file that is not a bundle.
pub fn load_bundles(dir: &Path) -> Result<Vec<EntityBundle>, ScraperError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .iter()
        .map(|path| {
            let raw = fs::read(path).map_err(|e| io_error(path, e))?;
            let bundle: EntityBundle =
                serde_json::from_slice(&raw).map_err(|source| ScraperError::Json {
                    context: path.display().to_string(),
                    source,
                })?;
            tracing::debug!(
                path = %path.display(),
                entity = bundle.entity_name(),
                scraped_at = %bundle.scraped_at(),
                "bundle loaded"
            );
            Ok(bundle)
        })
        .collect()
}

/// Writes a serialized table to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`ScraperError::Io`] on failure.
pub fn write_table(path: &Path, table: &str) -> Result<(), ScraperError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;
    }
    fs::write(path, table).map_err(|e| io_error(path, e))
}

#[cfg(test)]
mod tests {
    use reviewscrape_core::{Category, DiningReview, EntityTarget, RawReview};

    use super::*;

    fn bundle(position: i64, slug: &str) -> EntityBundle {
        let target = EntityTarget {
            name: slug.replace('_', " "),
            id: format!("d{position}"),
            seed_url: format!("https://example.test/{slug}"),
            category: Category::Dining,
            position,
            slug: slug.to_owned(),
        };
        let review = RawReview::Dining(DiningReview {
            title: "Good".to_owned(),
            content: "Tasty".to_owned(),
            rating: 4.0,
            date_of_visit: "May 2023".to_owned(),
            rating_date: "May 9, 2023".to_owned(),
        });
        EntityBundle::new(&target, 1, vec![review])
    }

    #[test]
    fn bundles_round_trip_through_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("data");
        let path = write_bundle(&dir, &bundle(2, "Septime")).unwrap();
        assert_eq!(path.file_name().unwrap(), "2_Septime.json");
        write_bundle(&dir, &bundle(0, "Le_Cinq")).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let loaded = load_bundles(&dir).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].entity_name(), "Le Cinq");
        assert_eq!(loaded[1].position(), 2);
    }

    #[test]
    fn rewriting_a_bundle_replaces_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("data");
        write_bundle(&dir, &bundle(1, "Septime")).unwrap();
        write_bundle(&dir, &bundle(1, "Septime")).unwrap();
        assert_eq!(load_bundles(&dir).unwrap().len(), 1);
    }

    #[test]
    fn malformed_bundle_names_its_file() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("data");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("0_broken.json"), "{not json").unwrap();
        let err = load_bundles(&dir).unwrap_err();
        assert!(
            matches!(err, ScraperError::Json { ref context, .. } if context.ends_with("0_broken.json")),
            "got {err:?}"
        );
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = load_bundles(&tmp.path().join("absent")).unwrap_err();
        assert!(matches!(err, ScraperError::Io { .. }));
    }

    #[test]
    fn write_table_creates_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("data");
        let path = dir.join("nested").join("reviews.csv");
        write_table(&path, "a,b\n1,2\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a,b\n1,2\n");
    }
}
