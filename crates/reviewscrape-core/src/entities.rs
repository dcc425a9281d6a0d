use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Category, ConfigError, SeedUrl};

/// One entry of the entities file, as written by the operator.
///
/// Only `name` and `url` are required. `id` and `category` default to what
/// the URL encodes; `position` defaults to the entry's index in the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityConfig {
    pub name: String,
    pub url: String,
    pub id: Option<String>,
    pub category: Option<Category>,
    pub position: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct EntitiesFile {
    pub entities: Vec<EntityConfig>,
}

/// A fully resolved entity to scrape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityTarget {
    pub name: String,
    pub id: String,
    pub seed_url: String,
    pub category: Category,
    /// Output ordering key. Need not be contiguous or zero-based.
    pub position: i64,
    /// Used in log lines and bundle file names.
    pub slug: String,
}

impl EntityTarget {
    /// Builds a target from a seed URL alone, deriving id, name, and category
    /// from the URL.
    #[must_use]
    pub fn from_seed(seed: &SeedUrl, position: i64) -> Self {
        Self {
            name: seed.slug().replace('_', " "),
            id: seed.entity_id().to_string(),
            seed_url: seed.as_str().to_string(),
            category: seed.category(),
            position,
            slug: seed.slug().to_string(),
        }
    }

    /// Builds a target with an operator-supplied name and id.
    ///
    /// The URL is not required to be a recognised review URL here; when it
    /// is not, the slug falls back to the id.
    #[must_use]
    pub fn new(seed_url: &str, name: &str, id: &str, category: Category, position: i64) -> Self {
        let slug = SeedUrl::parse(seed_url)
            .map(|s| s.slug().to_string())
            .unwrap_or_else(|_| id.to_string());
        Self {
            name: name.to_string(),
            id: id.to_string(),
            seed_url: seed_url.trim().to_string(),
            category,
            position,
            slug,
        }
    }
}

impl EntityConfig {
    fn resolve(&self, index: usize) -> Result<EntityTarget, ConfigError> {
        let seed = SeedUrl::parse(&self.url).map_err(|e| ConfigError::Validation(e.to_string()))?;

        let category = match self.category {
            Some(explicit) if explicit != seed.category() => {
                return Err(ConfigError::Validation(format!(
                    "entity '{}' declares category {explicit} but its URL is a {} page",
                    self.name,
                    seed.category()
                )));
            }
            Some(explicit) => explicit,
            None => seed.category(),
        };

        let position = match self.position {
            Some(p) => p,
            None => i64::try_from(index).map_err(|e| ConfigError::Validation(e.to_string()))?,
        };

        Ok(EntityTarget {
            name: self.name.trim().to_string(),
            id: self
                .id
                .clone()
                .unwrap_or_else(|| seed.entity_id().to_string()),
            seed_url: seed.as_str().to_string(),
            category,
            position,
            slug: seed.slug().to_string(),
        })
    }
}

impl EntitiesFile {
    /// Resolves every entry into an [`EntityTarget`] and validates the set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] on an empty name, an unrecognised
    /// URL, a category that contradicts the URL, or a duplicate position.
    pub fn targets(&self) -> Result<Vec<EntityTarget>, ConfigError> {
        let mut seen_positions = HashSet::new();
        let mut targets = Vec::with_capacity(self.entities.len());

        for (index, entity) in self.entities.iter().enumerate() {
            if entity.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "entity name must be non-empty".to_string(),
                ));
            }

            let target = entity.resolve(index)?;
            if !seen_positions.insert(target.position) {
                return Err(ConfigError::Validation(format!(
                    "duplicate position {} (entity '{}')",
                    target.position, target.name
                )));
            }
            targets.push(target);
        }

        Ok(targets)
    }
}

/// Load and validate the entities file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_entities(path: &Path) -> Result<Vec<EntityTarget>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::EntitiesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: EntitiesFile = serde_yaml::from_str(&content)?;
    file.targets()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOTEL: &str =
        "https://www.tripadvisor.com/Hotel_Review-g188107-d231860-Reviews-Beau_Rivage_Palace-Lausanne.html";
    const RESTO: &str =
        "https://www.tripadvisor.com/Restaurant_Review-g187147-d1751525-Reviews-Le_Cinq-Paris.html";

    fn entity(name: &str, url: &str) -> EntityConfig {
        EntityConfig {
            name: name.to_string(),
            url: url.to_string(),
            id: None,
            category: None,
            position: None,
        }
    }

    #[test]
    fn defaults_come_from_url_and_index() {
        let file = EntitiesFile {
            entities: vec![entity("Beau-Rivage", HOTEL), entity("Le Cinq", RESTO)],
        };
        let targets = file.targets().unwrap();
        assert_eq!(targets[0].id, "d231860");
        assert_eq!(targets[0].category, Category::Lodging);
        assert_eq!(targets[0].position, 0);
        assert_eq!(targets[1].category, Category::Dining);
        assert_eq!(targets[1].position, 1);
        assert_eq!(targets[1].slug, "Le_Cinq");
    }

    #[test]
    fn explicit_fields_override_defaults() {
        let mut e = entity("Le Cinq", RESTO);
        e.id = Some("resto-42".to_string());
        e.position = Some(17);
        let targets = EntitiesFile { entities: vec![e] }.targets().unwrap();
        assert_eq!(targets[0].id, "resto-42");
        assert_eq!(targets[0].position, 17);
    }

    #[test]
    fn rejects_empty_name() {
        let err = EntitiesFile {
            entities: vec![entity("  ", HOTEL)],
        }
        .targets()
        .unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn rejects_category_contradicting_url() {
        let mut e = entity("Le Cinq", RESTO);
        e.category = Some(Category::Lodging);
        let err = EntitiesFile { entities: vec![e] }.targets().unwrap_err();
        assert!(err.to_string().contains("declares category lodging"));
    }

    #[test]
    fn rejects_duplicate_position() {
        let mut a = entity("A", HOTEL);
        a.position = Some(3);
        let mut b = entity("B", RESTO);
        b.position = Some(3);
        let err = EntitiesFile {
            entities: vec![a, b],
        }
        .targets()
        .unwrap_err();
        assert!(err.to_string().contains("duplicate position 3"));
    }

    #[test]
    fn rejects_unrecognised_url() {
        let err = EntitiesFile {
            entities: vec![entity("Nowhere", "https://example.test/about")],
        }
        .targets()
        .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn target_from_seed_derives_name_from_slug() {
        let seed = SeedUrl::parse(HOTEL).unwrap();
        let target = EntityTarget::from_seed(&seed, 0);
        assert_eq!(target.name, "Beau Rivage Palace");
        assert_eq!(target.id, "d231860");
    }

    #[test]
    fn target_new_falls_back_to_id_for_slug() {
        let target = EntityTarget::new("https://example.test/x", "X", "x-1", Category::Dining, 2);
        assert_eq!(target.slug, "x-1");
    }

    #[test]
    fn load_entities_from_real_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("config")
            .join("entities.yaml");
        assert!(
            path.exists(),
            "entities.yaml missing at {path:?}; required by this test"
        );
        let result = load_entities(&path);
        assert!(result.is_ok(), "failed to load entities.yaml: {result:?}");
        assert!(!result.unwrap().is_empty());
    }

    #[test]
    fn load_entities_missing_file_is_io_error() {
        let err = load_entities(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::EntitiesFileIo { .. }));
    }
}
