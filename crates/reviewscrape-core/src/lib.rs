pub mod app_config;
pub mod category;
pub mod config;
pub mod entities;
pub mod error;
pub mod reviews;
pub mod seed_url;

pub use app_config::AppConfig;
pub use category::Category;
pub use config::{load_app_config, load_app_config_from_env};
pub use entities::{load_entities, EntitiesFile, EntityConfig, EntityTarget};
pub use error::{ConfigError, CoreError};
pub use reviews::{DiningReview, EntityBundle, LodgingReview, NormalizedReviewRecord, RawReview};
pub use seed_url::SeedUrl;
