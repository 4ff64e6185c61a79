use thiserror::Error;

pub mod app_config;
pub mod categories;
pub mod config;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use categories::{load_categories, CategoriesFile, CategoryConfig};
pub use config::{load_app_config, load_app_config_from_env};
pub use types::{IntensityLevel, TimeRange};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read categories file {path}")]
    CategoriesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse categories file")]
    CategoriesFileParse(#[from] serde_yaml::Error),
    #[error("invalid configuration: {0}")]
    Validation(String),
}
