use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One topical category the dashboard can filter keywords by.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub label: String,
    /// Display glyph name consumed by the presentation layer.
    pub icon: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoriesFile {
    pub categories: Vec<CategoryConfig>,
}

impl CategoriesFile {
    /// All category labels in file order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.label.clone()).collect()
    }

    #[must_use]
    pub fn contains(&self, label: &str) -> bool {
        self.categories.iter().any(|c| c.label == label)
    }

    /// The initial selection: the first category in the file.
    #[must_use]
    pub fn default_selection(&self) -> Vec<String> {
        self.categories
            .first()
            .map(|c| vec![c.label.clone()])
            .unwrap_or_default()
    }
}

/// Load and validate the category catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_categories(path: &Path) -> Result<CategoriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CategoriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let file: CategoriesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::CategoriesFileParse)?;

    validate_categories(&file)?;

    Ok(file)
}

fn validate_categories(file: &CategoriesFile) -> Result<(), ConfigError> {
    if file.categories.is_empty() {
        return Err(ConfigError::Validation(
            "categories file must list at least one category".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for category in &file.categories {
        if category.label.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category label must be non-empty".to_string(),
            ));
        }
        if !seen.insert(category.label.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category label: '{}'",
                category.label
            )));
        }
    }

    Ok(())
}
