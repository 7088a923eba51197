//! JSON recipes describing how to build a dataset table.
//!
//! ```json
//! {
//!   "root": "my_images",
//!   "include": [".png", ".jpg"],
//!   "exclude": ["thumb"],
//!   "labeling": "parent_folder",
//!   "splits": [
//!     { "k": 4, "origin": "train", "to": "valid", "overwrite": true },
//!     { "k": 4, "origin": "train", "to": "test" }
//!   ],
//!   "seed": 42
//! }
//! ```

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::data::filter::PathFilter;
use crate::data::model::Dataset;
use crate::data::split::StratifiedSplit;
use crate::error::Result;

/// How samples get their labels after crawling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Labeling {
    /// Name of the folder containing the file.
    #[default]
    ParentFolder,
    /// Leave the table unlabeled.
    None,
}

/// Crawl → label → split steps, read from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecipe {
    /// Dataset folder. Relative paths are resolved against the recipe file's folder.
    pub root: PathBuf,
    #[serde(flatten)]
    pub filter: PathFilter,
    #[serde(default)]
    pub labeling: Labeling,
    /// Applied in order.
    #[serde(default)]
    pub splits: Vec<StratifiedSplit>,
    /// Fixes the sampling so repeated builds give the same partition.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl DatasetRecipe {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a recipe file, resolving a relative `root` next to the file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut recipe = Self::from_json(&text)?;
        if recipe.root.is_relative() {
            if let Some(dir) = path.parent() {
                recipe.root = dir.join(&recipe.root);
            }
        }
        log::info!("Loaded recipe {} ({} split steps)", path.display(), recipe.splits.len());
        Ok(recipe)
    }

    /// Run every step and return the resulting table.
    pub fn build(&self) -> Result<Dataset> {
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut dataset = Dataset::new();
        dataset.from_folder(&self.root, &self.filter)?;

        if self.labeling == Labeling::ParentFolder {
            dataset.label_by_parent_folder()?;
        }
        for step in &self.splits {
            dataset.apply_split(step, &mut rng)?;
        }
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_recipe_uses_defaults() {
        let recipe = DatasetRecipe::from_json(r#"{ "root": "images" }"#).unwrap();
        assert_eq!(recipe.root, PathBuf::from("images"));
        assert_eq!(recipe.filter, PathFilter::default());
        assert_eq!(recipe.labeling, Labeling::ParentFolder);
        assert!(recipe.splits.is_empty());
        assert_eq!(recipe.seed, None);
    }

    #[test]
    fn test_full_recipe() {
        let recipe = DatasetRecipe::from_json(
            r#"{
                "root": "/data/images",
                "include": [".png"],
                "exclude": ["thumb"],
                "labeling": "none",
                "splits": [
                    { "k": 4, "origin": "train", "to": "valid", "overwrite": true },
                    { "k": 2, "to": "test" }
                ],
                "seed": 7
            }"#,
        )
        .unwrap();

        assert_eq!(recipe.filter.include, Some(vec![".png".to_string()]));
        assert_eq!(recipe.filter.exclude, Some(vec!["thumb".to_string()]));
        assert_eq!(recipe.labeling, Labeling::None);
        assert_eq!(recipe.splits[0], StratifiedSplit::new(4, "train", "valid").overwrite(true));
        assert_eq!(recipe.splits[1], StratifiedSplit::new(2, "train", "test"));
        assert_eq!(recipe.seed, Some(7));
    }

    #[test]
    fn test_malformed_recipe_is_an_error() {
        let err = DatasetRecipe::from_json(r#"{ "splits": [] }"#).unwrap_err();
        assert!(matches!(err, crate::error::DatasetError::Recipe(_)));
    }
}
