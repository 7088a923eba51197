use std::path::{Path, PathBuf};

use anyhow::Context;
use panda_dataset::{Dataset, DatasetRecipe, Labeling, PathFilter, SampleId, StratifiedSplit};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Which bar chart the central panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Samples per class.
    Occurrences,
    /// Samples per class and split.
    Splits,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Built dataset (None until a folder or recipe is loaded).
    pub dataset: Option<Dataset>,

    /// Folder the dataset is crawled from.
    pub root: Option<PathBuf>,

    /// Crawl filter; rewritten from the text fields only when they are edited.
    pub filter: PathFilter,

    /// Comma-separated include / exclude substrings, as typed.
    pub include_text: String,
    pub exclude_text: String,

    /// Label samples by parent folder after crawling.
    pub label_by_folder: bool,

    /// Split steps applied in order after labeling.
    pub steps: Vec<StratifiedSplit>,

    /// Seed for the split sampling; `None` draws a fresh partition every rebuild.
    pub seed: Option<u64>,

    /// Row filters for the sample table.
    pub label_filter: Option<String>,
    pub split_filter: Option<String>,

    /// Indices of samples passing the current row filters (cached).
    pub visible_indices: Vec<SampleId>,

    /// Sample shown in the preview.
    pub selected: Option<SampleId>,

    pub chart: ChartKind,

    /// Colours for split values (legend of the splits chart).
    pub split_colors: Option<ColorMap>,

    /// Colours for class values.
    pub class_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            root: None,
            filter: PathFilter::default(),
            include_text: String::new(),
            exclude_text: String::new(),
            label_by_folder: true,
            steps: vec![
                StratifiedSplit::new(4, "train", "valid").overwrite(true),
                StratifiedSplit::new(4, "train", "test"),
            ],
            seed: Some(42),
            label_filter: None,
            split_filter: None,
            visible_indices: Vec::new(),
            selected: None,
            chart: ChartKind::Occurrences,
            split_colors: None,
            class_colors: None,
            status_message: None,
        }
    }
}

/// Split a comma-separated text field into substrings; blank means "no filter".
fn parse_substrings(text: &str) -> Option<Vec<String>> {
    let parts: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts)
    }
}

fn join_substrings(parts: &Option<Vec<String>>) -> String {
    parts.as_ref().map(|p| p.join(", ")).unwrap_or_default()
}

impl AppState {
    /// Replace the crawl filter with the one typed in the text fields.
    pub fn apply_filter_text(&mut self) {
        self.filter = PathFilter::new(
            parse_substrings(&self.include_text),
            parse_substrings(&self.exclude_text),
        );
    }

    /// Current settings as a recipe rooted at `root`.
    pub fn recipe(&self, root: PathBuf) -> DatasetRecipe {
        let labeling = if self.label_by_folder {
            Labeling::ParentFolder
        } else {
            Labeling::None
        };
        DatasetRecipe {
            root,
            filter: self.filter.clone(),
            labeling,
            // Splits need labels; an unlabeled view only crawls.
            splits: if self.label_by_folder {
                self.steps.clone()
            } else {
                Vec::new()
            },
            seed: self.seed,
        }
    }

    /// Crawl a new folder with the current settings.
    pub fn open_folder(&mut self, folder: PathBuf) {
        self.root = Some(folder);
        self.rebuild();
    }

    /// Take root, filters, labeling, steps and seed from a recipe, then rebuild.
    pub fn open_recipe(&mut self, path: &Path) {
        match DatasetRecipe::load(path).with_context(|| format!("loading recipe {}", path.display())) {
            Ok(recipe) => {
                self.root = Some(recipe.root);
                self.include_text = join_substrings(&recipe.filter.include);
                self.exclude_text = join_substrings(&recipe.filter.exclude);
                self.filter = recipe.filter;
                self.label_by_folder = recipe.labeling == Labeling::ParentFolder;
                self.steps = recipe.splits;
                self.seed = recipe.seed;
                self.rebuild();
            }
            Err(e) => self.report(e),
        }
    }

    /// Re-run crawl → label → split from scratch.
    pub fn rebuild(&mut self) {
        let Some(root) = self.root.clone() else {
            return;
        };
        let recipe = self.recipe(root.clone());
        match recipe
            .build()
            .with_context(|| format!("building dataset from {}", root.display()))
        {
            Ok(dataset) => {
                log::info!(
                    "Built dataset from {}: {} samples, classes {:?}, splits {:?}",
                    root.display(),
                    dataset.len(),
                    dataset.classes(),
                    dataset.splits()
                );
                self.set_dataset(dataset);
            }
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, e: anyhow::Error) {
        log::error!("{e:#}");
        self.status_message = Some(format!("Error: {e:#}"));
    }

    /// Ingest a newly built dataset, reset row filters and colours.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.class_colors = dataset.classes().map(|c| ColorMap::new("label", &c));
        self.split_colors = dataset.splits().map(|s| ColorMap::new("split", &s));
        if !dataset.is_split() && self.chart == ChartKind::Splits {
            self.chart = ChartKind::Occurrences;
        }

        self.label_filter = None;
        self.split_filter = None;
        self.selected = None;
        self.visible_indices = (0..dataset.len()).collect();

        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Recompute `visible_indices` after a row filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let by_label = self
            .label_filter
            .as_deref()
            .and_then(|label| ds.indices_of_label(label));
        let by_split = self
            .split_filter
            .as_deref()
            .and_then(|split| ds.indices_of_split(split));

        self.visible_indices = (0..ds.len())
            .filter(|i| by_label.as_ref().map_or(true, |ids| ids.binary_search(i).is_ok()))
            .filter(|i| by_split.as_ref().map_or(true, |ids| ids.binary_search(i).is_ok()))
            .collect();

        if let Some(sel) = self.selected {
            if !self.visible_indices.contains(&sel) {
                self.selected = None;
            }
        }
    }

    pub fn set_label_filter(&mut self, label: Option<String>) {
        self.label_filter = label;
        self.refilter();
    }

    pub fn set_split_filter(&mut self, split: Option<String>) {
        self.split_filter = split;
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn write_images(root: &Path, n: usize) {
        let dir = root.join("img").join("cat");
        fs::create_dir_all(&dir).unwrap();
        for i in 0..n {
            fs::write(dir.join(format!("{i}.png")), b"x").unwrap();
        }
    }

    #[test]
    fn test_parse_substrings() {
        assert_eq!(parse_substrings(""), None);
        assert_eq!(parse_substrings(" , "), None);
        assert_eq!(
            parse_substrings(".png, .jpg"),
            Some(vec![".png".to_string(), ".jpg".to_string()])
        );
    }

    #[test]
    fn test_refilter_intersects_label_and_split() {
        let mut ds = Dataset::from_filepaths(["d/cat/1", "d/cat/2", "d/dog/3", "d/dog/4"]);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        ds.label_by_parent_folder()
            .unwrap()
            .split_by_stratification_with(1, "train", "valid", false, &mut rng)
            .unwrap();

        let mut state = AppState::default();
        state.set_dataset(ds);
        assert_eq!(state.visible_indices, vec![0, 1, 2, 3]);

        state.set_label_filter(Some("dog".to_string()));
        assert_eq!(state.visible_indices, vec![2, 3]);

        state.set_split_filter(Some("valid".to_string()));
        assert_eq!(state.visible_indices.len(), 1);
        assert!(state.visible_indices[0] >= 2);
    }

    #[test]
    fn test_recipe_with_empty_include_builds_no_rows() {
        let temp = tempfile::tempdir().unwrap();
        write_images(temp.path(), 3);
        let recipe_path = temp.path().join("recipe.json");
        fs::write(&recipe_path, r#"{ "root": "img", "include": [], "seed": 1 }"#).unwrap();

        let expected = DatasetRecipe::load(&recipe_path).unwrap().build().unwrap();
        assert_eq!(expected.len(), 0);

        let mut state = AppState::default();
        state.open_recipe(&recipe_path);
        assert_eq!(state.status_message, None);
        assert_eq!(state.filter.include, Some(Vec::new()));
        assert_eq!(state.dataset.as_ref().map(Dataset::len), Some(0));
    }

    #[test]
    fn test_recipe_filter_keeps_commas_and_spaces() {
        let temp = tempfile::tempdir().unwrap();
        write_images(temp.path(), 2);
        let recipe_path = temp.path().join("recipe.json");
        fs::write(
            &recipe_path,
            r#"{ "root": "img", "include": ["a,b", " .png"], "exclude": ["x "] }"#,
        )
        .unwrap();

        let mut state = AppState::default();
        state.open_recipe(&recipe_path);
        assert_eq!(
            state.filter.include,
            Some(vec!["a,b".to_string(), " .png".to_string()])
        );
        assert_eq!(state.filter.exclude, Some(vec!["x ".to_string()]));
        // No path contains "a,b" or " .png".
        assert_eq!(state.dataset.as_ref().map(Dataset::len), Some(0));
    }

    #[test]
    fn test_filter_text_applies_only_when_edited() {
        let mut state = AppState::default();
        state.filter = PathFilter::new(Some(Vec::new()), None);
        state.include_text = ".png, .jpg".to_string();
        assert_eq!(state.filter.include, Some(Vec::new()));

        state.apply_filter_text();
        assert_eq!(
            state.filter.include,
            Some(vec![".png".to_string(), ".jpg".to_string()])
        );
        assert_eq!(state.filter.exclude, None);
    }

    #[test]
    fn test_unlabeled_view_skips_split_steps() {
        let mut state = AppState::default();
        state.label_by_folder = false;
        let recipe = state.recipe(PathBuf::from("img"));
        assert_eq!(recipe.labeling, Labeling::None);
        assert!(recipe.splits.is_empty());
        assert_eq!(recipe.seed, Some(42));
    }
}
