use serde::{Deserialize, Serialize};

use super::model::{Column, Dataset, SampleId};

// ---------------------------------------------------------------------------
// Path predicate used while crawling
// ---------------------------------------------------------------------------

/// Substring filters applied to every crawled path.
///
/// A path is kept when:
/// * `include` is `None`, or the path contains at least one include substring
/// * and the path contains none of the `exclude` substrings
///
/// Matching is literal substring containment, not glob or regex.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathFilter {
    #[serde(default)]
    pub include: Option<Vec<String>>,
    #[serde(default)]
    pub exclude: Option<Vec<String>>,
}

impl PathFilter {
    pub fn new(include: Option<Vec<String>>, exclude: Option<Vec<String>>) -> Self {
        PathFilter { include, exclude }
    }

    pub fn with_include<I, S>(mut self, include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(include.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_exclude<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(exclude.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `path` survives both the include and the exclude stage.
    pub fn accepts(&self, path: &str) -> bool {
        let included = match &self.include {
            Some(include) => include.iter().any(|inc| path.contains(inc.as_str())),
            None => true,
        };
        if !included {
            return false;
        }
        match &self.exclude {
            Some(exclude) => exclude.iter().all(|exc| !path.contains(exc.as_str())),
            None => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Row selection by column value
// ---------------------------------------------------------------------------

impl Dataset {
    /// Row ids whose `column` equals `value`, or `None` if the column does not exist.
    pub fn indices_of(&self, column: Column, value: &str) -> Option<Vec<SampleId>> {
        if !self.has_column(column) {
            return None;
        }
        Some(
            self.samples
                .iter()
                .enumerate()
                .filter(|(_, s)| s.value(column) == Some(value))
                .map(|(i, _)| i)
                .collect(),
        )
    }

    pub fn indices_of_split(&self, split: &str) -> Option<Vec<SampleId>> {
        self.indices_of(Column::Split, split)
    }

    pub fn indices_of_label(&self, label: &str) -> Option<Vec<SampleId>> {
        self.indices_of(Column::Label, label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_accepts_everything() {
        let filter = PathFilter::default();
        assert!(filter.accepts("data/cat/1.png"));
        assert!(filter.accepts(""));
    }

    #[test]
    fn test_include_is_any_match() {
        let filter = PathFilter::default().with_include([".png", ".jpg"]);
        assert!(filter.accepts("data/cat/1.png"));
        assert!(filter.accepts("data/cat/2.jpg"));
        assert!(!filter.accepts("data/cat/notes.txt"));
    }

    #[test]
    fn test_exclude_must_avoid_all() {
        let filter = PathFilter::default()
            .with_include([".png"])
            .with_exclude(["thumb", "tmp"]);
        assert!(filter.accepts("data/cat/1.png"));
        assert!(!filter.accepts("data/cat/thumb_1.png"));
        assert!(!filter.accepts("tmp/cat/1.png"));
    }

    #[test]
    fn test_empty_include_list_rejects_everything() {
        let filter = PathFilter::new(Some(Vec::new()), None);
        assert!(!filter.accepts("data/cat/1.png"));
    }

    #[test]
    fn test_indices_of_label_on_unlabeled_table_is_none() {
        let ds = Dataset::from_filepaths(["a/cat/1.png", "a/dog/2.png"]);
        assert_eq!(ds.indices_of_label("cat"), None);
        assert_eq!(ds.indices_of_split("train"), None);
        assert_eq!(
            ds.indices_of(Column::Filepath, "a/dog/2.png"),
            Some(vec![1])
        );
    }

    #[test]
    fn test_indices_of_label_after_labeling() {
        let mut ds = Dataset::from_filepaths(["a/cat/1.png", "a/dog/2.png", "a/cat/3.png"]);
        ds.label_by_parent_folder().unwrap();
        assert_eq!(ds.indices_of_label("cat"), Some(vec![0, 2]));
        assert_eq!(ds.indices_of_label("bird"), Some(vec![]));
    }
}
