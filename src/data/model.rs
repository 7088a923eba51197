use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::filter::PathFilter;

/// Positional row identifier, fixed when the table is populated.
pub type SampleId = usize;

// ---------------------------------------------------------------------------
// Column – the three columns a dataset table can carry
// ---------------------------------------------------------------------------

/// A named column of the dataset table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    Filepath,
    Label,
    Split,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Filepath => "filepath",
            Column::Label => "label",
            Column::Split => "split",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "filepath" => Ok(Column::Filepath),
            "label" => Ok(Column::Label),
            "split" => Ok(Column::Split),
            other => Err(format!("unknown column '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// Sample – one row of the table
// ---------------------------------------------------------------------------

/// A single sample (one file on disk).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub filepath: String,
    /// `None` until a labeling operation runs.
    pub label: Option<String>,
    /// `None` until a split operation runs.
    pub split: Option<String>,
}

impl Sample {
    pub fn new(filepath: impl Into<String>) -> Self {
        Sample {
            filepath: filepath.into(),
            label: None,
            split: None,
        }
    }

    /// Value of `column` for this row, if set.
    pub fn value(&self, column: Column) -> Option<&str> {
        match column {
            Column::Filepath => Some(self.filepath.as_str()),
            Column::Label => self.label.as_deref(),
            Column::Split => self.split.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete table
// ---------------------------------------------------------------------------

/// An ordered, mutable table of samples for classification datasets.
///
/// Rows are created once (by [`Dataset::from_folder`] or [`Dataset::from_filepaths`])
/// and never added or removed afterwards; labeling and splitting only rewrite the
/// `label` and `split` columns. Mutating methods return `&mut Self` so calls chain:
///
/// ```no_run
/// use panda_dataset::{Dataset, PathFilter};
///
/// let mut ds = Dataset::new();
/// ds.from_folder("my_images", &PathFilter::default())?
///     .label_by_parent_folder()?
///     .split_by_stratification(4, "train", "valid", false)?
///     .split_by_stratification(4, "train", "test", false)?;
///
/// println!("{:?}", ds.count_occurrences());
/// # Ok::<(), panda_dataset::DatasetError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub(crate) samples: Vec<Sample>,
    pub(crate) has_filepath: bool,
    pub(crate) has_label: bool,
    pub(crate) has_split: bool,
    pub(crate) folder: Option<PathBuf>,
    pub(crate) filter: PathFilter,
}

impl Dataset {
    /// An empty table with no columns.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table directly from a list of paths, without touching the filesystem.
    pub fn from_filepaths<I, S>(filepaths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Dataset {
            samples: filepaths.into_iter().map(Sample::new).collect(),
            has_filepath: true,
            ..Self::default()
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the table has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn get(&self, id: SampleId) -> Option<&Sample> {
        self.samples.get(id)
    }

    /// Whether `column` currently exists in the table.
    pub fn has_column(&self, column: Column) -> bool {
        match column {
            Column::Filepath => self.has_filepath,
            Column::Label => self.has_label,
            Column::Split => self.has_split,
        }
    }

    pub fn is_labeled(&self) -> bool {
        self.has_label
    }

    pub fn is_split(&self) -> bool {
        self.has_split
    }

    /// Root folder of the last crawl, if the table was built by crawling.
    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    /// Include/exclude filter used by the crawl.
    pub fn filter(&self) -> &PathFilter {
        &self.filter
    }

    pub fn filepaths(&self) -> Vec<&str> {
        self.samples.iter().map(|s| s.filepath.as_str()).collect()
    }

    /// Sorted distinct labels, or `None` before labeling.
    pub fn classes(&self) -> Option<Vec<String>> {
        self.distinct(Column::Label)
    }

    /// Sorted distinct split tokens, or `None` before any split.
    pub fn splits(&self) -> Option<Vec<String>> {
        self.distinct(Column::Split)
    }

    /// Label of every row in row order, or `None` before labeling.
    pub fn labels(&self) -> Option<Vec<&str>> {
        if !self.has_label {
            return None;
        }
        self.samples.iter().map(|s| s.label.as_deref()).collect()
    }

    /// Alias of [`Dataset::labels`].
    pub fn labels_decoded(&self) -> Option<Vec<&str>> {
        self.labels()
    }

    /// Labels encoded as their rank within [`Dataset::classes`].
    ///
    /// Ranks are positional in the sorted class list, so adding a class shifts the
    /// rank of every class sorted after it.
    pub fn y(&self) -> Option<Vec<usize>> {
        let classes = self.classes()?;
        let labels = self.labels()?;
        labels
            .into_iter()
            .map(|label| classes.binary_search_by(|c| c.as_str().cmp(label)).ok())
            .collect()
    }

    /// Alias of [`Dataset::y`].
    pub fn labels_encoded(&self) -> Option<Vec<usize>> {
        self.y()
    }

    fn distinct(&self, column: Column) -> Option<Vec<String>> {
        if !self.has_column(column) {
            return None;
        }
        let unique: BTreeSet<&str> = self.samples.iter().filter_map(|s| s.value(column)).collect();
        Some(unique.into_iter().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labeled(labels: &[&str]) -> Dataset {
        let mut ds = Dataset::from_filepaths((0..labels.len()).map(|i| format!("x/{i}.png")));
        let mut it = labels.iter();
        ds.label_by_function(|_| it.next().map(|l| l.to_string()).unwrap_or_default());
        ds
    }

    #[test]
    fn test_new_table_has_no_columns() {
        let ds = Dataset::new();
        assert!(ds.is_empty());
        assert!(!ds.has_column(Column::Filepath));
        assert_eq!(ds.classes(), None);
        assert_eq!(ds.splits(), None);
        assert_eq!(ds.y(), None);
        assert_eq!(ds.labels(), None);
    }

    #[test]
    fn test_classes_sorted_and_distinct() {
        let ds = labeled(&["dog", "cat", "bird", "cat"]);
        assert_eq!(ds.classes().unwrap(), vec!["bird", "cat", "dog"]);
    }

    #[test]
    fn test_encoded_labels_follow_class_rank() {
        let ds = labeled(&["dog", "cat", "bird", "cat"]);
        assert_eq!(ds.y().unwrap(), vec![2, 1, 0, 1]);
        assert_eq!(ds.labels_decoded().unwrap(), vec!["dog", "cat", "bird", "cat"]);
    }

    #[test]
    fn test_column_round_trips_through_str() {
        for col in [Column::Filepath, Column::Label, Column::Split] {
            assert_eq!(col.as_str().parse::<Column>().unwrap(), col);
        }
        assert!("labels".parse::<Column>().is_err());
    }
}
