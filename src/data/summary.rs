use std::collections::BTreeMap;

use super::model::Dataset;

// ---------------------------------------------------------------------------
// SplitCounts – label × split cross-tabulation
// ---------------------------------------------------------------------------

/// Sample counts per label (rows) and split (columns).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitCounts {
    /// Sorted class labels, one per row.
    pub classes: Vec<String>,
    /// Sorted split tokens, one per column.
    pub splits: Vec<String>,
    /// `counts[row][col]` for `classes[row]` and `splits[col]`.
    pub counts: Vec<Vec<usize>>,
}

impl SplitCounts {
    /// Count for a (label, split) pair; zero when either is unknown.
    pub fn get(&self, label: &str, split: &str) -> usize {
        let row = self.classes.iter().position(|c| c == label);
        let col = self.splits.iter().position(|s| s == split);
        match (row, col) {
            (Some(r), Some(c)) => self.counts[r][c],
            _ => 0,
        }
    }

    /// Counts of one split column, in class order.
    pub fn column(&self, split: &str) -> Option<Vec<usize>> {
        let col = self.splits.iter().position(|s| s == split)?;
        Some(self.counts.iter().map(|row| row[col]).collect())
    }

    /// Total samples per split.
    pub fn totals(&self) -> BTreeMap<String, usize> {
        self.splits
            .iter()
            .enumerate()
            .map(|(col, split)| (split.clone(), self.counts.iter().map(|row| row[col]).sum()))
            .collect()
    }
}

impl Dataset {
    /// Number of samples per label, or `None` before labeling.
    pub fn count_occurrences(&self) -> Option<BTreeMap<String, usize>> {
        if !self.has_label {
            return None;
        }
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for label in self.samples.iter().filter_map(|s| s.label.as_deref()) {
            *counts.entry(label.to_string()).or_default() += 1;
        }
        Some(counts)
    }

    /// Alias of [`Dataset::count_occurrences`].
    pub fn count_classes(&self) -> Option<BTreeMap<String, usize>> {
        self.count_occurrences()
    }

    /// Label × split cross-tabulation, or `None` unless both columns exist.
    pub fn count_splits(&self) -> Option<SplitCounts> {
        let classes = self.classes()?;
        let splits = self.splits()?;

        let mut counts = vec![vec![0usize; splits.len()]; classes.len()];
        for sample in &self.samples {
            let (Some(label), Some(split)) = (sample.label.as_deref(), sample.split.as_deref()) else {
                continue;
            };
            let row = classes.binary_search_by(|c| c.as_str().cmp(label));
            let col = splits.binary_search_by(|s| s.as_str().cmp(split));
            if let (Ok(r), Ok(c)) = (row, col) {
                counts[r][c] += 1;
            }
        }

        Some(SplitCounts {
            classes,
            splits,
            counts,
        })
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn test_count_occurrences() {
        let mut ds = Dataset::from_filepaths(["d/cat/1.png", "d/cat/2.png", "d/dog/3.png"]);
        assert_eq!(ds.count_occurrences(), None);

        ds.label_by_parent_folder().unwrap();
        let counts = ds.count_classes().unwrap();
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["cat"], 2);
        assert_eq!(counts["dog"], 1);
    }

    #[test]
    fn test_count_splits_requires_split_column() {
        let mut ds = Dataset::from_filepaths(["d/cat/1.png"]);
        ds.label_by_parent_folder().unwrap();
        assert_eq!(ds.count_splits(), None);
    }

    #[test]
    fn test_count_splits_cross_tab() {
        let paths: Vec<String> = (0..4)
            .map(|i| format!("d/cat/{i}.png"))
            .chain((0..2).map(|i| format!("d/dog/{i}.png")))
            .collect();
        let mut ds = Dataset::from_filepaths(paths);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        ds.label_by_parent_folder()
            .unwrap()
            .split_by_stratification_with(3, "train", "valid", false, &mut rng)
            .unwrap();

        let table = ds.count_splits().unwrap();
        assert_eq!(table.classes, vec!["cat", "dog"]);
        assert_eq!(table.splits, vec!["train", "valid"]);
        assert_eq!(table.counts, vec![vec![1, 3], vec![0, 2]]);
        assert_eq!(table.get("dog", "train"), 0);
        assert_eq!(table.get("bird", "train"), 0);
        assert_eq!(table.column("valid"), Some(vec![3, 2]));
        assert_eq!(table.totals()["train"], 1);
    }
}
