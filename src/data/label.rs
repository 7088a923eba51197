use std::path::MAIN_SEPARATOR;

use super::model::Dataset;
use crate::error::{DatasetError, Result};

/// Second-to-last segment of `filepath`, split on `/` and the platform separator.
pub fn parent_folder(filepath: &str) -> Result<String> {
    let segments: Vec<&str> = filepath
        .split(|c| c == '/' || c == MAIN_SEPARATOR)
        .collect();
    if segments.len() < 2 {
        return Err(DatasetError::ShallowPath {
            path: filepath.to_string(),
        });
    }
    Ok(segments[segments.len() - 2].to_string())
}

impl Dataset {
    /// Label every sample with `func(filepath)`, overwriting previous labels.
    pub fn label_by_function<F>(&mut self, mut func: F) -> &mut Self
    where
        F: FnMut(&str) -> String,
    {
        for sample in &mut self.samples {
            sample.label = Some(func(&sample.filepath));
        }
        self.has_label = true;
        log::info!("Labeled {} samples", self.samples.len());
        self
    }

    /// Like [`Dataset::label_by_function`], but `func` may fail.
    ///
    /// Every row is evaluated before anything is written: on error the table is
    /// left untouched.
    pub fn try_label_by_function<F>(&mut self, mut func: F) -> Result<&mut Self>
    where
        F: FnMut(&str) -> Result<String>,
    {
        let labels = self
            .samples
            .iter()
            .map(|s| func(&s.filepath))
            .collect::<Result<Vec<_>>>()?;

        for (sample, label) in self.samples.iter_mut().zip(labels) {
            sample.label = Some(label);
        }
        self.has_label = true;
        log::info!("Labeled {} samples", self.samples.len());
        Ok(self)
    }

    /// Label every sample by the name of the folder that contains it.
    pub fn label_by_parent_folder(&mut self) -> Result<&mut Self> {
        self.try_label_by_function(parent_folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parent_folder() {
        assert_eq!(parent_folder("a/b/c/img1.png").unwrap(), "c");
        assert_eq!(parent_folder("cat/1.png").unwrap(), "cat");
        assert_eq!(parent_folder("/1.png").unwrap(), "");
    }

    #[test]
    fn test_parent_folder_rejects_bare_file_name() {
        let err = parent_folder("img1.png").unwrap_err();
        assert!(matches!(err, DatasetError::ShallowPath { ref path } if path == "img1.png"));
    }

    #[test]
    fn test_label_by_function_overwrites() {
        let mut ds = Dataset::from_filepaths(["a/cat/1.png", "a/dog/2.png"]);
        ds.label_by_function(|_| "x".to_string());
        ds.label_by_function(|f| if f.contains("cat") { "cat".into() } else { "other".into() });
        assert_eq!(ds.labels().unwrap(), vec!["cat", "other"]);
    }

    #[test]
    fn test_failed_labeling_leaves_table_untouched() {
        let mut ds = Dataset::from_filepaths(["a/cat/1.png", "orphan.png"]);
        assert!(ds.label_by_parent_folder().is_err());
        assert!(!ds.is_labeled());
        assert!(ds.samples().iter().all(|s| s.label.is_none()));
    }

    #[test]
    fn test_labeling_keeps_row_order_and_count() {
        let paths = ["r/b/2.png", "r/a/1.png", "r/b/3.png"];
        let mut ds = Dataset::from_filepaths(paths);
        ds.label_by_parent_folder().unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.filepaths(), paths.to_vec());
        assert_eq!(ds.labels().unwrap(), vec!["b", "a", "b"]);
    }
}
