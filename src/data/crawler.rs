use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::filter::PathFilter;
use super::model::{Dataset, Sample};
use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Recursively list every file under `root` that passes `filter`.
///
/// Paths are returned in traversal order as `root` joined with the relative path.
/// Directories (and symlinks pointing at directories) are not samples. A missing
/// root, or a root that is a regular file, yields an empty list.
///
/// Errors met part-way through the walk (permission denied, an entry removed while
/// walking) are not skipped: the first one aborts the crawl as `DatasetError::Walk`.
pub fn crawl(root: &Path, filter: &PathFilter) -> Result<Vec<String>> {
    if !root.exists() {
        log::warn!("Dataset folder {} does not exist; no samples found", root.display());
        return Ok(Vec::new());
    }
    if !root.is_dir() {
        log::warn!("Dataset root {} is not a folder; no samples found", root.display());
        return Ok(Vec::new());
    }

    let mut filepaths = Vec::new();
    let mut skipped = 0usize;

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir()) {
            continue;
        }

        let filepath = entry.path().to_string_lossy().into_owned();
        if filter.accepts(&filepath) {
            filepaths.push(filepath);
        } else {
            skipped += 1;
        }
    }

    log::debug!(
        "Crawled {}: kept {} files, filtered out {}",
        root.display(),
        filepaths.len(),
        skipped
    );
    Ok(filepaths)
}

impl Dataset {
    /// Populate the `filepath` column with every file under `folder`.
    ///
    /// This fixes the row set for the lifetime of the table; crawling a table that
    /// already has a `filepath` column fails with [`DatasetError::AlreadyPopulated`].
    pub fn from_folder<P: AsRef<Path>>(&mut self, folder: P, filter: &PathFilter) -> Result<&mut Self> {
        if self.has_filepath {
            return Err(DatasetError::AlreadyPopulated {
                rows: self.samples.len(),
            });
        }

        let folder: PathBuf = folder.as_ref().to_path_buf();
        let filepaths = crawl(&folder, filter)?;
        log::info!("Loaded {} samples from {}", filepaths.len(), folder.display());

        self.samples = filepaths.into_iter().map(Sample::new).collect();
        self.has_filepath = true;
        self.folder = Some(folder);
        self.filter = filter.clone();
        Ok(self)
    }
}
