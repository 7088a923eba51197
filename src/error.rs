use thiserror::Error;

/// Errors raised by dataset operations.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Directory traversal failed part-way (permission denied, vanished entry, ...).
    #[error("failed to walk dataset folder: {0}")]
    Walk(#[from] walkdir::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A label-dependent operation was called before any labeling ran.
    #[error("dataset has no label column; run a labeling operation first")]
    NotLabeled,

    /// The path has no parent folder segment to take a label from.
    #[error("cannot take parent folder of '{path}': fewer than two path segments")]
    ShallowPath { path: String },

    /// The filepath column was already populated; the row set is fixed.
    #[error("dataset already holds {rows} samples; create a new table to crawl again")]
    AlreadyPopulated { rows: usize },

    #[error("invalid recipe: {0}")]
    Recipe(#[from] serde_json::Error),
}

/// Convenience result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
