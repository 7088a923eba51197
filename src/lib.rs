//! Dataset table for supervised-classification workflows.
//!
//! Crawl a folder of files into a [`Dataset`], label each sample (by parent folder or
//! any function of its path), carve out stratified train/valid/test splits, and read
//! back per-class and per-split counts.

pub mod data;
pub mod error;
pub mod recipe;

pub use data::filter::PathFilter;
pub use data::label::parent_folder;
pub use data::model::{Column, Dataset, Sample, SampleId};
pub use data::split::StratifiedSplit;
pub use data::summary::SplitCounts;
pub use error::{DatasetError, Result};
pub use recipe::{DatasetRecipe, Labeling};
