//! Stratified split assignment.
//!
//! Each call moves at most `k` samples per class from the `origin` split to the `to`
//! split. Calls compose: carving `valid` and then `test` out of `train` only ever
//! samples rows still marked `train`, so no row ends up in both.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::model::{Dataset, SampleId};
use crate::error::{DatasetError, Result};

/// One stratified split step: move up to `k` samples per class from `origin` to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StratifiedSplit {
    /// Maximum samples of every class to move.
    pub k: usize,
    /// Split the samples are drawn from.
    pub origin: String,
    /// Split the drawn samples are moved to.
    pub to: String,
    /// Reset every row to `origin` before sampling.
    pub overwrite: bool,
}

impl Default for StratifiedSplit {
    fn default() -> Self {
        Self {
            k: 1,
            origin: "train".to_string(),
            to: "valid".to_string(),
            overwrite: false,
        }
    }
}

impl StratifiedSplit {
    pub fn new(k: usize, origin: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            k,
            origin: origin.into(),
            to: to.into(),
            overwrite: false,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

impl Dataset {
    /// Move up to `k` random samples of every class from split `origin` to split `to`.
    ///
    /// Draws from the thread-local generator; use
    /// [`Dataset::split_by_stratification_with`] for reproducible partitions.
    pub fn split_by_stratification(
        &mut self,
        k: usize,
        origin: &str,
        to: &str,
        overwrite: bool,
    ) -> Result<&mut Self> {
        let mut rng = rand::thread_rng();
        self.split_by_stratification_with(k, origin, to, overwrite, &mut rng)
    }

    /// Stratified split drawing from the caller's random source.
    ///
    /// If `overwrite` is set, or no split exists yet, every row first becomes `origin`.
    /// Then, per class in sorted order, `min(k, available)` rows still in `origin` are
    /// sampled uniformly without replacement and moved to `to`. Classes with fewer
    /// than `k` rows in `origin` give up all of them.
    pub fn split_by_stratification_with<R: Rng + ?Sized>(
        &mut self,
        k: usize,
        origin: &str,
        to: &str,
        overwrite: bool,
        rng: &mut R,
    ) -> Result<&mut Self> {
        let classes = self.classes().ok_or(DatasetError::NotLabeled)?;

        if overwrite || !self.has_split {
            for sample in &mut self.samples {
                sample.split = Some(origin.to_string());
            }
            self.has_split = true;
        }

        if origin == to {
            log::debug!("Split origin and target are both '{origin}'; nothing to move");
            return Ok(self);
        }

        let mut moved = 0usize;
        for class in &classes {
            let pool: Vec<SampleId> = self
                .samples
                .iter()
                .enumerate()
                .filter(|(_, s)| {
                    s.label.as_deref() == Some(class.as_str()) && s.split.as_deref() == Some(origin)
                })
                .map(|(i, _)| i)
                .collect();

            let n = k.min(pool.len());
            let picked: Vec<SampleId> = pool.choose_multiple(rng, n).copied().collect();
            for &id in &picked {
                self.samples[id].split = Some(to.to_string());
            }

            log::debug!(
                "Class '{}': moved {} of {} samples from '{}' to '{}'",
                class,
                picked.len(),
                pool.len(),
                origin,
                to
            );
            moved += picked.len();
        }

        log::info!(
            "Stratified split moved {} samples from '{}' to '{}' (k = {} per class, {} classes)",
            moved,
            origin,
            to,
            k,
            classes.len()
        );
        Ok(self)
    }

    /// Apply a [`StratifiedSplit`] step with the given random source.
    pub fn apply_split<R: Rng + ?Sized>(&mut self, step: &StratifiedSplit, rng: &mut R) -> Result<&mut Self> {
        self.split_by_stratification_with(step.k, &step.origin, &step.to, step.overwrite, rng)
    }
}
