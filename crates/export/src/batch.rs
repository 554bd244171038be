//! Batch generation: many independent scenes written in parallel.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use reefgen_core::error::ReefError;
use reefgen_core::label::LabelEncoding;
use reefgen_core::prng::Xorshift64;
use reefgen_core::seed::SceneSeed;
use reefgen_scene::{compose, SceneParams, SceneReport};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::snapshot;

/// Everything needed to write a batch of samples.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub output: PathBuf,
    pub count: usize,
    pub width: u32,
    pub height: u32,
    pub fish: u32,
    pub sharks: u32,
    pub corals: u32,
    /// Batch seed; each sample derives its own from this and its index.
    pub seed: u64,
    pub params: Value,
    pub encoding: LabelEncoding,
}

/// Outcome of one written sample.
#[derive(Debug, Clone, Serialize)]
pub struct SampleSummary {
    pub index: usize,
    pub dir: PathBuf,
    pub seed: u64,
    pub fish: u32,
    pub sharks: u32,
    pub corals: u32,
    pub branch_segments: usize,
    pub blur_radius: u32,
}

/// Directory name of the sample at `index`.
pub fn sample_dir_name(index: usize) -> String {
    format!("sample_{index:05}")
}

impl BatchConfig {
    /// Seed of the sample at `index`.
    pub fn sample_seed(&self, index: usize) -> SceneSeed {
        SceneSeed::new(
            self.width,
            self.height,
            Xorshift64::derive_seed(self.seed, index as u64),
        )
        .with_quotas(self.fish, self.sharks, self.corals)
        .with_params(self.params.clone())
    }

    /// Generates and writes every sample, in parallel across samples.
    ///
    /// Dimensions and params are validated once up front, so a bad
    /// configuration fails before any directory is created. Results are
    /// returned in index order.
    pub fn run(&self) -> Result<Vec<SampleSummary>, ReefError> {
        let params = SceneParams::from_json(&self.params)?;
        self.sample_seed(0).validate()?;
        info!(
            count = self.count,
            width = self.width,
            height = self.height,
            seed = self.seed,
            output = %self.output.display(),
            "generating batch"
        );

        let summaries = (0..self.count)
            .into_par_iter()
            .map(|index| self.write_one(index, &params))
            .collect::<Result<Vec<_>, _>>()?;

        info!(written = summaries.len(), "batch complete");
        Ok(summaries)
    }

    fn write_one(&self, index: usize, params: &SceneParams) -> Result<SampleSummary, ReefError> {
        let seed = self.sample_seed(index);
        let scene = compose(&seed, params, self.encoding)?;
        let dir = self.output.join(sample_dir_name(index));
        snapshot::write_sample(&scene, &seed, &dir)?;
        debug!(index, dir = %dir.display(), "wrote sample");
        Ok(summary(index, &dir, &seed, &scene.report))
    }
}

fn summary(
    index: usize,
    dir: &Path,
    seed: &SceneSeed,
    report: &SceneReport,
) -> SampleSummary {
    SampleSummary {
        index,
        dir: dir.to_path_buf(),
        seed: seed.seed,
        fish: report.fish,
        sharks: report.sharks,
        corals: report.corals,
        branch_segments: report.branch_segments,
        blur_radius: report.blur_radius,
    }
}
