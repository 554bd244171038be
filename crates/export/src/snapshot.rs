//! On-disk layout of one generated sample.
//!
//! A sample directory holds the color raster as RGB8 PNG, the label raster as
//! L8 PNG, and a JSON sidecar with the seed and the composer's report.

use std::fs;
use std::path::Path;

use reefgen_core::canvas::CanvasPair;
use reefgen_core::error::ReefError;
use reefgen_core::label::LabelEncoding;
use reefgen_core::seed::SceneSeed;
use reefgen_scene::{Scene, SceneReport};
use serde::{Deserialize, Serialize};

pub const IMAGE_FILE: &str = "image.png";
pub const MASK_FILE: &str = "mask.png";
pub const META_FILE: &str = "scene.json";

/// Contents of the JSON sidecar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleMeta {
    pub seed: SceneSeed,
    /// Mask byte scheme of `mask.png`; with `seed` it reproduces both rasters.
    #[serde(default)]
    pub encoding: LabelEncoding,
    pub report: SceneReport,
}

/// Writes `scene` into `dir`, creating the directory if needed.
///
/// Returns `ReefError::Io` on any filesystem or encoding failure.
pub fn write_sample(scene: &Scene, seed: &SceneSeed, dir: &Path) -> Result<(), ReefError> {
    fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
    scene
        .canvas
        .color()
        .save(dir.join(IMAGE_FILE))
        .map_err(|e| ReefError::Io(e.to_string()))?;
    scene
        .canvas
        .label()
        .save(dir.join(MASK_FILE))
        .map_err(|e| ReefError::Io(e.to_string()))?;

    let meta = SampleMeta {
        seed: seed.clone(),
        encoding: scene.canvas.encoding(),
        report: scene.report.clone(),
    };
    let json = serde_json::to_string_pretty(&meta).map_err(|e| ReefError::Io(e.to_string()))?;
    let meta_path = dir.join(META_FILE);
    fs::write(&meta_path, json).map_err(|e| io_error(&meta_path, e))
}

/// Loads the raster pair of a sample directory.
///
/// The PNGs are converted to RGB8 and L8 on load. Returns
/// `ReefError::DimensionMismatch` if the two rasters disagree in size.
pub fn read_sample(dir: &Path, encoding: LabelEncoding) -> Result<CanvasPair, ReefError> {
    let color = image::open(dir.join(IMAGE_FILE))?.to_rgb8();
    let label = image::open(dir.join(MASK_FILE))?.to_luma8();
    CanvasPair::from_parts(color, label, encoding)
}

/// Loads the JSON sidecar of a sample directory.
pub fn read_meta(dir: &Path) -> Result<SampleMeta, ReefError> {
    let path = dir.join(META_FILE);
    let text = fs::read_to_string(&path).map_err(|e| io_error(&path, e))?;
    serde_json::from_str(&text).map_err(|e| ReefError::Io(format!("{}: {e}", path.display())))
}

fn io_error(path: &Path, e: std::io::Error) -> ReefError {
    ReefError::Io(format!("{}: {e}", path.display()))
}
