//! Conversion of generated PNG samples into NIfTI volumes.
//!
//! Every sample directory under the dataset root is searched recursively.
//! Files whose lowercase name contains `image.png` become `image.nii.gz` and
//! files whose name contains `mask.png` become `mask.nii.gz`, written next to
//! the source file. Files directly in the root are ignored.

use std::path::{Path, PathBuf};

use reefgen_core::error::ReefError;
use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::nifti;
use crate::volume::Volume;

pub const IMAGE_VOLUME: &str = "image.nii.gz";
pub const MASK_VOLUME: &str = "mask.nii.gz";

/// Which raster a source file holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Image,
    Mask,
}

impl SourceKind {
    /// Classifies a file by name, case-insensitively.
    pub fn classify(file_name: &str) -> Option<Self> {
        let lower = file_name.to_lowercase();
        if lower.contains("image.png") {
            Some(SourceKind::Image)
        } else if lower.contains("mask.png") {
            Some(SourceKind::Mask)
        } else {
            None
        }
    }

    pub fn output_name(self) -> &'static str {
        match self {
            SourceKind::Image => IMAGE_VOLUME,
            SourceKind::Mask => MASK_VOLUME,
        }
    }
}

/// One converted file.
#[derive(Debug, Clone, Serialize)]
pub struct Converted {
    pub source: PathBuf,
    pub output: PathBuf,
    pub kind: SourceKind,
}

/// Converts one PNG to a volume file and returns the output path.
pub fn convert_file(path: &Path, kind: SourceKind) -> Result<PathBuf, ReefError> {
    let decoded = image::open(path).map_err(|e| ReefError::Io(format!("{}: {e}", path.display())))?;
    let volume = match kind {
        SourceKind::Image => Volume::from_rgb(&decoded.to_rgb8()),
        SourceKind::Mask => Volume::from_gray(&decoded.to_luma8()),
    };
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let output = dir.join(kind.output_name());
    nifti::write(&volume, &output, kind.output_name())?;
    Ok(output)
}

/// Converts every image and mask found in the sample directories under `root`.
///
/// Returns `ReefError::Io` if `root` is not a directory or a file fails to
/// decode or write. Unreadable directory entries are skipped with a warning.
pub fn convert_dataset(root: &Path) -> Result<Vec<Converted>, ReefError> {
    if !root.is_dir() {
        return Err(ReefError::Io(format!("{} is not a directory", root.display())));
    }
    info!(root = %root.display(), "converting samples");

    let mut converted = Vec::new();
    for entry in WalkDir::new(root)
        .min_depth(2)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(kind) = SourceKind::classify(&entry.file_name().to_string_lossy()) else {
            continue;
        };
        let output = convert_file(entry.path(), kind)?;
        debug!(source = %entry.path().display(), output = %output.display(), "converted");
        converted.push(Converted {
            source: entry.path().to_path_buf(),
            output,
            kind,
        });
    }

    info!(files = converted.len(), "conversion complete");
    Ok(converted)
}
