#![deny(unsafe_code)]
//! Procedural underwater scene generation.
//!
//! A scene is a seafloor band followed by a random interleaving of fish,
//! sharks, and branching corals, drawn onto a [`CanvasPair`](reefgen_core::CanvasPair) so that the
//! color image and the segmentation mask always agree pixel for pixel.
//! Randomness comes from one `Xorshift64` per scene, seeded from the
//! [`SceneSeed`]; the same seed always yields the same rasters.

pub mod composer;
pub mod coral;
pub mod organism;
pub mod params;
pub mod post;

pub use composer::{compose, Category, Placement, Scene, SceneReport};
pub use coral::{Branch, Coral, StrokePolicy};
pub use organism::{Fish, Ground, Organism, Shark, TailSide};
pub use params::SceneParams;

use reefgen_core::error::ReefError;
use reefgen_core::label::LabelEncoding;
use reefgen_core::seed::SceneSeed;

/// Parses the seed's parameter overrides and composes the scene.
pub fn generate(seed: &SceneSeed, encoding: LabelEncoding) -> Result<Scene, ReefError> {
    let params = SceneParams::from_json(&seed.params)?;
    compose(seed, &params, encoding)
}
