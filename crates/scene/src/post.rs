//! Post-processing of the finished color raster.

use reefgen_core::canvas::CanvasPair;
use reefgen_core::error::ReefError;
use reefgen_core::prng::Xorshift64;

/// Draws a blur radius uniformly from `[0, max_radius]`.
pub fn sample_blur_radius(rng: &mut Xorshift64, max_radius: u32) -> u32 {
    rng.next_int(0, max_radius as i32) as u32
}

/// Gaussian-blurs the color raster with `sigma = radius`. Radius 0 leaves it
/// untouched. The label raster is never blurred.
pub fn soften(canvas: &mut CanvasPair, radius: u32) -> Result<(), ReefError> {
    if radius == 0 {
        return Ok(());
    }
    let blurred = image::imageops::blur(canvas.color(), radius as f32);
    canvas.replace_color(blurred)
}
