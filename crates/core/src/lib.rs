#![deny(unsafe_code)]
//! Core types for the reefgen synthetic segmentation dataset generator.
//!
//! Provides the [`CanvasPair`] (color raster + label raster drawn in
//! lockstep), the [`Shape`] primitives and their span rasterizer, the
//! [`Label`] classes and their mask encodings, RGB colors, the `Xorshift64`
//! PRNG, JSON parameter helpers, and the reproducible [`SceneSeed`].

pub mod canvas;
pub mod color;
pub mod error;
pub mod label;
pub mod params;
pub mod prng;
pub mod seed;
pub mod shape;

pub use canvas::CanvasPair;
pub use color::{ColorRange, Rgb};
pub use error::ReefError;
pub use label::{Label, LabelEncoding};
pub use prng::Xorshift64;
pub use seed::SceneSeed;
pub use shape::{BBox, Coverage, Point, Shape, Span};
