#![deny(unsafe_code)]
//! Dataset output for generated scenes.
//!
//! This crate sits between `reefgen-scene` (which composes rasters in memory)
//! and the `reefgen` binary. It owns the sample directory layout, parallel
//! batch generation, and conversion of finished samples to NIfTI volumes.

pub mod batch;
pub mod convert;
pub mod nifti;
pub mod snapshot;
pub mod volume;

pub use batch::{sample_dir_name, BatchConfig, SampleSummary};
pub use convert::{convert_dataset, Converted, SourceKind};
pub use snapshot::{read_meta, read_sample, write_sample, SampleMeta};
pub use volume::Volume;
