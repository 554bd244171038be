//! Single-file NIfTI-1 writer for `u8` volumes, gzip-compressed (`.nii.gz`).
//!
//! Layout: 348-byte little-endian header, a 4-byte zero extension flag, then
//! the voxels at `vox_offset = 352`. The spatial transform is the identity,
//! stored as an aligned sform (qform unset).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use reefgen_core::error::ReefError;

use crate::volume::Volume;

pub const HEADER_SIZE: usize = 348;
pub const VOX_OFFSET: usize = 352;
/// NIfTI datatype code for unsigned char.
pub const DT_UINT8: i16 = 2;
/// NIFTI_XFORM_ALIGNED_ANAT.
pub const XFORM_ALIGNED: i16 = 2;
pub const MAGIC: &[u8; 4] = b"n+1\0";

/// Serializes `volume` as a complete `.nii` byte stream.
///
/// Returns `ReefError::InvalidDimensions` for volumes with no axes, more than
/// seven axes, or an extent that does not fit the header's `i16` fields.
pub fn encode(volume: &Volume, description: &str) -> Result<Vec<u8>, ReefError> {
    let dims = volume.dims();
    if dims.is_empty() || dims.len() > 7 {
        return Err(ReefError::InvalidDimensions);
    }
    let mut dim = [1i16; 8];
    dim[0] = dims.len() as i16;
    for (slot, &d) in dim[1..].iter_mut().zip(dims) {
        *slot = i16::try_from(d).map_err(|_| ReefError::InvalidDimensions)?;
    }

    let mut out = vec![0u8; VOX_OFFSET];
    put_i32(&mut out, 0, HEADER_SIZE as i32);
    out[38] = b'r';
    for (k, d) in dim.iter().enumerate() {
        put_i16(&mut out, 40 + 2 * k, *d);
    }
    put_i16(&mut out, 70, DT_UINT8);
    put_i16(&mut out, 72, 8);
    for k in 0..8 {
        put_f32(&mut out, 76 + 4 * k, 1.0);
    }
    put_f32(&mut out, 108, VOX_OFFSET as f32);
    put_f32(&mut out, 112, 1.0);
    // xyzt_units: millimetres.
    out[123] = 2;

    let desc = description.as_bytes();
    let n = desc.len().min(79);
    out[148..148 + n].copy_from_slice(&desc[..n]);

    put_i16(&mut out, 252, 0);
    put_i16(&mut out, 254, XFORM_ALIGNED);
    for (row, offset) in [280usize, 296, 312].into_iter().enumerate() {
        for col in 0..4 {
            put_f32(&mut out, offset + 4 * col, if row == col { 1.0 } else { 0.0 });
        }
    }
    out[344..348].copy_from_slice(MAGIC);

    out.extend_from_slice(volume.data());
    Ok(out)
}

/// Writes `volume` to `path` as a gzip-compressed `.nii.gz` file.
pub fn write(volume: &Volume, path: &Path, description: &str) -> Result<(), ReefError> {
    let bytes = encode(volume, description)?;
    let io_err = |e: std::io::Error| ReefError::Io(format!("{}: {e}", path.display()));
    let file = File::create(path).map_err(io_err)?;
    let mut gz = GzEncoder::new(BufWriter::new(file), Compression::default());
    gz.write_all(&bytes).map_err(io_err)?;
    gz.finish().map_err(io_err)?.flush().map_err(io_err)
}

fn put_i16(buf: &mut [u8], at: usize, v: i16) {
    buf[at..at + 2].copy_from_slice(&v.to_le_bytes());
}

fn put_i32(buf: &mut [u8], at: usize, v: i32) {
    buf[at..at + 4].copy_from_slice(&v.to_le_bytes());
}

fn put_f32(buf: &mut [u8], at: usize, v: f32) {
    buf[at..at + 4].copy_from_slice(&v.to_le_bytes());
}
