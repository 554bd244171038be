//! Pure-computation conversion from 2D rasters to volumetric voxel arrays.
//!
//! The raster is rotated 90° clockwise and laid out with the first voxel axis
//! varying fastest, which is the same as reading voxel `(i, j[, c])` from
//! pixel `(x = i, y = H - 1 - j)[c]`. Kept free of file I/O so it can be
//! tested directly and reused by any volumetric writer.

use image::{GrayImage, RgbImage};

/// A dense `u8` voxel array with first-axis-fastest layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    dims: Vec<usize>,
    data: Vec<u8>,
}

impl Volume {
    /// Voxel extents per axis, e.g. `[W, H]` or `[W, H, 3]`.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Voxel at `index` (one coordinate per axis), or `None` when out of range.
    pub fn get(&self, index: &[usize]) -> Option<u8> {
        if index.len() != self.dims.len() {
            return None;
        }
        let mut offset = 0;
        let mut stride = 1;
        for (&i, &d) in index.iter().zip(&self.dims) {
            if i >= d {
                return None;
            }
            offset += i * stride;
            stride *= d;
        }
        self.data.get(offset).copied()
    }

    /// Single-channel mask volume of dims `[W, H]`.
    pub fn from_gray(mask: &GrayImage) -> Self {
        let (w, h) = mask.dimensions();
        let mut data = Vec::with_capacity(w as usize * h as usize);
        for j in 0..h {
            let y = h - 1 - j;
            data.extend((0..w).map(|x| mask.get_pixel(x, y).0[0]));
        }
        Self {
            dims: vec![w as usize, h as usize],
            data,
        }
    }

    /// Color volume of dims `[W, H, 3]`, one channel per slice.
    pub fn from_rgb(image: &RgbImage) -> Self {
        let (w, h) = image.dimensions();
        let mut data = Vec::with_capacity(w as usize * h as usize * 3);
        for c in 0..3 {
            for j in 0..h {
                let y = h - 1 - j;
                data.extend((0..w).map(|x| image.get_pixel(x, y).0[c]));
            }
        }
        Self {
            dims: vec![w as usize, h as usize, 3],
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Luma, Rgb};

    #[test]
    fn gray_volume_has_width_first_dims_and_flipped_rows() {
        let mut mask = GrayImage::new(3, 2);
        mask.put_pixel(0, 0, Luma([10]));
        mask.put_pixel(2, 1, Luma([20]));
        let vol = Volume::from_gray(&mask);
        assert_eq!(vol.dims(), &[3, 2]);
        assert_eq!(vol.data().len(), 6);
        // Top-left pixel lands on the last row of voxels, bottom-right on the first.
        assert_eq!(vol.get(&[0, 1]), Some(10));
        assert_eq!(vol.get(&[2, 0]), Some(20));
        assert_eq!(vol.data()[2], 20);
    }

    #[test]
    fn rgb_volume_stores_channels_as_slices() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(1, 0, Rgb([1, 2, 3]));
        let vol = Volume::from_rgb(&img);
        assert_eq!(vol.dims(), &[2, 2, 3]);
        for c in 0..3 {
            assert_eq!(vol.get(&[1, 1, c]), Some(c as u8 + 1));
            assert_eq!(vol.get(&[1, 0, c]), Some(0));
        }
    }

    #[test]
    fn get_rejects_bad_indices() {
        let vol = Volume::from_gray(&GrayImage::new(2, 2));
        assert_eq!(vol.get(&[2, 0]), None);
        assert_eq!(vol.get(&[0]), None);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn every_voxel_reads_its_rotated_pixel(
                w in 1_u32..12,
                h in 1_u32..12,
                bytes in proptest::collection::vec(any::<u8>(), 432),
            ) {
                let n = (w * h * 3) as usize;
                let img = RgbImage::from_raw(w, h, bytes[..n].to_vec()).unwrap();
                let vol = Volume::from_rgb(&img);
                prop_assert_eq!(vol.data().len(), n);
                for i in 0..w {
                    for j in 0..h {
                        let px = img.get_pixel(i, h - 1 - j).0;
                        for c in 0..3 {
                            prop_assert_eq!(vol.get(&[i as usize, j as usize, c]), Some(px[c]));
                        }
                    }
                }
            }
        }
    }
}
