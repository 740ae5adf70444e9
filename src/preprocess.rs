//! Raster-to-tensor preprocessing.
//!
//! The classifier was fit on nearest-neighbor-sampled data, so the resize
//! filter here is part of the contract: substituting a smoothing filter
//! changes the numeric distribution of the input and the predictions with
//! it. The operation order is likewise fixed: resize, channel mean, shape,
//! scale.

use image::{RgbImage, imageops};

use crate::core::config::PreprocessConfig;
use crate::core::errors::{DigitError, DigitResult};
use crate::core::tensor::Tensor4D;

/// Transforms a raster snapshot into the normalized classifier input.
///
/// The output is a pure function of the raster: same pixels in, bit-identical
/// tensor out.
#[derive(Debug)]
pub struct Preprocessor {
    target_width: u32,
    target_height: u32,
}

impl Preprocessor {
    /// Creates a preprocessor for the configured target shape.
    pub fn new(config: &PreprocessConfig) -> Self {
        Self {
            target_width: config.target_width,
            target_height: config.target_height,
        }
    }

    /// Normalizes a raster snapshot into a `[1, target_h, target_w, 1]`
    /// tensor with values in `[0.0, 1.0]`.
    ///
    /// Pipeline, in fixed order:
    /// 1. nearest-neighbor resize to the target shape;
    /// 2. unweighted mean across the R, G, B channels;
    /// 3. reshape to `[1, H, W, 1]`;
    /// 4. divide by 255.0.
    pub fn normalize(&self, raster: &RgbImage) -> DigitResult<Tensor4D> {
        let resized = imageops::resize(
            raster,
            self.target_width,
            self.target_height,
            imageops::FilterType::Nearest,
        );

        let (width, height) = (self.target_width as usize, self.target_height as usize);
        let mut values = Vec::with_capacity(width * height);
        for pixel in resized.pixels() {
            let mean = (pixel[0] as f32 + pixel[1] as f32 + pixel[2] as f32) / 3.0;
            values.push(mean / 255.0);
        }

        Tensor4D::from_shape_vec((1, height, width, 1), values).map_err(|e| {
            DigitError::normalization(
                &format!("failed to shape resized raster into [1, {height}, {width}, 1]"),
                e,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn preprocessor() -> Preprocessor {
        Preprocessor::new(&PreprocessConfig::new())
    }

    #[test]
    fn all_background_normalizes_to_uniform_zero() {
        let raster = RgbImage::from_pixel(350, 350, Rgb([0, 0, 0]));
        let tensor = preprocessor().normalize(&raster).unwrap();
        assert_eq!(tensor.shape(), &[1, 28, 28, 1]);
        assert!(tensor.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn all_white_normalizes_to_uniform_one() {
        let raster = RgbImage::from_pixel(350, 350, Rgb([255, 255, 255]));
        let tensor = preprocessor().normalize(&raster).unwrap();
        assert!(tensor.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn channel_mean_is_unweighted() {
        // A pure red raster maps every pixel to 255/3/255 = 1/3.
        let raster = RgbImage::from_pixel(56, 56, Rgb([255, 0, 0]));
        let tensor = preprocessor().normalize(&raster).unwrap();
        let expected = (255.0 / 3.0) / 255.0;
        assert!(tensor.iter().all(|&v| v == expected));
    }

    #[test]
    fn normalization_is_bit_identical_across_calls() {
        let mut raster = RgbImage::from_pixel(350, 350, Rgb([0, 0, 0]));
        for x in 100..200 {
            for y in 40..250 {
                raster.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let pre = preprocessor();
        let a = pre.normalize(&raster).unwrap();
        let b = pre.normalize(&raster).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn resize_uses_nearest_neighbor_sampling() {
        // Left half black, right half white, at exactly 2x the target size:
        // nearest-neighbor keeps the hard edge with no intermediate values.
        let mut raster = RgbImage::from_pixel(56, 56, Rgb([0, 0, 0]));
        for x in 28..56 {
            for y in 0..56 {
                raster.put_pixel(x, y, Rgb([255, 255, 255]));
            }
        }
        let tensor = preprocessor().normalize(&raster).unwrap();
        assert!(tensor.iter().all(|&v| v == 0.0 || v == 1.0));
        assert_eq!(tensor[[0, 14, 0, 0]], 0.0);
        assert_eq!(tensor[[0, 14, 27, 0]], 1.0);
    }

    #[test]
    fn tensor_depends_only_on_the_raster() {
        // Two rasters with identical pixels built through different mutation
        // histories normalize identically.
        let mut a = RgbImage::from_pixel(350, 350, Rgb([0, 0, 0]));
        a.put_pixel(10, 10, Rgb([255, 255, 255]));

        let mut b = RgbImage::from_pixel(350, 350, Rgb([128, 128, 128]));
        for pixel in b.pixels_mut() {
            *pixel = Rgb([0, 0, 0]);
        }
        b.put_pixel(10, 10, Rgb([255, 255, 255]));

        let pre = preprocessor();
        assert_eq!(pre.normalize(&a).unwrap(), pre.normalize(&b).unwrap());
    }
}
