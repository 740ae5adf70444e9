//! Configuration for the drawing surface and the preprocessing pipeline.
//!
//! This module provides the configuration structures for the crate along
//! with a validation trait and the error type produced when validation
//! fails. Configurations are serde-serializable so they can be loaded from
//! JSON alongside the model artifact.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ratio between the surface's shorter side and the default stroke width.
///
/// A 350x350 surface yields the canonical 15 px brush.
pub const STROKE_WIDTH_RATIO: f32 = 23.0;

/// Default logical size of the drawing surface, in surface-local pixels.
pub const DEFAULT_SURFACE_SIZE: u32 = 350;

/// Default side length of the normalized classifier input.
pub const DEFAULT_TARGET_SIZE: u32 = 28;

/// Number of digit classes.
pub const DIGIT_CLASS_COUNT: usize = 10;

/// Errors that can occur during configuration validation.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Error indicating that a dimension is invalid (must be greater than 0).
    #[error("invalid dimension for '{field}': must be greater than 0")]
    InvalidDimension {
        /// The name of the offending field.
        field: &'static str,
    },

    /// Error indicating that a configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// A message describing the problem.
        message: String,
    },
}

/// A trait for validating configuration parameters.
///
/// Implementors check their fields for consistency before the configuration
/// is used to construct pipeline components.
pub trait ConfigValidator {
    /// Validates the configuration.
    ///
    /// # Returns
    ///
    /// A Result indicating success or a ConfigError if validation fails.
    fn validate(&self) -> Result<(), ConfigError>;

    /// Returns the default configuration.
    fn get_defaults() -> Self
    where
        Self: Sized;

    /// Validates that a dimension is non-zero.
    fn validate_dimension(&self, value: u32, field: &'static str) -> Result<(), ConfigError> {
        if value == 0 {
            return Err(ConfigError::InvalidDimension { field });
        }
        Ok(())
    }
}

/// Configuration for the drawing surface and its rasterization style.
///
/// The stroke width defaults to the surface's shorter side divided by
/// [`STROKE_WIDTH_RATIO`], which keeps the brush proportional when the
/// surface is resized; an explicit width overrides the ratio.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Logical width of the surface in pixels.
    pub width: u32,
    /// Logical height of the surface in pixels.
    pub height: u32,
    /// Explicit stroke width in pixels; `None` derives it from the surface size.
    pub stroke_width: Option<u32>,
    /// Foreground (ink) color as RGB.
    pub foreground: [u8; 3],
    /// Background color as RGB.
    pub background: [u8; 3],
}

impl SurfaceConfig {
    /// Creates a surface configuration with the canonical defaults:
    /// 350x350 surface, derived 15 px brush, white ink on black.
    pub fn new() -> Self {
        Self {
            width: DEFAULT_SURFACE_SIZE,
            height: DEFAULT_SURFACE_SIZE,
            stroke_width: None,
            foreground: [255, 255, 255],
            background: [0, 0, 0],
        }
    }

    /// Creates a surface configuration with an explicit size.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::new()
        }
    }

    /// The stroke width actually used by the rasterizer.
    ///
    /// Derived from the shorter side when not set explicitly; never below 1.
    pub fn effective_stroke_width(&self) -> u32 {
        match self.stroke_width {
            Some(w) => w.max(1),
            None => {
                let derived = (self.width.min(self.height) as f32 / STROKE_WIDTH_RATIO).round();
                (derived as u32).max(1)
            }
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator for SurfaceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_dimension(self.width, "width")?;
        self.validate_dimension(self.height, "height")?;
        if let Some(w) = self.stroke_width {
            self.validate_dimension(w, "stroke_width")?;
            if w > self.width.min(self.height) {
                return Err(ConfigError::InvalidConfig {
                    message: format!(
                        "stroke width {} exceeds the surface's shorter side {}",
                        w,
                        self.width.min(self.height)
                    ),
                });
            }
        }
        if self.foreground == self.background {
            return Err(ConfigError::InvalidConfig {
                message: "foreground and background colors must differ".to_string(),
            });
        }
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::new()
    }
}

/// Configuration for the raster-to-tensor preprocessing step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Width of the normalized classifier input.
    pub target_width: u32,
    /// Height of the normalized classifier input.
    pub target_height: u32,
    /// Number of classes the classifier scores over.
    pub num_classes: usize,
}

impl PreprocessConfig {
    /// Creates the canonical 28x28, ten-class configuration.
    pub fn new() -> Self {
        Self {
            target_width: DEFAULT_TARGET_SIZE,
            target_height: DEFAULT_TARGET_SIZE,
            num_classes: DIGIT_CLASS_COUNT,
        }
    }
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator for PreprocessConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.validate_dimension(self.target_width, "target_width")?;
        self.validate_dimension(self.target_height, "target_height")?;
        if self.num_classes == 0 {
            return Err(ConfigError::InvalidConfig {
                message: "num_classes must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    fn get_defaults() -> Self {
        Self::new()
    }
}
