//! The core module of the digit pipeline.
//!
//! This module contains the fundamental components shared by the rest of the
//! crate:
//! - Configuration management and validation
//! - Error handling
//! - Tensor type aliases
//! - The classifier capability trait
//!
//! It also provides re-exports of commonly used types for convenience.

pub mod config;
pub mod errors;
pub mod tensor;
pub mod traits;

pub use config::{
    ConfigError, ConfigValidator, DEFAULT_SURFACE_SIZE, DEFAULT_TARGET_SIZE, DIGIT_CLASS_COUNT,
    PreprocessConfig, STROKE_WIDTH_RATIO, SurfaceConfig,
};
pub use errors::{DigitError, DigitResult, ProcessingStage};
pub use tensor::{Tensor1D, Tensor2D, Tensor4D};
pub use traits::Classifier;

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and
/// formatting layer. It's typically called at the start of an application to
/// enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
