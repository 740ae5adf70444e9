//! Error types for the digit recognition pipeline.
//!
//! This module defines the error taxonomy for the crate: recoverable
//! interaction errors (classifier readiness, overlapping classification
//! requests, empty-canvas gating), stage-tagged processing errors, and
//! conversions from the underlying tensor/inference/io error types.

use thiserror::Error;

/// Enum representing different stages of processing in the pipeline.
///
/// This enum is used to identify which stage of the pipeline an error
/// occurred in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessingStage {
    /// Error occurred while rendering strokes onto the canvas buffer.
    Rasterization,
    /// Error occurred during raster resizing.
    Resize,
    /// Error occurred during tensor normalization.
    Normalization,
    /// Error occurred during post-processing of classifier scores.
    PostProcessing,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Rasterization => write!(f, "rasterization"),
            ProcessingStage::Resize => write!(f, "resize"),
            ProcessingStage::Normalization => write!(f, "normalization"),
            ProcessingStage::PostProcessing => write!(f, "post-processing"),
            ProcessingStage::Generic => write!(f, "processing"),
        }
    }
}

/// Enum representing the errors that can occur in the digit pipeline.
///
/// The first three variants are the recoverable interaction outcomes the
/// caller is expected to handle explicitly; the rest wrap failures from the
/// processing and inference layers.
#[derive(Error, Debug)]
pub enum DigitError {
    /// The classifier artifact has not finished loading (or failed to load).
    ///
    /// Recoverable: the caller should disable classification until the
    /// artifact cell reports ready.
    #[error("classifier not ready")]
    ClassifierNotReady,

    /// Another classification request is already in flight.
    ///
    /// Recoverable: overlapping requests are rejected, never queued. The
    /// first request's result is still delivered to its caller.
    #[error("classification already in flight")]
    ClassificationBusy,

    /// The canvas holds no ink since the last clear.
    ///
    /// Advisory: classifying an empty canvas is well-defined at the data
    /// level; this is only produced by the explicit gating helper.
    #[error("canvas is empty")]
    EmptyCanvas,

    /// Error occurred during a processing stage.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error occurred during inference in the classifier delegate.
    #[error("inference")]
    Inference(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error from the ONNX Runtime session.
    #[error(transparent)]
    Session(#[from] ort::Error),

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

/// Convenient result alias for digit pipeline operations.
pub type DigitResult<T> = Result<T, DigitError>;

impl DigitError {
    /// Creates a DigitError for resize operations.
    ///
    /// # Arguments
    ///
    /// * `context` - Additional context about the error.
    /// * `error` - The underlying error that caused this error.
    pub fn resize_error(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind: ProcessingStage::Resize,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a DigitError for normalization operations.
    ///
    /// # Arguments
    ///
    /// * `context` - Additional context about the error.
    /// * `error` - The underlying error that caused this error.
    pub fn normalization(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind: ProcessingStage::Normalization,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a DigitError for post-processing operations.
    ///
    /// # Arguments
    ///
    /// * `context` - Additional context about the error.
    /// * `error` - The underlying error that caused this error.
    pub fn post_processing(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind: ProcessingStage::PostProcessing,
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a DigitError for inference operations.
    ///
    /// # Arguments
    ///
    /// * `error` - The underlying error that caused this error.
    pub fn inference_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Inference(Box::new(error))
    }

    /// Creates a DigitError for invalid input.
    ///
    /// # Arguments
    ///
    /// * `message` - A message describing the invalid input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a DigitError for configuration errors.
    ///
    /// # Arguments
    ///
    /// * `message` - A message describing the configuration error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Creates a DigitError for a model artifact that failed to load.
    ///
    /// # Arguments
    ///
    /// * `path` - The path of the artifact that failed to load.
    /// * `context` - Additional context about the failure.
    /// * `error` - The underlying error that caused this error.
    pub fn model_load_error(
        path: &std::path::Path,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind: ProcessingStage::Generic,
            context: format!("loading model '{}': {}", path.display(), context),
            source: Box::new(error),
        }
    }
}

/// A simple string-backed error used where a processing stage fails without
/// an underlying source error.
#[derive(Debug)]
pub struct SimpleError {
    message: String,
}

impl SimpleError {
    /// Creates a new SimpleError with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SimpleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SimpleError {}

impl From<crate::core::config::ConfigError> for DigitError {
    fn from(error: crate::core::config::ConfigError) -> Self {
        Self::ConfigError {
            message: error.to_string(),
        }
    }
}
