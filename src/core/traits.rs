//! Core trait seams of the pipeline.
//!
//! The classifier is an external collaborator: the core only needs one
//! capability from it, mapping a normalized input tensor to a score vector.
//! Everything else (artifact format, runtime, device placement) stays behind
//! this trait.

use crate::core::errors::DigitResult;
use crate::core::tensor::Tensor4D;

/// Capability of an external digit classifier.
///
/// Implementors map a normalized `[1, H, W, 1]` tensor to one score per
/// label, in label order. Implementations must be shareable across threads
/// so a classification can run while drawing continues.
pub trait Classifier: Send + Sync {
    /// Runs the classifier on a normalized input tensor.
    ///
    /// # Arguments
    ///
    /// * `input` - The normalized input tensor.
    ///
    /// # Returns
    ///
    /// A Result containing one score per label, index = label, or a
    /// DigitError if inference fails.
    fn predict(&self, input: &Tensor4D) -> DigitResult<Vec<f32>>;

    /// The number of labels this classifier scores over.
    fn num_classes(&self) -> usize;
}
