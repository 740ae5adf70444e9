//! Tensor type aliases used across preprocessing and inference.

/// A 1-dimensional tensor of f32 values (a score vector).
pub type Tensor1D = ndarray::Array1<f32>;

/// A 2-dimensional tensor of f32 values (batch of score vectors).
pub type Tensor2D = ndarray::Array2<f32>;

/// A 4-dimensional tensor of f32 values.
///
/// The normalized classifier input uses the layout
/// `[batch, height, width, channel]` with batch and channel fixed at 1.
pub type Tensor4D = ndarray::Array4<f32>;
