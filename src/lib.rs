//! # digitpad
//!
//! A Rust library that turns freehand digit strokes into a classification
//! label using ONNX models. The core is a deterministic pipeline: noisy
//! pointer/touch samples become strokes, strokes become a raster, the
//! raster becomes a fixed-shape normalized tensor, and the classifier's
//! score vector becomes a single digit.
//!
//! ## Features
//!
//! - Unified pointer and touch input normalization
//! - Stroke segmentation with an append-only point history
//! - Deterministic round-brush rasterization (incremental rendering equals
//!   a full re-render)
//! - Fixed-order preprocessing: nearest-neighbor resize, channel mean,
//!   `[1, 28, 28, 1]` shape, scale to `[0, 1]`
//! - ONNX Runtime integration with a two-phase artifact lifecycle
//! - Single-flight classification with stale-result detection
//!
//! ## Modules
//!
//! * [`core`] - Configuration, error handling, tensor aliases, and the
//!   classifier trait
//! * [`input`] - Pointer/touch event normalization
//! * [`stroke`] - The pen state machine and the point arena
//! * [`raster`] - Stroke rendering onto the canvas buffer
//! * [`preprocess`] - Raster-to-tensor normalization
//! * [`classify`] - Artifact lifecycle, the classification adapter, and
//!   label selection
//! * [`session`] - Orchestration of the full pipeline
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use digitpad::prelude::*;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load the classifier artifact in the background.
//! let cell = OrtClassifier::spawn_load(PathBuf::from("models/digits.onnx"), 10);
//! let mut session = DigitSession::with_defaults(cell)?;
//!
//! // Feed input samples as the host delivers them.
//! session.start(50.0, 50.0);
//! session.move_to(50.0, 150.0);
//! session.end();
//!
//! // Classify once the artifact is ready and something was drawn.
//! if session.classifier_ready() && session.require_ink().is_ok() {
//!     let prediction = session.classify()?;
//!     println!("digit: {} (scores: {:?})", prediction.label, prediction.scores);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Raw events
//!
//! ```rust,no_run
//! use digitpad::prelude::*;
//! use digitpad::input::RawEvent;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # struct Stub;
//! # impl digitpad::core::Classifier for Stub {
//! #     fn predict(&self, _: &digitpad::core::Tensor4D) -> digitpad::core::DigitResult<Vec<f32>> {
//! #         Ok(vec![0.0; 10])
//! #     }
//! #     fn num_classes(&self) -> usize { 10 }
//! # }
//! let cell = ClassifierCell::ready(Arc::new(Stub));
//! // The surface sits at (120, 80) in the host window.
//! let mut session = DigitSession::with_defaults(cell)?.with_origin(120.0, 80.0);
//!
//! session.handle_event(&RawEvent::PointerDown { x: 170.0, y: 130.0 });
//! session.handle_event(&RawEvent::PointerMove { x: 170.0, y: 230.0 });
//! session.handle_event(&RawEvent::PointerUp);
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod core;

pub mod classify;
pub mod input;
pub mod preprocess;
pub mod raster;
pub mod session;
pub mod stroke;

/// Prelude module for convenient imports.
///
/// Bring the essentials into scope with a single use statement:
///
/// ```rust
/// use digitpad::prelude::*;
/// ```
///
/// Included items focus on the most common tasks:
/// - Session orchestration (`DigitSession`, `PredictionResult`)
/// - Artifact lifecycle (`ClassifierCell`, `OrtClassifier`)
/// - Configuration (`SurfaceConfig`, `PreprocessConfig`)
/// - Essential error and result types (`DigitError`, `DigitResult`)
///
/// For the individual pipeline stages (recorder, rasterizer,
/// preprocessor), import directly from the respective modules.
pub mod prelude {
    pub use crate::classify::{ClassificationAdapter, ClassifierCell, OrtClassifier, select_label};
    pub use crate::core::{DigitError, DigitResult, PreprocessConfig, SurfaceConfig};
    pub use crate::session::{DigitSession, PredictionResult};
}
