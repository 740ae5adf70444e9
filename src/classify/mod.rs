//! Classification: artifact lifecycle, the single-flight adapter, the
//! ONNX-backed classifier, and score-to-label selection.

pub mod adapter;
pub mod ort;
pub mod selector;

pub use adapter::{ClassificationAdapter, ClassifierCell};
pub use ort::OrtClassifier;
pub use selector::select_label;
