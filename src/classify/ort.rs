//! ONNX Runtime backed classifier.
//!
//! The production implementation of the [`Classifier`] trait: a single
//! `ort` session held behind a mutex, with input and output tensor names
//! detected from the model at load time. Loading can run on a background
//! thread into a [`ClassifierCell`], realizing the pending → ready/failed
//! artifact lifecycle.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ort::{session::Session, value::TensorRef};
use tracing::{info, warn};

use crate::classify::adapter::ClassifierCell;
use crate::core::errors::{DigitError, DigitResult, SimpleError};
use crate::core::tensor::Tensor4D;
use crate::core::traits::Classifier;

/// A digit classifier backed by an ONNX Runtime session.
pub struct OrtClassifier {
    session: Mutex<Session>,
    input_name: String,
    output_name: String,
    num_classes: usize,
    model_path: PathBuf,
}

impl OrtClassifier {
    /// Loads the model artifact from a file and prepares a session.
    ///
    /// The input and output tensor names are taken from the model's own
    /// signature.
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path to the ONNX model file.
    /// * `num_classes` - Number of labels the model scores over.
    pub fn load(model_path: impl AsRef<Path>, num_classes: usize) -> DigitResult<Self> {
        let path = model_path.as_ref();
        let session = Session::builder()
            .and_then(|builder| builder.commit_from_file(path))
            .map_err(|e| {
                DigitError::model_load_error(path, "failed to create ONNX session", e)
            })?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .ok_or_else(|| DigitError::invalid_input("model declares no input tensor"))?;
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .ok_or_else(|| DigitError::invalid_input("model declares no output tensor"))?;

        info!(
            model = %path.display(),
            input = %input_name,
            output = %output_name,
            "classifier artifact loaded"
        );

        Ok(Self {
            session: Mutex::new(session),
            input_name,
            output_name,
            num_classes,
            model_path: path.to_path_buf(),
        })
    }

    /// Loads the artifact on a background thread.
    ///
    /// Returns the pending cell immediately; it settles to ready when the
    /// session is committed, or to failed (permanently) when loading errors.
    pub fn spawn_load(model_path: PathBuf, num_classes: usize) -> Arc<ClassifierCell> {
        let cell = ClassifierCell::pending();
        let handle = Arc::clone(&cell);
        std::thread::spawn(move || {
            match OrtClassifier::load(&model_path, num_classes) {
                Ok(classifier) => handle.fulfill(Arc::new(classifier)),
                Err(e) => {
                    warn!(model = %model_path.display(), error = %e, "classifier load failed");
                    handle.fail(e.to_string());
                }
            }
        });
        cell
    }

    /// The path the artifact was loaded from.
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl Classifier for OrtClassifier {
    fn predict(&self, input: &Tensor4D) -> DigitResult<Vec<f32>> {
        let input_tensor =
            TensorRef::from_array_view(input.view()).map_err(DigitError::inference_error)?;
        let inputs = ort::inputs![self.input_name.as_str() => input_tensor];

        let mut session = self.session.lock().map_err(|_| {
            DigitError::inference_error(SimpleError::new("classifier session lock poisoned"))
        })?;
        let outputs = session.run(inputs).map_err(DigitError::inference_error)?;

        let (shape, data) = outputs[self.output_name.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(DigitError::inference_error)?;

        if shape.len() != 2 || shape[0] != 1 || shape[1] as usize != self.num_classes {
            return Err(DigitError::invalid_input(format!(
                "expected output shape [1, {}], got {:?}",
                self.num_classes, shape
            )));
        }

        Ok(data.to_vec())
    }

    fn num_classes(&self) -> usize {
        self.num_classes
    }
}

impl std::fmt::Debug for OrtClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtClassifier")
            .field("model_path", &self.model_path)
            .field("input_name", &self.input_name)
            .field("output_name", &self.output_name)
            .field("num_classes", &self.num_classes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_a_missing_artifact_fails_the_cell() {
        let cell = OrtClassifier::spawn_load(PathBuf::from("/nonexistent/model.onnx"), 10);
        // Wait for the loader thread to settle the cell.
        let mut settled = false;
        for _ in 0..400 {
            if cell.is_failed() {
                settled = true;
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert!(settled);
        assert!(!cell.is_ready());
    }
}
