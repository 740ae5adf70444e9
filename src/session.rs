//! The drawing session: orchestration of the full pipeline.
//!
//! A session owns one drawing surface and wires the input normalizer, the
//! stroke recorder, the rasterizer, the preprocessor, and the
//! classification adapter together. Stroke capture is synchronous and
//! ordered; classification reads a snapshot of the canvas and may resolve
//! on another thread via the shared adapter. A generation counter,
//! incremented on every clear, lets callers discard results that resolve
//! after the canvas they were taken from is gone.

use std::sync::Arc;

use image::RgbImage;
use tracing::debug;

use crate::classify::adapter::{ClassificationAdapter, ClassifierCell};
use crate::classify::selector::select_label;
use crate::core::config::{ConfigValidator, PreprocessConfig, SurfaceConfig};
use crate::core::errors::{DigitError, DigitResult};
use crate::input::{InputNormalizer, RawEvent, Sample};
use crate::preprocess::Preprocessor;
use crate::raster::Rasterizer;
use crate::stroke::StrokeRecorder;

/// The outcome of one classification.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    /// The selected label, in `[0, num_classes)`.
    pub label: usize,
    /// One score per label, index = label.
    pub scores: Vec<f32>,
    /// The session generation the classified snapshot was taken under.
    ///
    /// A result is stale if this no longer equals
    /// [`DigitSession::generation`]; the canvas was cleared while the
    /// classification was in flight and the caller should ignore it.
    pub generation: u64,
}

/// A digit drawing session over one surface.
pub struct DigitSession {
    normalizer: InputNormalizer,
    recorder: StrokeRecorder,
    rasterizer: Rasterizer,
    preprocessor: Preprocessor,
    adapter: ClassificationAdapter,
    generation: u64,
}

impl DigitSession {
    /// Creates a session with validated configuration.
    ///
    /// # Arguments
    ///
    /// * `surface` - Surface geometry and rasterization style.
    /// * `preprocess` - Target tensor shape and class count.
    /// * `cell` - The shared classifier artifact cell (pending cells are
    ///   fine; classification reports not-ready until the cell settles).
    pub fn new(
        surface: SurfaceConfig,
        preprocess: PreprocessConfig,
        cell: Arc<ClassifierCell>,
    ) -> DigitResult<Self> {
        surface.validate()?;
        preprocess.validate()?;

        Ok(Self {
            normalizer: InputNormalizer::at_origin(),
            recorder: StrokeRecorder::new(surface.width, surface.height),
            rasterizer: Rasterizer::new(&surface),
            preprocessor: Preprocessor::new(&preprocess),
            adapter: ClassificationAdapter::new(cell, preprocess.num_classes),
            generation: 0,
        })
    }

    /// Creates a session with the canonical defaults (350x350 surface,
    /// 28x28 ten-class preprocessing).
    pub fn with_defaults(cell: Arc<ClassifierCell>) -> DigitResult<Self> {
        Self::new(SurfaceConfig::new(), PreprocessConfig::new(), cell)
    }

    /// Sets the surface's top-left origin in host coordinates.
    ///
    /// Raw events passed to [`handle_event`](Self::handle_event) are
    /// translated by this offset.
    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.normalizer = InputNormalizer::new(x, y);
        self
    }

    /// Feeds one raw host event through the pipeline.
    pub fn handle_event(&mut self, event: &RawEvent) {
        if let Some(sample) = self.normalizer.normalize(event) {
            self.apply(sample);
        }
    }

    /// Begins a stroke at the given surface-local position.
    pub fn start(&mut self, x: f32, y: f32) {
        self.apply(Sample::Start { x, y });
    }

    /// Extends the active stroke to the given surface-local position.
    ///
    /// Ignored when no stroke is active.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.apply(Sample::Move { x, y });
    }

    /// Ends the active stroke.
    pub fn end(&mut self) {
        self.apply(Sample::End);
    }

    /// Clears the drawing: empties the point history, resets the canvas to
    /// the background color, and advances the generation counter.
    pub fn clear(&mut self) {
        self.recorder.clear();
        self.rasterizer.clear();
        self.generation += 1;
        debug!(generation = self.generation, "session cleared");
    }

    /// Read-only snapshot of the current canvas buffer.
    pub fn snapshot(&self) -> &RgbImage {
        self.rasterizer.snapshot()
    }

    /// Whether nothing has been drawn since the last clear.
    pub fn is_empty(&self) -> bool {
        self.recorder.is_empty()
    }

    /// Advisory gate for callers that want to refuse classifying an empty
    /// canvas, mirroring a disabled classify control.
    pub fn require_ink(&self) -> DigitResult<()> {
        if self.recorder.is_empty() {
            return Err(DigitError::EmptyCanvas);
        }
        Ok(())
    }

    /// The current clear-generation of the session.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the classifier artifact is loaded and usable.
    pub fn classifier_ready(&self) -> bool {
        self.adapter.is_ready()
    }

    /// The classification adapter, for callers that dispatch inference on
    /// their own thread.
    pub fn adapter(&self) -> &ClassificationAdapter {
        &self.adapter
    }

    /// Classifies the current canvas.
    ///
    /// The snapshot is preprocessed into the normalized input, the adapter
    /// delegates to the classifier, and the score vector is reduced to a
    /// label by the first-occurrence maximum rule. The result carries the
    /// generation the snapshot was taken under.
    ///
    /// An empty canvas is a permitted input here; use
    /// [`require_ink`](Self::require_ink) to gate beforehand.
    ///
    /// # Errors
    ///
    /// * [`DigitError::ClassifierNotReady`] before the artifact settles.
    /// * [`DigitError::ClassificationBusy`] while another request is in
    ///   flight.
    /// * Preprocessing or inference failures, propagated once.
    pub fn classify(&self) -> DigitResult<PredictionResult> {
        let generation = self.generation;
        let input = self.preprocessor.normalize(self.rasterizer.snapshot())?;
        let scores = self.adapter.classify(&input)?;
        let label = select_label(&scores);
        debug!(label, generation, "classification resolved");
        Ok(PredictionResult {
            label,
            scores,
            generation,
        })
    }

    fn apply(&mut self, sample: Sample) {
        if let Some(segment) = self.recorder.apply(sample) {
            self.rasterizer.render_segment(&segment);
        }
    }
}

impl std::fmt::Debug for DigitSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitSession")
            .field("points", &self.recorder.points().len())
            .field("generation", &self.generation)
            .field("classifier_ready", &self.classifier_ready())
            .finish()
    }
}
