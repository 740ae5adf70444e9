//! Classifier artifact lifecycle and the single-flight classification
//! adapter.
//!
//! The artifact goes through an explicit two-phase lifecycle: a cell starts
//! pending, then transitions exactly once to ready or failed. The adapter
//! consults the cell's readiness on every request, and enforces at most one
//! in-flight classification with an atomic guard that rejects (never
//! queues) overlapping requests. Drawing never touches either, so stroke
//! capture is never blocked by inference.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::core::errors::{DigitError, DigitResult};
use crate::core::tensor::Tensor4D;
use crate::core::traits::Classifier;

/// Lifecycle state of the classifier artifact.
#[derive(Clone)]
enum ArtifactState {
    /// Loading has not completed yet.
    Pending,
    /// The artifact loaded and the classifier is usable.
    Ready(Arc<dyn Classifier>),
    /// Loading failed; the cell stays in this state permanently.
    Failed(String),
}

/// Shared cell holding the classifier artifact's lifecycle state.
///
/// The cell is created pending and fulfilled (or failed) exactly once by
/// whichever loader owns the artifact; later transitions are ignored. The
/// adapter only ever observes it through the readiness predicate and
/// [`get`](ClassifierCell::get).
pub struct ClassifierCell {
    state: RwLock<ArtifactState>,
}

impl ClassifierCell {
    /// Creates a cell in the pending state.
    pub fn pending() -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(ArtifactState::Pending),
        })
    }

    /// Creates a cell that is ready immediately.
    ///
    /// Useful for tests and for callers that load the artifact eagerly.
    pub fn ready(classifier: Arc<dyn Classifier>) -> Arc<Self> {
        Arc::new(Self {
            state: RwLock::new(ArtifactState::Ready(classifier)),
        })
    }

    /// Transitions the cell to ready. Ignored unless the cell is pending.
    pub fn fulfill(&self, classifier: Arc<dyn Classifier>) {
        let Ok(mut state) = self.state.write() else {
            return;
        };
        match *state {
            ArtifactState::Pending => {
                *state = ArtifactState::Ready(classifier);
                debug!("classifier artifact ready");
            }
            _ => warn!("ignoring fulfill on a settled classifier cell"),
        }
    }

    /// Transitions the cell to failed, permanently. Ignored unless pending.
    pub fn fail(&self, reason: impl Into<String>) {
        let Ok(mut state) = self.state.write() else {
            return;
        };
        match *state {
            ArtifactState::Pending => {
                let reason = reason.into();
                warn!(reason = %reason, "classifier artifact failed to load");
                *state = ArtifactState::Failed(reason);
            }
            _ => warn!("ignoring fail on a settled classifier cell"),
        }
    }

    /// Whether the artifact is loaded and usable.
    pub fn is_ready(&self) -> bool {
        matches!(
            self.state.read().as_deref(),
            Ok(ArtifactState::Ready(_))
        )
    }

    /// Whether loading settled with a permanent failure.
    pub fn is_failed(&self) -> bool {
        matches!(
            self.state.read().as_deref(),
            Ok(ArtifactState::Failed(_))
        )
    }

    /// The classifier, if the cell is ready.
    pub fn get(&self) -> Option<Arc<dyn Classifier>> {
        match self.state.read() {
            Ok(state) => match &*state {
                ArtifactState::Ready(classifier) => Some(Arc::clone(classifier)),
                _ => None,
            },
            Err(_) => None,
        }
    }
}

impl std::fmt::Debug for ClassifierCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = match self.state.read().as_deref() {
            Ok(ArtifactState::Pending) => "pending",
            Ok(ArtifactState::Ready(_)) => "ready",
            Ok(ArtifactState::Failed(_)) => "failed",
            Err(_) => "poisoned",
        };
        f.debug_struct("ClassifierCell").field("state", &state).finish()
    }
}

/// Wraps the classifier behind readiness and single-flight guards.
///
/// `classify` is `&self` and the guards are atomic, so the adapter can be
/// shared across threads: one thread may run an inference while another
/// keeps feeding strokes, and a second classification request is rejected
/// with [`DigitError::ClassificationBusy`] until the first resolves.
#[derive(Debug)]
pub struct ClassificationAdapter {
    cell: Arc<ClassifierCell>,
    in_flight: AtomicBool,
    num_classes: usize,
}

/// Clears the in-flight flag when a classification resolves, on both the
/// success and the error path.
struct FlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl ClassificationAdapter {
    /// Creates an adapter over the given artifact cell.
    ///
    /// # Arguments
    ///
    /// * `cell` - The shared artifact lifecycle cell.
    /// * `num_classes` - The expected score-vector length; classifier
    ///   outputs of any other length are rejected.
    pub fn new(cell: Arc<ClassifierCell>, num_classes: usize) -> Self {
        Self {
            cell,
            in_flight: AtomicBool::new(false),
            num_classes,
        }
    }

    /// Whether the underlying artifact is loaded and usable.
    pub fn is_ready(&self) -> bool {
        self.cell.is_ready()
    }

    /// The expected score-vector length.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    /// Runs one classification.
    ///
    /// # Errors
    ///
    /// * [`DigitError::ClassifierNotReady`] if the artifact has not loaded
    ///   (or failed to load).
    /// * [`DigitError::ClassificationBusy`] if another classification is in
    ///   flight; the overlapping request is rejected, not queued.
    /// * [`DigitError::InvalidInput`] if the classifier returns a score
    ///   vector of unexpected length.
    /// * Any error the classifier delegate itself produces, propagated once
    ///   without retries.
    pub fn classify(&self, input: &Tensor4D) -> DigitResult<Vec<f32>> {
        let classifier = self.cell.get().ok_or(DigitError::ClassifierNotReady)?;

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DigitError::ClassificationBusy);
        }
        let _guard = FlightGuard {
            flag: &self.in_flight,
        };

        debug!("classification dispatched");
        let scores = classifier.predict(input)?;
        if scores.len() != self.num_classes {
            return Err(DigitError::invalid_input(format!(
                "classifier returned {} scores, expected {}",
                scores.len(),
                self.num_classes
            )));
        }
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    /// Returns a one-hot vector for a fixed label.
    struct OneHotClassifier {
        hot: usize,
    }

    impl Classifier for OneHotClassifier {
        fn predict(&self, _input: &Tensor4D) -> DigitResult<Vec<f32>> {
            let mut scores = vec![0.0; 10];
            scores[self.hot] = 1.0;
            Ok(scores)
        }

        fn num_classes(&self) -> usize {
            10
        }
    }

    /// Blocks inside predict until released, to hold a classification in
    /// flight from the test thread.
    struct BlockingClassifier {
        started: mpsc::SyncSender<()>,
        release: std::sync::Mutex<mpsc::Receiver<()>>,
    }

    impl Classifier for BlockingClassifier {
        fn predict(&self, _input: &Tensor4D) -> DigitResult<Vec<f32>> {
            self.started.send(()).ok();
            let release = self.release.lock().unwrap();
            release.recv().ok();
            Ok(vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0])
        }

        fn num_classes(&self) -> usize {
            10
        }
    }

    fn input() -> Tensor4D {
        Tensor4D::zeros((1, 28, 28, 1))
    }

    #[test]
    fn pending_cell_yields_not_ready() {
        let adapter = ClassificationAdapter::new(ClassifierCell::pending(), 10);
        assert!(!adapter.is_ready());
        assert!(matches!(
            adapter.classify(&input()),
            Err(DigitError::ClassifierNotReady)
        ));
    }

    #[test]
    fn fulfilled_cell_classifies() {
        let cell = ClassifierCell::pending();
        cell.fulfill(Arc::new(OneHotClassifier { hot: 3 }));
        let adapter = ClassificationAdapter::new(cell, 10);
        assert!(adapter.is_ready());
        let scores = adapter.classify(&input()).unwrap();
        assert_eq!(scores[3], 1.0);
    }

    #[test]
    fn failed_cell_stays_failed() {
        let cell = ClassifierCell::pending();
        cell.fail("artifact missing");
        assert!(!cell.is_ready());

        // The lifecycle settles once; a late fulfill is ignored.
        cell.fulfill(Arc::new(OneHotClassifier { hot: 0 }));
        assert!(!cell.is_ready());

        let adapter = ClassificationAdapter::new(cell, 10);
        assert!(matches!(
            adapter.classify(&input()),
            Err(DigitError::ClassifierNotReady)
        ));
    }

    #[test]
    fn wrong_score_length_is_rejected() {
        struct ShortClassifier;
        impl Classifier for ShortClassifier {
            fn predict(&self, _input: &Tensor4D) -> DigitResult<Vec<f32>> {
                Ok(vec![0.5, 0.5])
            }
            fn num_classes(&self) -> usize {
                2
            }
        }

        let adapter =
            ClassificationAdapter::new(ClassifierCell::ready(Arc::new(ShortClassifier)), 10);
        assert!(matches!(
            adapter.classify(&input()),
            Err(DigitError::InvalidInput { .. })
        ));
    }

    #[test]
    fn overlapping_classify_is_rejected_and_first_still_resolves() {
        let (started_tx, started_rx) = mpsc::sync_channel(1);
        let (release_tx, release_rx) = mpsc::channel();
        let classifier = BlockingClassifier {
            started: started_tx,
            release: std::sync::Mutex::new(release_rx),
        };
        let adapter = Arc::new(ClassificationAdapter::new(
            ClassifierCell::ready(Arc::new(classifier)),
            10,
        ));

        let first = {
            let adapter = Arc::clone(&adapter);
            thread::spawn(move || adapter.classify(&input()))
        };

        // Wait until the first request is inside predict, then overlap.
        started_rx.recv().unwrap();
        assert!(matches!(
            adapter.classify(&input()),
            Err(DigitError::ClassificationBusy)
        ));

        release_tx.send(()).unwrap();
        let scores = first.join().unwrap().unwrap();
        assert_eq!(scores[0], 1.0);
    }

    #[test]
    fn guard_is_released_after_a_failed_classification() {
        struct FailingClassifier;
        impl Classifier for FailingClassifier {
            fn predict(&self, _input: &Tensor4D) -> DigitResult<Vec<f32>> {
                Err(DigitError::inference_error(
                    crate::core::errors::SimpleError::new("backend exploded"),
                ))
            }
            fn num_classes(&self) -> usize {
                10
            }
        }

        let adapter =
            ClassificationAdapter::new(ClassifierCell::ready(Arc::new(FailingClassifier)), 10);
        assert!(adapter.classify(&input()).is_err());
        // A failed run must not leave the in-flight guard set.
        assert!(matches!(
            adapter.classify(&input()),
            Err(DigitError::Inference(_))
        ));
    }
}
