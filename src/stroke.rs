//! Stroke recording: the pen state machine and the point arena.
//!
//! The recorder segments the canonical sample stream into strokes
//! (pen-down, zero or more drags, pen-up) and owns the full point history
//! of the drawing session as one append-only arena. Each accepted sample
//! yields the line segment the rasterizer must draw, which keeps the canvas
//! buffer consistent with the arena after every mutation.

use crate::input::Sample;
use tracing::debug;

/// One recorded point of the drawing session.
///
/// `continues` is false for the first point of a stroke (pen-down) and true
/// for every drag point that follows it. A stroke is a maximal run of the
/// arena beginning at a non-continuation point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkPoint {
    /// Surface-local x coordinate, clamped to the surface bounds.
    pub x: f32,
    /// Surface-local y coordinate, clamped to the surface bounds.
    pub y: f32,
    /// Whether this point continues the stroke started by an earlier point.
    pub continues: bool,
}

/// A line segment to render, in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Segment start point.
    pub from: (f32, f32),
    /// Segment end point.
    pub to: (f32, f32),
}

impl Segment {
    /// The degenerate mark for a pen-down: a one-pixel-long segment ending
    /// at the pen position, so a single tap still leaves visible ink.
    fn pen_down_mark(x: f32, y: f32) -> Self {
        Self {
            from: (x - 1.0, y),
            to: (x, y),
        }
    }
}

/// Pen state of the recorder.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pen {
    Idle,
    Drawing,
}

/// Records strokes from the canonical sample stream.
///
/// State machine:
/// - `Idle --start--> Drawing`, appending a pen-down point;
/// - `Drawing --move--> Drawing`, appending a drag point;
/// - `Drawing --end--> Idle`, sealing the stroke without appending;
/// - `Idle --move--> Idle`, ignored (guards against synthetic moves);
/// - `clear` forces `Idle` and empties the arena, in either state.
#[derive(Debug)]
pub struct StrokeRecorder {
    points: Vec<InkPoint>,
    pen: Pen,
    bound_x: f32,
    bound_y: f32,
}

impl StrokeRecorder {
    /// Creates an empty recorder for a surface of the given logical size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            points: Vec::new(),
            pen: Pen::Idle,
            bound_x: width as f32,
            bound_y: height as f32,
        }
    }

    /// Feeds one sample through the state machine.
    ///
    /// Returns the segment to render when the sample was accepted as a
    /// point, or `None` for samples that append nothing (`End`, and `Move`
    /// while idle).
    pub fn apply(&mut self, sample: Sample) -> Option<Segment> {
        match (self.pen, sample) {
            (Pen::Idle, Sample::Start { x, y }) => {
                let (x, y) = self.clamp(x, y);
                self.points.push(InkPoint {
                    x,
                    y,
                    continues: false,
                });
                self.pen = Pen::Drawing;
                debug!(x, y, "stroke started");
                Some(Segment::pen_down_mark(x, y))
            }
            (Pen::Drawing, Sample::Move { x, y }) => {
                let (x, y) = self.clamp(x, y);
                // The arena holds at least the pen-down point here.
                let prev = self.points[self.points.len() - 1];
                self.points.push(InkPoint {
                    x,
                    y,
                    continues: true,
                });
                Some(Segment {
                    from: (prev.x, prev.y),
                    to: (x, y),
                })
            }
            (Pen::Drawing, Sample::End) => {
                self.pen = Pen::Idle;
                debug!(points = self.points.len(), "stroke sealed");
                None
            }
            // A start while already drawing seals the current stroke and
            // begins a new one; hosts that lose the pen-up event otherwise
            // merge unrelated strokes.
            (Pen::Drawing, Sample::Start { x, y }) => {
                self.pen = Pen::Idle;
                self.apply(Sample::Start { x, y })
            }
            (Pen::Idle, Sample::Move { .. }) | (Pen::Idle, Sample::End) => None,
        }
    }

    /// Forces `Idle` and empties the point arena.
    pub fn clear(&mut self) {
        self.points.clear();
        self.pen = Pen::Idle;
        debug!("recorder cleared");
    }

    /// Whether no point has been recorded since the last clear.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether a stroke is currently being drawn.
    pub fn is_drawing(&self) -> bool {
        self.pen == Pen::Drawing
    }

    /// The full point history since the last clear, in arrival order.
    pub fn points(&self) -> &[InkPoint] {
        &self.points
    }

    /// The segments that render the full point history, in order.
    ///
    /// Rendering these over an empty buffer reproduces the buffer built
    /// incrementally as the points arrived.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.iter().enumerate().map(|(i, p)| {
            if p.continues {
                let prev = self.points[i - 1];
                Segment {
                    from: (prev.x, prev.y),
                    to: (p.x, p.y),
                }
            } else {
                Segment::pen_down_mark(p.x, p.y)
            }
        })
    }

    fn clamp(&self, x: f32, y: f32) -> (f32, f32) {
        (x.clamp(0.0, self.bound_x), y.clamp(0.0, self.bound_y))
    }
}
