//! Input normalization for pointer and touch event sources.
//!
//! Host environments deliver drawing input as pointer events or touch
//! events, in host-window coordinates. This module unifies both sources
//! into a single canonical sample stream relative to the drawing surface's
//! origin, so the stroke recorder only ever sees one event vocabulary.

/// A single touch point as reported by the host, in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Horizontal host coordinate.
    pub x: f32,
    /// Vertical host coordinate.
    pub y: f32,
}

/// A raw interaction event as delivered by the host environment.
///
/// Pointer coordinates are host-window coordinates; the normalizer
/// translates them into surface-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEvent {
    /// The pointer was pressed.
    PointerDown { x: f32, y: f32 },
    /// The pointer moved.
    PointerMove { x: f32, y: f32 },
    /// The pointer was released.
    PointerUp,
    /// The pointer left the surface. Treated like a release.
    PointerLeave,
    /// One or more touches started.
    TouchStart { touches: Vec<TouchPoint> },
    /// One or more touches moved.
    TouchMove { touches: Vec<TouchPoint> },
    /// The active touch ended.
    TouchEnd,
    /// The active touch was cancelled by the host. Treated like an end.
    TouchCancel,
}

/// A canonical sample in surface-local coordinates.
///
/// `Start` and `Move` carry the sampled position; `End` carries none, since
/// ending a stroke appends no point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    /// Pen-down at the given surface-local position.
    Start { x: f32, y: f32 },
    /// Pen drag to the given surface-local position.
    Move { x: f32, y: f32 },
    /// Pen-up (or defensive termination via leave/cancel).
    End,
}

/// Translates raw host events into canonical samples.
///
/// The normalizer is a pure transform: it holds only the surface origin
/// offset captured at construction and has no other state. Multi-touch
/// input is collapsed to the first active touch; simultaneous extra touches
/// are ignored.
#[derive(Debug, Clone, Copy)]
pub struct InputNormalizer {
    origin_x: f32,
    origin_y: f32,
}

impl InputNormalizer {
    /// Creates a normalizer for a surface whose top-left corner sits at the
    /// given host coordinates.
    pub fn new(origin_x: f32, origin_y: f32) -> Self {
        Self { origin_x, origin_y }
    }

    /// Creates a normalizer for a surface at the host origin.
    pub fn at_origin() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Normalizes one raw event into a canonical sample.
    ///
    /// Returns `None` for events that carry no usable sample (a touch event
    /// with an empty touch list).
    pub fn normalize(&self, event: &RawEvent) -> Option<Sample> {
        match event {
            RawEvent::PointerDown { x, y } => Some(Sample::Start {
                x: x - self.origin_x,
                y: y - self.origin_y,
            }),
            RawEvent::PointerMove { x, y } => Some(Sample::Move {
                x: x - self.origin_x,
                y: y - self.origin_y,
            }),
            RawEvent::PointerUp | RawEvent::PointerLeave => Some(Sample::End),
            RawEvent::TouchStart { touches } => touches.first().map(|t| Sample::Start {
                x: t.x - self.origin_x,
                y: t.y - self.origin_y,
            }),
            RawEvent::TouchMove { touches } => touches.first().map(|t| Sample::Move {
                x: t.x - self.origin_x,
                y: t.y - self.origin_y,
            }),
            RawEvent::TouchEnd | RawEvent::TouchCancel => Some(Sample::End),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_events_are_offset_by_origin() {
        let normalizer = InputNormalizer::new(10.0, 20.0);
        assert_eq!(
            normalizer.normalize(&RawEvent::PointerDown { x: 60.0, y: 70.0 }),
            Some(Sample::Start { x: 50.0, y: 50.0 })
        );
        assert_eq!(
            normalizer.normalize(&RawEvent::PointerMove { x: 10.0, y: 20.0 }),
            Some(Sample::Move { x: 0.0, y: 0.0 })
        );
    }

    #[test]
    fn leave_and_cancel_terminate_like_end() {
        let normalizer = InputNormalizer::at_origin();
        assert_eq!(normalizer.normalize(&RawEvent::PointerUp), Some(Sample::End));
        assert_eq!(
            normalizer.normalize(&RawEvent::PointerLeave),
            Some(Sample::End)
        );
        assert_eq!(normalizer.normalize(&RawEvent::TouchEnd), Some(Sample::End));
        assert_eq!(
            normalizer.normalize(&RawEvent::TouchCancel),
            Some(Sample::End)
        );
    }

    #[test]
    fn only_the_first_touch_is_honored() {
        let normalizer = InputNormalizer::new(5.0, 5.0);
        let event = RawEvent::TouchStart {
            touches: vec![
                TouchPoint { x: 15.0, y: 25.0 },
                TouchPoint { x: 200.0, y: 200.0 },
            ],
        };
        assert_eq!(
            normalizer.normalize(&event),
            Some(Sample::Start { x: 10.0, y: 20.0 })
        );
    }

    #[test]
    fn empty_touch_list_yields_no_sample() {
        let normalizer = InputNormalizer::at_origin();
        assert_eq!(
            normalizer.normalize(&RawEvent::TouchStart { touches: vec![] }),
            None
        );
        assert_eq!(
            normalizer.normalize(&RawEvent::TouchMove { touches: vec![] }),
            None
        );
    }
}
