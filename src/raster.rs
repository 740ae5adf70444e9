//! Deterministic stroke rasterization onto an owned pixel buffer.
//!
//! The rasterizer renders segments with a round brush: filled discs stamped
//! along the segment at sub-pixel spacing, which realizes the fixed stroke
//! width with round caps and joins. Stamping sets pixels to the foreground
//! color outright (no blending), so re-rendering any prefix of the history
//! is idempotent and incremental rendering equals a full re-render.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use tracing::debug;

use crate::core::config::SurfaceConfig;
use crate::stroke::Segment;

/// Owns the canvas buffer and renders stroke segments onto it.
///
/// The buffer is mutated only through [`clear`](Rasterizer::clear) and
/// segment rendering; everything else sees it as a read-only snapshot.
#[derive(Debug)]
pub struct Rasterizer {
    buffer: RgbImage,
    foreground: Rgb<u8>,
    background: Rgb<u8>,
    brush_radius: i32,
}

impl Rasterizer {
    /// Creates a rasterizer with an empty (background-filled) buffer.
    pub fn new(config: &SurfaceConfig) -> Self {
        let background = Rgb(config.background);
        Self {
            buffer: RgbImage::from_pixel(config.width, config.height, background),
            foreground: Rgb(config.foreground),
            background,
            brush_radius: (config.effective_stroke_width() / 2) as i32,
        }
    }

    /// Resets the buffer to the uniform background color.
    ///
    /// The point history lives in the recorder; clearing it is a separate,
    /// coordinated action invoked together with this.
    pub fn clear(&mut self) {
        for pixel in self.buffer.pixels_mut() {
            *pixel = self.background;
        }
        debug!("canvas cleared");
    }

    /// Renders one segment with the round brush.
    ///
    /// Discs are stamped at most one pixel apart along the segment, so the
    /// stroke is solid at any angle. A zero-length segment stamps a single
    /// disc.
    pub fn render_segment(&mut self, segment: &Segment) {
        let (x0, y0) = segment.from;
        let (x1, y1) = segment.to;
        let dx = x1 - x0;
        let dy = y1 - y0;
        let steps = dx.abs().max(dy.abs()).ceil() as u32;

        if steps == 0 {
            self.stamp(x1, y1);
            return;
        }
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.stamp(x0 + dx * t, y0 + dy * t);
        }
    }

    /// Renders a sequence of segments in order.
    ///
    /// Called with a recorder's full segment list over a cleared buffer,
    /// this reproduces the incrementally built canvas exactly.
    pub fn render_history<I>(&mut self, segments: I)
    where
        I: IntoIterator<Item = Segment>,
    {
        for segment in segments {
            self.render_segment(&segment);
        }
    }

    /// Read-only access to the current canvas buffer.
    pub fn snapshot(&self) -> &RgbImage {
        &self.buffer
    }

    /// Logical width of the canvas in pixels.
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Logical height of the canvas in pixels.
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    fn stamp(&mut self, x: f32, y: f32) {
        draw_filled_circle_mut(
            &mut self.buffer,
            (x.round() as i32, y.round() as i32),
            self.brush_radius,
            self.foreground,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Sample;
    use crate::stroke::StrokeRecorder;

    fn config() -> SurfaceConfig {
        SurfaceConfig::new()
    }

    #[test]
    fn fresh_buffer_is_uniform_background() {
        let rasterizer = Rasterizer::new(&config());
        assert!(
            rasterizer
                .snapshot()
                .pixels()
                .all(|p| *p == Rgb([0, 0, 0]))
        );
    }

    #[test]
    fn clear_restores_the_fresh_buffer() {
        let fresh = Rasterizer::new(&config());
        let mut used = Rasterizer::new(&config());
        used.render_segment(&Segment {
            from: (50.0, 50.0),
            to: (150.0, 150.0),
        });
        assert_ne!(used.snapshot(), fresh.snapshot());

        used.clear();
        assert_eq!(used.snapshot(), fresh.snapshot());
    }

    #[test]
    fn a_tap_leaves_a_visible_mark() {
        let mut rasterizer = Rasterizer::new(&config());
        let mut recorder = StrokeRecorder::new(350, 350);
        let segment = recorder
            .apply(Sample::Start { x: 100.0, y: 100.0 })
            .unwrap();
        rasterizer.render_segment(&segment);

        assert_eq!(
            rasterizer.snapshot().get_pixel(100, 100),
            &Rgb([255, 255, 255])
        );
    }

    #[test]
    fn incremental_rendering_equals_full_rerender() {
        let samples = [
            Sample::Start { x: 40.0, y: 60.0 },
            Sample::Move { x: 80.0, y: 90.0 },
            Sample::Move { x: 90.0, y: 200.0 },
            Sample::End,
            Sample::Start { x: 250.0, y: 30.0 },
            Sample::Move { x: 240.0, y: 310.0 },
            Sample::End,
        ];

        let mut recorder = StrokeRecorder::new(350, 350);
        let mut incremental = Rasterizer::new(&config());
        for sample in samples {
            if let Some(segment) = recorder.apply(sample) {
                incremental.render_segment(&segment);
            }
        }

        let mut full = Rasterizer::new(&config());
        full.render_history(recorder.segments());

        assert_eq!(incremental.snapshot(), full.snapshot());
    }

    #[test]
    fn rendering_is_deterministic() {
        let segment = Segment {
            from: (10.5, 17.2),
            to: (301.0, 44.9),
        };
        let mut a = Rasterizer::new(&config());
        let mut b = Rasterizer::new(&config());
        a.render_segment(&segment);
        b.render_segment(&segment);
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn vertical_stroke_has_the_configured_width() {
        let mut rasterizer = Rasterizer::new(&config());
        rasterizer.render_segment(&Segment {
            from: (175.0, 50.0),
            to: (175.0, 300.0),
        });

        let snapshot = rasterizer.snapshot();
        // Mid-stroke row: ink spans the brush diameter around x = 175.
        let row = 175;
        assert_eq!(snapshot.get_pixel(175 - 7, row), &Rgb([255, 255, 255]));
        assert_eq!(snapshot.get_pixel(175 + 7, row), &Rgb([255, 255, 255]));
        assert_eq!(snapshot.get_pixel(175 - 9, row), &Rgb([0, 0, 0]));
        assert_eq!(snapshot.get_pixel(175 + 9, row), &Rgb([0, 0, 0]));
    }

    #[test]
    fn clamped_segments_render_without_panicking() {
        let mut rasterizer = Rasterizer::new(&config());
        rasterizer.render_segment(&Segment {
            from: (0.0, 0.0),
            to: (350.0, 350.0),
        });
        rasterizer.render_segment(&Segment {
            from: (-1.0, 0.0),
            to: (0.0, 0.0),
        });
    }
}
