//! Background scene for the demo
//!
//! Slowly rotating sine strands, drawn behind the log panel so the overlay has
//! something to sit on top of.

use std::f64::consts::PI;

use ratatui::prelude::*;
use ratatui::widgets::canvas::{Canvas, Line as CanvasLine};

/// Milliseconds for one full turn
const ROTATION_PERIOD_MS: u128 = 8000;
/// Angle between neighbouring strands, in degrees
const STRAND_STEP_DEG: usize = 20;
/// Points sampled per strand
const STRAND_SAMPLES: usize = 100;

/// Points of one strand rotated by `angle` radians, at time `t` seconds
pub fn strand_points(angle: f64, t: f64) -> Vec<(f64, f64)> {
    let (sin, cos) = angle.sin_cos();
    (0..=STRAND_SAMPLES)
        .map(|i| {
            let u = i as f64 / STRAND_SAMPLES as f64;
            let x = u * 100.0;
            let y = (t + u).sin() * 20.0 * u;
            (x * cos - y * sin, x * sin + y * cos)
        })
        .collect()
}

/// Render the scene for `elapsed_ms` since start
pub fn render_scene(frame: &mut Frame, area: Rect, elapsed_ms: u128) {
    let base = (elapsed_ms % ROTATION_PERIOD_MS) as f64 / ROTATION_PERIOD_MS as f64 * 2.0 * PI;
    let t = elapsed_ms as f64 / 1000.0;

    let canvas = Canvas::default()
        .x_bounds([-100.0, 100.0])
        .y_bounds([-100.0, 100.0])
        .paint(move |ctx| {
            for deg in (0..360).step_by(STRAND_STEP_DEG) {
                let angle = base + (deg as f64).to_radians();
                let points = strand_points(angle, t);
                for pair in points.windows(2) {
                    ctx.draw(&CanvasLine {
                        x1: pair[0].0,
                        y1: pair[0].1,
                        x2: pair[1].0,
                        y2: pair[1].1,
                        color: Color::DarkGray,
                    });
                }
            }
        });
    frame.render_widget(canvas, area);
}
