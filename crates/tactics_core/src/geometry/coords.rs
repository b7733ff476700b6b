//! Normalized <-> pixel coordinate mapping for a field rectangle.

use crate::model::board::{clamp_unit, Vec2};

/// Pixel position relative to some origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Maps a normalized position onto a `width x height` pixel box.
///
/// Zero-sized boxes map everything to `(0, 0)`.
pub fn to_pixel(pos: Vec2, width: f64, height: f64) -> PixelPoint {
    PixelPoint {
        x: pos.x * width,
        y: pos.y * height,
    }
}

/// Maps a pixel position inside a `width x height` box to board coordinates.
///
/// Each axis is clamped to `[0, 1]`. A non-positive or non-finite extent
/// yields `0` for that axis instead of NaN/infinity.
pub fn to_normalized(x: f64, y: f64, width: f64, height: f64) -> Vec2 {
    Vec2 {
        x: normalize_axis(x, width),
        y: normalize_axis(y, height),
    }
}

fn normalize_axis(value: f64, extent: f64) -> f64 {
    if !(extent.is_finite() && extent > 0.0) {
        return 0.0;
    }
    let ratio = value / extent;
    if !ratio.is_finite() {
        return 0.0;
    }
    clamp_unit(ratio)
}

#[cfg(test)]
mod tests {
    use super::{to_normalized, to_pixel, PixelPoint};
    use crate::model::board::Vec2;

    #[test]
    fn to_pixel_scales_by_extent() {
        let px = to_pixel(Vec2::new(0.25, 0.5), 800.0, 400.0);
        assert_eq!(px, PixelPoint::new(200.0, 200.0));
    }

    #[test]
    fn to_pixel_with_zero_extent_is_origin() {
        assert_eq!(to_pixel(Vec2::new(0.7, 0.3), 0.0, 0.0), PixelPoint::default());
    }

    #[test]
    fn to_normalized_clamps_outside_points() {
        assert_eq!(to_normalized(-10.0, 900.0, 800.0, 400.0), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn to_normalized_guards_degenerate_extents() {
        for (w, h) in [(0.0, 0.0), (-5.0, 100.0), (100.0, -1.0), (f64::NAN, 10.0)] {
            let pos = to_normalized(50.0, 50.0, w, h);
            assert!(pos.x.is_finite() && pos.y.is_finite());
            if !(w > 0.0) {
                assert_eq!(pos.x, 0.0);
            }
            if !(h > 0.0) {
                assert_eq!(pos.y, 0.0);
            }
        }
        assert_eq!(to_normalized(50.0, 50.0, 0.0, 0.0), Vec2::new(0.0, 0.0));
    }

    #[test]
    fn round_trip_recovers_unit_positions() {
        let sizes = [(1.0, 1.0), (640.0, 320.0), (1234.5, 77.25)];
        let samples = [0.0, 0.1, 0.33, 0.5, 0.875, 1.0];
        for (w, h) in sizes {
            for &x in &samples {
                for &y in &samples {
                    let pos = Vec2::new(x, y);
                    let px = to_pixel(pos, w, h);
                    let back = to_normalized(px.x, px.y, w, h);
                    assert!((back.x - x).abs() < 1e-12, "x {x} at {w}x{h}");
                    assert!((back.y - y).abs() < 1e-12, "y {y} at {w}x{h}");
                }
            }
        }
    }
}
