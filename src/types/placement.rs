//! Logo placement in preview space.

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Bounds applied to the logo width on every resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeLimits {
    pub min: f64,
    pub max: f64,
}

impl SizeLimits {
    pub const DEFAULT_MIN: f64 = 50.0;
    pub const DEFAULT_MAX: f64 = 2000.0;

    /// Create limits, swapping the bounds if they arrive inverted.
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Clamp a size into `[min, max]`.
    ///
    /// NaN collapses to `min` so a bad delta can never produce a degenerate overlay.
    pub fn clamp(self, size: f64) -> f64 {
        if size.is_nan() {
            return self.min;
        }
        size.max(self.min).min(self.max)
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// Where the logo sits on the preview and how wide it is.
///
/// Height is always `size / aspect_ratio`, so resizing keeps the logo's
/// proportions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacementState {
    /// Top-left corner in preview pixels.
    pub position: Point,
    /// Logo width in preview pixels.
    pub size: f64,
    /// Logo width divided by height.
    pub aspect_ratio: f64,
}

impl PlacementState {
    pub const DEFAULT_POSITION: Point = Point::new(420.0, 60.0);
    pub const DEFAULT_SIZE: f64 = 100.0;

    pub fn new(position: Point, size: f64, aspect_ratio: f64) -> Self {
        Self {
            position,
            size,
            aspect_ratio: sanitize_aspect(aspect_ratio),
        }
    }

    /// Logo height in preview pixels.
    pub fn height(&self) -> f64 {
        self.size / self.aspect_ratio
    }

    /// Replace the aspect ratio, e.g. when a new logo is accepted.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = sanitize_aspect(aspect_ratio);
        self
    }
}

impl Default for PlacementState {
    fn default() -> Self {
        Self::new(Self::DEFAULT_POSITION, Self::DEFAULT_SIZE, 1.0)
    }
}

fn sanitize_aspect(aspect_ratio: f64) -> f64 {
    if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
        aspect_ratio
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_derived_from_aspect() {
        let p = PlacementState::new(Point::new(0.0, 0.0), 200.0, 2.0);
        assert_eq!(p.height(), 100.0);
    }

    #[test]
    fn test_bad_aspect_falls_back_to_square() {
        assert_eq!(PlacementState::new(Point::default(), 10.0, 0.0).aspect_ratio, 1.0);
        assert_eq!(
            PlacementState::default().with_aspect_ratio(f64::NAN).aspect_ratio,
            1.0
        );
    }

    #[test]
    fn test_defaults() {
        let p = PlacementState::default();
        assert_eq!(p.position, Point::new(420.0, 60.0));
        assert_eq!(p.size, 100.0);
    }

    #[test]
    fn test_limits_clamp() {
        let limits = SizeLimits::new(50.0, 300.0);
        assert_eq!(limits.clamp(10.0), 50.0);
        assert_eq!(limits.clamp(120.0), 120.0);
        assert_eq!(limits.clamp(900.0), 300.0);
        assert_eq!(limits.clamp(f64::NAN), 50.0);
    }

    #[test]
    fn test_limits_inverted_are_swapped() {
        let limits = SizeLimits::new(300.0, 50.0);
        assert_eq!(limits.min, 50.0);
        assert_eq!(limits.max, 300.0);
    }
}
