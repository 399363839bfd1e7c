//! Typed canvas-space geometry.
//!
//! The collage canvas has a single coordinate space: pixels from the
//! canvas' top-left corner. Points, sizes and deltas get distinct types so a
//! size is never accidentally used as a position.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// Position in canvas space (top-left origin, y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint(pub Vec2);

/// Width and height in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasSize(pub Vec2);

/// Movement/offset in canvas space (not a position).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasDelta(pub Vec2);

/// Axis-aligned box: a position plus a size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub origin: CanvasPoint,
    pub size: CanvasSize,
}

// === CanvasPoint ===

impl CanvasPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }
}

impl From<Vec2> for CanvasPoint {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<CanvasPoint> for Vec2 {
    fn from(p: CanvasPoint) -> Self {
        p.0
    }
}

impl Add<CanvasDelta> for CanvasPoint {
    type Output = CanvasPoint;

    fn add(self, delta: CanvasDelta) -> Self::Output {
        CanvasPoint(self.0 + delta.0)
    }
}

impl Sub for CanvasPoint {
    type Output = CanvasDelta;

    /// Subtracting two points gives a delta.
    fn sub(self, other: CanvasPoint) -> Self::Output {
        CanvasDelta(self.0 - other.0)
    }
}

// === CanvasSize ===

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self(Vec2::new(width, height))
    }

    pub fn width(&self) -> f32 {
        self.0.x
    }

    pub fn height(&self) -> f32 {
        self.0.y
    }

    /// Width divided by height.
    pub fn aspect_ratio(&self) -> f32 {
        self.0.x / self.0.y
    }

    /// Half the size, as an offset from a box's top-left to its center.
    pub fn half(&self) -> CanvasDelta {
        CanvasDelta(self.0 / 2.0)
    }
}

impl From<Vec2> for CanvasSize {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<CanvasSize> for Vec2 {
    fn from(s: CanvasSize) -> Self {
        s.0
    }
}

impl Mul<f32> for CanvasSize {
    type Output = CanvasSize;

    fn mul(self, factor: f32) -> Self::Output {
        CanvasSize(self.0 * factor)
    }
}

// === CanvasDelta ===

impl CanvasDelta {
    pub fn new(dx: f32, dy: f32) -> Self {
        Self(Vec2::new(dx, dy))
    }

    pub fn dx(&self) -> f32 {
        self.0.x
    }

    pub fn dy(&self) -> f32 {
        self.0.y
    }
}

impl From<Vec2> for CanvasDelta {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<CanvasDelta> for Vec2 {
    fn from(d: CanvasDelta) -> Self {
        d.0
    }
}

// === Bounds ===

impl Bounds {
    pub fn new(origin: CanvasPoint, size: CanvasSize) -> Self {
        Self { origin, size }
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(CanvasPoint::new(x, y), CanvasSize::new(width, height))
    }

    /// Bottom-right corner.
    pub fn max(&self) -> CanvasPoint {
        CanvasPoint(self.origin.0 + self.size.0)
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: CanvasPoint) -> bool {
        let min = self.origin.0;
        let max = self.max().0;
        point.0.x >= min.x && point.0.x <= max.x && point.0.y >= min.y && point.0.y <= max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_point_add_delta() {
        let point = CanvasPoint::new(10.0, 20.0);
        let delta = CanvasDelta::new(5.0, -3.0);
        let result = point + delta;
        assert_eq!(result.x(), 15.0);
        assert_eq!(result.y(), 17.0);
    }

    #[test]
    fn canvas_point_sub_gives_delta() {
        let p1 = CanvasPoint::new(10.0, 20.0);
        let p2 = CanvasPoint::new(3.0, 5.0);
        let delta = p1 - p2;
        assert_eq!(delta.dx(), 7.0);
        assert_eq!(delta.dy(), 15.0);
    }

    #[test]
    fn size_scales_uniformly() {
        let size = CanvasSize::new(100.0, 300.0) * 0.5;
        assert_eq!(size, CanvasSize::new(50.0, 150.0));
        assert_eq!(size.half(), CanvasDelta::new(25.0, 75.0));
    }

    #[test]
    fn bounds_contain_their_edges() {
        let bounds = Bounds::from_xywh(10.0, 10.0, 50.0, 50.0);
        assert!(bounds.contains(CanvasPoint::new(10.0, 10.0)));
        assert!(bounds.contains(CanvasPoint::new(60.0, 60.0)));
        assert!(!bounds.contains(CanvasPoint::new(9.9, 30.0)));
        assert!(!bounds.contains(CanvasPoint::new(30.0, 60.1)));
    }

    #[test]
    fn size_serializes_as_array() {
        let json = serde_json::to_value(CanvasSize::new(4.0, 3.0)).unwrap();
        assert_eq!(json, serde_json::json!([4.0, 3.0]));
    }
}
