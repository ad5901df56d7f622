//! Geometric primitives used for hit testing: points in compositor space and
//! integer rectangles describing surface bounds.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A position in compositor (global) or surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// The x-coordinate of the point.
    pub x: f64,
    /// The y-coordinate of the point.
    pub y: f64,
}

impl Point {
    /// The origin (0.0, 0.0).
    pub const ORIGIN: Point = Point::new(0.0, 0.0);

    /// Creates a new point with the given coordinates.
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Point::new(x as f64, y as f64)
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Point {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// An axis-aligned rectangle with integer coordinates.
///
/// The left and top edges are inside the rectangle, the right and bottom edges
/// are not: a rectangle at `(0, 0)` of size `5x5` contains `(4.9, 0.0)` but not `(5.0, 0.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rectangle {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Top-left corner of the rectangle.
    pub fn origin(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    /// Returns `true` if `point` lies within the rectangle (half-open on the right and bottom).
    pub fn contains_point(&self, point: Point) -> bool {
        if self.is_empty() {
            return false;
        }
        point.x >= self.x as f64
            && point.x < (self.x + self.width) as f64
            && point.y >= self.y as f64
            && point.y < (self.y + self.height) as f64
    }

    pub fn intersects(&self, other: &Self) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_arithmetic() {
        let a = Point::new(6.0, 6.0);
        let b = Point::new(5.0, 5.0);
        assert_eq!(a - b, Point::new(1.0, 1.0));
        assert_eq!(a + b, Point::new(11.0, 11.0));
        assert_eq!(Point::from((2, 3)), Point::new(2.0, 3.0));
    }

    #[test]
    fn test_rectangle_contains_point_edges() {
        let rect = Rectangle::new(10, 10, 20, 20);
        assert!(rect.contains_point(Point::new(10.0, 10.0))); // Top-left corner
        assert!(rect.contains_point(Point::new(29.999, 10.0)));
        assert!(!rect.contains_point(Point::new(30.0, 10.0))); // Right edge is outside
        assert!(!rect.contains_point(Point::new(10.0, 30.0))); // Bottom edge is outside
        assert!(!rect.contains_point(Point::new(9.5, 15.0)));
    }

    #[test]
    fn test_empty_rectangle_contains_nothing() {
        let rect = Rectangle::new(0, 0, 0, 10);
        assert!(rect.is_empty());
        assert!(!rect.contains_point(Point::ORIGIN));
    }

    #[test]
    fn test_rectangle_intersects() {
        let a = Rectangle::new(0, 0, 5, 5);
        let b = Rectangle::new(5, 5, 5, 5);
        let c = Rectangle::new(4, 4, 2, 2);
        assert!(!a.intersects(&b)); // Touching corners only
        assert!(a.intersects(&c));
    }
}
