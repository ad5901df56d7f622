//! Regions (unions of rectangles) and the hit-test region a scene reports for
//! each surface.

use crate::geometry::{Point, Rectangle};
use serde::{Deserialize, Serialize};

/// A set of disjoint rectangles in surface-local coordinates.
///
/// `add` and `subtract` keep the rectangles disjoint, so `contains_point` is a
/// plain scan and the stored area never double counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Region {
    rectangles: Vec<Rectangle>,
}

impl Region {
    /// Creates a new, empty `Region`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a region covering exactly `rect`.
    pub fn from_rectangle(rect: Rectangle) -> Self {
        let mut region = Self::new();
        region.add(rect);
        region
    }

    pub fn is_empty(&self) -> bool {
        self.rectangles.is_empty()
    }

    /// The disjoint rectangles currently defining the region.
    pub fn rectangles(&self) -> &[Rectangle] {
        &self.rectangles
    }

    /// Adds a rectangle to the region.
    ///
    /// The parts of `new_rect` already covered are cut away from the existing
    /// rectangles first, so the set stays disjoint. An empty `new_rect` is ignored.
    pub fn add(&mut self, new_rect: Rectangle) {
        if new_rect.is_empty() {
            return;
        }
        self.subtract(new_rect);
        self.rectangles.push(new_rect);
    }

    /// Subtracts a rectangle from the region.
    ///
    /// Each intersecting rectangle is split into up to four fragments
    /// (top, bottom, left, right) that lie outside `sub_rect`.
    pub fn subtract(&mut self, sub_rect: Rectangle) {
        if sub_rect.is_empty() || self.rectangles.is_empty() {
            return;
        }

        let mut new_rects: Vec<Rectangle> = Vec::with_capacity(self.rectangles.len());
        for existing in &self.rectangles {
            if !existing.intersects(&sub_rect) {
                new_rects.push(*existing);
                continue;
            }

            let existing_bottom = existing.y + existing.height;
            let sub_bottom = sub_rect.y + sub_rect.height;

            // Top part
            if existing.y < sub_rect.y {
                new_rects.push(Rectangle::new(
                    existing.x,
                    existing.y,
                    existing.width,
                    sub_rect.y - existing.y,
                ));
            }
            // Bottom part
            if existing_bottom > sub_bottom {
                new_rects.push(Rectangle::new(
                    existing.x,
                    sub_bottom,
                    existing.width,
                    existing_bottom - sub_bottom,
                ));
            }
            // Left and right parts, restricted to the vertical overlap
            let overlap_top = existing.y.max(sub_rect.y);
            let overlap_bottom = existing_bottom.min(sub_bottom);
            if overlap_top < overlap_bottom {
                let overlap_height = overlap_bottom - overlap_top;
                if existing.x < sub_rect.x {
                    new_rects.push(Rectangle::new(
                        existing.x,
                        overlap_top,
                        sub_rect.x - existing.x,
                        overlap_height,
                    ));
                }
                let existing_right = existing.x + existing.width;
                let sub_right = sub_rect.x + sub_rect.width;
                if existing_right > sub_right {
                    new_rects.push(Rectangle::new(
                        sub_right,
                        overlap_top,
                        existing_right - sub_right,
                        overlap_height,
                    ));
                }
            }
        }
        new_rects.retain(|r| !r.is_empty());
        self.rectangles = new_rects;
    }

    pub fn contains_point(&self, point: Point) -> bool {
        self.rectangles.iter().any(|r| r.contains_point(point))
    }
}

/// Where a surface sits in the scene and where it accepts input.
///
/// `bounds` are in global coordinates. `input_region`, when present, is
/// surface-local and restricts input to part of the bounds; `None` means the
/// whole surface accepts input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitRegion {
    pub bounds: Rectangle,
    #[serde(default)]
    pub input_region: Option<Region>,
}

impl HitRegion {
    /// A hit region accepting input over the whole of `bounds`.
    pub fn new(bounds: Rectangle) -> Self {
        Self {
            bounds,
            input_region: None,
        }
    }

    pub fn with_input_region(bounds: Rectangle, input_region: Region) -> Self {
        Self {
            bounds,
            input_region: Some(input_region),
        }
    }

    /// Returns `true` if a global `point` should be routed to this surface.
    pub fn contains(&self, point: Point) -> bool {
        if !self.bounds.contains_point(point) {
            return false;
        }
        match &self.input_region {
            Some(input_region) => input_region.contains_point(self.to_local(point)),
            None => true,
        }
    }

    /// Translates a global point into this surface's local coordinates.
    pub fn to_local(&self, point: Point) -> Point {
        point - self.bounds.origin()
    }
}

impl From<Rectangle> for HitRegion {
    fn from(bounds: Rectangle) -> Self {
        HitRegion::new(bounds)
    }
}
