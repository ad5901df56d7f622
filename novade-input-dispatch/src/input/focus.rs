//! Hit testing: which surface is at a given global position.

use crate::geometry::Point;
use crate::region::HitRegion;
use crate::scene::InputScene;
use crate::surface::{SurfaceId, SurfaceRef};

/// Returns the topmost surface of `scene` whose hit region contains `point`.
pub fn surface_at(scene: &dyn InputScene, point: Point) -> Option<SurfaceRef> {
    SceneSnapshot::take(scene).surface_at(point)
}

/// The scene's surfaces as enumerated once for a single dispatch.
///
/// Taking one snapshot per event keeps hit testing and local-coordinate
/// translation consistent with each other for that event.
pub struct SceneSnapshot {
    /// Topmost first.
    surfaces: Vec<(SurfaceRef, HitRegion)>,
}

impl SceneSnapshot {
    pub fn take(scene: &dyn InputScene) -> Self {
        Self {
            surfaces: scene.surfaces_top_to_bottom(),
        }
    }

    pub fn surface_at(&self, point: Point) -> Option<SurfaceRef> {
        self.surfaces
            .iter()
            .find(|(_, region)| region.contains(point))
            .map(|(surface, _)| surface.clone())
    }

    pub fn region_of(&self, surface: SurfaceId) -> Option<&HitRegion> {
        self.surfaces
            .iter()
            .find(|(s, _)| s.id() == surface)
            .map(|(_, region)| region)
    }

    /// Translates a global position into `surface`'s local coordinates. A
    /// surface that is no longer enumerated gets the global position.
    pub fn local_position(&self, surface: &SurfaceRef, point: Point) -> Point {
        match self.region_of(surface.id()) {
            Some(region) => region.to_local(point),
            None => point,
        }
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::InputEvent;
    use crate::geometry::Rectangle;
    use crate::region::Region;
    use crate::scene::SurfaceStack;
    use crate::surface::InputSurface;
    use std::sync::Arc;

    struct NullSurface(SurfaceId);

    impl InputSurface for NullSurface {
        fn id(&self) -> SurfaceId {
            self.0
        }
        fn consume(&self, _event: &InputEvent) {}
    }

    fn add(stack: &SurfaceStack, region: impl Into<HitRegion>) -> SurfaceRef {
        let surface: SurfaceRef = Arc::new(NullSurface(SurfaceId::new_unique()));
        stack.add_surface(surface.clone(), region);
        surface
    }

    fn id_at(stack: &SurfaceStack, x: f64, y: f64) -> Option<SurfaceId> {
        surface_at(stack, Point::new(x, y)).map(|s| s.id())
    }

    #[test]
    fn test_surface_at_no_surfaces() {
        let stack = SurfaceStack::new();
        assert!(id_at(&stack, 10.0, 10.0).is_none());
    }

    #[test]
    fn test_surface_at_single_surface_hit_and_miss() {
        let stack = SurfaceStack::new();
        let s = add(&stack, Rectangle::new(0, 0, 100, 100));
        assert_eq!(id_at(&stack, 50.0, 50.0), Some(s.id()));
        assert!(id_at(&stack, 150.0, 150.0).is_none());
    }

    #[test]
    fn test_surface_at_respects_input_region() {
        let stack = SurfaceStack::new();
        let input = Region::from_rectangle(Rectangle::new(10, 10, 30, 30));
        let s = add(&stack, HitRegion::with_input_region(Rectangle::new(0, 0, 100, 100), input));

        assert_eq!(id_at(&stack, 20.0, 20.0), Some(s.id()));
        assert!(id_at(&stack, 5.0, 5.0).is_none());
        assert!(id_at(&stack, 50.0, 50.0).is_none());
    }

    #[test]
    fn test_surface_at_picks_topmost_of_overlapping() {
        let stack = SurfaceStack::new();
        let bottom = add(&stack, Rectangle::new(0, 0, 100, 100));
        let top = add(&stack, Rectangle::new(10, 10, 50, 50));

        assert_eq!(id_at(&stack, 20.0, 20.0), Some(top.id()));
        assert_eq!(id_at(&stack, 80.0, 80.0), Some(bottom.id()));

        stack.remove_surface(top.id());
        assert_eq!(id_at(&stack, 20.0, 20.0), Some(bottom.id()));
    }

    #[test]
    fn test_input_region_hole_falls_through_to_surface_below() {
        let stack = SurfaceStack::new();
        let bottom = add(&stack, Rectangle::new(0, 0, 100, 100));
        let mut input = Region::from_rectangle(Rectangle::new(0, 0, 100, 100));
        input.subtract(Rectangle::new(40, 40, 20, 20));
        let top = add(&stack, HitRegion::with_input_region(Rectangle::new(0, 0, 100, 100), input));

        assert_eq!(id_at(&stack, 10.0, 10.0), Some(top.id()));
        assert_eq!(id_at(&stack, 50.0, 50.0), Some(bottom.id()));
    }

    #[test]
    fn test_local_position() {
        let stack = SurfaceStack::new();
        let s = add(&stack, Rectangle::new(5, 5, 5, 5));
        let gone: SurfaceRef = Arc::new(NullSurface(SurfaceId::new_unique()));

        let snapshot = SceneSnapshot::take(&stack);
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.local_position(&s, Point::new(6.0, 6.0)), Point::new(1.0, 1.0));
        assert_eq!(snapshot.local_position(&gone, Point::new(6.0, 6.0)), Point::new(6.0, 6.0));
    }
}
