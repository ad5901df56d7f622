//! The scene as the dispatcher sees it: an ordered list of visible surfaces
//! with their hit regions, plus the push channel used to announce removals.

use crate::region::HitRegion;
use crate::surface::{SurfaceId, SurfaceRef};
use parking_lot::{Mutex, RwLock};
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

/// Read-only view of the visible surfaces.
pub trait InputScene: Send + Sync {
    /// All input-capable surfaces, topmost first.
    fn surfaces_top_to_bottom(&self) -> Vec<(SurfaceRef, HitRegion)>;
}

/// Receives notice that a surface has left the scene.
///
/// Called before the surface becomes unusable; afterwards nothing may be
/// delivered to it.
pub trait SceneObserver: Send + Sync {
    fn surface_removed(&self, surface: &SurfaceRef);
}

struct StackEntry {
    surface: SurfaceRef,
    region: HitRegion,
}

/// A simple in-memory scene keeping surfaces in stacking order.
///
/// Surfaces added later are stacked on top. Observers are held weakly and
/// are notified after the stack lock has been released.
#[derive(Default)]
pub struct SurfaceStack {
    /// Bottom-to-top.
    entries: RwLock<Vec<StackEntry>>,
    observers: Mutex<Vec<Weak<dyn SceneObserver>>>,
}

impl SurfaceStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places `surface` on top of the stack. Re-adding a known surface moves it
    /// to the top and replaces its region.
    pub fn add_surface(&self, surface: SurfaceRef, region: impl Into<HitRegion>) {
        let region = region.into();
        let mut entries = self.entries.write();
        entries.retain(|e| e.surface.id() != surface.id());
        debug!("SurfaceStack: Adding surface {} with bounds {:?}", surface.id(), region.bounds);
        entries.push(StackEntry { surface, region });
    }

    /// Moves an existing surface to the top. Returns `false` if it is unknown.
    pub fn raise(&self, id: SurfaceId) -> bool {
        let mut entries = self.entries.write();
        match entries.iter().position(|e| e.surface.id() == id) {
            Some(index) => {
                let entry = entries.remove(index);
                entries.push(entry);
                true
            }
            None => false,
        }
    }

    /// Replaces the hit region of an existing surface. Returns `false` if it is unknown.
    pub fn set_region(&self, id: SurfaceId, region: impl Into<HitRegion>) -> bool {
        let mut entries = self.entries.write();
        match entries.iter_mut().find(|e| e.surface.id() == id) {
            Some(entry) => {
                entry.region = region.into();
                true
            }
            None => false,
        }
    }

    /// Removes a surface and notifies observers. Returns the removed handle.
    pub fn remove_surface(&self, id: SurfaceId) -> Option<SurfaceRef> {
        let removed = {
            let mut entries = self.entries.write();
            let index = entries.iter().position(|e| e.surface.id() == id)?;
            entries.remove(index).surface
        };

        debug!("SurfaceStack: Removed surface {}", id);
        for observer in self.live_observers() {
            observer.surface_removed(&removed);
        }
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn add_observer(&self, observer: Weak<dyn SceneObserver>) {
        self.observers.lock().push(observer);
    }

    fn live_observers(&self) -> Vec<Arc<dyn SceneObserver>> {
        let mut observers = self.observers.lock();
        let before = observers.len();
        observers.retain(|o| o.strong_count() > 0);
        if observers.len() != before {
            warn!("SurfaceStack: Pruned {} dropped scene observer(s)", before - observers.len());
        }
        observers.iter().filter_map(Weak::upgrade).collect()
    }
}

impl InputScene for SurfaceStack {
    fn surfaces_top_to_bottom(&self) -> Vec<(SurfaceRef, HitRegion)> {
        self.entries
            .read()
            .iter()
            .rev()
            .map(|e| (e.surface.clone(), e.region.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::InputEvent;
    use crate::geometry::Rectangle;
    use crate::surface::InputSurface;

    struct NullSurface(SurfaceId);

    impl InputSurface for NullSurface {
        fn id(&self) -> SurfaceId {
            self.0
        }
        fn consume(&self, _event: &InputEvent) {}
    }

    fn null_surface() -> SurfaceRef {
        Arc::new(NullSurface(SurfaceId::new_unique()))
    }

    #[derive(Default)]
    struct RemovalLog(Mutex<Vec<SurfaceId>>);

    impl SceneObserver for RemovalLog {
        fn surface_removed(&self, surface: &SurfaceRef) {
            self.0.lock().push(surface.id());
        }
    }

    fn ids(stack: &SurfaceStack) -> Vec<SurfaceId> {
        stack.surfaces_top_to_bottom().iter().map(|(s, _)| s.id()).collect()
    }

    #[test]
    fn test_later_surfaces_are_on_top() {
        let stack = SurfaceStack::new();
        let bottom = null_surface();
        let top = null_surface();
        stack.add_surface(bottom.clone(), Rectangle::new(0, 0, 5, 5));
        stack.add_surface(top.clone(), Rectangle::new(0, 0, 5, 5));

        assert_eq!(ids(&stack), vec![top.id(), bottom.id()]);
    }

    #[test]
    fn test_raise_and_set_region() {
        let stack = SurfaceStack::new();
        let a = null_surface();
        let b = null_surface();
        stack.add_surface(a.clone(), Rectangle::new(0, 0, 5, 5));
        stack.add_surface(b.clone(), Rectangle::new(0, 0, 5, 5));

        assert!(stack.raise(a.id()));
        assert_eq!(ids(&stack), vec![a.id(), b.id()]);

        assert!(stack.set_region(b.id(), Rectangle::new(5, 5, 1, 1)));
        let regions = stack.surfaces_top_to_bottom();
        assert_eq!(regions[1].1.bounds, Rectangle::new(5, 5, 1, 1));

        assert!(!stack.raise(SurfaceId::new_unique()));
    }

    #[test]
    fn test_remove_surface_notifies_live_observers() {
        let stack = SurfaceStack::new();
        let surface = null_surface();
        stack.add_surface(surface.clone(), Rectangle::new(0, 0, 5, 5));

        let log = Arc::new(RemovalLog::default());
        let observer: Arc<dyn SceneObserver> = log.clone();
        stack.add_observer(Arc::downgrade(&observer));
        {
            let dropped: Arc<dyn SceneObserver> = Arc::new(RemovalLog::default());
            stack.add_observer(Arc::downgrade(&dropped));
        }

        let removed = stack.remove_surface(surface.id());
        assert!(removed.is_some());
        assert!(stack.is_empty());
        assert_eq!(*log.0.lock(), vec![surface.id()]);

        assert!(stack.remove_surface(surface.id()).is_none());
        assert_eq!(log.0.lock().len(), 1);
    }
}
