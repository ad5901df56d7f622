//! The dispatcher's view of a client surface: an identity plus the ability to
//! consume delivered input events.

use crate::event::InputEvent;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Unique identifier for an input-capable surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl SurfaceId {
    /// Creates a new, unique `SurfaceId`.
    pub fn new_unique() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        SurfaceId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A surface that can receive input.
///
/// `consume` is called with the dispatcher's routing lock held. It must not
/// block and must not call back into the dispatcher.
pub trait InputSurface: Send + Sync {
    fn id(&self) -> SurfaceId;

    /// Queues `event` for the client owning this surface.
    fn consume(&self, event: &InputEvent);
}

/// Non-owning handle the dispatcher keeps to a surface. It stays usable until
/// the scene owner reports the surface as removed.
pub type SurfaceRef = Arc<dyn InputSurface>;

/// Identity comparison for surface handles.
pub fn same_surface(a: &SurfaceRef, b: &SurfaceRef) -> bool {
    a.id() == b.id()
}

/// Compares two optional surface handles by identity.
pub fn same_target(a: Option<&SurfaceRef>, b: Option<&SurfaceRef>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => same_surface(a, b),
        (None, None) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullSurface(SurfaceId);

    impl InputSurface for NullSurface {
        fn id(&self) -> SurfaceId {
            self.0
        }
        fn consume(&self, _event: &InputEvent) {}
    }

    #[test]
    fn test_surface_id_generation_unique() {
        let id1 = SurfaceId::new_unique();
        let id2 = SurfaceId::new_unique();
        assert_ne!(id1, id2, "SurfaceId::new_unique should generate unique IDs.");
    }

    #[test]
    fn test_same_target_compares_identity() {
        let id = SurfaceId::new_unique();
        let a: SurfaceRef = Arc::new(NullSurface(id));
        let a_again: SurfaceRef = Arc::new(NullSurface(id));
        let b: SurfaceRef = Arc::new(NullSurface(SurfaceId::new_unique()));

        assert!(same_surface(&a, &a_again));
        assert!(!same_surface(&a, &b));
        assert!(same_target(None, None));
        assert!(!same_target(Some(&a), None));
        assert!(same_target(Some(&a), Some(&a_again)));
    }
}
