//! Per-contact touch capture.

use crate::event::TouchId;
use crate::surface::{SurfaceId, SurfaceRef};
use std::collections::{HashMap, HashSet};

/// Maps each active touch contact to the surface it is bound to.
///
/// An entry exists iff a down for that id was delivered and the matching up
/// has not been. Contacts never influence each other's routing.
///
/// Contacts whose surface went away stay orphaned until their up or a new
/// down, so the rest of the gesture never lands on another surface.
#[derive(Default)]
pub struct TouchRoutingState {
    captures: HashMap<TouchId, SurfaceRef>,
    orphaned: HashSet<TouchId>,
}

impl TouchRoutingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capture(&mut self, id: TouchId, surface: SurfaceRef) {
        self.orphaned.remove(&id);
        self.captures.insert(id, surface);
    }

    pub fn target(&self, id: TouchId) -> Option<&SurfaceRef> {
        self.captures.get(&id)
    }

    /// Ends the contact, returning the surface it was bound to.
    pub fn release(&mut self, id: TouchId) -> Option<SurfaceRef> {
        self.orphaned.remove(&id);
        self.captures.remove(&id)
    }

    pub fn is_orphaned(&self, id: TouchId) -> bool {
        self.orphaned.contains(&id)
    }

    /// Orphans every contact bound to `surface`. Returns how many were dropped.
    pub fn purge_surface(&mut self, surface: SurfaceId) -> usize {
        let dropped: Vec<TouchId> = self
            .captures
            .iter()
            .filter(|(_, target)| target.id() == surface)
            .map(|(id, _)| *id)
            .collect();
        for id in &dropped {
            self.captures.remove(id);
            self.orphaned.insert(*id);
        }
        dropped.len()
    }

    /// Number of contacts bound to a live surface.
    pub fn active_contacts(&self) -> usize {
        self.captures.len()
    }

    pub fn clear(&mut self) {
        self.captures.clear();
        self.orphaned.clear();
    }
}

impl std::fmt::Debug for TouchRoutingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TouchRoutingState")
            .field(
                "captures",
                &self.captures.iter().map(|(id, s)| (*id, s.id())).collect::<HashMap<_, _>>(),
            )
            .field("orphaned", &self.orphaned)
            .finish()
    }
}
