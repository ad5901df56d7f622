//! Per-surface pressed-key bookkeeping.

use crate::event::KeyCode;
use crate::surface::SurfaceId;
use std::collections::{HashMap, HashSet};

/// Keys pressed on each surface.
///
/// A code is present for a surface iff a key-down for it was delivered to that
/// surface and the matching key-up has not been. Sets are created on the first
/// delivered key-down and dropped when the surface is purged.
#[derive(Debug, Default)]
pub struct KeyRoutingState {
    pressed: HashMap<SurfaceId, HashSet<KeyCode>>,
}

impl KeyRoutingState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `code` as pressed on `surface`. Returns `false` if it already was.
    pub fn record_down(&mut self, surface: SurfaceId, code: KeyCode) -> bool {
        self.pressed.entry(surface).or_default().insert(code)
    }

    /// Removes `code` from `surface`'s pressed set. Returns `false` if the
    /// surface never saw the matching key-down, in which case the release must
    /// not be delivered.
    pub fn release(&mut self, surface: SurfaceId, code: KeyCode) -> bool {
        self.pressed
            .get_mut(&surface)
            .map_or(false, |keys| keys.remove(&code))
    }

    pub fn is_pressed(&self, surface: SurfaceId, code: KeyCode) -> bool {
        self.pressed.get(&surface).map_or(false, |keys| keys.contains(&code))
    }

    /// Keys currently down on `surface`, sorted.
    pub fn pressed_keys(&self, surface: SurfaceId) -> Vec<KeyCode> {
        let mut keys: Vec<KeyCode> = self
            .pressed
            .get(&surface)
            .map(|keys| keys.iter().copied().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    pub fn has_surface(&self, surface: SurfaceId) -> bool {
        self.pressed.contains_key(&surface)
    }

    /// Forgets everything recorded for `surface`.
    pub fn purge_surface(&mut self, surface: SurfaceId) {
        self.pressed.remove(&surface);
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}
