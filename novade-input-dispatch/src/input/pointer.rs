//! Pointer hover, pressed buttons, and gesture capture.

use crate::event::ButtonId;
use crate::geometry::Point;
use crate::surface::{SurfaceId, SurfaceRef};
use std::collections::BTreeSet;

/// Result of releasing a pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonRelease {
    /// The button was not pressed; the release is inconsistent input.
    NotPressed,
    /// Other buttons are still held, capture continues.
    StillCaptured,
    /// That was the last held button; capture has ended.
    CaptureEnded,
}

/// The single pointer's routing record.
///
/// Invariants: `captured` is set iff `pressed_buttons` is non-empty, and while
/// captured, `hovered` is the captured surface.
#[derive(Default)]
pub struct PointerRoutingState {
    hovered: Option<SurfaceRef>,
    pressed_buttons: BTreeSet<ButtonId>,
    captured: Option<SurfaceRef>,
    last_position: Point,
}

impl PointerRoutingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<&SurfaceRef> {
        self.hovered.as_ref()
    }

    pub fn captured(&self) -> Option<&SurfaceRef> {
        self.captured.as_ref()
    }

    pub fn is_captured(&self) -> bool {
        self.captured.is_some()
    }

    pub fn last_position(&self) -> Point {
        self.last_position
    }

    pub fn set_last_position(&mut self, position: Point) {
        self.last_position = position;
    }

    pub fn pressed_buttons(&self) -> impl Iterator<Item = ButtonId> + '_ {
        self.pressed_buttons.iter().copied()
    }

    pub fn is_pressed(&self, button: ButtonId) -> bool {
        self.pressed_buttons.contains(&button)
    }

    pub fn set_hovered(&mut self, surface: Option<SurfaceRef>) {
        self.hovered = surface;
    }

    pub fn take_hovered(&mut self) -> Option<SurfaceRef> {
        self.hovered.take()
    }

    /// Records `button` as held over `target`.
    ///
    /// The first press captures `target`; later presses (including repeats of
    /// an already held button) only add to the set and leave capture alone.
    /// Returns `false` for a repeated press.
    pub fn press(&mut self, button: ButtonId, target: &SurfaceRef) -> bool {
        if self.captured.is_none() {
            self.captured = Some(target.clone());
            self.hovered = Some(target.clone());
        }
        self.pressed_buttons.insert(button)
    }

    pub fn release(&mut self, button: ButtonId) -> ButtonRelease {
        if !self.pressed_buttons.remove(&button) {
            return ButtonRelease::NotPressed;
        }
        if self.pressed_buttons.is_empty() {
            self.captured = None;
            ButtonRelease::CaptureEnded
        } else {
            ButtonRelease::StillCaptured
        }
    }

    /// Clears every reference to `surface`. Losing the captured surface ends
    /// the gesture, so the held buttons are forgotten too.
    pub fn purge_surface(&mut self, surface: SurfaceId) {
        if self.hovered.as_ref().map_or(false, |s| s.id() == surface) {
            self.hovered = None;
        }
        if self.captured.as_ref().map_or(false, |s| s.id() == surface) {
            self.captured = None;
            self.pressed_buttons.clear();
        }
    }

    /// Drops hover, capture and held buttons. The last position is kept; it is
    /// where the cursor physically is.
    pub fn clear(&mut self) {
        self.hovered = None;
        self.captured = None;
        self.pressed_buttons.clear();
    }
}

impl std::fmt::Debug for PointerRoutingState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerRoutingState")
            .field("hovered", &self.hovered.as_ref().map(|s| s.id()))
            .field("pressed_buttons", &self.pressed_buttons)
            .field("captured", &self.captured.as_ref().map(|s| s.id()))
            .field("last_position", &self.last_position)
            .finish()
    }
}
