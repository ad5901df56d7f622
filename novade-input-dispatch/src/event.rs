//! Input events as seen by the dispatcher.
//!
//! Events arrive from the backend in global coordinates. The dispatcher
//! re-targets pointer and touch events into surface-local coordinates with
//! [`InputEvent::with_position`] before handing them to a surface.

use crate::geometry::Point;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A hardware-independent key code (evdev numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KeyCode(pub u32);

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A pointer button identifier (evdev numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ButtonId(pub u32);

impl ButtonId {
    /// BTN_LEFT
    pub const PRIMARY: ButtonId = ButtonId(0x110);
    /// BTN_RIGHT
    pub const SECONDARY: ButtonId = ButtonId(0x111);
    /// BTN_MIDDLE
    pub const TERTIARY: ButtonId = ButtonId(0x112);
}

/// Identifier of one touch contact (a multitouch slot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TouchId(pub i32);

impl fmt::Display for TouchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

bitflags! {
    /// Keyboard modifiers active when a key event was generated.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct ModifierSet: u32 {
        const SHIFT = 1;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
        const META = 1 << 3;
        const CAPS_LOCK = 1 << 4;
        const NUM_LOCK = 1 << 5;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyAction {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub code: KeyCode,
    pub modifiers: ModifierSet,
}

/// Pointer actions. `Enter` and `Leave` are only produced by the dispatcher
/// when the hovered surface changes; the backend never reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerAction {
    Down,
    Up,
    Move,
    Enter,
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub position: Point,
    /// Set for `Down` and `Up`, `None` otherwise.
    pub button: Option<ButtonId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TouchPhase {
    Down,
    Move,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchEvent {
    pub touch_id: TouchId,
    pub phase: TouchPhase,
    pub position: Point,
}

/// Any event the dispatcher routes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    Key(KeyEvent),
    Pointer(PointerEvent),
    Touch(TouchEvent),
}

impl InputEvent {
    pub fn key_down(code: KeyCode, modifiers: ModifierSet) -> Self {
        InputEvent::Key(KeyEvent {
            action: KeyAction::Down,
            code,
            modifiers,
        })
    }

    pub fn key_up(code: KeyCode, modifiers: ModifierSet) -> Self {
        InputEvent::Key(KeyEvent {
            action: KeyAction::Up,
            code,
            modifiers,
        })
    }

    pub fn pointer_move(position: impl Into<Point>) -> Self {
        InputEvent::Pointer(PointerEvent {
            action: PointerAction::Move,
            position: position.into(),
            button: None,
        })
    }

    pub fn pointer_down(position: impl Into<Point>, button: ButtonId) -> Self {
        InputEvent::Pointer(PointerEvent {
            action: PointerAction::Down,
            position: position.into(),
            button: Some(button),
        })
    }

    pub fn pointer_up(position: impl Into<Point>, button: ButtonId) -> Self {
        InputEvent::Pointer(PointerEvent {
            action: PointerAction::Up,
            position: position.into(),
            button: Some(button),
        })
    }

    /// Synthetic hover enter, as delivered by the dispatcher.
    pub fn pointer_enter(position: Point) -> Self {
        InputEvent::Pointer(PointerEvent {
            action: PointerAction::Enter,
            position,
            button: None,
        })
    }

    /// Synthetic hover leave, as delivered by the dispatcher.
    pub fn pointer_leave(position: Point) -> Self {
        InputEvent::Pointer(PointerEvent {
            action: PointerAction::Leave,
            position,
            button: None,
        })
    }

    pub fn touch_down(touch_id: TouchId, position: impl Into<Point>) -> Self {
        InputEvent::Touch(TouchEvent {
            touch_id,
            phase: TouchPhase::Down,
            position: position.into(),
        })
    }

    pub fn touch_move(touch_id: TouchId, position: impl Into<Point>) -> Self {
        InputEvent::Touch(TouchEvent {
            touch_id,
            phase: TouchPhase::Move,
            position: position.into(),
        })
    }

    pub fn touch_up(touch_id: TouchId, position: impl Into<Point>) -> Self {
        InputEvent::Touch(TouchEvent {
            touch_id,
            phase: TouchPhase::Up,
            position: position.into(),
        })
    }

    /// The position carried by pointer and touch events; key events have none.
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::Key(_) => None,
            InputEvent::Pointer(ev) => Some(ev.position),
            InputEvent::Touch(ev) => Some(ev.position),
        }
    }

    /// Returns a copy of this event carrying `position` instead. Key events are
    /// returned unchanged.
    pub fn with_position(&self, position: Point) -> Self {
        match *self {
            InputEvent::Key(ev) => InputEvent::Key(ev),
            InputEvent::Pointer(ev) => InputEvent::Pointer(PointerEvent { position, ..ev }),
            InputEvent::Touch(ev) => InputEvent::Touch(TouchEvent { position, ..ev }),
        }
    }
}
