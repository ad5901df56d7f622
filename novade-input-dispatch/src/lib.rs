//! # NovaDE Input Dispatch
//!
//! Decides, for every keyboard, pointer and touch event coming out of the
//! input backend, which client surface receives it. The crate covers:
//! - Keyboard focus and per-surface pressed-key tracking, so a key release only
//!   reaches the surface that saw the press.
//! - Pointer hover with synthesized enter/leave, and button capture that keeps
//!   a drag on the surface where it started.
//! - Per-contact touch capture for multitouch gestures.
//!
//! Surfaces, the scene that stacks them, and the transport to clients live
//! elsewhere; this crate talks to them through [`InputScene`],
//! [`InputSurface`] and [`SceneObserver`].

pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod geometry;
pub mod input;
pub mod logging;
pub mod region;
pub mod scene;
pub mod surface;

pub use config::{DispatcherConfig, UnmatchedTouchMotion};
pub use error::{ConfigError, DispatchError};
pub use event::{
    ButtonId, InputEvent, KeyAction, KeyCode, KeyEvent, ModifierSet, PointerAction, PointerEvent,
    TouchEvent, TouchId, TouchPhase,
};
pub use filter::{CompositeEventFilter, EventFilter};
pub use geometry::{Point, Rectangle};
pub use input::InputDispatcher;
pub use region::{HitRegion, Region};
pub use scene::{InputScene, SceneObserver, SurfaceStack};
pub use surface::{InputSurface, SurfaceId, SurfaceRef};
