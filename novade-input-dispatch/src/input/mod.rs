//! Input routing: which surface receives each keyboard, pointer and touch event.
//!
//! This module is responsible for:
//! - Tracking keyboard focus and the keys each surface has seen pressed.
//! - Tracking pointer hover, pressed buttons, and the capture that binds a
//!   pointer gesture to the surface it began on.
//! - Binding each touch contact to the surface it first touched.
//! - Hit testing global positions against the scene's stacking order.
//!
//! [`InputDispatcher`] ties these together behind a single lock.

pub mod dispatcher;
pub mod focus;
pub mod keyboard;
pub mod pointer;
pub mod touch;

pub use dispatcher::InputDispatcher;
pub use focus::{surface_at, SceneSnapshot};
pub use keyboard::KeyRoutingState;
pub use pointer::{ButtonRelease, PointerRoutingState};
pub use touch::TouchRoutingState;
