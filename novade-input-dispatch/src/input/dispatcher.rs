//! The input dispatcher: routes each event to at most one surface (plus the
//! synthetic pointer enter/leave pair) while keeping key, button and touch
//! state consistent per surface.

use crate::config::{DispatcherConfig, UnmatchedTouchMotion};
use crate::error::DispatchError;
use crate::event::{
    ButtonId, InputEvent, KeyAction, KeyCode, KeyEvent, PointerAction, PointerEvent, TouchEvent,
    TouchId, TouchPhase,
};
use crate::filter::EventFilter;
use crate::geometry::Point;
use crate::input::focus::SceneSnapshot;
use crate::input::keyboard::KeyRoutingState;
use crate::input::pointer::{ButtonRelease, PointerRoutingState};
use crate::input::touch::TouchRoutingState;
use crate::scene::{InputScene, SceneObserver};
use crate::surface::{same_target, SurfaceId, SurfaceRef};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, error, info, trace};

/// Everything guarded by the dispatcher lock.
#[derive(Default)]
struct DispatcherState {
    running: bool,
    focus: Option<SurfaceRef>,
    keys: KeyRoutingState,
    pointer: PointerRoutingState,
    touch: TouchRoutingState,
}

impl DispatcherState {
    fn focus_id(&self) -> Option<SurfaceId> {
        self.focus.as_ref().map(|s| s.id())
    }

    fn clear_transient(&mut self) {
        self.keys.clear();
        self.pointer.clear();
        self.touch.clear();
    }
}

impl std::fmt::Debug for DispatcherState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatcherState")
            .field("running", &self.running)
            .field("focus", &self.focus_id())
            .field("keys", &self.keys)
            .field("pointer", &self.pointer)
            .field("touch", &self.touch)
            .finish()
    }
}

/// Routes input events from the backend to surfaces of an [`InputScene`].
///
/// `dispatch` is expected to be driven by one thread. `set_focus` and
/// `notify_surface_removed` may come from any thread; all three serialize on
/// one lock. Surfaces' `consume` runs with that lock held.
pub struct InputDispatcher {
    scene: Arc<dyn InputScene>,
    filter: Option<Arc<dyn EventFilter>>,
    config: DispatcherConfig,
    state: Mutex<DispatcherState>,
}

impl InputDispatcher {
    pub fn new(scene: Arc<dyn InputScene>) -> Self {
        Self::with_config(scene, DispatcherConfig::default())
    }

    pub fn with_config(scene: Arc<dyn InputScene>, config: DispatcherConfig) -> Self {
        info!("InputDispatcher: Initializing with config: {:?}", config);
        Self {
            scene,
            filter: None,
            config,
            state: Mutex::new(DispatcherState::default()),
        }
    }

    /// Installs a filter that sees every event before routing. Events it
    /// consumes are not routed and leave routing state untouched.
    pub fn with_filter(mut self, filter: Arc<dyn EventFilter>) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    // --- Lifecycle ---

    pub fn start(&self) {
        let mut state = self.state.lock();
        if state.running {
            debug!("InputDispatcher: start() called while already running.");
            return;
        }
        state.running = true;
        info!("InputDispatcher: Started.");
    }

    /// Stops dispatching and cancels all hover, capture, touch and key state.
    /// Keyboard focus survives a stop.
    pub fn stop(&self) {
        let mut state = self.state.lock();
        if !state.running {
            debug!("InputDispatcher: stop() called while already stopped.");
        }
        state.running = false;
        state.clear_transient();
        info!("InputDispatcher: Stopped; transient routing state cleared.");
    }

    pub fn is_running(&self) -> bool {
        self.state.lock().running
    }

    // --- Focus and scene changes ---

    pub fn set_focus(&self, surface: Option<SurfaceRef>) {
        let mut state = self.state.lock();
        if same_target(state.focus.as_ref(), surface.as_ref()) {
            trace!(
                "InputDispatcher: set_focus called with current focus {:?}, no change.",
                state.focus_id()
            );
            return;
        }
        info!(
            "InputDispatcher: Keyboard focus changing from {:?} to {:?}",
            state.focus_id(),
            surface.as_ref().map(|s| s.id())
        );
        state.focus = surface;
    }

    pub fn focus(&self) -> Option<SurfaceRef> {
        self.state.lock().focus.clone()
    }

    /// Purges `surface` from focus, hover, capture, touch and key state.
    ///
    /// No leave or focus-lost event is sent: the surface can no longer consume.
    pub fn notify_surface_removed(&self, surface: &SurfaceRef) {
        let id = surface.id();
        let mut state = self.state.lock();

        if state.focus_id() == Some(id) {
            info!("InputDispatcher: Focused surface {} removed; clearing keyboard focus.", id);
            state.focus = None;
        }
        if state.pointer.captured().map(|s| s.id()) == Some(id) {
            info!("InputDispatcher: Pointer capture on surface {} dropped with the surface.", id);
        }
        state.pointer.purge_surface(id);
        state.keys.purge_surface(id);
        let touches = state.touch.purge_surface(id);
        if touches > 0 {
            info!(
                "InputDispatcher: Dropped {} touch contact(s) bound to removed surface {}.",
                touches, id
            );
        }
        debug!("InputDispatcher: Surface {} purged from routing state.", id);
    }

    // --- Introspection ---

    pub fn hovered(&self) -> Option<SurfaceId> {
        self.state.lock().pointer.hovered().map(|s| s.id())
    }

    pub fn pointer_captured(&self) -> Option<SurfaceId> {
        self.state.lock().pointer.captured().map(|s| s.id())
    }

    pub fn pointer_position(&self) -> Point {
        self.state.lock().pointer.last_position()
    }

    pub fn pressed_buttons(&self) -> Vec<ButtonId> {
        self.state.lock().pointer.pressed_buttons().collect()
    }

    pub fn touch_target(&self, touch_id: TouchId) -> Option<SurfaceId> {
        self.state.lock().touch.target(touch_id).map(|s| s.id())
    }

    pub fn active_touch_points(&self) -> usize {
        self.state.lock().touch.active_contacts()
    }

    pub fn pressed_keys(&self, surface: SurfaceId) -> Vec<KeyCode> {
        self.state.lock().keys.pressed_keys(surface)
    }

    // --- Dispatch ---

    /// Routes `event`. Returns `true` iff at least one surface received
    /// something, synthetic enter/leave included.
    ///
    /// Dispatching while stopped is a caller bug: it is logged and `false` is returned.
    pub fn dispatch(&self, event: &InputEvent) -> bool {
        match self.try_dispatch(event) {
            Ok(delivered) => delivered,
            Err(e) => {
                error!("InputDispatcher: {}. Event not dispatched: {:?}", e, event);
                false
            }
        }
    }

    /// Like [`dispatch`](Self::dispatch), but reports lifecycle misuse to the caller.
    pub fn try_dispatch(&self, event: &InputEvent) -> Result<bool, DispatchError> {
        if !self.state.lock().running {
            return Err(DispatchError::NotRunning);
        }

        // Filters run unlocked; a shell keybinding may well change focus.
        if let Some(filter) = &self.filter {
            if filter.handle(event) {
                trace!("InputDispatcher: Event consumed by filter: {:?}", event);
                return Ok(false);
            }
        }

        let mut state = self.state.lock();
        if !state.running {
            return Err(DispatchError::NotRunning);
        }

        let delivered = match event {
            InputEvent::Key(key) => self.dispatch_key(&mut state, key, event),
            InputEvent::Pointer(pointer) => self.dispatch_pointer(&mut state, pointer),
            InputEvent::Touch(touch) => self.dispatch_touch(&mut state, touch, event),
        };
        Ok(delivered)
    }

    fn dispatch_key(
        &self,
        state: &mut DispatcherState,
        key: &KeyEvent,
        event: &InputEvent,
    ) -> bool {
        let Some(focus) = state.focus.clone() else {
            self.log_drop("no keyboard focus", event);
            return false;
        };

        match key.action {
            KeyAction::Down => {
                if !state.keys.record_down(focus.id(), key.code) {
                    debug!(
                        "InputDispatcher: Key {} already down on surface {}; delivering repeat.",
                        key.code,
                        focus.id()
                    );
                }
            }
            KeyAction::Up => {
                if !state.keys.release(focus.id(), key.code) {
                    self.log_drop("key release without matching press on focused surface", event);
                    return false;
                }
            }
        }
        deliver(&focus, event);
        true
    }

    fn dispatch_pointer(&self, state: &mut DispatcherState, pointer: &PointerEvent) -> bool {
        let event = InputEvent::Pointer(*pointer);
        let button = match (pointer.action, pointer.button) {
            (PointerAction::Enter | PointerAction::Leave, _) => {
                self.log_drop("enter/leave are synthesized by the dispatcher", &event);
                return false;
            }
            (PointerAction::Down | PointerAction::Up, None) => {
                self.log_drop("button action without a button", &event);
                return false;
            }
            (_, button) => button,
        };

        let scene = SceneSnapshot::take(self.scene.as_ref());
        let position = pointer.position;
        state.pointer.set_last_position(position);

        let target = match state.pointer.captured() {
            Some(captured) => Some(captured.clone()),
            None => scene.surface_at(position),
        };

        let mut delivered = update_hover(&mut state.pointer, target.clone(), &scene, position);

        let Some(target) = target else {
            self.log_drop("no surface under pointer", &event);
            return delivered;
        };
        let local = event.with_position(scene.local_position(&target, position));

        match (pointer.action, button) {
            (PointerAction::Down, Some(button)) => {
                if !state.pointer.press(button, &target) {
                    debug!(
                        "InputDispatcher: Button {:?} already pressed; capture unchanged.",
                        button
                    );
                }
                deliver(&target, &local);
                delivered = true;
            }
            (PointerAction::Up, Some(button)) => match state.pointer.release(button) {
                ButtonRelease::NotPressed => {
                    self.log_drop("button release without matching press", &event);
                }
                ButtonRelease::StillCaptured => {
                    deliver(&target, &local);
                    delivered = true;
                }
                ButtonRelease::CaptureEnded => {
                    deliver(&target, &local);
                    delivered = true;
                    debug!(
                        "InputDispatcher: Pointer capture on surface {} ended; re-resolving hover.",
                        target.id()
                    );
                    let under = scene.surface_at(state.pointer.last_position());
                    delivered |= update_hover(&mut state.pointer, under, &scene, position);
                }
            },
            _ => {
                deliver(&target, &local);
                delivered = true;
            }
        }
        delivered
    }

    fn dispatch_touch(
        &self,
        state: &mut DispatcherState,
        touch: &TouchEvent,
        event: &InputEvent,
    ) -> bool {
        let id = touch.touch_id;
        match touch.phase {
            TouchPhase::Down => match state.touch.target(id).cloned() {
                Some(target) => {
                    debug!(
                        "InputDispatcher: Repeated down for touch {}; keeping surface {}.",
                        id,
                        target.id()
                    );
                    self.deliver_touch(&target, event, touch.position);
                    true
                }
                None => self.begin_touch(state, touch, event),
            },
            TouchPhase::Move => match state.touch.target(id).cloned() {
                Some(target) => {
                    self.deliver_touch(&target, event, touch.position);
                    true
                }
                None if state.touch.is_orphaned(id) => {
                    self.log_drop("touch motion for contact whose surface was removed", event);
                    false
                }
                None => match self.config.unmatched_touch_motion {
                    UnmatchedTouchMotion::Drop => {
                        self.log_drop("touch motion for unknown touch id", event);
                        false
                    }
                    UnmatchedTouchMotion::ImplicitDown => {
                        debug!(
                            "InputDispatcher: Touch {} moved without a down; treating as down.",
                            id
                        );
                        let down = InputEvent::touch_down(id, touch.position);
                        self.begin_touch(state, touch, &down)
                    }
                },
            },
            TouchPhase::Up => match state.touch.release(id) {
                Some(target) => {
                    debug!("InputDispatcher: Touch {} released from surface {}.", id, target.id());
                    self.deliver_touch(&target, event, touch.position);
                    true
                }
                None => {
                    self.log_drop("touch up for unknown touch id", event);
                    false
                }
            },
        }
    }

    /// Hit-tests a new contact, binds it, and delivers `event` to the surface hit.
    fn begin_touch(
        &self,
        state: &mut DispatcherState,
        touch: &TouchEvent,
        event: &InputEvent,
    ) -> bool {
        let limit = self.config.max_touch_points;
        if limit > 0 && state.touch.active_contacts() >= limit {
            self.log_drop("touch point limit reached", event);
            return false;
        }

        let scene = SceneSnapshot::take(self.scene.as_ref());
        let Some(target) = scene.surface_at(touch.position) else {
            self.log_drop("no surface under touch point", event);
            return false;
        };

        debug!("InputDispatcher: Touch {} bound to surface {}.", touch.touch_id, target.id());
        state.touch.capture(touch.touch_id, target.clone());
        deliver(&target, &event.with_position(scene.local_position(&target, touch.position)));
        true
    }

    /// Delivers to a bound contact's surface without hit testing; the snapshot
    /// is only used to translate the position.
    fn deliver_touch(&self, target: &SurfaceRef, event: &InputEvent, position: Point) {
        let scene = SceneSnapshot::take(self.scene.as_ref());
        deliver(target, &event.with_position(scene.local_position(target, position)));
    }

    fn log_drop(&self, reason: &str, event: &InputEvent) {
        if self.config.log_dropped_events {
            debug!("InputDispatcher: Dropped event ({}): {:?}", reason, event);
        } else {
            trace!("InputDispatcher: Dropped event ({}): {:?}", reason, event);
        }
    }
}

impl SceneObserver for InputDispatcher {
    fn surface_removed(&self, surface: &SurfaceRef) {
        self.notify_surface_removed(surface);
    }
}

impl std::fmt::Debug for InputDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputDispatcher")
            .field("config", &self.config)
            .field("has_filter", &self.filter.is_some())
            .field("state", &*self.state.lock())
            .finish()
    }
}

fn deliver(target: &SurfaceRef, event: &InputEvent) {
    trace!("InputDispatcher: Delivering to surface {}: {:?}", target.id(), event);
    target.consume(event);
}

/// Moves hover to `new_target`, sending leave to the old surface and enter to
/// the new one. Returns `true` if anything was delivered.
fn update_hover(
    pointer: &mut PointerRoutingState,
    new_target: Option<SurfaceRef>,
    scene: &SceneSnapshot,
    position: Point,
) -> bool {
    if same_target(pointer.hovered(), new_target.as_ref()) {
        return false;
    }

    let mut delivered = false;
    if let Some(old) = pointer.take_hovered() {
        debug!("InputDispatcher: Pointer leaving surface {}", old.id());
        deliver(&old, &InputEvent::pointer_leave(scene.local_position(&old, position)));
        delivered = true;
    }
    if let Some(new) = new_target {
        debug!("InputDispatcher: Pointer entering surface {}", new.id());
        deliver(&new, &InputEvent::pointer_enter(scene.local_position(&new, position)));
        pointer.set_hovered(Some(new));
        delivered = true;
    }
    delivered
}
