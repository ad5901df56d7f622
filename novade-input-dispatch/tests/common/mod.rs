use novade_input_dispatch::{
    InputDispatcher, InputEvent, InputSurface, Rectangle, SurfaceId, SurfaceStack,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Test double that records everything delivered to it.
pub struct RecordingSurface {
    id: SurfaceId,
    events: Mutex<Vec<InputEvent>>,
}

impl RecordingSurface {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            id: SurfaceId::new_unique(),
            events: Mutex::new(Vec::new()),
        })
    }

    pub fn events(&self) -> Vec<InputEvent> {
        self.events.lock().clone()
    }
}

impl InputSurface for RecordingSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn consume(&self, event: &InputEvent) {
        self.events.lock().push(*event);
    }
}

/// A scene plus a started dispatcher observing it.
pub struct Fixture {
    pub scene: Arc<SurfaceStack>,
    pub dispatcher: Arc<InputDispatcher>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_dispatcher(|scene| InputDispatcher::new(scene))
    }

    pub fn with_dispatcher(build: impl FnOnce(Arc<SurfaceStack>) -> InputDispatcher) -> Self {
        novade_input_dispatch::logging::init_test_logging();
        let scene = Arc::new(SurfaceStack::new());
        let dispatcher = Arc::new(build(scene.clone()));
        let observer: Arc<dyn novade_input_dispatch::SceneObserver> = dispatcher.clone();
        scene.add_observer(Arc::downgrade(&observer));
        dispatcher.start();
        Self { scene, dispatcher }
    }

    /// Adds a surface on top of the stack covering `(x, y)` with size `w x h`.
    pub fn add_surface(&self, x: i32, y: i32, w: i32, h: i32) -> Arc<RecordingSurface> {
        let surface = RecordingSurface::new();
        self.scene.add_surface(surface.clone(), Rectangle::new(x, y, w, h));
        surface
    }

    pub fn dispatch(&self, event: InputEvent) -> bool {
        self.dispatcher.dispatch(&event)
    }
}

impl Drop for Fixture {
    fn drop(&mut self) {
        self.dispatcher.stop();
    }
}
