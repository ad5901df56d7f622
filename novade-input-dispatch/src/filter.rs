//! Event filters get first look at every event before routing. Shell
//! keybindings and similar compositor-level consumers live here.

use crate::event::InputEvent;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use tracing::trace;

pub trait EventFilter: Send + Sync {
    /// Returns `true` if the filter consumed the event.
    fn handle(&self, event: &InputEvent) -> bool;
}

/// An ordered chain of weakly held filters.
///
/// The first filter that consumes an event stops the chain. Filters whose
/// owners have dropped them are skipped and pruned.
#[derive(Default)]
pub struct CompositeEventFilter {
    filters: Mutex<Vec<Weak<dyn EventFilter>>>,
}

impl CompositeEventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter with the lowest priority.
    pub fn append(&self, filter: &Arc<dyn EventFilter>) {
        self.filters.lock().push(Arc::downgrade(filter));
    }

    /// Adds a filter with the highest priority.
    pub fn prepend(&self, filter: &Arc<dyn EventFilter>) {
        self.filters.lock().insert(0, Arc::downgrade(filter));
    }

    pub fn len(&self) -> usize {
        self.filters.lock().iter().filter(|f| f.strong_count() > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live_filters(&self) -> Vec<Arc<dyn EventFilter>> {
        let mut filters = self.filters.lock();
        filters.retain(|f| f.strong_count() > 0);
        filters.iter().filter_map(Weak::upgrade).collect()
    }
}

impl EventFilter for CompositeEventFilter {
    fn handle(&self, event: &InputEvent) -> bool {
        // Filters run without the list lock so they may append or prepend.
        for (index, filter) in self.live_filters().into_iter().enumerate() {
            if filter.handle(event) {
                trace!("CompositeEventFilter: Event consumed by filter #{}: {:?}", index, event);
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{KeyCode, ModifierSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFilter {
        consume: bool,
        seen: AtomicUsize,
    }

    impl CountingFilter {
        fn new(consume: bool) -> Arc<Self> {
            Arc::new(Self {
                consume,
                seen: AtomicUsize::new(0),
            })
        }
    }

    impl EventFilter for CountingFilter {
        fn handle(&self, _event: &InputEvent) -> bool {
            self.seen.fetch_add(1, Ordering::SeqCst);
            self.consume
        }
    }

    fn key() -> InputEvent {
        InputEvent::key_down(KeyCode(30), ModifierSet::ALT)
    }

    #[test]
    fn test_offers_events_in_order_until_consumed() {
        let composite = CompositeEventFilter::new();
        let passing = CountingFilter::new(false);
        let consuming = CountingFilter::new(true);
        let never_reached = CountingFilter::new(false);

        let passing_dyn: Arc<dyn EventFilter> = passing.clone();
        let consuming_dyn: Arc<dyn EventFilter> = consuming.clone();
        let never_dyn: Arc<dyn EventFilter> = never_reached.clone();
        composite.append(&consuming_dyn);
        composite.append(&never_dyn);
        composite.prepend(&passing_dyn);

        assert!(composite.handle(&key()));
        assert_eq!(passing.seen.load(Ordering::SeqCst), 1);
        assert_eq!(consuming.seen.load(Ordering::SeqCst), 1);
        assert_eq!(never_reached.seen.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unconsumed_event_passes_through() {
        let composite = CompositeEventFilter::new();
        let passing = CountingFilter::new(false);
        let passing_dyn: Arc<dyn EventFilter> = passing.clone();
        composite.append(&passing_dyn);

        assert!(!composite.handle(&key()));
        assert_eq!(passing.seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropped_filters_are_pruned() {
        let composite = CompositeEventFilter::new();
        {
            let consuming: Arc<dyn EventFilter> = CountingFilter::new(true);
            composite.append(&consuming);
            assert_eq!(composite.len(), 1);
        }
        assert!(composite.is_empty());
        assert!(!composite.handle(&key()));
    }
}
