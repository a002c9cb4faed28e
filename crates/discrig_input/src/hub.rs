//! Input dispatch with scoped listener registration
//!
//! Listeners are registered on an [`InputHub`] and stay registered for as
//! long as the returned [`Subscription`] lives. A subscription covers every
//! handler of its listener (keys, pointer down/move/up, scroll), so
//! dropping it removes all of them at once.
//!
//! Pointer-down is delivered in priority order (highest first) and stops at
//! the first listener that returns [`Propagation::Stop`]. All other events
//! reach every listener.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use winit::keyboard::KeyCode;

use crate::input_state::PointerEvent;

/// Whether a pointer-down continues to lower-priority listeners
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// A raw input event as delivered by the host window
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),
    PointerDown(PointerEvent),
    PointerMove(PointerEvent),
    PointerUp(PointerEvent),
    /// Scroll wheel, in lines (positive = away from the user)
    Scroll(f32),
}

/// Receiver for input events
///
/// Every handler has a no-op default so listeners only implement what they
/// consume.
pub trait InputListener {
    fn key_down(&mut self, _key: KeyCode) {}
    fn key_up(&mut self, _key: KeyCode) {}
    fn pointer_down(&mut self, _event: &PointerEvent) -> Propagation {
        Propagation::Continue
    }
    fn pointer_move(&mut self, _event: &PointerEvent) {}
    fn pointer_up(&mut self, _event: &PointerEvent) {}
    fn scroll(&mut self, _lines: f32) {}
}

type SharedListener = Rc<RefCell<dyn InputListener>>;

struct Registration {
    id: u64,
    priority: i32,
    listener: SharedListener,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    /// Sorted by descending priority; equal priorities keep insertion order
    entries: Vec<Registration>,
}

impl Registry {
    fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|r| r.id == id)
    }
}

/// Single-threaded event source that listeners subscribe to
#[derive(Clone, Default)]
pub struct InputHub {
    registry: Rc<RefCell<Registry>>,
}

impl InputHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it receives events until the subscription drops
    pub fn subscribe<L: InputListener + 'static>(
        &self,
        listener: Rc<RefCell<L>>,
        priority: i32,
    ) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push(Registration {
            id,
            priority,
            listener,
        });
        registry.entries.sort_by_key(|r| std::cmp::Reverse(r.priority));

        Subscription {
            registrations: vec![(Rc::downgrade(&self.registry), id)],
        }
    }

    /// Number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        self.registry.borrow().entries.len()
    }

    /// Deliver an event to the registered listeners
    ///
    /// Returns [`Propagation::Stop`] if a pointer-down was claimed.
    pub fn dispatch(&self, event: &InputEvent) -> Propagation {
        // Snapshot so handlers may subscribe/unsubscribe without a live borrow
        let snapshot: Vec<(u64, SharedListener)> = self
            .registry
            .borrow()
            .entries
            .iter()
            .map(|r| (r.id, Rc::clone(&r.listener)))
            .collect();

        for (id, listener) in snapshot {
            if !self.registry.borrow().contains(id) {
                continue;
            }
            let mut listener = listener.borrow_mut();
            match event {
                InputEvent::KeyDown(key) => listener.key_down(*key),
                InputEvent::KeyUp(key) => listener.key_up(*key),
                InputEvent::PointerDown(e) => {
                    if listener.pointer_down(e) == Propagation::Stop {
                        return Propagation::Stop;
                    }
                }
                InputEvent::PointerMove(e) => listener.pointer_move(e),
                InputEvent::PointerUp(e) => listener.pointer_up(e),
                InputEvent::Scroll(lines) => listener.scroll(*lines),
            }
        }
        Propagation::Continue
    }
}

/// Registration handle; dropping it unregisters every listener it covers
#[must_use = "dropping a Subscription immediately unregisters its listeners"]
pub struct Subscription {
    /// Each id paired with the hub that issued it; ids are only unique per hub
    registrations: Vec<(Weak<RefCell<Registry>>, u64)>,
}

impl Subscription {
    /// Merge two subscriptions so a single drop releases both, even when
    /// they were issued by different hubs
    pub fn join(mut self, mut other: Subscription) -> Subscription {
        self.registrations.append(&mut other.registrations);
        self
    }

    /// Whether any covered listener is still registered
    pub fn is_active(&self) -> bool {
        self.registrations.iter().any(|(registry, id)| {
            registry
                .upgrade()
                .is_some_and(|r| r.borrow().contains(*id))
        })
    }

    /// Unregister now (same as dropping)
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        for (registry, id) in self.registrations.drain(..) {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().entries.retain(|r| r.id != id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: usize,
        claim: bool,
    }

    impl InputListener for Recorder {
        fn key_down(&mut self, _key: KeyCode) {
            self.calls += 1;
        }
        fn pointer_down(&mut self, _event: &PointerEvent) -> Propagation {
            self.calls += 1;
            if self.claim {
                Propagation::Stop
            } else {
                Propagation::Continue
            }
        }
        fn pointer_move(&mut self, _event: &PointerEvent) {
            self.calls += 1;
        }
    }

    #[test]
    fn test_subscription_drop_unregisters() {
        let hub = InputHub::new();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let sub = hub.subscribe(recorder.clone(), 0);
        assert_eq!(hub.listener_count(), 1);
        assert!(sub.is_active());

        hub.dispatch(&InputEvent::KeyDown(KeyCode::ArrowUp));
        drop(sub);
        hub.dispatch(&InputEvent::KeyDown(KeyCode::ArrowUp));

        assert_eq!(hub.listener_count(), 0);
        assert_eq!(recorder.borrow().calls, 1);
    }

    #[test]
    fn test_joined_subscription_releases_all() {
        let hub = InputHub::new();
        let a = Rc::new(RefCell::new(Recorder::default()));
        let b = Rc::new(RefCell::new(Recorder::default()));
        let sub = hub.subscribe(a.clone(), 0).join(hub.subscribe(b.clone(), 1));
        assert_eq!(hub.listener_count(), 2);

        sub.cancel();
        hub.dispatch(&InputEvent::PointerMove(PointerEvent::at(1.0, 1.0)));

        assert_eq!(hub.listener_count(), 0);
        assert_eq!(a.borrow().calls, 0);
        assert_eq!(b.borrow().calls, 0);
    }

    #[test]
    fn test_pointer_down_stops_at_claiming_listener() {
        let hub = InputHub::new();
        let low = Rc::new(RefCell::new(Recorder::default()));
        let high = Rc::new(RefCell::new(Recorder { calls: 0, claim: true }));
        let _low_sub = hub.subscribe(low.clone(), 0);
        let _high_sub = hub.subscribe(high.clone(), 10);

        let result = hub.dispatch(&InputEvent::PointerDown(PointerEvent::at(0.0, 0.0)));

        assert_eq!(result, Propagation::Stop);
        assert_eq!(high.borrow().calls, 1);
        assert_eq!(low.borrow().calls, 0);
    }

    #[test]
    fn test_moves_reach_every_listener() {
        let hub = InputHub::new();
        let low = Rc::new(RefCell::new(Recorder::default()));
        let high = Rc::new(RefCell::new(Recorder { calls: 0, claim: true }));
        let _subs = hub.subscribe(low.clone(), 0).join(hub.subscribe(high.clone(), 10));

        hub.dispatch(&InputEvent::PointerMove(PointerEvent::at(3.0, 4.0)));

        assert_eq!(low.borrow().calls, 1);
        assert_eq!(high.borrow().calls, 1);
    }

    #[test]
    fn test_subscription_outliving_hub_is_inert() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let sub = {
            let hub = InputHub::new();
            hub.subscribe(recorder, 0)
        };
        assert!(!sub.is_active());
        drop(sub);
    }

    #[test]
    fn test_join_across_hubs_releases_both() {
        let hub_a = InputHub::new();
        let hub_b = InputHub::new();
        let a = Rc::new(RefCell::new(Recorder::default()));
        let b = Rc::new(RefCell::new(Recorder::default()));
        let b_neighbour = Rc::new(RefCell::new(Recorder::default()));
        let a_neighbour = Rc::new(RefCell::new(Recorder::default()));

        // Ids count per hub: `b` and `a_neighbour` both get id 1
        let _b_first = hub_b.subscribe(b_neighbour.clone(), 5);
        let sub = hub_a.subscribe(a.clone(), 10).join(hub_b.subscribe(b.clone(), 0));
        let _a_second = hub_a.subscribe(a_neighbour.clone(), 0);

        drop(sub);
        hub_a.dispatch(&InputEvent::KeyDown(KeyCode::ArrowUp));
        hub_b.dispatch(&InputEvent::KeyDown(KeyCode::ArrowUp));

        assert_eq!(hub_a.listener_count(), 1);
        assert_eq!(hub_b.listener_count(), 1);
        assert_eq!(a.borrow().calls, 0);
        assert_eq!(b.borrow().calls, 0);
        assert_eq!(a_neighbour.borrow().calls, 1);
        assert_eq!(b_neighbour.borrow().calls, 1);
    }

    #[test]
    fn test_joined_subscription_active_while_any_hub_holds_it() {
        let hub_a = InputHub::new();
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let sub = {
            let hub_b = InputHub::new();
            hub_b.subscribe(recorder.clone(), 0).join(hub_a.subscribe(recorder.clone(), 0))
        };
        assert!(sub.is_active());
        drop(sub);
        assert_eq!(hub_a.listener_count(), 0);
    }
}
