//! # Subscriptions
//!
//! Change listeners registered on a [`crate::CartStore`].
//!
//! Two kinds of listener exist:
//! - **State listeners** see the whole cart after every change.
//! - **Selector listeners** evaluate a selector after every change and are
//!   only called when the derived value differs from the last one they saw,
//!   so a cart badge bound to `select_count` is not re-rendered by a
//!   quantity bump.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use shopfront_core::CartState;

/// Handle returned by `subscribe*`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Something that reacts to a cart change.
pub(crate) trait Listener: Send + Sync {
    fn on_change(&self, state: &CartState);
}

// =============================================================================
// Listener Kinds
// =============================================================================

pub(crate) struct StateListener<F> {
    callback: F,
}

impl<F> StateListener<F> {
    pub(crate) fn new(callback: F) -> Self {
        StateListener { callback }
    }
}

impl<F> Listener for StateListener<F>
where
    F: Fn(&CartState) + Send + Sync,
{
    fn on_change(&self, state: &CartState) {
        (self.callback)(state)
    }
}

pub(crate) struct SelectorListener<T, S, F> {
    selector: S,
    callback: F,
    last: Mutex<T>,
}

impl<T, S, F> SelectorListener<T, S, F>
where
    S: Fn(&CartState) -> T,
{
    /// Seeds the listener with the selector's value for `initial`, which is
    /// not delivered.
    pub(crate) fn new(selector: S, callback: F, initial: &CartState) -> Self {
        let last = Mutex::new(selector(initial));
        SelectorListener {
            selector,
            callback,
            last,
        }
    }
}

impl<T, S, F> Listener for SelectorListener<T, S, F>
where
    T: PartialEq + Clone + Send,
    S: Fn(&CartState) -> T + Send + Sync,
    F: Fn(&T) + Send + Sync,
{
    fn on_change(&self, state: &CartState) {
        let value = (self.selector)(state);
        {
            let mut last = self.last.lock().unwrap_or_else(PoisonError::into_inner);
            if *last == value {
                return;
            }
            *last = value.clone();
        }
        (self.callback)(&value)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Registered listeners, in registration order.
#[derive(Default)]
pub(crate) struct Subscribers {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(SubscriptionId, Arc<dyn Listener>)>>,
}

impl Subscribers {
    pub(crate) fn insert(&self, listener: Arc<dyn Listener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().push((id, listener));
        id
    }

    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.lock();
        let initial_len = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != initial_len
    }

    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    /// Calls every listener registered at the time of the call.
    ///
    /// The registry lock is released before any callback runs, so listeners
    /// may subscribe or unsubscribe from inside a callback.
    pub(crate) fn notify(&self, state: &CartState) {
        let listeners: Vec<Arc<dyn Listener>> =
            self.lock().iter().map(|(_, l)| Arc::clone(l)).collect();
        for listener in listeners {
            listener.on_change(state);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(SubscriptionId, Arc<dyn Listener>)>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
