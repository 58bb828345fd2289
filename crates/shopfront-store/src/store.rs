//! # Cart Store
//!
//! Owns the [`CartState`] and is the only way to change it.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         CartStore::dispatch                             │
//! │                                                                         │
//! │  CartAction                                                             │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  ┌──────────────────────────────────────────────────────────────┐     │
//! │  │ dispatch gate (held to the end)                              │     │
//! │  │                                                              │     │
//! │  │  ┌──────────────────────────┐                                │     │
//! │  │  │ lock state               │                                │     │
//! │  │  │ state.apply(action)      │  pure transition               │     │
//! │  │  │ clone state if changed   │                                │     │
//! │  │  │ unlock                   │                                │     │
//! │  │  └────────────┬─────────────┘                                │     │
//! │  │               │ changed?                                     │     │
//! │  │       ┌───────┴───────┐                                      │     │
//! │  │       ▼               ▼                                      │     │
//! │  │  watch channel    listeners (state + selector)               │     │
//! │  │                       │                                      │     │
//! │  │                       ▼                                      │     │
//! │  │              events ──► Notification ──► sinks               │     │
//! │  └──────────────────────────────────────────────────────────────┘     │
//! │                                                                         │
//! │  Every callback runs after the state lock is released, and sees the    │
//! │  post-transition cart.                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Thread Safety
//! The state sits behind a `Mutex` so a store can be shared with `Arc`
//! between the UI bridge and background readers. Transitions are short and
//! mostly writes, so a `RwLock` would add nothing.
//!
//! A second lock, the dispatch gate, serializes whole dispatches so that
//! listeners, the watch channel and sinks see changes in the order they were
//! applied. Reads only take the state lock, so listeners may read the store,
//! but a listener or sink that dispatches would wait on its own gate and
//! deadlock.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopfront_core::selectors;
use shopfront_core::validation::validate_product;
use shopfront_core::{CartAction, CartEvent, CartState, Product, ProductId, Transition};
use tokio::sync::watch;
use tracing::{debug, trace};

use crate::config::{NotificationSettings, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::notification::{Notification, NotificationSink};
use crate::subscription::{SelectorListener, StateListener, SubscriptionId, Subscribers};

/// The cart store.
///
/// ## Usage
/// ```rust
/// use shopfront_store::{CartStore, Notification};
/// use shopfront_core::{Money, Product, ProductId};
///
/// let store = CartStore::default().with_sink(|n: &Notification| println!("{}", n.message));
///
/// store.add_to_cart(Product::new(ProductId(1), "Beanie", Money::from_cents(1200)));
/// store.increment_quantity(ProductId(1));
///
/// assert_eq!(store.count(), 1);
/// assert_eq!(store.product(ProductId(1)).unwrap().quantity.get(), 2);
/// ```
pub struct CartStore {
    state: Mutex<CartState>,
    dispatch_gate: Mutex<()>,
    subscribers: Subscribers,
    sinks: Vec<Box<dyn NotificationSink>>,
    watch_tx: watch::Sender<CartState>,
    notifications: NotificationSettings,
}

impl CartStore {
    /// Creates a store with an empty cart.
    pub fn new(config: &StoreConfig) -> Self {
        let (watch_tx, _) = watch::channel(CartState::new());
        CartStore {
            state: Mutex::new(CartState::new()),
            dispatch_gate: Mutex::new(()),
            subscribers: Subscribers::default(),
            sinks: Vec::new(),
            watch_tx,
            notifications: config.notifications.clone(),
        }
    }

    /// Adds a notification sink.
    pub fn with_sink<S>(mut self, sink: S) -> Self
    where
        S: NotificationSink + 'static,
    {
        self.sinks.push(Box::new(sink));
        self
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Applies an action and informs listeners, the watch channel and
    /// notification sinks.
    ///
    /// Must not be called from inside a listener or sink.
    pub fn dispatch(&self, action: CartAction) -> Transition {
        let _gate = self.lock_gate();
        let kind = action.kind();
        let product_id = action.product_id();

        let (transition, next) = {
            let mut state = self.lock_state();
            let transition = state.apply(action);
            let next = transition.changed.then(|| state.clone());
            (transition, next)
        };

        debug!(
            action = kind,
            product_id = ?product_id,
            changed = transition.changed,
            "Dispatched cart action"
        );

        if let Some(state) = next {
            self.watch_tx.send_replace(state.clone());
            self.subscribers.notify(&state);
        }

        self.publish(&transition.events);
        transition
    }

    /// Decodes a JSON action from the front-end, validates any product it
    /// carries, and dispatches it.
    ///
    /// ## Errors
    /// - [`shopfront_core::CoreError::InvalidAction`] if the JSON is not a
    ///   cart action
    /// - [`shopfront_core::CoreError::Validation`] if an added product has
    ///   bad fields
    ///
    /// In both cases the cart is left untouched.
    pub fn dispatch_json(&self, json: &str) -> StoreResult<Transition> {
        let action = CartAction::from_json(json).map_err(|e| {
            debug!(error = %e, "Rejected cart action");
            StoreError::from(e)
        })?;

        if let CartAction::AddToCart { product } = &action {
            validate_product(product)?;
        }

        Ok(self.dispatch(action))
    }

    pub fn add_to_cart(&self, product: Product) -> Transition {
        self.dispatch(CartAction::AddToCart { product })
    }

    pub fn remove_from_cart(&self, id: ProductId) -> Transition {
        self.dispatch(CartAction::RemoveFromCart { id })
    }

    pub fn increment_quantity(&self, id: ProductId) -> Transition {
        self.dispatch(CartAction::IncrementQuantity { id })
    }

    pub fn decrement_quantity(&self, id: ProductId) -> Transition {
        self.dispatch(CartAction::DecrementQuantity { id })
    }

    pub fn clear_cart(&self) -> Transition {
        self.dispatch(CartAction::ClearCart)
    }

    fn publish(&self, events: &[CartEvent]) {
        for event in events {
            let Some(notification) = Notification::for_event(event, &self.notifications) else {
                trace!(?event, "Event raised no notification");
                continue;
            };
            for sink in &self.sinks {
                sink.notify(&notification);
            }
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Executes a function with read access to the cart.
    ///
    /// Do not dispatch from inside `f`; the state lock is held.
    pub fn with_state<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartState) -> R,
    {
        let state = self.lock_state();
        f(&state)
    }

    /// The full ordered product list.
    pub fn products(&self) -> Vec<Product> {
        self.with_state(selectors::select_products)
    }

    /// True iff a product with this id is in the cart.
    pub fn is_in_cart(&self, id: ProductId) -> bool {
        self.with_state(selectors::select_is_in_cart(id))
    }

    /// Number of distinct lines in the cart.
    pub fn count(&self) -> usize {
        self.with_state(selectors::select_count)
    }

    /// A single cart line, if present.
    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.with_state(selectors::select_product(id))
    }

    /// A copy of the whole cart.
    pub fn snapshot(&self) -> CartState {
        self.with_state(CartState::clone)
    }

    /// The whole cart as JSON, in the shape the front-end renders.
    pub fn snapshot_json(&self) -> StoreResult<String> {
        self.with_state(|state| serde_json::to_string(state)).map_err(StoreError::Serialization)
    }

    // =========================================================================
    // Subscriptions
    // =========================================================================

    /// Calls `callback` with the new cart after every change.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&CartState) + Send + Sync + 'static,
    {
        self.subscribers.insert(Arc::new(StateListener::new(callback)))
    }

    /// Calls `callback` with the selector's new value whenever a change
    /// alters it. The current value is recorded but not delivered.
    pub fn subscribe_selector<T, S, F>(&self, selector: S, callback: F) -> SubscriptionId
    where
        T: PartialEq + Clone + Send + 'static,
        S: Fn(&CartState) -> T + Send + Sync + 'static,
        F: Fn(&T) + Send + Sync + 'static,
    {
        // Seed and register under the gate so no dispatch slips in between.
        let _gate = self.lock_gate();
        let listener = self.with_state(|state| SelectorListener::new(selector, callback, state));
        self.subscribers.insert(Arc::new(listener))
    }

    /// Removes a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// A channel that always holds the latest cart.
    pub fn watch(&self) -> watch::Receiver<CartState> {
        self.watch_tx.subscribe()
    }

    fn lock_gate(&self) -> MutexGuard<'_, ()> {
        self.dispatch_gate.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_state(&self) -> MutexGuard<'_, CartState> {
        // Every transition leaves the cart valid, so a poisoned lock is safe
        // to keep using.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        CartStore::new(&StoreConfig::default())
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &*self.lock_state())
            .field("subscribers", &self.subscribers.len())
            .field("sinks", &self.sinks.len())
            .field("notifications", &self.notifications)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
