//! # Cart State
//!
//! The cart state machine: state, actions, events, and transitions.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  Action                      Found?        State Change      Event      │
//! │  ──────                      ──────        ────────────      ─────      │
//! │                                                                         │
//! │  cart/addToCart ──────────►  no  ───────►  push(product)  ─► Added     │
//! │                              yes ───────►  (none)                       │
//! │                                                                         │
//! │  cart/removeFromCart ─────►  yes ───────►  retain(id != x)              │
//! │                                                                         │
//! │  cart/incrementQuantity ──►  yes ───────►  qty += 1                     │
//! │                                                                         │
//! │  cart/decrementQuantity ──►  yes, qty>1 ►  qty -= 1                     │
//! │                              yes, qty=1 ►  (none, floor)                │
//! │                                                                         │
//! │  cart/clearCart ──────────►  ─────────►    products = []                │
//! │                                                                         │
//! │  Unknown ids never fail: the transition reports `changed: false`.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Products are unique by `id`
//! - Insertion order is preserved
//! - Every quantity is >= 1 (guaranteed by [`Quantity`])
//!
//! ## Side Effects
//! Transitions never show toasts or log. A successful add returns a
//! [`CartEvent::ProductAdded`] in the [`Transition`], and the owning store
//! turns it into a notification.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::types::{Product, ProductId, Quantity};

// =============================================================================
// Actions
// =============================================================================

/// An input to the cart state machine.
///
/// ## Wire Shape
/// Actions use the slice action shape the front-end already dispatches:
/// ```json
/// { "type": "cart/addToCart", "payload": { "product": { "id": 1, ... } } }
/// { "type": "cart/removeFromCart", "payload": { "id": 1 } }
/// { "type": "cart/clearCart" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload")]
#[ts(export)]
pub enum CartAction {
    #[serde(rename = "cart/addToCart")]
    AddToCart { product: Product },

    #[serde(rename = "cart/removeFromCart")]
    RemoveFromCart { id: ProductId },

    #[serde(rename = "cart/incrementQuantity")]
    IncrementQuantity { id: ProductId },

    #[serde(rename = "cart/decrementQuantity")]
    DecrementQuantity { id: ProductId },

    #[serde(rename = "cart/clearCart")]
    ClearCart,
}

impl CartAction {
    /// Decodes an action from its JSON wire shape.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// The action type string, e.g. `"cart/addToCart"`.
    pub fn kind(&self) -> &'static str {
        match self {
            CartAction::AddToCart { .. } => "cart/addToCart",
            CartAction::RemoveFromCart { .. } => "cart/removeFromCart",
            CartAction::IncrementQuantity { .. } => "cart/incrementQuantity",
            CartAction::DecrementQuantity { .. } => "cart/decrementQuantity",
            CartAction::ClearCart => "cart/clearCart",
        }
    }

    /// The product id this action targets, if any.
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            CartAction::AddToCart { product } => Some(product.id),
            CartAction::RemoveFromCart { id }
            | CartAction::IncrementQuantity { id }
            | CartAction::DecrementQuantity { id } => Some(*id),
            CartAction::ClearCart => None,
        }
    }
}

// =============================================================================
// Events & Transition
// =============================================================================

/// Something a transition wants the outside world to know about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum CartEvent {
    /// A product that was not in the cart has been appended.
    ProductAdded { id: ProductId, name: String },
}

/// Outcome of applying one action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// True iff the cart differs from before the action.
    pub changed: bool,

    /// Events emitted by the transition, in order.
    pub events: Vec<CartEvent>,
}

impl Transition {
    /// A transition that left the cart untouched.
    #[inline]
    pub fn unchanged() -> Self {
        Transition::default()
    }

    /// A transition that changed the cart without emitting events.
    #[inline]
    pub fn applied() -> Self {
        Transition {
            changed: true,
            events: Vec::new(),
        }
    }

    fn with_event(mut self, event: CartEvent) -> Self {
        self.events.push(event);
        self
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// The cart: an ordered list of unique products.
///
/// Fields are private so the uniqueness invariant can only be touched
/// through the transitions below. For the same reason the state can be
/// serialized for the front-end but not deserialized; rebuild one from
/// products with `collect()`, which drops duplicate ids.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct CartState {
    products: Vec<Product>,
}

impl CartState {
    /// Creates an empty cart.
    pub fn new() -> Self {
        CartState::default()
    }

    /// Applies an action in place.
    pub fn apply(&mut self, action: CartAction) -> Transition {
        match action {
            CartAction::AddToCart { product } => self.add_to_cart(product),
            CartAction::RemoveFromCart { id } => self.remove_from_cart(id),
            CartAction::IncrementQuantity { id } => self.increment_quantity(id),
            CartAction::DecrementQuantity { id } => self.decrement_quantity(id),
            CartAction::ClearCart => self.clear_cart(),
        }
    }

    /// Appends the product unless one with the same id is already present.
    ///
    /// A duplicate add is a silent no-op: the existing line, including its
    /// quantity, is kept as is.
    pub fn add_to_cart(&mut self, product: Product) -> Transition {
        if self.contains(product.id) {
            return Transition::unchanged();
        }

        let event = CartEvent::ProductAdded {
            id: product.id,
            name: product.name.clone(),
        };
        self.products.push(product);
        Transition::applied().with_event(event)
    }

    /// Removes the product with the given id, if present.
    pub fn remove_from_cart(&mut self, id: ProductId) -> Transition {
        let initial_len = self.products.len();
        self.products.retain(|p| p.id != id);

        if self.products.len() == initial_len {
            Transition::unchanged()
        } else {
            Transition::applied()
        }
    }

    /// Adds one unit to the product with the given id, if present.
    pub fn increment_quantity(&mut self, id: ProductId) -> Transition {
        self.update_quantity(id, Quantity::incremented)
    }

    /// Takes one unit off the product with the given id.
    ///
    /// Stops at 1: a line at quantity 1 is left alone.
    pub fn decrement_quantity(&mut self, id: ProductId) -> Transition {
        self.update_quantity(id, Quantity::decremented)
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) -> Transition {
        if self.products.is_empty() {
            return Transition::unchanged();
        }
        self.products.clear();
        Transition::applied()
    }

    fn update_quantity<F>(&mut self, id: ProductId, step: F) -> Transition
    where
        F: FnOnce(Quantity) -> Option<Quantity>,
    {
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            return Transition::unchanged();
        };

        match step(product.quantity) {
            Some(quantity) => {
                product.quantity = quantity;
                Transition::applied()
            }
            None => Transition::unchanged(),
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// The products in insertion order.
    #[inline]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a single line by id.
    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// True iff a product with this id is in the cart.
    pub fn contains(&self, id: ProductId) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    /// Number of distinct lines (not the sum of quantities).
    #[inline]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for CartState {
    /// Builds a cart by adding each product in turn; later duplicates are
    /// dropped just like a duplicate `addToCart`.
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut cart = CartState::new();
        for product in iter {
            cart.add_to_cart(product);
        }
        cart
    }
}

/// Pure form of [`CartState::apply`]: returns the next state and leaves
/// `state` untouched.
pub fn reduce(state: &CartState, action: CartAction) -> (CartState, Transition) {
    let mut next = state.clone();
    let transition = next.apply(action);
    (next, transition)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn test_product(id: i64) -> Product {
        Product::new(
            ProductId(id),
            format!("Product {}", id),
            Money::from_cents(999),
        )
        .with_original_price(Money::from_cents(1299))
        .with_image(format!("/img/{}.png", id))
        .with_rating(4.0)
    }

    fn quantity_of(cart: &CartState, id: i64) -> u32 {
        cart.get(ProductId(id)).map(|p| p.quantity.get()).unwrap_or(0)
    }

    #[test]
    fn test_add_appends_and_emits_event() {
        let mut cart = CartState::new();

        let transition = cart.add_to_cart(test_product(1));

        assert!(transition.changed);
        assert_eq!(
            transition.events,
            vec![CartEvent::ProductAdded {
                id: ProductId(1),
                name: "Product 1".to_string()
            }]
        );
        assert_eq!(cart.len(), 1);
        assert!(cart.contains(ProductId(1)));
    }

    #[test]
    fn test_duplicate_add_is_silent_noop() {
        let mut cart = CartState::new();
        cart.add_to_cart(test_product(1));
        cart.increment_quantity(ProductId(1));

        let mut renamed = test_product(1);
        renamed.name = "Other name".to_string();
        let transition = cart.add_to_cart(renamed);

        assert_eq!(transition, Transition::unchanged());
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.products()[0].name, "Product 1");
        assert_eq!(quantity_of(&cart, 1), 2);
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let cart: CartState = [3, 1, 2].into_iter().map(test_product).collect();

        let ids: Vec<i64> = cart.products().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_remove() {
        let mut cart: CartState = [1, 2, 3].into_iter().map(test_product).collect();

        assert!(cart.remove_from_cart(ProductId(2)).changed);
        assert!(!cart.contains(ProductId(2)));
        assert_eq!(cart.len(), 2);

        // Removing again is a no-op
        assert!(!cart.remove_from_cart(ProductId(2)).changed);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_increment_and_decrement() {
        let mut cart: CartState = [1].into_iter().map(test_product).collect();

        for _ in 0..4 {
            assert!(cart.increment_quantity(ProductId(1)).changed);
        }
        assert_eq!(quantity_of(&cart, 1), 5);

        assert!(cart.decrement_quantity(ProductId(1)).changed);
        assert_eq!(quantity_of(&cart, 1), 4);
    }

    #[test]
    fn test_decrement_stops_at_one() {
        let mut cart: CartState = [1].into_iter().map(test_product).collect();

        let transition = cart.decrement_quantity(ProductId(1));

        assert!(!transition.changed);
        assert_eq!(quantity_of(&cart, 1), 1);
    }

    #[test]
    fn test_quantity_ops_on_missing_id_are_noops() {
        let mut cart: CartState = [1].into_iter().map(test_product).collect();
        let before = cart.clone();

        assert!(!cart.increment_quantity(ProductId(99)).changed);
        assert!(!cart.decrement_quantity(ProductId(99)).changed);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_clear() {
        let mut cart: CartState = [1, 2].into_iter().map(test_product).collect();

        assert!(cart.clear_cart().changed);
        assert!(cart.is_empty());
        assert!(!cart.clear_cart().changed);
    }

    #[test]
    fn test_reduce_leaves_input_untouched() {
        let state = CartState::new();

        let (next, transition) = reduce(
            &state,
            CartAction::AddToCart {
                product: test_product(1),
            },
        );

        assert!(transition.changed);
        assert!(state.is_empty());
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn test_cart_scenario() {
        let mut cart = CartState::new();

        cart.apply(CartAction::AddToCart {
            product: test_product(1),
        });
        assert_eq!(cart.len(), 1);
        assert!(cart.contains(ProductId(1)));

        cart.apply(CartAction::AddToCart {
            product: test_product(1),
        });
        assert_eq!(cart.len(), 1);

        cart.apply(CartAction::IncrementQuantity { id: ProductId(1) });
        assert_eq!(quantity_of(&cart, 1), 2);

        cart.apply(CartAction::DecrementQuantity { id: ProductId(1) });
        assert_eq!(quantity_of(&cart, 1), 1);

        cart.apply(CartAction::DecrementQuantity { id: ProductId(1) });
        assert_eq!(quantity_of(&cart, 1), 1);

        cart.apply(CartAction::RemoveFromCart { id: ProductId(1) });
        assert_eq!(cart.len(), 0);
    }

    #[test]
    fn test_action_json_shapes() {
        let action = CartAction::from_json(r#"{"type":"cart/removeFromCart","payload":{"id":5}}"#)
            .unwrap();
        assert_eq!(action, CartAction::RemoveFromCart { id: ProductId(5) });

        let action = CartAction::from_json(r#"{"type":"cart/clearCart"}"#).unwrap();
        assert_eq!(action, CartAction::ClearCart);

        let json = r#"{"type":"cart/addToCart","payload":{"product":{
            "id":1,"name":"Tee","price":14.99,"originalPrice":20,
            "image":"tee.png","rating":3.5,"quantity":1}}}"#;
        let action = CartAction::from_json(json).unwrap();
        assert_eq!(action.kind(), "cart/addToCart");
        match &action {
            CartAction::AddToCart { product } => {
                assert_eq!(product.price, Money::from_cents(1499));
                assert_eq!(product.original_price, Money::from_cents(2000));
            }
            other => panic!("unexpected action {:?}", other),
        }
        assert_eq!(action.product_id(), Some(ProductId(1)));

        let value = serde_json::to_value(CartAction::IncrementQuantity { id: ProductId(2) }).unwrap();
        assert_eq!(value["type"], "cart/incrementQuantity");
        assert_eq!(value["payload"]["id"], 2);
    }

    #[test]
    fn test_action_json_rejects_bad_input() {
        assert!(CartAction::from_json(r#"{"type":"cart/addToWishlist"}"#).is_err());
        assert!(CartAction::from_json(r#"{"type":"cart/removeFromCart"}"#).is_err());

        let zero_quantity = r#"{"type":"cart/addToCart","payload":{"product":{
            "id":1,"name":"Tee","price":15,"originalPrice":20,
            "image":"tee.png","rating":3.5,"quantity":0}}}"#;
        assert!(CartAction::from_json(zero_quantity).is_err());
    }

    #[test]
    fn test_state_serializes_as_product_list() {
        let cart: CartState = [1].into_iter().map(test_product).collect();
        let value = serde_json::to_value(&cart).unwrap();
        assert_eq!(value["products"][0]["id"], 1);
    }

    // =========================================================================
    // Property Tests
    // =========================================================================

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn product_strategy() -> impl Strategy<Value = Product> {
            (0i64..16, 1u32..10, 0i64..100_000).prop_map(|(id, qty, cents)| {
                Product::new(ProductId(id), format!("Product {}", id), Money::from_cents(cents))
                    .with_quantity(Quantity::new(qty).unwrap())
            })
        }

        fn action_strategy() -> impl Strategy<Value = CartAction> {
            let id = (0i64..16).prop_map(ProductId);
            prop_oneof![
                3 => product_strategy().prop_map(|product| CartAction::AddToCart { product }),
                1 => id.clone().prop_map(|id| CartAction::RemoveFromCart { id }),
                2 => id.clone().prop_map(|id| CartAction::IncrementQuantity { id }),
                2 => id.prop_map(|id| CartAction::DecrementQuantity { id }),
                1 => Just(CartAction::ClearCart),
            ]
        }

        fn cart_strategy() -> impl Strategy<Value = CartState> {
            prop::collection::vec(action_strategy(), 0..40).prop_map(|actions| {
                let mut cart = CartState::new();
                for action in actions {
                    cart.apply(action);
                }
                cart
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: ids stay unique and quantities stay >= 1 under any
            /// sequence of actions.
            #[test]
            fn invariants_hold_for_any_action_sequence(cart in cart_strategy()) {
                let mut ids: Vec<ProductId> = cart.products().iter().map(|p| p.id).collect();
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), cart.len());
                prop_assert!(cart.products().iter().all(|p| p.quantity.get() >= 1));
            }

            /// Property: adding a product that is not in the cart makes it a member.
            #[test]
            fn add_makes_product_member(cart in cart_strategy(), product in product_strategy()) {
                let mut cart = cart;
                cart.remove_from_cart(product.id);
                let id = product.id;

                let transition = cart.add_to_cart(product);

                prop_assert!(transition.changed);
                prop_assert_eq!(transition.events.len(), 1);
                prop_assert!(cart.contains(id));
            }

            /// Property: adding twice equals adding once.
            #[test]
            fn add_is_idempotent_on_identity(cart in cart_strategy(), product in product_strategy()) {
                let (once, _) = reduce(&cart, CartAction::AddToCart { product: product.clone() });
                let (twice, second) = reduce(&once, CartAction::AddToCart { product });

                prop_assert_eq!(&once, &twice);
                prop_assert!(!second.changed);
                prop_assert!(second.events.is_empty());
            }

            /// Property: after removing an id it is no longer a member.
            #[test]
            fn remove_evicts_id(cart in cart_strategy(), id in 0i64..20) {
                let mut cart = cart;
                cart.remove_from_cart(ProductId(id));
                prop_assert!(!cart.contains(ProductId(id)));
            }

            /// Property: n increments raise the quantity by exactly n.
            #[test]
            fn increments_add_exactly_n(product in product_strategy(), n in 0u32..50) {
                let id = product.id;
                let start = product.quantity.get();
                let mut cart = CartState::new();
                cart.add_to_cart(product);

                for _ in 0..n {
                    cart.increment_quantity(id);
                }

                prop_assert_eq!(quantity_of(&cart, id.0), start + n);
            }

            /// Property: decrementing never goes below 1.
            #[test]
            fn decrement_respects_floor(product in product_strategy(), n in 0u32..20) {
                let id = product.id;
                let start = product.quantity.get();
                let mut cart = CartState::new();
                cart.add_to_cart(product);

                for _ in 0..n {
                    cart.decrement_quantity(id);
                }

                prop_assert_eq!(quantity_of(&cart, id.0), start.saturating_sub(n).max(1));
            }

            /// Property: clearing always leaves an empty cart.
            #[test]
            fn clear_empties(cart in cart_strategy()) {
                let mut cart = cart;
                cart.clear_cart();
                prop_assert_eq!(cart.len(), 0);
                prop_assert!(cart.products().is_empty());
            }
        }
    }
}
