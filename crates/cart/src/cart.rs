use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use slumber_core::{Aggregate, ProductId, ValueObject};
use slumber_events::Event;

/// One product/quantity pairing. Quantity is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl ValueObject for LineItem {}

/// Coarse cart state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartState {
    Empty,
    NonEmpty,
}

/// Aggregate root: Cart.
///
/// Line items are kept in first-added order with at most one line per product.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cart {
    lines: Vec<LineItem>,
    version: u64,
}

impl Cart {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rebuild a cart from previously saved lines.
    ///
    /// Rejects zero quantities and duplicate products instead of repairing them.
    pub fn restore(lines: Vec<LineItem>) -> Result<Self, CartRejection> {
        for (i, line) in lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(CartRejection::ZeroQuantity(line.product_id));
            }
            if lines[..i].iter().any(|l| l.product_id == line.product_id) {
                return Err(CartRejection::DuplicateLine(line.product_id));
            }
        }
        Ok(Self { lines, version: 0 })
    }

    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&LineItem> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    pub fn quantity_of(&self, product_id: ProductId) -> u32 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line `keep` rejects and return the dropped lines in order.
    ///
    /// Restore-time repair, not a user operation: no event, version unchanged.
    pub fn retain_lines<F>(&mut self, mut keep: F) -> Vec<LineItem>
    where
        F: FnMut(&LineItem) -> bool,
    {
        let (kept, dropped): (Vec<LineItem>, Vec<LineItem>) =
            std::mem::take(&mut self.lines).into_iter().partition(|line| keep(line));
        self.lines = kept;
        dropped
    }

    pub fn state(&self) -> CartState {
        if self.lines.is_empty() {
            CartState::Empty
        } else {
            CartState::NonEmpty
        }
    }
}

/// Why the cart refused a command or a saved state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CartRejection {
    #[error("quantity of product {0} cannot grow any further")]
    QuantityLimit(ProductId),
    #[error("product {0} has a zero quantity")]
    ZeroQuantity(ProductId),
    #[error("product {0} appears on more than one line")]
    DuplicateLine(ProductId),
}

/// Command: AddItem (one more unit of a product the caller already resolved).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem (the whole line, regardless of quantity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearCart. Confirmation happens before this is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearCart {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    ClearCart(ClearCart),
}

/// Event: ItemAdded. `quantity` is the line's quantity after the add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCleared {
    pub lines_removed: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded(ItemAdded),
    ItemRemoved(ItemRemoved),
    CartCleared(CartCleared),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::ItemAdded(_) => "cart.item_added",
            CartEvent::ItemRemoved(_) => "cart.item_removed",
            CartEvent::CartCleared(_) => "cart.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::ItemAdded(e) => e.occurred_at,
            CartEvent::ItemRemoved(e) => e.occurred_at,
            CartEvent::CartCleared(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Rejection = CartRejection;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded(e) => {
                match self.lines.iter_mut().find(|l| l.product_id == e.product_id) {
                    Some(line) => line.quantity = e.quantity,
                    None => self.lines.push(LineItem {
                        product_id: e.product_id,
                        quantity: e.quantity,
                    }),
                }
            }
            CartEvent::ItemRemoved(e) => {
                self.lines.retain(|l| l.product_id != e.product_id);
            }
            CartEvent::CartCleared(_) => {
                self.lines.clear();
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Rejection> {
        match command {
            CartCommand::AddItem(cmd) => self.handle_add(cmd),
            CartCommand::RemoveItem(cmd) => Ok(self.handle_remove(cmd)),
            CartCommand::ClearCart(cmd) => Ok(self.handle_clear(cmd)),
        }
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Cart {
    fn handle_add(&self, cmd: &AddItem) -> Result<Vec<CartEvent>, CartRejection> {
        let quantity = self
            .quantity_of(cmd.product_id)
            .checked_add(1)
            .ok_or(CartRejection::QuantityLimit(cmd.product_id))?;

        Ok(vec![CartEvent::ItemAdded(ItemAdded {
            product_id: cmd.product_id,
            quantity,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Vec<CartEvent> {
        match self.line(cmd.product_id) {
            Some(line) => vec![CartEvent::ItemRemoved(ItemRemoved {
                product_id: cmd.product_id,
                quantity: line.quantity,
                occurred_at: cmd.occurred_at,
            })],
            None => vec![],
        }
    }

    fn handle_clear(&self, cmd: &ClearCart) -> Vec<CartEvent> {
        if self.lines.is_empty() {
            return vec![];
        }
        vec![CartEvent::CartCleared(CartCleared {
            lines_removed: self.lines.len(),
            occurred_at: cmd.occurred_at,
        })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(raw: u32) -> ProductId {
        ProductId::new(raw)
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn add(id: u32) -> CartCommand {
        CartCommand::AddItem(AddItem {
            product_id: pid(id),
            occurred_at: test_time(),
        })
    }

    fn remove(id: u32) -> CartCommand {
        CartCommand::RemoveItem(RemoveItem {
            product_id: pid(id),
            occurred_at: test_time(),
        })
    }

    fn clear() -> CartCommand {
        CartCommand::ClearCart(ClearCart {
            occurred_at: test_time(),
        })
    }

    fn run(cart: &mut Cart, command: CartCommand) -> Vec<CartEvent> {
        let events = cart.handle(&command).unwrap();
        for event in &events {
            cart.apply(event);
        }
        events
    }

    #[test]
    fn first_add_appends_line_with_quantity_one() {
        let mut cart = Cart::empty();
        let events = run(&mut cart, add(1));

        match &events[..] {
            [CartEvent::ItemAdded(e)] => {
                assert_eq!(e.product_id, pid(1));
                assert_eq!(e.quantity, 1);
            }
            _ => panic!("Expected a single ItemAdded event"),
        }
        assert_eq!(cart.lines(), &[LineItem { product_id: pid(1), quantity: 1 }]);
        assert_eq!(cart.state(), CartState::NonEmpty);
    }

    #[test]
    fn repeated_add_increments_existing_line() {
        let mut cart = Cart::empty();
        run(&mut cart, add(1));
        run(&mut cart, add(2));
        run(&mut cart, add(1));

        assert_eq!(
            cart.lines(),
            &[
                LineItem { product_id: pid(1), quantity: 2 },
                LineItem { product_id: pid(2), quantity: 1 },
            ]
        );
    }

    #[test]
    fn remove_drops_whole_line_and_keeps_order() {
        let mut cart = Cart::empty();
        for id in [1, 2, 3] {
            run(&mut cart, add(id));
        }
        run(&mut cart, add(2));

        let events = run(&mut cart, remove(2));
        match &events[..] {
            [CartEvent::ItemRemoved(e)] => assert_eq!(e.quantity, 2),
            _ => panic!("Expected a single ItemRemoved event"),
        }
        let ids: Vec<u32> = cart.lines().iter().map(|l| l.product_id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn removing_last_line_returns_to_empty() {
        let mut cart = Cart::empty();
        run(&mut cart, add(1));
        run(&mut cart, remove(1));
        assert_eq!(cart.state(), CartState::Empty);
    }

    #[test]
    fn remove_of_absent_product_is_a_noop() {
        let mut cart = Cart::empty();
        run(&mut cart, add(1));
        let before = cart.clone();

        assert!(run(&mut cart, remove(9)).is_empty());
        assert_eq!(cart, before);
    }

    #[test]
    fn clear_on_empty_cart_emits_nothing() {
        let cart = Cart::empty();
        assert!(cart.handle(&clear()).unwrap().is_empty());
    }

    #[test]
    fn clear_empties_non_empty_cart() {
        let mut cart = Cart::empty();
        run(&mut cart, add(1));
        run(&mut cart, add(2));

        let events = run(&mut cart, clear());
        match &events[..] {
            [CartEvent::CartCleared(e)] => assert_eq!(e.lines_removed, 2),
            _ => panic!("Expected a single CartCleared event"),
        }
        assert!(cart.is_empty());
    }

    #[test]
    fn add_at_quantity_ceiling_is_rejected() {
        let cart = Cart::restore(vec![LineItem { product_id: pid(1), quantity: u32::MAX }]).unwrap();
        assert_eq!(cart.handle(&add(1)).unwrap_err(), CartRejection::QuantityLimit(pid(1)));
    }

    #[test]
    fn restore_rejects_zero_quantity_and_duplicates() {
        assert_eq!(
            Cart::restore(vec![LineItem { product_id: pid(1), quantity: 0 }]).unwrap_err(),
            CartRejection::ZeroQuantity(pid(1))
        );
        assert_eq!(
            Cart::restore(vec![
                LineItem { product_id: pid(1), quantity: 1 },
                LineItem { product_id: pid(1), quantity: 3 },
            ])
            .unwrap_err(),
            CartRejection::DuplicateLine(pid(1))
        );
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut cart = Cart::empty();
        run(&mut cart, add(1));
        let before = cart.clone();

        let events1 = cart.handle(&add(1)).unwrap();
        let events2 = cart.handle(&add(1)).unwrap();

        assert_eq!(cart, before);
        assert_eq!(events1.len(), events2.len());
    }

    #[test]
    fn retain_lines_returns_dropped_lines_and_keeps_order() {
        let mut cart = Cart::restore(vec![
            LineItem { product_id: pid(1), quantity: 1 },
            LineItem { product_id: pid(2), quantity: 4 },
            LineItem { product_id: pid(3), quantity: 2 },
        ])
        .unwrap();

        let dropped = cart.retain_lines(|line| line.product_id != pid(2));

        assert_eq!(dropped, vec![LineItem { product_id: pid(2), quantity: 4 }]);
        let kept: Vec<ProductId> = cart.lines().iter().map(|l| l.product_id).collect();
        assert_eq!(kept, vec![pid(1), pid(3)]);
        assert_eq!(cart.version(), 0);
    }

    #[test]
    fn version_increments_once_per_applied_event() {
        let mut cart = Cart::empty();
        assert_eq!(cart.version(), 0);
        run(&mut cart, add(1));
        run(&mut cart, add(1));
        run(&mut cart, remove(7));
        assert_eq!(cart.version(), 2);
    }

    #[test]
    fn event_types_are_stable() {
        let at = test_time();
        let added = CartEvent::ItemAdded(ItemAdded { product_id: pid(1), quantity: 1, occurred_at: at });
        let cleared = CartEvent::CartCleared(CartCleared { lines_removed: 1, occurred_at: at });
        assert_eq!(added.event_type(), "cart.item_added");
        assert_eq!(cleared.event_type(), "cart.cleared");
        assert_eq!(cleared.occurred_at(), at);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(u32),
            Remove(u32),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![(1u32..6).prop_map(Op::Add), (1u32..6).prop_map(Op::Remove)]
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: lines stay unique and positive, and match a simple count model.
            #[test]
            fn add_remove_sequences_keep_invariants(ops in prop::collection::vec(op(), 0..60)) {
                let mut cart = Cart::empty();
                let mut model = std::collections::BTreeMap::<u32, u32>::new();

                for op in ops {
                    match op {
                        Op::Add(id) => {
                            run(&mut cart, add(id));
                            *model.entry(id).or_default() += 1;
                        }
                        Op::Remove(id) => {
                            run(&mut cart, remove(id));
                            model.remove(&id);
                        }
                    }
                }

                let mut seen = std::collections::HashSet::new();
                for line in cart.lines() {
                    prop_assert!(line.quantity >= 1);
                    prop_assert!(seen.insert(line.product_id));
                    prop_assert_eq!(Some(&line.quantity), model.get(&line.product_id.get()));
                }
                prop_assert_eq!(cart.lines().len(), model.len());
                prop_assert_eq!(cart.state() == CartState::Empty, model.is_empty());
            }
        }
    }
}
