//! Line items, item selections and order numbers.

use catalog::{Product, Size, Topping};
use common::{ItemId, Money};
use serde::{Deserialize, Serialize};

use crate::pricing;

/// Human-facing sequential order number ("Comanda #N").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(u64);

impl OrderNumber {
    /// Creates an order number.
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// Returns the number that follows this one.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl std::fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One configured product within an order.
///
/// `price` is always derived from the other fields; there is no way to set
/// it directly. Deserialized items are repriced on the way in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "StoredItem")]
pub struct OrderItem {
    id: ItemId,
    product: Product,
    size: Size,
    toppings: Vec<Topping>,
    quantity: u32,
    price: Money,
    notes: Option<String>,
}

impl OrderItem {
    /// Creates a priced line item. A zero quantity becomes one.
    pub fn new(
        id: ItemId,
        product: Product,
        size: Size,
        toppings: Vec<Topping>,
        quantity: u32,
        notes: Option<String>,
    ) -> Self {
        let mut item = Self {
            id,
            product,
            size,
            toppings,
            quantity: quantity.max(1),
            price: Money::zero(),
            notes: normalize_notes(notes),
        };
        item.reprice();
        item
    }

    /// Returns the item ID.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Returns the selected product.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Returns the selected size.
    pub fn size(&self) -> &Size {
        &self.size
    }

    /// Returns the toppings in the order they were chosen.
    pub fn toppings(&self) -> &[Topping] {
        &self.toppings
    }

    /// Returns the quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the line price.
    pub fn price(&self) -> Money {
        self.price
    }

    /// Returns the price of one unit.
    pub fn unit_price(&self) -> Money {
        pricing::unit_price(&self.product, &self.size, &self.toppings)
    }

    /// Returns the free-text notes.
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
        self.reprice();
    }

    pub(crate) fn set_toppings(&mut self, toppings: Vec<Topping>) {
        self.toppings = toppings;
        self.reprice();
    }

    pub(crate) fn set_notes(&mut self, notes: Option<String>) {
        self.notes = normalize_notes(notes);
    }

    fn reprice(&mut self) {
        self.price = pricing::line_price(&self.product, &self.size, &self.toppings, self.quantity);
    }
}

#[derive(Deserialize)]
struct StoredItem {
    id: ItemId,
    product: Product,
    size: Size,
    #[serde(default)]
    toppings: Vec<Topping>,
    quantity: u32,
    #[serde(default)]
    notes: Option<String>,
}

impl From<StoredItem> for OrderItem {
    fn from(stored: StoredItem) -> Self {
        OrderItem::new(
            stored.id,
            stored.product,
            stored.size,
            stored.toppings,
            stored.quantity,
            stored.notes,
        )
    }
}

/// Trims notes and turns blank notes into `None`.
pub(crate) fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}

/// What the operator has picked on the order screen.
///
/// Product and size start unset; adding an incomplete selection to an
/// order is a validation error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemSelection {
    pub product: Option<Product>,
    pub size: Option<Size>,
    pub toppings: Vec<Topping>,
    /// Requested quantity, clamped to at least one when added.
    pub quantity: i64,
    pub notes: Option<String>,
}

impl ItemSelection {
    /// Starts a selection for a product with quantity one.
    pub fn new(product: Product) -> Self {
        Self {
            product: Some(product),
            quantity: 1,
            ..Self::default()
        }
    }

    /// Sets the size.
    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Appends a topping.
    pub fn with_topping(mut self, topping: Topping) -> Self {
        self.toppings.push(topping);
        self
    }

    /// Replaces the toppings.
    pub fn with_toppings(mut self, toppings: Vec<Topping>) -> Self {
        self.toppings = toppings;
        self
    }

    /// Sets the requested quantity.
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }
}
