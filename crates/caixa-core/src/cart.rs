//! # Cart Engine
//!
//! The in-memory line-item cart behind both checkout surfaces.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Engine Operations                               │
//! │                                                                         │
//! │  Operator Action           Operation              State Change          │
//! │  ───────────────           ─────────              ────────────          │
//! │                                                                         │
//! │  Scan / pick product ────► add_item() ──────────► merge or append       │
//! │                                                                         │
//! │  Change quantity ────────► set_quantity() ──────► set, or remove at ≤0  │
//! │                                                                         │
//! │  Click remove ───────────► remove_line() ───────► line gone (no-op if   │
//! │                                                    already absent)      │
//! │                                                                         │
//! │  Clear / sale confirmed ─► clear() ─────────────► everything to default │
//! │                                                                         │
//! │  Every mutation is synchronous; totals are a pure function of the       │
//! │  cart (pricing module), so any read after a mutation is fresh.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - No two lines share the same product id or the same barcode: an add
//!   that matches either key merges into the existing line.
//! - `quantity` ≥ 1 on every line; a line at zero is deleted, never kept.
//! - `customer` and `walk_in` are mutually exclusive.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::{self, Discount, TaxProfile, Totals};
use crate::types::{CatalogItem, Customer, PaymentTerms, TaxRates};

// =============================================================================
// Cart Line
// =============================================================================

/// One product entry in the in-progress sale.
///
/// ## Price Freezing
/// `unit_price` and `tax_rates` are copied from the catalog item at add
/// time. A later catalog price change never reprices a cart in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Catalog product id (primary match key).
    pub product_id: String,

    /// Barcode (secondary match key, used when the item was scanned).
    pub barcode: Option<String>,

    /// Name at add time (frozen).
    pub name: String,

    /// Unit price at add time (frozen).
    pub unit_price: Money,

    /// Quantity in the cart, always ≥ 1.
    pub quantity: i64,

    /// Stock level at add time. Informational only: the base flow never
    /// blocks on stock.
    pub available_stock: Option<i64>,

    pub category: Option<String>,

    /// Tax rates frozen at add time (item rates, else demonstration
    /// defaults).
    pub tax_rates: TaxRates,
}

impl CartLine {
    /// Builds a line from a resolved catalog item.
    pub fn from_item(item: &CatalogItem, quantity: i64) -> Self {
        CartLine {
            product_id: item.id.clone(),
            barcode: item.barcode.clone(),
            name: item.name.clone(),
            unit_price: item.unit_price,
            quantity,
            available_stock: item.available_stock,
            category: item.category.clone(),
            tax_rates: item.tax_rates.unwrap_or_default(),
        }
    }

    /// Line subtotal before tax (unit price × quantity).
    pub fn line_subtotal(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// Returns the line's key for subsequent mutations.
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            barcode: self.barcode.clone(),
        }
    }

    fn matches(&self, key: &LineKey) -> bool {
        if !key.product_id.is_empty() && self.product_id == key.product_id {
            return true;
        }
        matches!((&self.barcode, &key.barcode), (Some(a), Some(b)) if a == b)
    }
}

/// Dual-key line identity: product id first, barcode as fallback.
///
/// A scanned item may arrive with only a barcode, a picked item with
/// only an id; both must resolve to the same line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineKey {
    pub product_id: String,
    pub barcode: Option<String>,
}

impl LineKey {
    pub fn by_product_id(product_id: impl Into<String>) -> Self {
        LineKey {
            product_id: product_id.into(),
            barcode: None,
        }
    }

    pub fn by_barcode(barcode: impl Into<String>) -> Self {
        LineKey {
            product_id: String::new(),
            barcode: Some(barcode.into()),
        }
    }
}

impl From<&CatalogItem> for LineKey {
    fn from(item: &CatalogItem) -> Self {
        LineKey {
            product_id: item.id.clone(),
            barcode: item.barcode.clone(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The operator-visible checkout state: lines plus customer selection,
/// discount configuration, shipping, notes and payment terms.
///
/// All reads and writes go through this type's operation set; nothing
/// else holds cart state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Lines in display order (insertion order).
    pub lines: Vec<CartLine>,

    /// Selected registered customer. Mutually exclusive with `walk_in`.
    pub customer: Option<Customer>,

    /// Consumer-final sale with no registered customer attached.
    pub walk_in: bool,

    pub discount: Discount,

    pub shipping: Money,

    pub notes: Option<String>,

    pub payment_terms: PaymentTerms,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    // -------------------------------------------------------------------------
    // Line mutations
    // -------------------------------------------------------------------------

    /// Adds a catalog item, merging into an existing line when either
    /// the product id or the barcode already matches.
    ///
    /// Out-of-stock items are added normally; stock is informational in
    /// the base flow. Non-positive quantities are normalized to 1 (an
    /// add is always an add).
    pub fn add_item(&mut self, item: &CatalogItem, quantity: i64) {
        let quantity = quantity.max(1);
        let key = LineKey::from(item);

        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(&key)) {
            line.quantity += quantity;
            return;
        }

        self.lines.push(CartLine::from_item(item, quantity));
    }

    /// Sets a line's quantity. A quantity ≤ 0 removes the line. Absent
    /// keys are a no-op, mirroring `remove_line`.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: i64) {
        if quantity <= 0 {
            self.remove_line(key);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.matches(key)) {
            line.quantity = quantity;
        }
    }

    /// Removes a line unconditionally. Idempotent: removing an absent
    /// key changes nothing and is not an error.
    pub fn remove_line(&mut self, key: &LineKey) {
        self.lines.retain(|l| !l.matches(key));
    }

    /// Empties the lines and resets customer, discount, shipping, notes
    /// and payment terms to defaults. Used for both the explicit
    /// clear-cart action and the post-finalization reset.
    pub fn clear(&mut self) {
        *self = Cart::default();
    }

    // -------------------------------------------------------------------------
    // Customer / configuration
    // -------------------------------------------------------------------------

    /// Attaches a registered customer; clears the walk-in flag.
    pub fn select_customer(&mut self, customer: Customer) {
        self.customer = Some(customer);
        self.walk_in = false;
    }

    /// Marks the sale as walk-in (consumer final); clears any selected
    /// customer.
    pub fn mark_walk_in(&mut self) {
        self.customer = None;
        self.walk_in = true;
    }

    pub fn set_discount(&mut self, discount: Discount) {
        self.discount = discount;
    }

    pub fn set_shipping(&mut self, shipping: Money) {
        self.shipping = shipping;
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    pub fn set_payment_terms(&mut self, terms: PaymentTerms) {
        self.payment_terms = terms;
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn find_line(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(key))
    }

    /// Derived totals for the given checkout profile. Never stored;
    /// recomputed on every call.
    pub fn totals(&self, profile: TaxProfile) -> Totals {
        pricing::compute_totals(self, profile)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn item(id: &str, barcode: Option<&str>, price_cents: i64) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: format!("Produto {}", id),
            barcode: barcode.map(str::to_string),
            unit_price: Money::from_cents(price_cents),
            available_stock: Some(10),
            category: None,
            tax_rates: None,
        }
    }

    fn customer(id: &str) -> Customer {
        Customer {
            id: id.to_string(),
            name: "Maria Silva".to_string(),
            document: "123.456.789-00".to_string(),
            phone: None,
            email: None,
        }
    }

    #[test]
    fn test_add_appends_new_line() {
        let mut cart = Cart::new();
        cart.add_item(&item("p1", None, 1000), 2);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.totals(TaxProfile::Simple).subtotal.cents(), 2000);
    }

    #[test]
    fn test_add_merges_by_product_id() {
        let mut cart = Cart::new();
        cart.add_item(&item("p1", None, 1000), 2);
        cart.add_item(&item("p1", None, 1000), 3);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].quantity, 5);
        assert_eq!(cart.totals(TaxProfile::Simple).subtotal.cents(), 5000);
    }

    #[test]
    fn test_add_merges_by_barcode() {
        let mut cart = Cart::new();
        // First add resolved by search (id only), second by scan: the
        // scan payload carries a different transient id but the same
        // barcode, and must merge.
        cart.add_item(&item("p1", Some("789100001"), 500), 1);
        cart.add_item(&item("", Some("789100001"), 500), 2);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].quantity, 3);
    }

    #[test]
    fn test_merge_sum_property_over_sequences() {
        let mut cart = Cart::new();
        let quantities = [1, 4, 2, 6, 1];
        for q in quantities {
            cart.add_item(&item("p1", Some("789100001"), 250), q);
        }

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.lines[0].quantity, quantities.iter().sum::<i64>());
    }

    #[test]
    fn test_out_of_stock_item_is_added() {
        let mut cart = Cart::new();
        let mut sold_out = item("p1", None, 1000);
        sold_out.available_stock = Some(0);

        cart.add_item(&sold_out, 1);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_nonpositive_add_quantity_normalizes_to_one() {
        let mut cart = Cart::new();
        cart.add_item(&item("p1", None, 1000), 0);
        assert_eq!(cart.lines[0].quantity, 1);
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let key = LineKey::by_product_id("p1");

        let mut via_set = Cart::new();
        via_set.add_item(&item("p1", None, 1000), 2);
        via_set.set_quantity(&key, 0);

        let mut via_remove = Cart::new();
        via_remove.add_item(&item("p1", None, 1000), 2);
        via_remove.remove_line(&key);

        assert_eq!(via_set, via_remove);
        assert!(via_set.is_empty());
    }

    #[test]
    fn test_set_quantity_resolves_by_barcode() {
        let mut cart = Cart::new();
        cart.add_item(&item("p1", Some("789100001"), 1000), 2);

        cart.set_quantity(&LineKey::by_barcode("789100001"), 7);
        assert_eq!(cart.lines[0].quantity, 7);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(&item("p1", None, 1000), 1);
        cart.add_item(&item("p2", None, 2000), 1);

        let key = LineKey::by_product_id("p1");
        cart.remove_line(&key);
        let after_once = cart.clone();
        cart.remove_line(&key);

        assert_eq!(cart, after_once);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = Cart::new();
        cart.add_item(&item("p1", None, 1000), 2);
        cart.select_customer(customer("c1"));
        cart.set_discount(Discount::Percentage(1000));
        cart.set_shipping(Money::from_cents(1500));
        cart.set_notes(Some("entrega na loja".to_string()));

        cart.clear();

        assert_eq!(cart, Cart::default());
        let totals = cart.totals(TaxProfile::Full);
        assert!(totals.subtotal.is_zero());
        assert!(totals.tax.is_zero());
        assert!(totals.discount.is_zero());
        assert!(totals.total.is_zero());
    }

    #[test]
    fn test_customer_and_walk_in_are_mutually_exclusive() {
        let mut cart = Cart::new();

        cart.mark_walk_in();
        assert!(cart.walk_in);
        assert!(cart.customer.is_none());

        cart.select_customer(customer("c1"));
        assert!(!cart.walk_in);
        assert!(cart.customer.is_some());

        cart.mark_walk_in();
        assert!(cart.walk_in);
        assert!(cart.customer.is_none());
    }
}
