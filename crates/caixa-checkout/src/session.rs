//! # Checkout Session
//!
//! Owns the cart state for one operator session and the collaborator
//! handles the lifecycle controller works through.
//!
//! ## Thread Safety
//! The cart is wrapped in `Mutex<Cart>` because the host may touch the
//! session from its event loop and from async callbacks; only one
//! mutation runs at a time and every mutation completes synchronously
//! under the lock, so reads after a mutation always observe fresh
//! derived totals (the calculator is pure).
//!
//! Catalog and customer lookups are async round-trips; they hold no
//! cart lock while in flight, so shortcut dispatch is never blocked by
//! a pending lookup.

use std::sync::atomic::AtomicBool;
use std::sync::Mutex;

use tracing::debug;

use caixa_core::{
    Cart, CartSnapshot, CatalogItem, Customer, Discount, LineKey, Money, PaymentTerms,
    SaleReceipt, TaxProfile, Totals,
};

use crate::collaborators::Collaborators;
use crate::error::{EngineResult, LookupError};

/// One operator session on a checkout surface: the cart, the tax
/// profile the surface computes with, and the external collaborators.
pub struct CheckoutSession {
    pub(crate) cart: Mutex<Cart>,
    pub(crate) profile: TaxProfile,
    pub(crate) collaborators: Collaborators,
    /// At most one in-flight finalize per cart (see lifecycle).
    pub(crate) finalize_in_flight: AtomicBool,
    /// Receipt of the last sale confirmed in this session, kept for the
    /// fiscal-document follow-up.
    pub(crate) confirmed: Mutex<Option<SaleReceipt>>,
}

impl CheckoutSession {
    /// Creates a session with an empty cart. `profile` selects the
    /// surface's computation mode: `Full` for the complete-sale
    /// surface, `Simple` for fast sale.
    pub fn new(profile: TaxProfile, collaborators: Collaborators) -> Self {
        CheckoutSession {
            cart: Mutex::new(Cart::new()),
            profile,
            collaborators,
            finalize_in_flight: AtomicBool::new(false),
            confirmed: Mutex::new(None),
        }
    }

    pub fn tax_profile(&self) -> TaxProfile {
        self.profile
    }

    // -------------------------------------------------------------------------
    // Cart access
    // -------------------------------------------------------------------------

    /// Runs a closure with read access to the cart.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("cart mutex poisoned");
        f(&cart)
    }

    /// Runs a closure with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("cart mutex poisoned");
        f(&mut cart)
    }

    /// Adds an already-resolved catalog item (merge-or-append).
    pub fn add_item(&self, item: &CatalogItem, quantity: i64) {
        debug!(product_id = %item.id, quantity, "add item");
        self.with_cart_mut(|c| c.add_item(item, quantity));
    }

    /// Sets a line quantity; ≤ 0 removes the line.
    pub fn set_quantity(&self, key: &LineKey, quantity: i64) {
        debug!(product_id = %key.product_id, quantity, "set quantity");
        self.with_cart_mut(|c| c.set_quantity(key, quantity));
    }

    /// Removes a line; no-op when absent.
    pub fn remove_line(&self, key: &LineKey) {
        debug!(product_id = %key.product_id, "remove line");
        self.with_cart_mut(|c| c.remove_line(key));
    }

    /// Explicit clear-cart action. Also used internally after a
    /// confirmed sale.
    pub fn clear_cart(&self) {
        debug!("clear cart");
        self.with_cart_mut(Cart::clear);
    }

    pub fn select_customer(&self, customer: Customer) {
        self.with_cart_mut(|c| c.select_customer(customer));
    }

    pub fn mark_walk_in(&self) {
        self.with_cart_mut(Cart::mark_walk_in);
    }

    pub fn set_discount(&self, discount: Discount) {
        self.with_cart_mut(|c| c.set_discount(discount));
    }

    pub fn set_shipping(&self, shipping: Money) {
        self.with_cart_mut(|c| c.set_shipping(shipping));
    }

    pub fn set_notes(&self, notes: Option<String>) {
        self.with_cart_mut(|c| c.set_notes(notes));
    }

    pub fn set_payment_terms(&self, terms: PaymentTerms) {
        self.with_cart_mut(|c| c.set_payment_terms(terms));
    }

    /// Derived totals under this surface's tax profile.
    pub fn totals(&self) -> Totals {
        self.with_cart(|c| c.totals(self.profile))
    }

    // -------------------------------------------------------------------------
    // Catalog / customer lookups
    // -------------------------------------------------------------------------

    /// Scan path: resolves a barcode/SKU and adds one unit. On an
    /// unknown code or an unreachable catalog the cart is left
    /// untouched and the failure is surfaced as a notice.
    pub async fn add_by_code(&self, code: &str) -> EngineResult<CatalogItem> {
        debug!(code, "add by code");
        let item = self
            .collaborators
            .catalog
            .lookup_by_code(code)
            .await?
            .ok_or_else(|| LookupError(format!("no item for code {code}")))?;

        self.add_item(&item, 1);
        Ok(item)
    }

    /// Free-text catalog search for the product picker.
    pub async fn search_catalog(&self, query: &str) -> EngineResult<Vec<CatalogItem>> {
        Ok(self.collaborators.catalog.search(query).await?)
    }

    /// Customer list for the picker dialog.
    pub async fn customers(&self, filter: &str) -> EngineResult<Vec<Customer>> {
        Ok(self.collaborators.customers.list(filter).await?)
    }

    // -------------------------------------------------------------------------
    // View-switch snapshot
    // -------------------------------------------------------------------------

    /// Captures the cart for a view switch.
    pub fn capture(&self) -> CartSnapshot {
        self.with_cart(Cart::capture)
    }

    /// Replaces the cart with a previously captured snapshot in one
    /// atomic assignment.
    pub fn restore(&self, snapshot: CartSnapshot) {
        debug!(lines = snapshot.lines.len(), "restore snapshot");
        self.with_cart_mut(|c| c.restore(snapshot));
    }
}

/// Session-held storage for at most one snapshot per checkout surface.
/// Lives only as long as the surrounding view state; nothing durable,
/// so a reload loses in-progress carts by design.
#[derive(Default)]
pub struct SnapshotSlot {
    slot: Mutex<Option<CartSnapshot>>,
}

impl SnapshotSlot {
    pub fn new() -> Self {
        SnapshotSlot::default()
    }

    /// Stores the snapshot taken when the operator switches away,
    /// replacing any previous one.
    pub fn store(&self, snapshot: CartSnapshot) {
        *self.slot.lock().expect("snapshot mutex poisoned") = Some(snapshot);
    }

    /// Takes the snapshot on switch-back. `None` on first visit: the
    /// surface starts with an empty cart.
    pub fn take(&self) -> Option<CartSnapshot> {
        self.slot.lock().expect("snapshot mutex poisoned").take()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
