//! # Sale Lifecycle Controller
//!
//! Drives a sale through its states, coordinating the payment and
//! order collaborators.
//!
//! ## Sale Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Sale Lifecycle                                    │
//! │                                                                         │
//! │            finalize()                 fiscal follow-up                  │
//! │   draft ──────────────► confirmed ──────────────► invoiced             │
//! │     │                       │                                           │
//! │     │       cancel()        │       cancel()                            │
//! │     └──────────► cancelled ◄────────┘                                   │
//! │                                                                         │
//! │  finalize():                                                            │
//! │    1. empty cart?            → EmptyCart, nothing leaves the process    │
//! │    2. already in flight?     → FinalizeInFlight (double key-press)      │
//! │    3. payment step           → abort on failure, cart preserved         │
//! │    4. create_sale            → abort on failure, cart preserved         │
//! │    5. success                → cart cleared, receipt remembered         │
//! │                                                                         │
//! │  invoiced and cancelled are terminal. Stock return on cancel is the     │
//! │  order store's side effect, not this controller's.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::atomic::Ordering;

use tracing::{debug, info, warn};

use caixa_core::{
    Cart, CoreError, FiscalDocument, SaleReceipt, SaleRequest, SaleRequestItem, SaleStatus,
    SaleSummary, Totals,
};

use crate::error::{EngineError, EngineResult};
use crate::session::CheckoutSession;

impl CheckoutSession {
    /// Finalizes the cart into a persisted sale: runs the payment step,
    /// packages the sale-creation request and sends it to the order
    /// store. On success the cart is cleared and a new draft implicitly
    /// starts; on any failure the cart is preserved for operator retry.
    ///
    /// At most one finalize is in flight per cart: a second trigger
    /// while the first awaits (double key-press, double click) is
    /// rejected without reaching any collaborator.
    pub async fn finalize(&self) -> EngineResult<SaleReceipt> {
        debug!("finalize sale");

        // Local precondition: an empty cart never reaches the network.
        if self.with_cart(Cart::is_empty) {
            return Err(CoreError::EmptyCart.into());
        }

        if self.finalize_in_flight.swap(true, Ordering::SeqCst) {
            warn!("finalize rejected: another finalize is in flight");
            return Err(EngineError::FinalizeInFlight);
        }

        // The guard must drop on every path, success or failure.
        let result = self.finalize_inner().await;
        self.finalize_in_flight.store(false, Ordering::SeqCst);
        result
    }

    async fn finalize_inner(&self) -> EngineResult<SaleReceipt> {
        let (cart, totals) = self.with_cart(|c| (c.clone(), c.totals(self.profile)));

        // Operator-facing payment step; its record rides on the request.
        let payment = self
            .collaborators
            .payments
            .collect(totals.total, cart.customer.as_ref())
            .await?;

        let request = build_sale_request(&cart, &totals, payment);
        let receipt = self.collaborators.orders.create_sale(&request).await?;

        // Only a confirmed sale clears the cart.
        self.with_cart_mut(Cart::clear);
        *self.confirmed.lock().expect("receipt mutex poisoned") = Some(receipt.clone());

        info!(
            sale_id = %receipt.sale_id,
            order_number = %receipt.order_number,
            total = %totals.total,
            items = request.items.len(),
            "sale confirmed"
        );

        Ok(receipt)
    }

    /// Receipt of the last sale confirmed in this session, if any.
    pub fn last_confirmed(&self) -> Option<SaleReceipt> {
        self.confirmed.lock().expect("receipt mutex poisoned").clone()
    }

    /// Cancels a sale listed in the recent-sales view. Permitted only
    /// while the sale is draft or confirmed; the status check blocks
    /// locally, so no request reaches the order store for a terminal
    /// sale. The order store owns the stock-return side effect.
    pub async fn cancel(&self, sale: &mut SaleSummary) -> EngineResult<()> {
        debug!(sale_id = %sale.id, status = ?sale.status, "cancel sale");

        sale.status.ensure_can_cancel(&sale.id)?;
        self.collaborators.orders.cancel_sale(&sale.id).await?;
        sale.status = SaleStatus::Cancelled;

        info!(sale_id = %sale.id, order_number = %sale.order_number, "sale cancelled");
        Ok(())
    }

    /// Local gate for the edit action: only a draft sale may be edited.
    /// No server round-trip is attempted for any other status.
    pub fn ensure_editable(&self, sale: &SaleSummary) -> EngineResult<()> {
        sale.status.ensure_can_edit(&sale.id)?;
        Ok(())
    }

    /// Recent sales for the status view.
    pub async fn recent_sales(&self, limit: usize) -> EngineResult<Vec<SaleSummary>> {
        Ok(self.collaborators.orders.list_recent(limit).await?)
    }

    /// Issues the fiscal document (NF-e) for the sale confirmed in this
    /// session.
    pub async fn issue_fiscal_document(&self) -> EngineResult<FiscalDocument> {
        let receipt = self
            .last_confirmed()
            .ok_or(EngineError::NoConfirmedSale)?;

        debug!(sale_id = %receipt.sale_id, "issue fiscal document");
        Ok(self.collaborators.fiscal.issue(&receipt.sale_id).await?)
    }
}

/// Packages the cart into the order store's create payload. The totals
/// must come from the same cart value so per-line tax amounts line up
/// with the lines.
fn build_sale_request(cart: &Cart, totals: &Totals, payment: caixa_core::PaymentRecord) -> SaleRequest {
    let items = cart
        .lines
        .iter()
        .zip(&totals.line_taxes)
        .map(|(line, taxes)| SaleRequestItem {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            icms_amount: taxes.icms,
            pis_amount: taxes.pis,
            cofins_amount: taxes.cofins,
        })
        .collect();

    SaleRequest {
        customer_id: cart.customer.as_ref().map(|c| c.id.clone()),
        items,
        discount: cart.discount,
        shipping: totals.shipping,
        payment_terms: cart.payment_terms,
        notes: cart.notes.clone(),
        payment,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
