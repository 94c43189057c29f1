//! # Domain Types
//!
//! Core domain types shared by the cart engine, the pricing calculator
//! and the checkout orchestration layer.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │  SaleRequest    │   │ PaymentRecord   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id / barcode   │   │  items + taxes  │   │  method         │       │
//! │  │  unit_price     │   │  discount       │   │  amount         │       │
//! │  │  tax_rates?     │   │  payment block  │   │  installments   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  SaleStatus: draft → confirmed → invoiced, cancelled from the first    │
//! │  two. The order store owns persisted sales; these types only carry     │
//! │  the wire shapes the checkout surfaces exchange with it.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::{Money, Rate};

// =============================================================================
// Tax Rates
// =============================================================================

/// Per-line tax rates, frozen onto the cart line at add time.
///
/// The defaults (ICMS 18%, PIS 1.65%, COFINS 7.6%) are demonstration
/// values only and are NOT correct fiscal logic for any real
/// jurisdiction. A catalog item that carries its own rates always wins;
/// the defaults exist so the complete-sale surface has figures to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRates {
    pub icms: Rate,
    pub pis: Rate,
    pub cofins: Rate,
}

impl Default for TaxRates {
    fn default() -> Self {
        TaxRates {
            icms: Rate::from_bps(1800),
            pis: Rate::from_bps(165),
            cofins: Rate::from_bps(760),
        }
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A sellable item as resolved by the external catalog lookup.
///
/// The checkout engine never edits catalog data; it copies the fields it
/// needs onto a cart line (price freezing) and keeps the rest for display.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    /// Unique identifier (UUID in the catalog service).
    pub id: String,

    /// Display name shown on the cart and the receipt.
    pub name: String,

    /// Barcode (EAN-13 etc.) when the item was resolved by scan.
    pub barcode: Option<String>,

    /// Unit price at lookup time.
    pub unit_price: Money,

    /// Current stock level. Informational in the base flow: absence of
    /// stock never blocks an add.
    pub available_stock: Option<i64>,

    /// Optional category label.
    pub category: Option<String>,

    /// Item-specific tax rates; `None` falls back to `TaxRates::default()`.
    pub tax_rates: Option<TaxRates>,
}

// =============================================================================
// Customer
// =============================================================================

/// A registered customer from the external directory.
///
/// Owned by reference: the cart points at a directory record and never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    pub id: String,
    pub name: String,
    /// CPF/CNPJ as the directory stores it; format validation is the
    /// directory's concern, not this engine's.
    pub document: String,
    pub phone: Option<String>,
    pub email: Option<String>,
}

// =============================================================================
// Sale Status
// =============================================================================

/// The lifecycle status of a sale held by the order store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Created but not confirmed; still editable.
    Draft,
    /// Paid and persisted by the order store.
    Confirmed,
    /// Fiscal document issued. Terminal.
    Invoiced,
    /// Cancelled from draft or confirmed. Terminal.
    Cancelled,
}

impl SaleStatus {
    /// Cancellation is allowed before the sale becomes terminal. Whether
    /// stock was already decremented is the order store's concern.
    pub fn can_cancel(&self) -> bool {
        matches!(self, SaleStatus::Draft | SaleStatus::Confirmed)
    }

    /// Only draft sales may be edited.
    pub fn can_edit(&self) -> bool {
        matches!(self, SaleStatus::Draft)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SaleStatus::Invoiced | SaleStatus::Cancelled)
    }

    /// Local precondition for `cancel`; blocks before any network call.
    pub fn ensure_can_cancel(&self, sale_id: &str) -> CoreResult<()> {
        if self.can_cancel() {
            Ok(())
        } else {
            Err(CoreError::InvalidSaleStatus {
                sale_id: sale_id.to_string(),
                status: *self,
                operation: "cancel",
            })
        }
    }

    /// Local precondition for `edit`; blocks before any network call.
    pub fn ensure_can_edit(&self, sale_id: &str) -> CoreResult<()> {
        if self.can_edit() {
            Ok(())
        } else {
            Err(CoreError::InvalidSaleStatus {
                sale_id: sale_id.to_string(),
                status: *self,
                operation: "edit",
            })
        }
    }
}

impl Default for SaleStatus {
    fn default() -> Self {
        SaleStatus::Draft
    }
}

// =============================================================================
// Payment
// =============================================================================

/// Tender type reported by the payment collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Pix,
    DebitCard,
    CreditCard,
}

/// Payment terms recorded on the sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentTerms {
    /// Settled at the counter.
    Cash,
    /// Settled on delivery.
    OnDelivery,
    /// Split across installments.
    Installments,
}

impl Default for PaymentTerms {
    fn default() -> Self {
        PaymentTerms::Cash
    }
}

/// The payment block attached to a sale-creation request, produced by
/// the external payment collaborator after the operator completes the
/// payment step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentRecord {
    pub method: PaymentMethod,
    pub amount: Money,
    pub installments: u32,
    pub authorization_code: Option<String>,
    pub transaction_id: Option<String>,
}

// =============================================================================
// Sale Request (checkout → order store)
// =============================================================================

/// One line of a sale-creation request. Tax amounts are computed figures
/// (not rates) so the order store records exactly what the operator saw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleRequestItem {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub icms_amount: Money,
    pub pis_amount: Money,
    pub cofins_amount: Money,
}

/// The full sale-creation payload packaged at finalize time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleRequest {
    /// `None` for a walk-in sale (consumer-final, no registered customer).
    pub customer_id: Option<String>,
    pub items: Vec<SaleRequestItem>,
    pub discount: crate::pricing::Discount,
    pub shipping: Money,
    pub payment_terms: PaymentTerms,
    pub notes: Option<String>,
    pub payment: PaymentRecord,
}

/// Identifiers assigned by the order store on a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleReceipt {
    pub sale_id: String,
    pub order_number: String,
}

// =============================================================================
// Sale Summary (recent-sales view)
// =============================================================================

/// A sale as listed by the recent-sales view. Read back from the order
/// store; the checkout engine only flips `status` locally after a
/// successful cancel.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleSummary {
    pub id: String,
    pub order_number: String,
    /// `None` renders as walk-in ("Cliente Avulso").
    pub customer_name: Option<String>,
    pub total: Money,
    pub status: SaleStatus,
    pub items_count: usize,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Fiscal Document
// =============================================================================

/// Reference to a fiscal document (NF-e) produced for a confirmed sale.
/// Issuance correctness is the fiscal collaborator's concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FiscalDocument {
    pub sale_id: String,
    /// NF-e access key when the issuer returns one.
    pub access_key: Option<String>,
    /// Printable/exportable document location.
    pub document_url: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tax_rates_are_demo_values() {
        let rates = TaxRates::default();
        assert_eq!(rates.icms.bps(), 1800);
        assert_eq!(rates.pis.bps(), 165);
        assert_eq!(rates.cofins.bps(), 760);
    }

    #[test]
    fn test_status_transitions() {
        assert!(SaleStatus::Draft.can_cancel());
        assert!(SaleStatus::Confirmed.can_cancel());
        assert!(!SaleStatus::Invoiced.can_cancel());
        assert!(!SaleStatus::Cancelled.can_cancel());

        assert!(SaleStatus::Draft.can_edit());
        assert!(!SaleStatus::Confirmed.can_edit());

        assert!(SaleStatus::Invoiced.is_terminal());
        assert!(SaleStatus::Cancelled.is_terminal());
        assert!(!SaleStatus::Draft.is_terminal());
    }

    #[test]
    fn test_ensure_can_edit_reports_status() {
        let err = SaleStatus::Confirmed.ensure_can_edit("s-1").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("s-1"));
        assert!(msg.contains("edit"));
    }

    #[test]
    fn test_status_serde_wire_values() {
        assert_eq!(
            serde_json::to_string(&SaleStatus::Confirmed).unwrap(),
            "\"confirmed\""
        );
        assert_eq!(
            serde_json::from_str::<SaleStatus>("\"invoiced\"").unwrap(),
            SaleStatus::Invoiced
        );
    }
}
