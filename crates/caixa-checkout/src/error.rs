//! # Engine Error Types
//!
//! Failure taxonomy for the orchestration layer.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Error Flow at Finalize                              │
//! │                                                                         │
//! │  finalize()                                                             │
//! │     │                                                                   │
//! │     ├── cart empty? ──────► CoreError::EmptyCart (no network call)      │
//! │     ├── already in flight? ► FinalizeInFlight    (no network call)      │
//! │     ├── payment step ─────► Payment(..)   cart preserved, retry is      │
//! │     │                                     operator-initiated            │
//! │     └── order create ─────► OrderApi(..)  cart preserved, same          │
//! │                                                                         │
//! │  Collaborator failures are converted here, logged, surfaced to the      │
//! │  operator, and never retried automatically. Nothing is fatal.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use caixa_core::CoreError;

/// Failure reported by the catalog or customer directory. Surfaced as a
/// non-blocking notice; the cart is never touched by a failed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct LookupError(pub String);

/// Failure reported by the payment collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PaymentError(pub String);

/// Failure reported by the order API (create or cancel).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct OrderApiError(pub String);

/// Failure reported by the fiscal-document issuer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct FiscalError(pub String);

/// Unified error surfaced by the checkout session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Local precondition failures (empty cart, invalid sale status).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A finalize is already awaiting the order store; at most one
    /// in-flight finalize per cart.
    #[error("a sale finalization is already in progress")]
    FinalizeInFlight,

    /// Fiscal follow-up requested before any sale was confirmed in this
    /// session.
    #[error("no confirmed sale to issue a fiscal document for")]
    NoConfirmedSale,

    #[error("lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("payment failed: {0}")]
    Payment(#[from] PaymentError),

    #[error("order API failure: {0}")]
    OrderApi(#[from] OrderApiError),

    #[error("fiscal document issuance failed: {0}")]
    Fiscal(#[from] FiscalError),
}

/// Convenience alias for Results with EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
