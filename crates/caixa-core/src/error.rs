//! # Error Types
//!
//! Domain errors raised by the pure core. Both variants are local
//! precondition failures: they block the operation before any
//! collaborator round-trip happens.
//!
//! ## Design Principles
//! 1. `thiserror` derive macros, never manual `Display` impls
//! 2. Context in the message (sale id, attempted operation)
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::types::SaleStatus;

/// Core business rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Finalizing an empty cart. Reported to the operator; no sale
    /// request is built and nothing reaches the order API.
    #[error("cart is empty, nothing to finalize")]
    EmptyCart,

    /// The sale is not in a state that permits the requested operation
    /// (e.g. editing a confirmed sale, cancelling an invoiced one).
    #[error("sale {sale_id} is {status:?}, cannot {operation}")]
    InvalidSaleStatus {
        sale_id: String,
        status: SaleStatus,
        operation: &'static str,
    },
}

/// Convenience alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
