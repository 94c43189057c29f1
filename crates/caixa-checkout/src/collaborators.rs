//! # External Collaborator Contracts
//!
//! The checkout engine consumes five external services through narrow
//! async traits. Production hosts wire HTTP clients behind these; tests
//! wire mocks with call counters.
//!
//! Send + Sync bounds let a host share one collaborator set across its
//! UI event loop and background tasks via `Arc<dyn _>`.

use std::sync::Arc;

use async_trait::async_trait;

use caixa_core::{
    CatalogItem, Customer, FiscalDocument, Money, PaymentRecord, SaleReceipt, SaleRequest,
    SaleSummary,
};

use crate::error::{FiscalError, LookupError, OrderApiError, PaymentError};

/// Resolves scanned codes and typed queries to sellable items.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    /// Free-text search over the catalog.
    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, LookupError>;

    /// Exact lookup by barcode/SKU. `Ok(None)` means the code is
    /// unknown, which is not a transport failure.
    async fn lookup_by_code(&self, code: &str) -> Result<Option<CatalogItem>, LookupError>;
}

/// Lists registered customers for attachment to a sale.
#[async_trait]
pub trait CustomerDirectory: Send + Sync {
    async fn list(&self, filter: &str) -> Result<Vec<Customer>, LookupError>;
}

/// The order store that persists sales. Owns every durable side effect,
/// including stock return on cancel.
#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn create_sale(&self, request: &SaleRequest) -> Result<SaleReceipt, OrderApiError>;

    async fn cancel_sale(&self, sale_id: &str) -> Result<(), OrderApiError>;

    async fn list_recent(&self, limit: usize) -> Result<Vec<SaleSummary>, OrderApiError>;
}

/// Runs the operator-facing payment step and reports the tender that
/// was collected. Invoked before `create_sale`; its record is attached
/// to the sale-creation request.
#[async_trait]
pub trait PaymentCollaborator: Send + Sync {
    async fn collect(
        &self,
        amount: Money,
        customer: Option<&Customer>,
    ) -> Result<PaymentRecord, PaymentError>;
}

/// Produces the printable fiscal document (NF-e) for a confirmed sale.
#[async_trait]
pub trait FiscalDocuments: Send + Sync {
    async fn issue(&self, sale_id: &str) -> Result<FiscalDocument, FiscalError>;
}

/// The collaborator set a session is wired with.
#[derive(Clone)]
pub struct Collaborators {
    pub catalog: Arc<dyn CatalogLookup>,
    pub customers: Arc<dyn CustomerDirectory>,
    pub orders: Arc<dyn OrderApi>,
    pub payments: Arc<dyn PaymentCollaborator>,
    pub fiscal: Arc<dyn FiscalDocuments>,
}
