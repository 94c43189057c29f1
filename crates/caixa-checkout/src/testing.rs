//! Test doubles for the collaborator seams. Call counters are atomics
//! so interaction tests can assert how many round-trips really
//! happened (e.g. "no create_sale call for an empty cart").

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use caixa_core::{
    CatalogItem, Customer, FiscalDocument, Money, PaymentMethod, PaymentRecord, SaleReceipt,
    SaleRequest, SaleSummary,
};

use crate::collaborators::{
    CatalogLookup, Collaborators, CustomerDirectory, FiscalDocuments, OrderApi,
    PaymentCollaborator,
};
use crate::error::{FiscalError, LookupError, OrderApiError, PaymentError};

// =============================================================================
// Catalog
// =============================================================================

pub struct MockCatalog {
    items: Vec<CatalogItem>,
    unreachable: bool,
}

impl MockCatalog {
    pub fn with_items(items: Vec<CatalogItem>) -> Self {
        MockCatalog {
            items,
            unreachable: false,
        }
    }

    pub fn unreachable() -> Self {
        MockCatalog {
            items: Vec::new(),
            unreachable: true,
        }
    }
}

#[async_trait]
impl CatalogLookup for MockCatalog {
    async fn search(&self, query: &str) -> Result<Vec<CatalogItem>, LookupError> {
        if self.unreachable {
            return Err(LookupError("catalog service unreachable".to_string()));
        }
        Ok(self
            .items
            .iter()
            .filter(|i| i.name.to_lowercase().contains(&query.to_lowercase()))
            .cloned()
            .collect())
    }

    async fn lookup_by_code(&self, code: &str) -> Result<Option<CatalogItem>, LookupError> {
        if self.unreachable {
            return Err(LookupError("catalog service unreachable".to_string()));
        }
        Ok(self
            .items
            .iter()
            .find(|i| i.barcode.as_deref() == Some(code))
            .cloned())
    }
}

// =============================================================================
// Customer directory
// =============================================================================

pub struct MockDirectory {
    customers: Vec<Customer>,
}

impl MockDirectory {
    pub fn with_customers(customers: Vec<Customer>) -> Self {
        MockDirectory { customers }
    }
}

#[async_trait]
impl CustomerDirectory for MockDirectory {
    async fn list(&self, filter: &str) -> Result<Vec<Customer>, LookupError> {
        Ok(self
            .customers
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&filter.to_lowercase()))
            .cloned()
            .collect())
    }
}

// =============================================================================
// Order API
// =============================================================================

#[derive(Default)]
pub struct MockOrders {
    pub create_calls: AtomicUsize,
    pub cancel_calls: AtomicUsize,
    fail_create: bool,
    fail_cancel: bool,
    recent: Vec<SaleSummary>,
}

impl MockOrders {
    pub fn new() -> Self {
        MockOrders::default()
    }

    pub fn failing_create() -> Self {
        MockOrders {
            fail_create: true,
            ..MockOrders::default()
        }
    }

    pub fn failing_cancel() -> Self {
        MockOrders {
            fail_cancel: true,
            ..MockOrders::default()
        }
    }

    pub fn with_recent(recent: Vec<SaleSummary>) -> Self {
        MockOrders {
            recent,
            ..MockOrders::default()
        }
    }
}

#[async_trait]
impl OrderApi for MockOrders {
    async fn create_sale(&self, request: &SaleRequest) -> Result<SaleReceipt, OrderApiError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create {
            return Err(OrderApiError("order service returned 503".to_string()));
        }
        let _ = request;
        let sale_id = uuid::Uuid::new_v4().to_string();
        let order_number = format!("VR{}", &sale_id[..6].to_uppercase());
        Ok(SaleReceipt {
            sale_id,
            order_number,
        })
    }

    async fn cancel_sale(&self, _sale_id: &str) -> Result<(), OrderApiError> {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_cancel {
            return Err(OrderApiError("order service returned 503".to_string()));
        }
        Ok(())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<SaleSummary>, OrderApiError> {
        Ok(self.recent.iter().take(limit).cloned().collect())
    }
}

// =============================================================================
// Payment
// =============================================================================

#[derive(Default)]
pub struct MockPayments {
    pub calls: AtomicUsize,
    fail: bool,
    /// Yield once mid-collect so a concurrent finalize can observe the
    /// first one still in flight.
    hold: bool,
}

impl MockPayments {
    pub fn new() -> Self {
        MockPayments::default()
    }

    pub fn declining() -> Self {
        MockPayments {
            fail: true,
            ..MockPayments::default()
        }
    }

    pub fn holding() -> Self {
        MockPayments {
            hold: true,
            ..MockPayments::default()
        }
    }
}

#[async_trait]
impl PaymentCollaborator for MockPayments {
    async fn collect(
        &self,
        amount: Money,
        _customer: Option<&Customer>,
    ) -> Result<PaymentRecord, PaymentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.hold {
            tokio::task::yield_now().await;
        }
        if self.fail {
            return Err(PaymentError("card declined".to_string()));
        }
        Ok(PaymentRecord {
            method: PaymentMethod::Cash,
            amount,
            installments: 1,
            authorization_code: Some("PDV000123".to_string()),
            transaction_id: None,
        })
    }
}

// =============================================================================
// Fiscal documents
// =============================================================================

#[derive(Default)]
pub struct MockFiscal {
    pub calls: AtomicUsize,
}

#[async_trait]
impl FiscalDocuments for MockFiscal {
    async fn issue(&self, sale_id: &str) -> Result<FiscalDocument, FiscalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FiscalDocument {
            sale_id: sale_id.to_string(),
            access_key: Some(format!("NFE{}", sale_id)),
            document_url: None,
        })
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Builds a full collaborator set from defaults, letting a test swap in
/// the doubles it wants to observe.
pub struct CollaboratorsBuilder {
    catalog: Arc<dyn CatalogLookup>,
    customers: Arc<dyn CustomerDirectory>,
    orders: Arc<dyn OrderApi>,
    payments: Arc<dyn PaymentCollaborator>,
    fiscal: Arc<dyn FiscalDocuments>,
}

pub fn mock_collaborators() -> CollaboratorsBuilder {
    CollaboratorsBuilder {
        catalog: Arc::new(MockCatalog::with_items(Vec::new())),
        customers: Arc::new(MockDirectory::with_customers(Vec::new())),
        orders: Arc::new(MockOrders::new()),
        payments: Arc::new(MockPayments::new()),
        fiscal: Arc::new(MockFiscal::default()),
    }
}

impl CollaboratorsBuilder {
    pub fn catalog(mut self, catalog: Arc<dyn CatalogLookup>) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn customers(mut self, customers: Arc<dyn CustomerDirectory>) -> Self {
        self.customers = customers;
        self
    }

    pub fn orders(mut self, orders: Arc<dyn OrderApi>) -> Self {
        self.orders = orders;
        self
    }

    pub fn payments(mut self, payments: Arc<dyn PaymentCollaborator>) -> Self {
        self.payments = payments;
        self
    }

    pub fn fiscal(mut self, fiscal: Arc<dyn FiscalDocuments>) -> Self {
        self.fiscal = fiscal;
        self
    }

    pub fn build(self) -> Collaborators {
        Collaborators {
            catalog: self.catalog,
            customers: self.customers,
            orders: self.orders,
            payments: self.payments,
            fiscal: self.fiscal,
        }
    }
}
