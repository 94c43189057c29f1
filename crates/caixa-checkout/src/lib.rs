//! # Checkout Orchestration
//!
//! Async orchestration layer over `caixa-core`: owns the session cart,
//! routes keyboard shortcuts, and drives sale finalization through the
//! external collaborators.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         caixa-checkout                                  │
//! │                                                                         │
//! │   key events ──► ShortcutDispatcher ──► host callbacks                  │
//! │                                             │                           │
//! │                                             ▼                           │
//! │   host UI ◄──────────────────────► CheckoutSession                      │
//! │                                     │  Mutex<Cart>  (caixa-core)        │
//! │                                     │  SnapshotSlot                     │
//! │                                     ▼                                   │
//! │                          Collaborators (async traits)                   │
//! │              ┌──────────┬──────────┬──────────┬──────────┐              │
//! │              ▼          ▼          ▼          ▼          ▼              │
//! │           catalog   customers   orders    payments    fiscal           │
//! │                                                                         │
//! │   All business math lives in caixa-core; this crate adds state,         │
//! │   concurrency control and the collaborator seams.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod collaborators;
pub mod error;
pub mod lifecycle;
pub mod session;
pub mod shortcuts;

#[cfg(test)]
pub(crate) mod testing;

pub use collaborators::{
    CatalogLookup, Collaborators, CustomerDirectory, FiscalDocuments, OrderApi,
    PaymentCollaborator,
};
pub use error::{
    EngineError, EngineResult, FiscalError, LookupError, OrderApiError, PaymentError,
};
pub use session::{CheckoutSession, SnapshotSlot};
pub use shortcuts::{
    DispatchOutcome, KeyCode, ModalId, ShortcutAction, ShortcutDispatcher, ShortcutHandlers,
};
