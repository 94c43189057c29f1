//! # caixa-core: Pure Business Logic for the Checkout Engine
//!
//! The heart of the point-of-sale checkout: cart mutations, money math
//! and derived totals, all as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Host UI (fast sale / complete sale surfaces)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    caixa-checkout                               │   │
//! │  │   session, sale lifecycle, shortcuts, async collaborators      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ caixa-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │  pricing  │  │   money   │  │ snapshot  │  │   │
//! │  │   │  CartLine │  │  Totals   │  │   Money   │  │  capture  │  │   │
//! │  │   │  LineKey  │  │  Discount │  │   Rate    │  │  restore  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - Cart engine: merge-on-add lines, quantity updates, clear
//! - [`pricing`] - Pure totals calculator with full/simple tax profiles
//! - [`money`] - Integer-cents money and basis-point rates
//! - [`snapshot`] - View-switch capture/restore
//! - [`types`] - Domain types shared with the orchestration crate
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same cart in, same totals out
//! 2. **No I/O**: catalog, orders and payment live behind the
//!    orchestration crate's collaborator traits
//! 3. **Integer Money**: all monetary values are centavos (i64)
//! 4. **Explicit Errors**: typed enums, never strings or panics

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod snapshot;
pub mod types;

// Re-exports so callers can `use caixa_core::Cart` directly.
pub use cart::{Cart, CartLine, LineKey};
pub use error::{CoreError, CoreResult};
pub use money::{Money, Rate};
pub use pricing::{compute_totals, Discount, LineTaxes, TaxProfile, Totals};
pub use snapshot::CartSnapshot;
pub use types::*;
