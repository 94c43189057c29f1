//! # View-Switch State Snapshot
//!
//! Preserves an in-progress cart while the operator is on another
//! checkout surface, and brings it back on return.
//!
//! The snapshot is an opaque serializable value held only in session
//! memory; nothing is persisted, so a reload loses in-progress carts by
//! design. Restore replaces the whole cart in one assignment so a
//! partially-restored state can never be observed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartLine};
use crate::pricing::Discount;
use crate::types::Customer;

/// Frozen copy of the state worth carrying across a view switch: the
/// lines, the customer selection and the discount configuration.
/// Shipping, notes and payment terms are surface-local and return to
/// defaults on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub customer: Option<Customer>,
    pub discount: Discount,
    pub walk_in: bool,
}

impl Cart {
    /// Captures the snapshot for a view switch.
    pub fn capture(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.lines.clone(),
            customer: self.customer.clone(),
            discount: self.discount,
            walk_in: self.walk_in,
        }
    }

    /// Replaces this cart with the snapshot's contents atomically.
    /// Never a field-by-field merge: fields outside the snapshot go
    /// back to their defaults.
    pub fn restore(&mut self, snapshot: CartSnapshot) {
        *self = Cart {
            lines: snapshot.lines,
            customer: snapshot.customer,
            discount: snapshot.discount,
            walk_in: snapshot.walk_in,
            ..Cart::default()
        };
    }
}
