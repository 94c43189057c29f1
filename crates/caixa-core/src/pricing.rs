//! # Pricing & Tax Calculator
//!
//! Pure computation of derived monetary figures. No hidden state: the
//! totals are a function of (cart, profile) and are recomputed on every
//! read, so no mutation can leave stale figures behind.
//!
//! ## Two Checkout Profiles
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Full (complete-sale surface)                                           │
//! │    per line:  icms/pis/cofins = line_subtotal × rate                    │
//! │    total    = subtotal + shipping + tax − discount                      │
//! │                                                                         │
//! │  Simple (fast-sale surface)                                             │
//! │    no tax breakdown, no shipping                                        │
//! │    total    = subtotal − discount                                       │
//! │                                                                         │
//! │  One calculator, one flag. The percentage discount always applies       │
//! │  to the subtotal only, never to tax or shipping.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The grand total is deliberately not clamped at zero; the absolute
//! discount's `min(value, subtotal)` clamp is the only guard.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::{Cart, CartLine};
use crate::money::{Money, Rate};

// =============================================================================
// Discount
// =============================================================================

/// Operator-configured discount: a percentage of the subtotal or an
/// absolute amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Discount {
    /// Percentage of the subtotal, in basis points (1000 = 10%).
    Percentage(u32),
    /// Absolute amount, clamped to the subtotal when applied.
    Amount(Money),
}

impl Discount {
    /// The discount amount against a given subtotal. Never exceeds the
    /// subtotal in either mode.
    pub fn amount_against(&self, subtotal: Money) -> Money {
        match *self {
            Discount::Percentage(bps) => subtotal.apply_rate(Rate::from_bps(bps)).min(subtotal),
            Discount::Amount(value) => value.min(subtotal),
        }
    }

}

impl Default for Discount {
    fn default() -> Self {
        Discount::Percentage(0)
    }
}

// =============================================================================
// Tax Profile
// =============================================================================

/// Which computation profile the active checkout surface uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxProfile {
    /// Complete sale: per-line ICMS/PIS/COFINS plus shipping.
    Full,
    /// Fast sale: subtotal minus discount, nothing else.
    Simple,
}

// =============================================================================
// Derived Figures
// =============================================================================

/// Tax amounts for one cart line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineTaxes {
    pub icms: Money,
    pub pis: Money,
    pub cofins: Money,
}

impl LineTaxes {
    pub fn total(&self) -> Money {
        self.icms + self.pis + self.cofins
    }

    pub const fn zero() -> Self {
        LineTaxes {
            icms: Money::zero(),
            pis: Money::zero(),
            cofins: Money::zero(),
        }
    }
}

/// Aggregate figures derived from a cart. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Totals {
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub shipping: Money,
    pub total: Money,
    /// One entry per cart line, in line order. All-zero under `Simple`.
    pub line_taxes: Vec<LineTaxes>,
}

// =============================================================================
// Calculator
// =============================================================================

/// Tax amounts for a single line under the full profile: each rate is
/// applied to the line subtotal (unit price × quantity).
pub fn line_taxes(line: &CartLine) -> LineTaxes {
    let base = line.line_subtotal();
    LineTaxes {
        icms: base.apply_rate(line.tax_rates.icms),
        pis: base.apply_rate(line.tax_rates.pis),
        cofins: base.apply_rate(line.tax_rates.cofins),
    }
}

/// Computes all derived figures for the cart under the given profile.
pub fn compute_totals(cart: &Cart, profile: TaxProfile) -> Totals {
    let subtotal: Money = cart
        .lines
        .iter()
        .map(CartLine::line_subtotal)
        .fold(Money::zero(), |acc, m| acc + m);

    let per_line: Vec<LineTaxes> = match profile {
        TaxProfile::Full => cart.lines.iter().map(line_taxes).collect(),
        TaxProfile::Simple => cart.lines.iter().map(|_| LineTaxes::zero()).collect(),
    };

    let tax = per_line
        .iter()
        .map(LineTaxes::total)
        .fold(Money::zero(), |acc, m| acc + m);

    let discount = cart.discount.amount_against(subtotal);

    let (shipping, total) = match profile {
        TaxProfile::Full => (
            cart.shipping,
            subtotal + cart.shipping + tax - discount,
        ),
        TaxProfile::Simple => (Money::zero(), subtotal - discount),
    };

    Totals {
        subtotal,
        tax,
        discount,
        shipping,
        total,
        line_taxes: per_line,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
