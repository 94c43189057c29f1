//! # Keyboard Shortcut Dispatcher
//!
//! Maps function keys to checkout actions with modal scoping, so a
//! host can forward raw key events and consume only the ones the
//! dispatcher actually handled.
//!
//! ## Dispatch Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shortcut Dispatch                                 │
//! │                                                                         │
//! │  key event ──► bound? ──no──► Unbound        (host keeps the event)     │
//! │                  │                                                      │
//! │                 yes                                                     │
//! │                  │                                                      │
//! │          modal open and action                                          │
//! │          is not FocusDiscount? ──yes──► Suppressed                      │
//! │                  │                                                      │
//! │                 no                                                      │
//! │                  │                                                      │
//! │          finalize/clear on an                                           │
//! │          empty cart? ──────────yes──► Suppressed                        │
//! │                  │                                                      │
//! │                 no                                                      │
//! │                  ▼                                                      │
//! │          run handler once ──► Handled(action)                           │
//! │                                                                         │
//! │  F1 customer picker · F2 product picker · F3 discount · F4 finalize     │
//! │  Esc clear cart. F3 works even over an open dialog so the operator      │
//! │  can jump to the discount field mid-flow.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

// =============================================================================
// Keys, actions, modals
// =============================================================================

/// The keys the checkout surfaces bind by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum KeyCode {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    Escape,
}

/// What a shortcut does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ShortcutAction {
    OpenCustomerPicker,
    OpenProductPicker,
    FocusDiscount,
    FinalizeSale,
    ClearCart,
}

/// Dialogs that scope shortcut handling while open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ModalId {
    CustomerPicker,
    ProductPicker,
    Payment,
    FiscalDocument,
    ConfirmDialog,
}

/// What the host should do with the key event it forwarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The action ran; the host consumes the event (preventDefault).
    Handled(ShortcutAction),
    /// Bound but suppressed by modal scope or cart state; the host
    /// still consumes the event so the browser shortcut never fires.
    Suppressed,
    /// Not bound here; the host lets the event propagate.
    Unbound,
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Host-provided callbacks, one per action. Boxed so the host can wire
/// anything from channel sends to direct UI calls.
pub struct ShortcutHandlers {
    pub open_customer_picker: Box<dyn FnMut() + Send>,
    pub open_product_picker: Box<dyn FnMut() + Send>,
    pub focus_discount: Box<dyn FnMut() + Send>,
    pub finalize_sale: Box<dyn FnMut() + Send>,
    pub clear_cart: Box<dyn FnMut() + Send>,
}

/// Routes forwarded key events to checkout actions.
pub struct ShortcutDispatcher {
    bindings: HashMap<KeyCode, ShortcutAction>,
    active_modal: Option<ModalId>,
    handlers: ShortcutHandlers,
}

impl ShortcutDispatcher {
    /// Creates a dispatcher with the default bindings.
    pub fn new(handlers: ShortcutHandlers) -> Self {
        let bindings = HashMap::from([
            (KeyCode::F1, ShortcutAction::OpenCustomerPicker),
            (KeyCode::F2, ShortcutAction::OpenProductPicker),
            (KeyCode::F3, ShortcutAction::FocusDiscount),
            (KeyCode::F4, ShortcutAction::FinalizeSale),
            (KeyCode::Escape, ShortcutAction::ClearCart),
        ]);
        ShortcutDispatcher {
            bindings,
            active_modal: None,
            handlers,
        }
    }

    /// Rebinds a key, replacing any previous binding for it.
    pub fn bind(&mut self, key: KeyCode, action: ShortcutAction) {
        self.bindings.insert(key, action);
    }

    /// Removes a binding; the key falls through as `Unbound` afterwards.
    pub fn unbind(&mut self, key: KeyCode) {
        self.bindings.remove(&key);
    }

    pub fn modal_opened(&mut self, modal: ModalId) {
        debug!(?modal, "modal opened");
        self.active_modal = Some(modal);
    }

    pub fn modal_closed(&mut self) {
        debug!("modal closed");
        self.active_modal = None;
    }

    pub fn active_modal(&self) -> Option<ModalId> {
        self.active_modal
    }

    /// Routes one key event. `cart_is_empty` gates the destructive and
    /// submitting actions; the caller reads it from the session at
    /// event time.
    pub fn dispatch(&mut self, key: KeyCode, cart_is_empty: bool) -> DispatchOutcome {
        let Some(action) = self.bindings.get(&key).copied() else {
            return DispatchOutcome::Unbound;
        };

        // Discount focus is the one shortcut that cuts through dialogs.
        if self.active_modal.is_some() && action != ShortcutAction::FocusDiscount {
            debug!(?key, ?action, modal = ?self.active_modal, "shortcut suppressed by modal");
            return DispatchOutcome::Suppressed;
        }

        if cart_is_empty
            && matches!(
                action,
                ShortcutAction::FinalizeSale | ShortcutAction::ClearCart
            )
        {
            debug!(?key, ?action, "shortcut suppressed on empty cart");
            return DispatchOutcome::Suppressed;
        }

        debug!(?key, ?action, "shortcut handled");
        match action {
            ShortcutAction::OpenCustomerPicker => (self.handlers.open_customer_picker)(),
            ShortcutAction::OpenProductPicker => (self.handlers.open_product_picker)(),
            ShortcutAction::FocusDiscount => (self.handlers.focus_discount)(),
            ShortcutAction::FinalizeSale => (self.handlers.finalize_sale)(),
            ShortcutAction::ClearCart => (self.handlers.clear_cart)(),
        }
        DispatchOutcome::Handled(action)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
