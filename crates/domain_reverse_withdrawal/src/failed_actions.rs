//! Enforcement actions for vendors who miss a due payment
//!
//! The enforcement job itself lives outside this crate. Here we only know
//! which actions exist, which ones the marketplace has configured, which
//! ones are currently applied to a vendor, and how to describe them.

use serde::{Deserialize, Serialize};

use core_kernel::{PortError, VendorId};

use crate::ports::{FailedActionsStore, SettingsProvider};

/// An action taken against a vendor whose balance is overdue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailedAction {
    /// Hide add-to-cart buttons on the vendor's products
    EnableCatalogMode,
    /// Hide the vendor's withdraw menu
    HideWithdrawMenu,
    /// Disable selling for the vendor
    StatusInactive,
}

impl FailedAction {
    pub const ALL: [FailedAction; 3] = [
        FailedAction::EnableCatalogMode,
        FailedAction::HideWithdrawMenu,
        FailedAction::StatusInactive,
    ];

    /// Stable key as stored by the host marketplace
    pub fn key(&self) -> &'static str {
        match self {
            FailedAction::EnableCatalogMode => "enable_catalog_mode",
            FailedAction::HideWithdrawMenu => "hide_withdraw_menu",
            FailedAction::StatusInactive => "status_inactive",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.key() == key)
    }

    /// Warning shown before the action is applied
    pub fn pending_message(&self) -> &'static str {
        match self {
            FailedAction::EnableCatalogMode => {
                "Your products add to cart will be hidden. Hence users will not be able to purchase any of your products."
            }
            FailedAction::HideWithdrawMenu => {
                "Withdraw menu will be hidden. Hence you will not be able to make any withdraw request from your account."
            }
            FailedAction::StatusInactive => {
                "Your account will be disabled for selling. Hence you will no longer be able to sell any products."
            }
        }
    }

    /// Notice shown while the action is in effect
    pub fn applied_message(&self) -> &'static str {
        match self {
            FailedAction::EnableCatalogMode => {
                "Your products add to cart button has been temporarily hidden. Hence users are not able to purchase any of your products currently."
            }
            FailedAction::HideWithdrawMenu => {
                "Withdraw menu has been temporarily hidden. Hence you are not able to make any withdrawal requests from your account."
            }
            FailedAction::StatusInactive => {
                "Your account has been temporarily disabled for selling. Hence you are no longer able to sell any products."
            }
        }
    }
}

/// Renders messages as an HTML ordered list; empty input renders as ""
pub fn render_ordered_list<'a>(messages: impl IntoIterator<Item = &'a str>) -> String {
    let items: String = messages
        .into_iter()
        .map(|message| format!("<li>{}</li>", message))
        .collect();

    if items.is_empty() {
        return String::new();
    }

    format!("<ol>{}</ol>", items)
}

/// Describes what will happen to vendors who do not pay, per the configured actions
pub fn formatted_failed_actions(settings: &dyn SettingsProvider) -> Result<String, PortError> {
    let actions = settings.failed_actions()?;
    Ok(render_ordered_list(actions.iter().map(FailedAction::pending_message)))
}

/// Describes the actions currently applied to `vendor_id`
pub fn formatted_failed_actions_by_vendor(
    store: &dyn FailedActionsStore,
    vendor_id: VendorId,
) -> Result<String, PortError> {
    let actions = store.get(vendor_id)?;
    Ok(render_ordered_list(actions.iter().map(FailedAction::applied_message)))
}
