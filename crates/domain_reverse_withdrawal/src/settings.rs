//! Reverse withdrawal settings
//!
//! `ReverseWithdrawalSettings` is the plain configuration record the
//! marketplace administrator controls. It implements `SettingsProvider`
//! directly, so a loaded settings value can be handed to the calculator
//! as-is.
//!
//! # Sources
//!
//! Settings are layered with the `config` crate:
//! 1. built-in defaults
//! 2. an optional file (`toml`, `json`, `yaml`, ...)
//! 3. `REVERSE_WITHDRAWAL__*` environment variables, e.g.
//!    `REVERSE_WITHDRAWAL__BILLING_TYPE=by_month`
//!
//! Lists (`failed_actions`) can only be set from a file.

use std::path::Path;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{CoreError, DomainPort, PortError, Timezone};

use crate::failed_actions::FailedAction;
use crate::ports::SettingsProvider;

/// Environment prefix for settings overrides
pub const ENV_PREFIX: &str = "REVERSE_WITHDRAWAL";

/// Latest billing day allowed, so every month has it
pub const MAX_BILLING_DAY: u32 = 28;

/// How vendor dues are assessed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingType {
    /// Prior month's closing balance is due each month
    ByMonth,
    /// The running balance is due once it reaches the threshold
    ByAmount,
    /// Any value this version does not understand; never due
    #[serde(other)]
    Unknown,
}

impl BillingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingType::ByMonth => "by_month",
            BillingType::ByAmount => "by_amount",
            BillingType::Unknown => "unknown",
        }
    }
}

/// Marketplace-wide reverse withdrawal configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReverseWithdrawalSettings {
    pub billing_type: BillingType,
    /// Day of the month (1..=28) the monthly bill is issued
    pub billing_day: Option<u32>,
    /// Days the vendor has to pay, counting the anchor day
    pub due_period: Option<u32>,
    /// Balance at which `by_amount` billing makes the balance due
    pub threshold: Decimal,
    /// Actions the enforcement job applies after the due date
    pub failed_actions: Vec<FailedAction>,
    /// Site timezone all billing dates are evaluated in
    pub timezone: Timezone,
}

impl Default for ReverseWithdrawalSettings {
    fn default() -> Self {
        Self {
            billing_type: BillingType::ByAmount,
            billing_day: None,
            due_period: Some(7),
            threshold: dec!(150),
            failed_actions: vec![FailedAction::EnableCatalogMode, FailedAction::HideWithdrawMenu],
            timezone: Timezone::default(),
        }
    }
}

impl ReverseWithdrawalSettings {
    /// Loads settings from defaults, an optional file, and the environment
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Configuration` if a source cannot be read or
    /// the merged values fail validation
    pub fn load(path: Option<&Path>) -> Result<Self, CoreError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings: Self = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()
            .and_then(|cfg| cfg.try_deserialize())
            .map_err(|e| CoreError::configuration(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from the environment only
    pub fn from_env() -> Result<Self, CoreError> {
        Self::load(None)
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(day) = self.billing_day {
            if !(1..=MAX_BILLING_DAY).contains(&day) {
                return Err(CoreError::configuration(format!(
                    "billing_day must be between 1 and {}, got {}",
                    MAX_BILLING_DAY, day
                )));
            }
        }

        if self.due_period == Some(0) {
            return Err(CoreError::configuration("due_period must be at least 1 day"));
        }

        if self.threshold.is_sign_negative() {
            return Err(CoreError::configuration(format!(
                "threshold must not be negative, got {}",
                self.threshold
            )));
        }

        Ok(())
    }

    pub fn with_billing_type(mut self, billing_type: BillingType) -> Self {
        self.billing_type = billing_type;
        self
    }

    pub fn with_billing_day(mut self, billing_day: Option<u32>) -> Self {
        self.billing_day = billing_day;
        self
    }

    pub fn with_due_period(mut self, due_period: Option<u32>) -> Self {
        self.due_period = due_period;
        self
    }

    pub fn with_threshold(mut self, threshold: Decimal) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_failed_actions(mut self, actions: Vec<FailedAction>) -> Self {
        self.failed_actions = actions;
        self
    }

    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }
}

impl DomainPort for ReverseWithdrawalSettings {}

impl SettingsProvider for ReverseWithdrawalSettings {
    fn billing_type(&self) -> Result<BillingType, PortError> {
        Ok(self.billing_type)
    }

    fn billing_day(&self) -> Result<Option<u32>, PortError> {
        Ok(self.billing_day)
    }

    fn due_period(&self) -> Result<Option<u32>, PortError> {
        Ok(self.due_period)
    }

    fn balance_threshold(&self) -> Result<Decimal, PortError> {
        Ok(self.threshold)
    }

    fn failed_actions(&self) -> Result<Vec<FailedAction>, PortError> {
        Ok(self.failed_actions.clone())
    }

    fn timezone(&self) -> Result<Timezone, PortError> {
        Ok(self.timezone)
    }
}
