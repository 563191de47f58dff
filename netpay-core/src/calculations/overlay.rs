//! Home-country overlay: a second layer of tax on the same income.
//!
//! For a citizen of the home jurisdiction working abroad, the overlay
//! recomputes tax on the USD-equivalent income using the home schedule,
//! after an earned-income exclusion and a standard deduction, then credits
//! the foreign tax already paid, capped at the home jurisdiction's own
//! tentative tax (a simplified foreign-tax-credit limit, not a
//! per-category one).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use netpay_core::calculations::{OverlayConfig, OverlayWorksheet};
//! use netpay_core::models::{BracketSchedule, RawBracketRow};
//!
//! let home_schedule = BracketSchedule::normalize(&[RawBracketRow {
//!     upper_limit: None,
//!     rate: Some(dec!(0.30)),
//! }]);
//! let config = OverlayConfig {
//!     exclusion: dec!(126500),
//!     standard_deduction: dec!(14600),
//! };
//!
//! let worksheet = OverlayWorksheet::new(&home_schedule, config);
//! let result = worksheet.calculate(dec!(150000), dec!(41100), dec!(20000));
//!
//! // Taxable: 191,100 − 126,500 − 14,600 = 50,000 → tentative 15,000.
//! // The credit is capped at the tentative tax, not the foreign tax paid.
//! assert_eq!(result.tentative_tax, dec!(15000.00));
//! assert_eq!(result.credit_used, dec!(15000.00));
//! assert_eq!(result.tax_due, dec!(0.00));
//! assert_eq!(result.combined_tax, dec!(20000.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{floor_zero, round_half_up};
use crate::calculations::progressive::{ProgressiveCalculator, Slab};
use crate::models::BracketSchedule;

/// Overlay-jurisdiction allowances, in USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Earned-income exclusion.
    pub exclusion: Decimal,

    /// Standard deduction.
    pub standard_deduction: Decimal,
}

/// Result of the overlay computation, all in USD.
///
/// Everything is non-negative except `combined_net`, which may go negative
/// when taxes exceed income and is preserved for the caller to surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayResult {
    /// Income remaining after the exclusion and the standard deduction.
    pub taxable_base: Decimal,

    /// Home-schedule tax on the taxable base, before any credit.
    pub tentative_tax: Decimal,

    /// Foreign-tax credit actually applied: the smaller of the foreign tax
    /// paid and the tentative tax.
    pub credit_used: Decimal,

    /// Home tax still owed after the credit.
    pub tax_due: Decimal,

    /// Foreign tax plus home tax due.
    pub combined_tax: Decimal,

    /// Gross USD income minus the combined tax. Unclamped.
    pub combined_net: Decimal,

    /// Slab breakdown of the tentative tax, for audit display.
    pub slabs: Vec<Slab>,
}

/// Why an overlay computation was skipped instead of run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum OverlaySkipReason {
    /// The caller did not request the overlay.
    #[error("overlay not requested")]
    Disabled,

    /// The work jurisdiction is the overlay home jurisdiction; there is no
    /// second layer to compute.
    #[error("work jurisdiction is the overlay home jurisdiction")]
    HomeCountryAssignment,

    /// USD conversion is impossible; computing through it would be
    /// meaningless, so this blocks rather than coerces.
    #[error("FX rate must be greater than zero for USD calculations")]
    NonPositiveFxRate,
}

/// An overlay computation either ran or was skipped for a stated reason.
///
/// The skip is a structured outcome, not an error: callers render the
/// reason without any exception machinery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OverlayOutcome {
    Computed(OverlayResult),
    Skipped(OverlaySkipReason),
}

impl OverlayOutcome {
    pub fn computed(&self) -> Option<&OverlayResult> {
        match self {
            Self::Computed(result) => Some(result),
            Self::Skipped(_) => None,
        }
    }
}

/// Computes the overlay layer against a home-jurisdiction schedule.
#[derive(Debug, Clone)]
pub struct OverlayWorksheet<'a> {
    schedule: &'a BracketSchedule,
    config: OverlayConfig,
}

impl<'a> OverlayWorksheet<'a> {
    pub fn new(
        schedule: &'a BracketSchedule,
        config: OverlayConfig,
    ) -> Self {
        Self { schedule, config }
    }

    /// Runs the overlay computation on USD-equivalent figures.
    ///
    /// The exclusion and the deduction apply to the combined earned-plus-
    /// equity figure, not to earned income alone. The caller is responsible
    /// for converting at a positive FX rate; gating on the rate lives in
    /// the scenario layer.
    pub fn calculate(
        &self,
        earned_usd: Decimal,
        rsu_usd: Decimal,
        local_tax_usd: Decimal,
    ) -> OverlayResult {
        let gross_usd = earned_usd + rsu_usd;
        let taxable_base =
            floor_zero(gross_usd - self.config.exclusion - self.config.standard_deduction);

        let breakdown = ProgressiveCalculator::new(self.schedule).apply(taxable_base);
        let tentative_tax = round_half_up(breakdown.tax);

        let credit_used = local_tax_usd.min(tentative_tax);
        let tax_due = floor_zero(tentative_tax - credit_used);
        let combined_tax = round_half_up(local_tax_usd + tax_due);
        let combined_net = round_half_up(gross_usd - combined_tax);

        OverlayResult {
            taxable_base,
            tentative_tax,
            credit_used,
            tax_due,
            combined_tax,
            combined_net,
            slabs: breakdown.slabs,
        }
    }
}
