//! The progressive-slab tax walk.
//!
//! This is the shared helper every jurisdiction variant and the overlay
//! layer build on: given a normalized [`BracketSchedule`] and an amount, it
//! consumes the amount slab by slab in ascending cap order, taxing each
//! slab at its marginal rate and recording a per-slab breakdown for audit
//! display.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use netpay_core::calculations::ProgressiveCalculator;
//! use netpay_core::models::{BracketSchedule, RawBracketRow};
//!
//! let schedule = BracketSchedule::normalize(&[
//!     RawBracketRow { upper_limit: Some(dec!(50000)), rate: Some(dec!(0.10)) },
//!     RawBracketRow { upper_limit: None, rate: Some(dec!(0.20)) },
//! ]);
//!
//! let breakdown = ProgressiveCalculator::new(&schedule).apply(dec!(80000));
//!
//! // 50,000 × 10% + 30,000 × 20%
//! assert_eq!(breakdown.tax, dec!(11000));
//! assert_eq!(breakdown.slabs.len(), 2);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::floor_zero;
use crate::models::{BracketCap, BracketSchedule};

/// One slab that received a nonzero share of the amount.
///
/// `from`/`to` are the slab boundaries, `amount` the income taxed in this
/// slab and `tax` that income times the slab rate. Slabs are emitted in
/// ascending `from` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slab {
    pub from: Decimal,
    pub to: BracketCap,
    pub rate: Decimal,
    pub amount: Decimal,
    pub tax: Decimal,
}

/// Total tax plus the slab-by-slab breakdown it was assembled from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub tax: Decimal,
    pub slabs: Vec<Slab>,
}

/// Applies a normalized schedule to an amount.
#[derive(Debug, Clone)]
pub struct ProgressiveCalculator<'a> {
    schedule: &'a BracketSchedule,
}

impl<'a> ProgressiveCalculator<'a> {
    pub fn new(schedule: &'a BracketSchedule) -> Self {
        Self { schedule }
    }

    /// Walks the schedule in ascending cap order, consuming the amount
    /// cumulatively.
    ///
    /// A non-positive amount yields zero tax and no slabs. A capped slab
    /// takes `min(remaining, cap - prev_cap)` floored at zero, so malformed
    /// descending caps degrade to empty slabs instead of erroring; the
    /// open-ended slab takes everything that is left. The walk stops as
    /// soon as the amount is consumed.
    ///
    /// Values are exact: no rounding happens inside the walk.
    pub fn apply(
        &self,
        amount: Decimal,
    ) -> TaxBreakdown {
        if amount <= Decimal::ZERO {
            return TaxBreakdown {
                tax: Decimal::ZERO,
                slabs: Vec::new(),
            };
        }

        let mut prev_cap = Decimal::ZERO;
        let mut remaining = amount;
        let mut tax = Decimal::ZERO;
        let mut slabs = Vec::new();

        for entry in self.schedule.entries() {
            let slab_amount = match entry.cap {
                BracketCap::OpenEnded => remaining,
                BracketCap::Capped(cap) => floor_zero(remaining.min(cap - prev_cap)),
            };
            let slab_tax = slab_amount * entry.rate;

            if slab_amount > Decimal::ZERO {
                slabs.push(Slab {
                    from: prev_cap,
                    to: entry.cap,
                    rate: entry.rate,
                    amount: slab_amount,
                    tax: slab_tax,
                });
            }

            tax += slab_tax;
            remaining -= slab_amount;
            if let BracketCap::Capped(cap) = entry.cap {
                prev_cap = cap;
            }
            if remaining <= Decimal::ZERO {
                break;
            }
        }

        TaxBreakdown { tax, slabs }
    }
}
