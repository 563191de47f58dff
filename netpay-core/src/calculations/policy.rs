//! Per-jurisdiction statutory composition over the progressive walk.
//!
//! Jurisdictions differ in how the shared slab algorithm is wrapped, not in
//! the algorithm itself. The closed set of variants:
//!
//! | Variant | Composition |
//! |---------|-------------|
//! | `FlatRate` | single statutory rate on total compensation, no slabs |
//! | `Progressive` | slab walk over total compensation |
//! | `ExemptionAdjusted` | shields a fraction of earned income above a threshold, then walks the slabs |
//! | `SurchargeAndCess` | slab walk, then a threshold-ladder surcharge on the tax, then a flat cess on tax plus surcharge |
//!
//! Every variant finishes with `net = total_comp - tax`, deliberately
//! unclamped: a negative net under pathological bracket input is an anomaly
//! for the caller to surface, not to hide.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use netpay_core::calculations::TaxPolicy;
//! use netpay_core::models::{BracketSchedule, RawBracketRow};
//!
//! let schedule = BracketSchedule::normalize(&[RawBracketRow {
//!     upper_limit: None,
//!     rate: Some(dec!(0.20)),
//! }]);
//!
//! let policy = TaxPolicy::ExemptionAdjusted {
//!     threshold: dec!(3000000),
//!     exempt_fraction: dec!(0.5),
//! };
//! let result = policy.compute(&schedule, dec!(4000000), dec!(4000000));
//!
//! // 1,000,000 above the threshold, half exempt: 3,500,000 × 20%
//! assert_eq!(result.tax, dec!(700000.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{floor_zero, round_half_up};
use crate::calculations::progressive::{ProgressiveCalculator, Slab};
use crate::models::BracketSchedule;

/// One rung of a surcharge threshold ladder: `rate` applies once total
/// income is strictly greater than `income_over`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeBand {
    pub income_over: Decimal,
    pub rate: Decimal,
}

/// Intermediate figures of a surcharge-and-cess composition, kept for
/// audit display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeDetail {
    pub base_tax: Decimal,
    pub surcharge_rate: Decimal,
    pub surcharge: Decimal,
    pub cess: Decimal,
}

/// Local-layer assessment: total tax, unclamped net, the slab breakdown
/// (empty for flat-rate policies) and surcharge detail when the policy
/// stacks one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalTaxResult {
    pub tax: Decimal,
    pub net: Decimal,
    pub slabs: Vec<Slab>,
    pub surcharge: Option<SurchargeDetail>,
}

/// How a jurisdiction composes the progressive walk into its statutory tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxPolicy {
    /// A single statutory rate on total compensation.
    FlatRate { rate: Decimal },

    /// The slab walk applied directly to total compensation.
    Progressive,

    /// Shields `exempt_fraction` of earned income above `threshold` before
    /// the slab walk. Equity income is never shielded.
    ExemptionAdjusted {
        threshold: Decimal,
        exempt_fraction: Decimal,
    },

    /// Slab walk, then a surcharge from a threshold ladder, then a flat
    /// cess on tax plus surcharge.
    ///
    /// `bands` must be ordered by descending `income_over`; the first band
    /// whose threshold total income strictly exceeds wins. Crossing a
    /// threshold applies the surcharge to the entire base tax (a cliff,
    /// matching the statutory ladder), not marginally.
    SurchargeAndCess {
        bands: Vec<SurchargeBand>,
        cess_rate: Decimal,
    },
}

impl TaxPolicy {
    /// Computes the local-layer tax on `total_comp`.
    ///
    /// `earned` is the cash component of `total_comp`; only the
    /// exemption-adjusted variant distinguishes the two. Final tax and the
    /// surcharge detail lines are rounded half-up to two decimal places;
    /// the slab breakdown stays exact.
    pub fn compute(
        &self,
        schedule: &BracketSchedule,
        total_comp: Decimal,
        earned: Decimal,
    ) -> LocalTaxResult {
        match self {
            Self::FlatRate { rate } => {
                let tax = round_half_up(total_comp * rate);
                LocalTaxResult {
                    tax,
                    net: total_comp - tax,
                    slabs: Vec::new(),
                    surcharge: None,
                }
            }
            Self::Progressive => {
                let breakdown = ProgressiveCalculator::new(schedule).apply(total_comp);
                let tax = round_half_up(breakdown.tax);
                LocalTaxResult {
                    tax,
                    net: total_comp - tax,
                    slabs: breakdown.slabs,
                    surcharge: None,
                }
            }
            Self::ExemptionAdjusted {
                threshold,
                exempt_fraction,
            } => {
                let excess = floor_zero(earned - threshold);
                let exempt = exempt_fraction * excess;
                let taxable_earned = floor_zero(earned - exempt);
                // Equity income is added back untouched by the exemption.
                let taxable_total = taxable_earned + (total_comp - earned);

                let breakdown = ProgressiveCalculator::new(schedule).apply(taxable_total);
                let tax = round_half_up(breakdown.tax);
                LocalTaxResult {
                    tax,
                    net: total_comp - tax,
                    slabs: breakdown.slabs,
                    surcharge: None,
                }
            }
            Self::SurchargeAndCess { bands, cess_rate } => {
                let breakdown = ProgressiveCalculator::new(schedule).apply(total_comp);
                let base_tax = round_half_up(breakdown.tax);

                // Highest threshold first, first strict match wins.
                let surcharge_rate = bands
                    .iter()
                    .find(|band| total_comp > band.income_over)
                    .map(|band| band.rate)
                    .unwrap_or(Decimal::ZERO);
                let surcharge = round_half_up(base_tax * surcharge_rate);
                let cess = round_half_up(*cess_rate * (base_tax + surcharge));

                let tax = base_tax + surcharge + cess;
                LocalTaxResult {
                    tax,
                    net: total_comp - tax,
                    slabs: breakdown.slabs,
                    surcharge: Some(SurchargeDetail {
                        base_tax,
                        surcharge_rate,
                        surcharge,
                        cess,
                    }),
                }
            }
        }
    }
}
