use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Gross compensation components for the first year of an assignment.
///
/// All amounts are in the work jurisdiction's local currency and expected
/// to be non-negative; `variable_pct` is a fraction of base (0.15 = 15%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationInput {
    /// Annual base pay.
    pub base: Decimal,

    /// Variable pay as a fraction of base.
    pub variable_pct: Decimal,

    /// Year-1 portion of a multi-year cash award.
    pub multi_year_cash: Decimal,

    /// Sign-on bonus, if any.
    pub sign_on: Decimal,

    /// Year-1 RSU vest value. Equity income: counted in total compensation
    /// but never in the earned figure.
    pub rsu_year1: Decimal,
}

/// Derived compensation figures. Pure summation; immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationFigures {
    pub variable_amount: Decimal,
    pub earned: Decimal,
    pub total: Decimal,
}

impl CompensationInput {
    /// Derives the earned and total compensation figures.
    ///
    /// `earned` is cash compensation (base + variable + multi-year cash +
    /// sign-on); `total` adds the year-1 RSU value on top.
    pub fn figures(&self) -> CompensationFigures {
        let variable_amount = self.base * self.variable_pct;
        let earned = self.base + variable_amount + self.multi_year_cash + self.sign_on;
        CompensationFigures {
            variable_amount,
            earned,
            total: earned + self.rsu_year1,
        }
    }
}
