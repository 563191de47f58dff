//! Shipped statutory defaults per jurisdiction.
//!
//! Bracket tables, FX rates and policy parameters a caller starts from
//! before applying any user edits. Tables are expressed as raw rows and
//! run through the same normalization boundary as user input; the
//! defaults get no special trust.
//!
//! All figures are estimates for a single tax year; rates and thresholds
//! here are inputs, not advice.

use netpay_core::{
    BracketSchedule, Jurisdiction, OverlayConfig, RawBracketRow, SurchargeBand, TaxPolicy,
};
use rust_decimal::Decimal;

/// A capped row with the rate given in thousandths (115 → 11.5%).
fn capped(
    upper_limit: i64,
    rate_milli: i64,
) -> RawBracketRow {
    RawBracketRow {
        upper_limit: Some(Decimal::from(upper_limit)),
        rate: Some(Decimal::new(rate_milli, 3)),
    }
}

/// A top-open row with the rate given in thousandths.
fn open(rate_milli: i64) -> RawBracketRow {
    RawBracketRow {
        upper_limit: None,
        rate: Some(Decimal::new(rate_milli, 3)),
    }
}

/// Default bracket rows for a jurisdiction, in local currency.
///
/// Korea returns no rows: its default policy is flat-rate and never reads
/// the schedule (an empty table still normalizes to a valid 0% schedule).
pub fn default_bracket_rows(jurisdiction: Jurisdiction) -> Vec<RawBracketRow> {
    match jurisdiction {
        Jurisdiction::Korea => Vec::new(),
        Jurisdiction::Taiwan => vec![
            capped(590_000, 50),
            capped(1_330_000, 120),
            capped(2_660_000, 200),
            capped(4_980_000, 300),
            open(400),
        ],
        Jurisdiction::Singapore => vec![
            capped(20_000, 0),
            capped(30_000, 20),
            capped(40_000, 35),
            capped(80_000, 70),
            capped(120_000, 115),
            capped(160_000, 150),
            capped(200_000, 180),
            capped(240_000, 190),
            capped(280_000, 195),
            capped(320_000, 200),
            capped(500_000, 220),
            capped(1_000_000, 230),
            open(240),
        ],
        Jurisdiction::Japan => vec![
            capped(1_950_000, 50),
            capped(3_300_000, 100),
            capped(6_950_000, 200),
            capped(9_000_000, 230),
            capped(18_000_000, 330),
            capped(40_000_000, 400),
            open(450),
        ],
        Jurisdiction::India => vec![
            capped(400_000, 0),
            capped(800_000, 50),
            capped(1_200_000, 100),
            capped(1_600_000, 150),
            capped(2_000_000, 200),
            capped(2_400_000, 250),
            open(300),
        ],
        Jurisdiction::UnitedStates => vec![
            capped(11_600, 100),
            capped(47_150, 120),
            capped(100_525, 220),
            capped(191_950, 240),
            capped(243_725, 320),
            capped(609_350, 350),
            open(370),
        ],
    }
}

/// Default schedule for a jurisdiction: the default rows, normalized.
pub fn default_schedule(jurisdiction: Jurisdiction) -> BracketSchedule {
    BracketSchedule::normalize(&default_bracket_rows(jurisdiction))
}

/// Statutory composition rule for a jurisdiction.
pub fn default_policy(jurisdiction: Jurisdiction) -> TaxPolicy {
    match jurisdiction {
        Jurisdiction::Korea => TaxPolicy::FlatRate {
            rate: Decimal::new(21, 2),
        },
        // 50% of earnings above 3M NTD is exempt; equity is not.
        Jurisdiction::Taiwan => TaxPolicy::ExemptionAdjusted {
            threshold: Decimal::from(3_000_000),
            exempt_fraction: Decimal::new(5, 1),
        },
        Jurisdiction::Singapore | Jurisdiction::Japan | Jurisdiction::UnitedStates => {
            TaxPolicy::Progressive
        }
        // New-regime surcharge ladder plus the 4% health-and-education cess.
        Jurisdiction::India => TaxPolicy::SurchargeAndCess {
            bands: vec![
                SurchargeBand {
                    income_over: Decimal::from(20_000_000),
                    rate: Decimal::new(25, 2),
                },
                SurchargeBand {
                    income_over: Decimal::from(10_000_000),
                    rate: Decimal::new(15, 2),
                },
                SurchargeBand {
                    income_over: Decimal::from(5_000_000),
                    rate: Decimal::new(10, 2),
                },
            ],
            cess_rate: Decimal::new(4, 2),
        },
    }
}

/// Default FX rate in local currency units per USD.
pub fn default_fx_rate(jurisdiction: Jurisdiction) -> Decimal {
    match jurisdiction {
        Jurisdiction::Korea => Decimal::from(1350),
        Jurisdiction::Taiwan => Decimal::from(32),
        Jurisdiction::Singapore => Decimal::new(135, 2),
        Jurisdiction::Japan => Decimal::from(155),
        Jurisdiction::India => Decimal::from(84),
        Jurisdiction::UnitedStates => Decimal::ONE,
    }
}

/// Default overlay allowances: earned-income exclusion and standard
/// deduction, in USD.
pub fn default_overlay_config() -> OverlayConfig {
    OverlayConfig {
        exclusion: Decimal::from(126_500),
        standard_deduction: Decimal::from(14_600),
    }
}

#[cfg(test)]
mod tests {
    use netpay_core::BracketCap;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn every_jurisdiction_has_a_normalizable_default_schedule() {
        for jurisdiction in Jurisdiction::ALL {
            let schedule = default_schedule(jurisdiction);
            let last = schedule.entries().last().expect("schedule never empty");

            assert_eq!(last.cap, BracketCap::OpenEnded);
        }
    }

    #[test]
    fn default_tables_have_the_expected_row_counts() {
        assert_eq!(default_bracket_rows(Jurisdiction::Korea).len(), 0);
        assert_eq!(default_bracket_rows(Jurisdiction::Taiwan).len(), 5);
        assert_eq!(default_bracket_rows(Jurisdiction::Singapore).len(), 13);
        assert_eq!(default_bracket_rows(Jurisdiction::Japan).len(), 7);
        assert_eq!(default_bracket_rows(Jurisdiction::India).len(), 7);
        assert_eq!(default_bracket_rows(Jurisdiction::UnitedStates).len(), 7);
    }

    #[test]
    fn singapore_schedule_spot_values() {
        let rows = default_bracket_rows(Jurisdiction::Singapore);

        assert_eq!(rows[0].rate, Some(dec!(0)));
        assert_eq!(rows[4].upper_limit, Some(dec!(120000)));
        assert_eq!(rows[4].rate, Some(dec!(0.115)));
        assert_eq!(rows[12].upper_limit, None);
        assert_eq!(rows[12].rate, Some(dec!(0.24)));
    }

    #[test]
    fn us_schedule_spot_values() {
        let rows = default_bracket_rows(Jurisdiction::UnitedStates);

        assert_eq!(rows[0].upper_limit, Some(dec!(11600)));
        assert_eq!(rows[0].rate, Some(dec!(0.10)));
        assert_eq!(rows[6].upper_limit, None);
        assert_eq!(rows[6].rate, Some(dec!(0.37)));
    }

    #[test]
    fn korea_policy_is_flat_21_percent() {
        assert_eq!(
            default_policy(Jurisdiction::Korea),
            TaxPolicy::FlatRate { rate: dec!(0.21) }
        );
    }

    #[test]
    fn india_surcharge_ladder_is_ordered_highest_first() {
        let TaxPolicy::SurchargeAndCess { bands, cess_rate } =
            default_policy(Jurisdiction::India)
        else {
            panic!("India policy must stack surcharge and cess");
        };

        let thresholds: Vec<_> = bands.iter().map(|b| b.income_over).collect();
        assert_eq!(
            thresholds,
            vec![dec!(20000000), dec!(10000000), dec!(5000000)]
        );
        assert_eq!(cess_rate, dec!(0.04));
    }

    #[test]
    fn fx_defaults_are_positive_everywhere() {
        for jurisdiction in Jurisdiction::ALL {
            assert!(default_fx_rate(jurisdiction) > dec!(0));
        }
    }

    #[test]
    fn overlay_defaults_match_the_shipped_year() {
        let config = default_overlay_config();

        assert_eq!(config.exclusion, dec!(126500));
        assert_eq!(config.standard_deduction, dec!(14600));
    }
}
