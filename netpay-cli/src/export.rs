//! CSV export of the local-layer summary.

use std::io::Write;

use netpay_core::calculations::common::round_half_up;
use netpay_core::{CompensationInput, Jurisdiction, ScenarioResult};
use rust_decimal::Decimal;
use serde::Serialize;

/// One exported summary row.
///
/// Column names are part of the file format consumed by downstream
/// spreadsheets; amounts are rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "FX_to_USD")]
    pub fx_to_usd: Decimal,
    #[serde(rename = "Base")]
    pub base: Decimal,
    #[serde(rename = "Variable_%")]
    pub variable_pct: Decimal,
    #[serde(rename = "CRSU")]
    pub multi_year_cash: Decimal,
    #[serde(rename = "SignOn")]
    pub sign_on: Decimal,
    #[serde(rename = "Y1_RSU")]
    pub rsu_year1: Decimal,
    #[serde(rename = "Earned")]
    pub earned: Decimal,
    #[serde(rename = "Total_Comp")]
    pub total_comp: Decimal,
    #[serde(rename = "Local_Tax")]
    pub local_tax: Decimal,
    #[serde(rename = "Net_After_Local")]
    pub net_after_local: Decimal,
}

/// Rounds to two decimal places and pads the scale so whole amounts still
/// render with two fractional digits in the exported CSV (e.g. `100000.00`).
fn money(value: Decimal) -> Decimal {
    let mut rounded = round_half_up(value);
    rounded.rescale(2);
    rounded
}

impl SummaryRow {
    /// Builds the export row from the scenario inputs and its result.
    ///
    /// The variable component is exported as a whole percent, matching how
    /// it is entered.
    pub fn from_scenario(
        jurisdiction: Jurisdiction,
        fx_rate: Decimal,
        compensation: &CompensationInput,
        result: &ScenarioResult,
    ) -> Self {
        Self {
            country: jurisdiction.display_name().to_string(),
            fx_to_usd: fx_rate,
            base: money(compensation.base),
            variable_pct: (compensation.variable_pct * Decimal::ONE_HUNDRED).normalize(),
            multi_year_cash: money(compensation.multi_year_cash),
            sign_on: money(compensation.sign_on),
            rsu_year1: money(compensation.rsu_year1),
            earned: money(result.figures.earned),
            total_comp: money(result.figures.total),
            local_tax: money(result.local.tax),
            net_after_local: money(result.local.net),
        }
    }
}

/// Writes the summary row as a one-record CSV with a header line.
pub fn write_summary<W: Write>(
    writer: W,
    row: &SummaryRow,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.serialize(row)?;
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use netpay_core::{
        BracketSchedule, ScenarioInput, TaxPolicy, evaluate,
    };
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn evaluated_scenario() -> (CompensationInput, ScenarioResult) {
        let compensation = CompensationInput {
            base: dec!(100000),
            variable_pct: dec!(0.15),
            multi_year_cash: dec!(0),
            sign_on: dec!(5000),
            rsu_year1: dec!(20000),
        };
        let schedule = BracketSchedule::normalize(&[]);
        let policy = TaxPolicy::FlatRate { rate: dec!(0.21) };
        let input = ScenarioInput {
            jurisdiction: Jurisdiction::Korea,
            compensation,
            fx_rate: dec!(1350),
            policy: &policy,
            local_schedule: &schedule,
            overlay: None,
        };
        (compensation, evaluate(&input))
    }

    #[test]
    fn from_scenario_captures_inputs_and_local_layer() {
        let (compensation, result) = evaluated_scenario();

        let row =
            SummaryRow::from_scenario(Jurisdiction::Korea, dec!(1350), &compensation, &result);

        assert_eq!(row.country, "Korea");
        assert_eq!(row.variable_pct, dec!(15));
        assert_eq!(row.earned, dec!(120000.00));
        assert_eq!(row.total_comp, dec!(140000.00));
        assert_eq!(row.local_tax, dec!(29400.00));
        assert_eq!(row.net_after_local, dec!(110600.00));
    }

    #[test]
    fn write_summary_emits_header_and_one_record() {
        let (compensation, result) = evaluated_scenario();
        let row =
            SummaryRow::from_scenario(Jurisdiction::Korea, dec!(1350), &compensation, &result);

        let mut buffer = Vec::new();
        write_summary(&mut buffer, &row).expect("CSV write");
        let text = String::from_utf8(buffer).expect("utf8");

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some(
                "Country,FX_to_USD,Base,Variable_%,CRSU,SignOn,Y1_RSU,\
                 Earned,Total_Comp,Local_Tax,Net_After_Local"
            )
        );
        assert_eq!(
            lines.next(),
            Some("Korea,1350,100000.00,15,0.00,5000.00,20000.00,120000.00,140000.00,29400.00,110600.00")
        );
        assert_eq!(lines.next(), None);
    }
}
