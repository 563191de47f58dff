//! Full-scenario orchestration: compensation → local layer → USD view →
//! overlay.
//!
//! All configuration is passed in explicitly per call; there is no
//! process-wide state, so scenarios can be evaluated concurrently without
//! coordination.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::overlay::{
    OverlayConfig, OverlayOutcome, OverlaySkipReason, OverlayWorksheet,
};
use crate::calculations::policy::{LocalTaxResult, TaxPolicy};
use crate::models::{BracketSchedule, CompensationFigures, CompensationInput, Jurisdiction};

/// Request to run the home-country overlay on top of the local layer.
#[derive(Debug, Clone)]
pub struct OverlayRequest<'a> {
    pub home_schedule: &'a BracketSchedule,
    pub config: OverlayConfig,
}

/// Everything one computation needs, supplied by the caller.
#[derive(Debug, Clone)]
pub struct ScenarioInput<'a> {
    pub jurisdiction: Jurisdiction,
    pub compensation: CompensationInput,

    /// Local currency units per USD. Ignored for a United States
    /// assignment, which is its own USD view.
    pub fx_rate: Decimal,

    pub policy: &'a TaxPolicy,
    pub local_schedule: &'a BracketSchedule,

    /// `None` leaves the overlay off.
    pub overlay: Option<OverlayRequest<'a>>,
}

/// USD equivalents of the local layer, derived from the GROSS earned and
/// RSU figures, never from exemption-adjusted amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsdEquivalents {
    pub earned_usd: Decimal,
    pub rsu_usd: Decimal,
    pub local_tax_usd: Decimal,
    pub local_net_usd: Decimal,
}

/// Outcome of one scenario evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub figures: CompensationFigures,
    pub local: LocalTaxResult,

    /// `None` when the FX rate is non-positive and no conversion exists.
    pub usd: Option<UsdEquivalents>,

    pub overlay: OverlayOutcome,
}

/// Evaluates a full scenario.
///
/// The local layer always runs. The USD view exists whenever a positive FX
/// rate does. The overlay is skipped with a structured reason when the
/// assignment is in the home jurisdiction, when it was not requested, or
/// when the FX rate is non-positive; the last is the one condition that
/// blocks a computation outright.
pub fn evaluate(input: &ScenarioInput<'_>) -> ScenarioResult {
    let figures = input.compensation.figures();
    let local = input
        .policy
        .compute(input.local_schedule, figures.total, figures.earned);

    let fx_rate = if input.jurisdiction == Jurisdiction::UnitedStates {
        Decimal::ONE
    } else {
        input.fx_rate
    };
    let usd = (fx_rate > Decimal::ZERO).then(|| UsdEquivalents {
        earned_usd: figures.earned / fx_rate,
        rsu_usd: input.compensation.rsu_year1 / fx_rate,
        local_tax_usd: local.tax / fx_rate,
        local_net_usd: local.net / fx_rate,
    });

    let overlay = if input.jurisdiction == Jurisdiction::UnitedStates {
        OverlayOutcome::Skipped(OverlaySkipReason::HomeCountryAssignment)
    } else {
        match (&input.overlay, &usd) {
            (None, _) => OverlayOutcome::Skipped(OverlaySkipReason::Disabled),
            (Some(_), None) => OverlayOutcome::Skipped(OverlaySkipReason::NonPositiveFxRate),
            (Some(request), Some(usd)) => {
                let worksheet = OverlayWorksheet::new(request.home_schedule, request.config);
                OverlayOutcome::Computed(worksheet.calculate(
                    usd.earned_usd,
                    usd.rsu_usd,
                    usd.local_tax_usd,
                ))
            }
        }
    };

    ScenarioResult {
        figures,
        local,
        usd,
        overlay,
    }
}
