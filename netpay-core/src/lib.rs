pub mod calculations;
pub mod models;

pub use calculations::{
    LocalTaxResult, OverlayConfig, OverlayOutcome, OverlayRequest, OverlayResult,
    OverlaySkipReason, OverlayWorksheet, ProgressiveCalculator, ScenarioInput, ScenarioResult,
    Slab, SurchargeBand, SurchargeDetail, TaxBreakdown, TaxPolicy, UsdEquivalents, evaluate,
};
pub use models::*;
