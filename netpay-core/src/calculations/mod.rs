//! Tax calculation modules for the gross-to-net estimator.
//!
//! The slab walk in [`progressive`] is the shared helper; [`policy`]
//! composes it into per-jurisdiction statutory variants, [`overlay`] reuses
//! it for the home-country second layer, and [`scenario`] ties a full
//! computation together from explicit inputs.

pub mod common;
pub mod overlay;
pub mod policy;
pub mod progressive;
pub mod scenario;

pub use overlay::{
    OverlayConfig, OverlayOutcome, OverlayResult, OverlaySkipReason, OverlayWorksheet,
};
pub use policy::{LocalTaxResult, SurchargeBand, SurchargeDetail, TaxPolicy};
pub use progressive::{ProgressiveCalculator, Slab, TaxBreakdown};
pub use scenario::{OverlayRequest, ScenarioInput, ScenarioResult, UsdEquivalents, evaluate};
